//! 文档存储操作

use super::SeaOrmStorage;
use crate::entity::documents::{ActiveModel, Column, Entity as Documents};
use crate::errors::{DocReviewError, Result};
use crate::models::{
    PaginationInfo,
    documents::{
        entities::{Document, DocumentStatus},
        requests::{DocumentListQuery, NewDocument, UpdateDocumentRequest},
        responses::DocumentListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建文档记录（template_id 已在服务层解析并冻结）
    pub async fn create_document_impl(&self, doc: NewDocument) -> Result<Document> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            event_id: Set(doc.event_id),
            uploader_id: Set(doc.uploader_id),
            template_id: Set(doc.template_id),
            title: Set(doc.title),
            description: Set(doc.description),
            file_name: Set(doc.file_name),
            file_path: Set(doc.file_path),
            status: Set(DocumentStatus::Pending.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("创建文档失败: {e}")))?;

        Ok(result.into_document())
    }

    /// 通过 ID 获取文档
    pub async fn get_document_by_id_impl(&self, document_id: i64) -> Result<Option<Document>> {
        let result = Documents::find_by_id(document_id)
            .one(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询文档失败: {e}")))?;

        Ok(result.map(|m| m.into_document()))
    }

    /// 分页列出文档
    pub async fn list_documents_with_pagination_impl(
        &self,
        query: DocumentListQuery,
    ) -> Result<DocumentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Documents::find();

        if let Some(event_id) = query.event_id {
            select = select.filter(Column::EventId.eq(event_id));
        }

        if let Some(uploader_id) = query.uploader_id {
            select = select.filter(Column::UploaderId.eq(uploader_id));
        }

        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::FileName.contains(&escaped)),
            );
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询文档总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询文档页数失败: {e}")))?;

        let documents = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询文档列表失败: {e}")))?;

        Ok(DocumentListResponse {
            items: documents.into_iter().map(|m| m.into_document()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新文档元信息（标题/描述）
    pub async fn update_document_metadata_impl(
        &self,
        document_id: i64,
        update: UpdateDocumentRequest,
    ) -> Result<Option<Document>> {
        let existing = self.get_document_by_id_impl(document_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(document_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("更新文档失败: {e}")))?;

        self.get_document_by_id_impl(document_id).await
    }

    /// 替换文档文件
    ///
    /// 只改动文件名和存储路径；id、模板绑定、状态与既有评审全部保留。
    pub async fn replace_document_file_impl(
        &self,
        document_id: i64,
        file_name: &str,
        file_path: &str,
    ) -> Result<Option<Document>> {
        let existing = self.get_document_by_id_impl(document_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(document_id),
            file_name: Set(file_name.to_string()),
            file_path: Set(file_path.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("替换文档文件失败: {e}")))?;

        self.get_document_by_id_impl(document_id).await
    }

    /// 删除文档（评审与明细级联删除）
    pub async fn delete_document_impl(&self, document_id: i64) -> Result<bool> {
        let result = Documents::delete_by_id(document_id)
            .exec(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("删除文档失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

//! 评审活动存储操作

use super::SeaOrmStorage;
use crate::entity::documents::{Column as DocumentColumn, Entity as Documents};
use crate::entity::review_events::{ActiveModel, Column, Entity as ReviewEvents};
use crate::errors::{DocReviewError, Result};
use crate::models::{
    PaginationInfo,
    events::{
        entities::ReviewEvent,
        requests::{CreateEventData, EventListQuery, UpdateEventData},
        responses::EventListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建活动（创建即启用）
    pub async fn create_event_impl(&self, event: CreateEventData) -> Result<ReviewEvent> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(event.name),
            description: Set(event.description),
            template_id: Set(event.template_id),
            start_time: Set(event.start_time.map(|t| t.timestamp())),
            end_time: Set(event.end_time.map(|t| t.timestamp())),
            upload_deadline: Set(event.upload_deadline.map(|t| t.timestamp())),
            is_active: Set(true),
            created_by: Set(event.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("创建活动失败: {e}")))?;

        Ok(result.into_event())
    }

    /// 通过 ID 获取活动
    pub async fn get_event_by_id_impl(&self, event_id: i64) -> Result<Option<ReviewEvent>> {
        let result = ReviewEvents::find_by_id(event_id)
            .one(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询活动失败: {e}")))?;

        Ok(result.map(|m| m.into_event()))
    }

    /// 分页列出活动（管理端）
    pub async fn list_events_with_pagination_impl(
        &self,
        query: EventListQuery,
    ) -> Result<EventListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = ReviewEvents::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询活动总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询活动页数失败: {e}")))?;

        let events = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询活动列表失败: {e}")))?;

        Ok(EventListResponse {
            items: events.into_iter().map(|m| m.into_event()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出全部启用中的活动
    pub async fn list_active_events_impl(&self) -> Result<Vec<ReviewEvent>> {
        let events = ReviewEvents::find()
            .filter(Column::IsActive.eq(true))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询活动列表失败: {e}")))?;

        Ok(events.into_iter().map(|m| m.into_event()).collect())
    }

    /// 更新活动（template_id 创建后不可变，这里不提供修改入口）
    pub async fn update_event_impl(
        &self,
        event_id: i64,
        update: UpdateEventData,
    ) -> Result<Option<ReviewEvent>> {
        let existing = self.get_event_by_id_impl(event_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(event_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(start_time) = update.start_time {
            model.start_time = Set(start_time.map(|t| t.timestamp()));
        }

        if let Some(end_time) = update.end_time {
            model.end_time = Set(end_time.map(|t| t.timestamp()));
        }

        if let Some(upload_deadline) = update.upload_deadline {
            model.upload_deadline = Set(upload_deadline.map(|t| t.timestamp()));
        }

        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("更新活动失败: {e}")))?;

        self.get_event_by_id_impl(event_id).await
    }

    /// 级联删除活动
    ///
    /// 在单事务内收集其文档的存储文件路径并删除活动行；
    /// 文档、评审、明细与白名单行由外键级联移除。
    /// 返回 None 表示活动不存在，Some(paths) 为待磁盘清理的文件路径。
    pub async fn delete_event_impl(&self, event_id: i64) -> Result<Option<Vec<String>>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DocReviewError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = ReviewEvents::find_by_id(event_id)
            .one(&txn)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询活动失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        // 删除前收集文件路径，提交后由服务层清理磁盘
        let file_paths: Vec<String> = Documents::find()
            .select_only()
            .column(DocumentColumn::FilePath)
            .filter(DocumentColumn::EventId.eq(event_id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询文档文件失败: {e}")))?;

        ReviewEvents::delete_by_id(event_id)
            .exec(&txn)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("删除活动失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| DocReviewError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(file_paths))
    }
}

//! 评分模板存储操作

use super::SeaOrmStorage;
use crate::entity::review_events::{Column as EventColumn, Entity as ReviewEvents};
use crate::entity::scoring_templates::{ActiveModel, Column, Entity as ScoringTemplates};
use crate::entity::template_dimensions::{
    ActiveModel as DimensionActiveModel, Column as DimensionColumn, Entity as TemplateDimensions,
};
use crate::errors::{DocReviewError, Result};
use crate::models::{
    PaginationInfo,
    templates::{
        entities::{Dimension, ScoringTemplate},
        requests::{CreateTemplateRequest, DimensionInput, TemplateListQuery, UpdateTemplateRequest},
        responses::TemplateListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建模板及初始维度（单事务）
    pub async fn create_template_impl(
        &self,
        req: CreateTemplateRequest,
    ) -> Result<ScoringTemplate> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DocReviewError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let template = model
            .insert(&txn)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("创建模板失败: {e}")))?;

        // 维度按列表顺序编号
        for (index, dim) in req.dimensions.iter().enumerate() {
            let dim_model = DimensionActiveModel {
                template_id: Set(template.id),
                name: Set(dim.name.clone()),
                weight: Set(dim.weight),
                order_index: Set(index as i32),
                ..Default::default()
            };
            dim_model
                .insert(&txn)
                .await
                .map_err(|e| DocReviewError::database_operation(format!("创建维度失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| DocReviewError::database_operation(format!("提交事务失败: {e}")))?;

        let dimensions = self.load_dimensions(template.id).await?;
        Ok(template.into_template(dimensions))
    }

    /// 加载模板的按序维度列表
    pub(crate) async fn load_dimensions(&self, template_id: i64) -> Result<Vec<Dimension>> {
        let dims = TemplateDimensions::find()
            .filter(DimensionColumn::TemplateId.eq(template_id))
            .order_by_asc(DimensionColumn::OrderIndex)
            .all(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询维度失败: {e}")))?;

        Ok(dims.into_iter().map(|m| m.into_dimension()).collect())
    }

    /// 通过 ID 获取模板（含维度）
    pub async fn get_template_by_id_impl(
        &self,
        template_id: i64,
    ) -> Result<Option<ScoringTemplate>> {
        let result = ScoringTemplates::find_by_id(template_id)
            .one(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询模板失败: {e}")))?;

        match result {
            Some(model) => {
                let dimensions = self.load_dimensions(template_id).await?;
                Ok(Some(model.into_template(dimensions)))
            }
            None => Ok(None),
        }
    }

    /// 分页列出模板
    pub async fn list_templates_with_pagination_impl(
        &self,
        query: TemplateListQuery,
    ) -> Result<TemplateListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = ScoringTemplates::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询模板总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询模板页数失败: {e}")))?;

        let templates = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询模板列表失败: {e}")))?;

        // 批量加载当前页全部模板的维度，避免逐条查询
        let template_ids: Vec<i64> = templates.iter().map(|t| t.id).collect();
        let all_dims = TemplateDimensions::find()
            .filter(DimensionColumn::TemplateId.is_in(template_ids))
            .order_by_asc(DimensionColumn::OrderIndex)
            .all(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询维度失败: {e}")))?;

        let items = templates
            .into_iter()
            .map(|t| {
                let dims: Vec<Dimension> = all_dims
                    .iter()
                    .filter(|d| d.template_id == t.id)
                    .cloned()
                    .map(|d| d.into_dimension())
                    .collect();
                t.into_template(dims)
            })
            .collect();

        Ok(TemplateListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新模板基础信息
    pub async fn update_template_info_impl(
        &self,
        template_id: i64,
        update: UpdateTemplateRequest,
    ) -> Result<Option<ScoringTemplate>> {
        let existing = ScoringTemplates::find_by_id(template_id)
            .one(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询模板失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(template_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("更新模板失败: {e}")))?;

        self.get_template_by_id_impl(template_id).await
    }

    /// 整组替换模板维度（单事务删除重建）
    pub async fn replace_template_dimensions_impl(
        &self,
        template_id: i64,
        dimensions: Vec<DimensionInput>,
    ) -> Result<Option<ScoringTemplate>> {
        let existing = ScoringTemplates::find_by_id(template_id)
            .one(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询模板失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DocReviewError::database_operation(format!("开启事务失败: {e}")))?;

        TemplateDimensions::delete_many()
            .filter(DimensionColumn::TemplateId.eq(template_id))
            .exec(&txn)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("删除旧维度失败: {e}")))?;

        for (index, dim) in dimensions.iter().enumerate() {
            let dim_model = DimensionActiveModel {
                template_id: Set(template_id),
                name: Set(dim.name.clone()),
                weight: Set(dim.weight),
                order_index: Set(index as i32),
                ..Default::default()
            };
            dim_model
                .insert(&txn)
                .await
                .map_err(|e| DocReviewError::database_operation(format!("创建维度失败: {e}")))?;
        }

        let template_model = ActiveModel {
            id: Set(template_id),
            updated_at: Set(now),
            ..Default::default()
        };
        template_model
            .update(&txn)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("更新模板失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| DocReviewError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_template_by_id_impl(template_id).await
    }

    /// 删除模板（维度级联删除）
    pub async fn delete_template_impl(&self, template_id: i64) -> Result<bool> {
        let result = ScoringTemplates::delete_by_id(template_id)
            .exec(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("删除模板失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计引用该模板的活动数量
    pub async fn count_events_for_template_impl(
        &self,
        template_id: i64,
        only_active: bool,
    ) -> Result<u64> {
        let mut select = ReviewEvents::find().filter(EventColumn::TemplateId.eq(template_id));

        if only_active {
            select = select.filter(EventColumn::IsActive.eq(true));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("统计活动数量失败: {e}")))?;

        Ok(count)
    }
}

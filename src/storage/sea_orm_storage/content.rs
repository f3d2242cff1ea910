//! 公告与评审说明存储操作
//!
//! 两张表结构相同，用宏生成同构的 CRUD 实现。

use super::SeaOrmStorage;
use crate::errors::{DocReviewError, Result};
use crate::models::content::{
    entities::ContentItem,
    requests::{CreateContentRequest, UpdateContentRequest},
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

macro_rules! content_table_impls {
    ($entity:ident, $list:ident, $create:ident, $update:ident, $delete:ident, $label:literal) => {
        impl SeaOrmStorage {
            pub async fn $list(&self) -> Result<Vec<ContentItem>> {
                use crate::entity::$entity::{Column, Entity};

                let items = Entity::find()
                    .order_by_desc(Column::CreatedAt)
                    .all(&self.db)
                    .await
                    .map_err(|e| {
                        DocReviewError::database_operation(format!(
                            concat!("查询", $label, "失败: {}"),
                            e
                        ))
                    })?;

                Ok(items.into_iter().map(|m| m.into_content_item()).collect())
            }

            pub async fn $create(
                &self,
                created_by: i64,
                req: CreateContentRequest,
            ) -> Result<ContentItem> {
                use crate::entity::$entity::ActiveModel;

                let now = chrono::Utc::now().timestamp();
                let model = ActiveModel {
                    title: Set(req.title),
                    content: Set(req.content),
                    created_by: Set(created_by),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };

                let result = model.insert(&self.db).await.map_err(|e| {
                    DocReviewError::database_operation(format!(
                        concat!("创建", $label, "失败: {}"),
                        e
                    ))
                })?;

                Ok(result.into_content_item())
            }

            pub async fn $update(
                &self,
                id: i64,
                update: UpdateContentRequest,
            ) -> Result<Option<ContentItem>> {
                use crate::entity::$entity::{ActiveModel, Entity};

                let existing = Entity::find_by_id(id).one(&self.db).await.map_err(|e| {
                    DocReviewError::database_operation(format!(
                        concat!("查询", $label, "失败: {}"),
                        e
                    ))
                })?;
                if existing.is_none() {
                    return Ok(None);
                }

                let now = chrono::Utc::now().timestamp();
                let mut model = ActiveModel {
                    id: Set(id),
                    updated_at: Set(now),
                    ..Default::default()
                };

                if let Some(title) = update.title {
                    model.title = Set(title);
                }
                if let Some(content) = update.content {
                    model.content = Set(content);
                }

                let result = model.update(&self.db).await.map_err(|e| {
                    DocReviewError::database_operation(format!(
                        concat!("更新", $label, "失败: {}"),
                        e
                    ))
                })?;

                Ok(Some(result.into_content_item()))
            }

            pub async fn $delete(&self, id: i64) -> Result<bool> {
                use crate::entity::$entity::Entity;

                let result = Entity::delete_by_id(id).exec(&self.db).await.map_err(|e| {
                    DocReviewError::database_operation(format!(
                        concat!("删除", $label, "失败: {}"),
                        e
                    ))
                })?;

                Ok(result.rows_affected > 0)
            }
        }
    };
}

content_table_impls!(
    announcements,
    list_announcements_impl,
    create_announcement_impl,
    update_announcement_impl,
    delete_announcement_impl,
    "公告"
);

content_table_impls!(
    instructions,
    list_instructions_impl,
    create_instruction_impl,
    update_instruction_impl,
    delete_instruction_impl,
    "评审说明"
);

//! 系统设置存储操作

use super::SeaOrmStorage;
use crate::entity::settings::{ActiveModel, Entity as Settings};
use crate::errors::{DocReviewError, Result};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 读取设置值；空字符串视为未配置
    pub async fn get_setting_impl(&self, key: &str) -> Result<Option<String>> {
        let result = Settings::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询设置失败: {e}")))?;

        Ok(result
            .map(|m| m.value)
            .filter(|v| !v.trim().is_empty()))
    }

    /// 写入设置值（存在则覆盖）
    pub async fn set_setting_impl(
        &self,
        key: &str,
        value: &str,
        updated_by: Option<i64>,
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        let existing = Settings::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询设置失败: {e}")))?;

        match existing {
            Some(_) => {
                let model = ActiveModel {
                    key: Set(key.to_string()),
                    value: Set(value.to_string()),
                    updated_at: Set(now),
                    updated_by: Set(updated_by),
                    ..Default::default()
                };
                model
                    .update(&self.db)
                    .await
                    .map_err(|e| DocReviewError::database_operation(format!("更新设置失败: {e}")))?;
            }
            None => {
                let model = ActiveModel {
                    key: Set(key.to_string()),
                    value: Set(value.to_string()),
                    description: Set(None),
                    updated_at: Set(now),
                    updated_by: Set(updated_by),
                };
                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| DocReviewError::database_operation(format!("写入设置失败: {e}")))?;
            }
        }

        Ok(())
    }
}

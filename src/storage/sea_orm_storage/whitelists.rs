//! 活动白名单与评审者指派存储操作

use super::SeaOrmStorage;
use crate::entity::event_reviewers::{
    ActiveModel as EventReviewerActiveModel, Column as EventReviewerColumn,
    Entity as EventReviewers,
};
use crate::entity::event_teachers::{
    ActiveModel as EventTeacherActiveModel, Column as EventTeacherColumn, Entity as EventTeachers,
};
use crate::entity::reviewer_teachers::{
    ActiveModel as ReviewerTeacherActiveModel, Column as ReviewerTeacherColumn,
    Entity as ReviewerTeachers,
};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{DocReviewError, Result};
use crate::models::users::entities::User;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};

impl SeaOrmStorage {
    /// 按 ID 集合批量加载用户
    async fn load_users_by_ids(&self, ids: Vec<i64>) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let users = Users::find()
            .filter(UserColumn::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    // ==================== 活动教师白名单 ====================

    pub async fn add_event_teacher_impl(&self, event_id: i64, teacher_id: i64) -> Result<()> {
        let model = EventTeacherActiveModel {
            event_id: Set(event_id),
            teacher_id: Set(teacher_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("添加教师白名单失败: {e}")))?;

        Ok(())
    }

    pub async fn remove_event_teacher_impl(&self, event_id: i64, teacher_id: i64) -> Result<bool> {
        let result = EventTeachers::delete_many()
            .filter(EventTeacherColumn::EventId.eq(event_id))
            .filter(EventTeacherColumn::TeacherId.eq(teacher_id))
            .exec(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("移除教师白名单失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_event_teacher_ids_impl(&self, event_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = EventTeachers::find()
            .select_only()
            .column(EventTeacherColumn::TeacherId)
            .filter(EventTeacherColumn::EventId.eq(event_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询教师白名单失败: {e}")))?;

        Ok(ids)
    }

    pub async fn list_event_teachers_impl(&self, event_id: i64) -> Result<Vec<User>> {
        let ids = self.list_event_teacher_ids_impl(event_id).await?;
        self.load_users_by_ids(ids).await
    }

    // ==================== 活动评审者白名单 ====================

    pub async fn add_event_reviewer_impl(&self, event_id: i64, reviewer_id: i64) -> Result<()> {
        let model = EventReviewerActiveModel {
            event_id: Set(event_id),
            reviewer_id: Set(reviewer_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model.insert(&self.db).await.map_err(|e| {
            DocReviewError::database_operation(format!("添加评审者白名单失败: {e}"))
        })?;

        Ok(())
    }

    pub async fn remove_event_reviewer_impl(
        &self,
        event_id: i64,
        reviewer_id: i64,
    ) -> Result<bool> {
        let result = EventReviewers::delete_many()
            .filter(EventReviewerColumn::EventId.eq(event_id))
            .filter(EventReviewerColumn::ReviewerId.eq(reviewer_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                DocReviewError::database_operation(format!("移除评审者白名单失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_event_reviewer_ids_impl(&self, event_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = EventReviewers::find()
            .select_only()
            .column(EventReviewerColumn::ReviewerId)
            .filter(EventReviewerColumn::EventId.eq(event_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                DocReviewError::database_operation(format!("查询评审者白名单失败: {e}"))
            })?;

        Ok(ids)
    }

    pub async fn list_event_reviewers_impl(&self, event_id: i64) -> Result<Vec<User>> {
        let ids = self.list_event_reviewer_ids_impl(event_id).await?;
        self.load_users_by_ids(ids).await
    }

    // ==================== 评审者-教师指派 ====================

    pub async fn add_reviewer_teacher_impl(&self, reviewer_id: i64, teacher_id: i64) -> Result<()> {
        let model = ReviewerTeacherActiveModel {
            reviewer_id: Set(reviewer_id),
            teacher_id: Set(teacher_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("添加指派失败: {e}")))?;

        Ok(())
    }

    pub async fn remove_reviewer_teacher_impl(
        &self,
        reviewer_id: i64,
        teacher_id: i64,
    ) -> Result<bool> {
        let result = ReviewerTeachers::delete_many()
            .filter(ReviewerTeacherColumn::ReviewerId.eq(reviewer_id))
            .filter(ReviewerTeacherColumn::TeacherId.eq(teacher_id))
            .exec(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("移除指派失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_reviewer_teacher_ids_impl(&self, reviewer_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = ReviewerTeachers::find()
            .select_only()
            .column(ReviewerTeacherColumn::TeacherId)
            .filter(ReviewerTeacherColumn::ReviewerId.eq(reviewer_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询指派失败: {e}")))?;

        Ok(ids)
    }

    pub async fn list_reviewer_teachers_impl(&self, reviewer_id: i64) -> Result<Vec<User>> {
        let ids = self.list_reviewer_teacher_ids_impl(reviewer_id).await?;
        self.load_users_by_ids(ids).await
    }
}

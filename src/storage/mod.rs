use std::sync::Arc;

use crate::models::{
    content::{
        entities::ContentItem,
        requests::{CreateContentRequest, UpdateContentRequest},
    },
    documents::{
        entities::Document,
        requests::{DocumentListQuery, NewDocument, UpdateDocumentRequest},
        responses::DocumentListResponse,
    },
    events::{
        entities::ReviewEvent,
        requests::{CreateEventData, EventListQuery, UpdateEventData},
        responses::EventListResponse,
    },
    reviews::{
        entities::{Review, ReviewDetail},
        requests::DimensionScoreInput,
        responses::ReviewWithDetails,
    },
    templates::{
        entities::ScoringTemplate,
        requests::{CreateTemplateRequest, DimensionInput, TemplateListQuery, UpdateTemplateRequest},
        responses::TemplateListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户（级联删除其文档与评审）
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 评分模板方法
    // 创建模板（含初始维度，按列表顺序编号）
    async fn create_template(&self, template: CreateTemplateRequest) -> Result<ScoringTemplate>;
    // 获取模板及其按序维度列表
    async fn get_template_by_id(&self, template_id: i64) -> Result<Option<ScoringTemplate>>;
    // 列出模板
    async fn list_templates_with_pagination(
        &self,
        query: TemplateListQuery,
    ) -> Result<TemplateListResponse>;
    // 更新模板基础信息（名称/描述）
    async fn update_template_info(
        &self,
        template_id: i64,
        update: UpdateTemplateRequest,
    ) -> Result<Option<ScoringTemplate>>;
    // 整组替换模板维度（事务内删除重建）
    async fn replace_template_dimensions(
        &self,
        template_id: i64,
        dimensions: Vec<DimensionInput>,
    ) -> Result<Option<ScoringTemplate>>;
    // 删除模板（级联删除维度）
    async fn delete_template(&self, template_id: i64) -> Result<bool>;
    // 统计引用该模板的活动数量
    async fn count_events_for_template(&self, template_id: i64, only_active: bool) -> Result<u64>;

    /// 评审活动方法
    // 创建活动
    async fn create_event(&self, event: CreateEventData) -> Result<ReviewEvent>;
    // 通过ID获取活动
    async fn get_event_by_id(&self, event_id: i64) -> Result<Option<ReviewEvent>>;
    // 列出活动（管理端，分页）
    async fn list_events_with_pagination(&self, query: EventListQuery)
    -> Result<EventListResponse>;
    // 列出全部启用中的活动（可见性解析用）
    async fn list_active_events(&self) -> Result<Vec<ReviewEvent>>;
    // 更新活动（template_id 不可变）
    async fn update_event(
        &self,
        event_id: i64,
        update: UpdateEventData,
    ) -> Result<Option<ReviewEvent>>;
    // 级联删除活动，返回其文档的存储文件路径供磁盘清理
    async fn delete_event(&self, event_id: i64) -> Result<Option<Vec<String>>>;

    /// 白名单与指派方法
    // 活动教师白名单
    async fn add_event_teacher(&self, event_id: i64, teacher_id: i64) -> Result<()>;
    async fn remove_event_teacher(&self, event_id: i64, teacher_id: i64) -> Result<bool>;
    async fn list_event_teachers(&self, event_id: i64) -> Result<Vec<User>>;
    async fn list_event_teacher_ids(&self, event_id: i64) -> Result<Vec<i64>>;
    // 活动评审者白名单
    async fn add_event_reviewer(&self, event_id: i64, reviewer_id: i64) -> Result<()>;
    async fn remove_event_reviewer(&self, event_id: i64, reviewer_id: i64) -> Result<bool>;
    async fn list_event_reviewers(&self, event_id: i64) -> Result<Vec<User>>;
    async fn list_event_reviewer_ids(&self, event_id: i64) -> Result<Vec<i64>>;
    // 评审者-教师指派
    async fn add_reviewer_teacher(&self, reviewer_id: i64, teacher_id: i64) -> Result<()>;
    async fn remove_reviewer_teacher(&self, reviewer_id: i64, teacher_id: i64) -> Result<bool>;
    async fn list_reviewer_teacher_ids(&self, reviewer_id: i64) -> Result<Vec<i64>>;
    async fn list_reviewer_teachers(&self, reviewer_id: i64) -> Result<Vec<User>>;

    /// 文档方法
    // 创建文档记录（文件已落盘）
    async fn create_document(&self, document: NewDocument) -> Result<Document>;
    // 通过ID获取文档
    async fn get_document_by_id(&self, document_id: i64) -> Result<Option<Document>>;
    // 列出文档
    async fn list_documents_with_pagination(
        &self,
        query: DocumentListQuery,
    ) -> Result<DocumentListResponse>;
    // 更新文档元信息
    async fn update_document_metadata(
        &self,
        document_id: i64,
        update: UpdateDocumentRequest,
    ) -> Result<Option<Document>>;
    // 替换文档文件（保留 id、模板绑定与全部评审）
    async fn replace_document_file(
        &self,
        document_id: i64,
        file_name: &str,
        file_path: &str,
    ) -> Result<Option<Document>>;
    // 删除文档（级联删除评审与明细）
    async fn delete_document(&self, document_id: i64) -> Result<bool>;

    /// 评审方法
    // 获取某评审者对某文档的评审
    async fn get_review(&self, document_id: i64, reviewer_id: i64) -> Result<Option<Review>>;
    // 获取评审的维度明细
    async fn get_review_details(&self, review_id: i64) -> Result<Vec<ReviewDetail>>;
    // 列出文档的全部评审（含明细）
    async fn list_reviews_with_details(&self, document_id: i64) -> Result<Vec<ReviewWithDetails>>;
    // 列出文档的已完成评审及其全部明细（聚合计算用）
    async fn list_completed_reviews_with_details(
        &self,
        document_id: i64,
    ) -> Result<(Vec<Review>, Vec<ReviewDetail>)>;
    // 提交/重提评审：单事务内 upsert 评审行、整组替换明细并推进文档状态
    async fn submit_review(
        &self,
        document_id: i64,
        reviewer_id: i64,
        composite_score: f64,
        comment: Option<String>,
        details: Vec<DimensionScoreInput>,
    ) -> Result<Review>;
    // 列出评审者的全部评审
    async fn list_reviews_by_reviewer(&self, reviewer_id: i64) -> Result<Vec<Review>>;

    /// 系统设置方法
    async fn get_setting(&self, key: &str) -> Result<Option<String>>;
    async fn set_setting(&self, key: &str, value: &str, updated_by: Option<i64>) -> Result<()>;

    /// 公告与评审说明方法
    async fn list_announcements(&self) -> Result<Vec<ContentItem>>;
    async fn create_announcement(
        &self,
        created_by: i64,
        content: CreateContentRequest,
    ) -> Result<ContentItem>;
    async fn update_announcement(
        &self,
        id: i64,
        update: UpdateContentRequest,
    ) -> Result<Option<ContentItem>>;
    async fn delete_announcement(&self, id: i64) -> Result<bool>;
    async fn list_instructions(&self) -> Result<Vec<ContentItem>>;
    async fn create_instruction(
        &self,
        created_by: i64,
        content: CreateContentRequest,
    ) -> Result<ContentItem>;
    async fn update_instruction(
        &self,
        id: i64,
        update: UpdateContentRequest,
    ) -> Result<Option<ContentItem>>;
    async fn delete_instruction(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

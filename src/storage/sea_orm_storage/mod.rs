//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod content;
mod documents;
mod events;
mod reviews;
mod settings;
mod templates;
mod users;
mod whitelists;

use crate::config::AppConfig;
use crate::errors::{DocReviewError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| DocReviewError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("foreign_keys", "ON")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| DocReviewError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| DocReviewError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(DocReviewError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 评分模板模块
    async fn create_template(&self, template: CreateTemplateRequest) -> Result<ScoringTemplate> {
        self.create_template_impl(template).await
    }

    async fn get_template_by_id(&self, template_id: i64) -> Result<Option<ScoringTemplate>> {
        self.get_template_by_id_impl(template_id).await
    }

    async fn list_templates_with_pagination(
        &self,
        query: TemplateListQuery,
    ) -> Result<TemplateListResponse> {
        self.list_templates_with_pagination_impl(query).await
    }

    async fn update_template_info(
        &self,
        template_id: i64,
        update: UpdateTemplateRequest,
    ) -> Result<Option<ScoringTemplate>> {
        self.update_template_info_impl(template_id, update).await
    }

    async fn replace_template_dimensions(
        &self,
        template_id: i64,
        dimensions: Vec<DimensionInput>,
    ) -> Result<Option<ScoringTemplate>> {
        self.replace_template_dimensions_impl(template_id, dimensions)
            .await
    }

    async fn delete_template(&self, template_id: i64) -> Result<bool> {
        self.delete_template_impl(template_id).await
    }

    async fn count_events_for_template(&self, template_id: i64, only_active: bool) -> Result<u64> {
        self.count_events_for_template_impl(template_id, only_active)
            .await
    }

    // 评审活动模块
    async fn create_event(&self, event: CreateEventData) -> Result<ReviewEvent> {
        self.create_event_impl(event).await
    }

    async fn get_event_by_id(&self, event_id: i64) -> Result<Option<ReviewEvent>> {
        self.get_event_by_id_impl(event_id).await
    }

    async fn list_events_with_pagination(
        &self,
        query: EventListQuery,
    ) -> Result<EventListResponse> {
        self.list_events_with_pagination_impl(query).await
    }

    async fn list_active_events(&self) -> Result<Vec<ReviewEvent>> {
        self.list_active_events_impl().await
    }

    async fn update_event(
        &self,
        event_id: i64,
        update: UpdateEventData,
    ) -> Result<Option<ReviewEvent>> {
        self.update_event_impl(event_id, update).await
    }

    async fn delete_event(&self, event_id: i64) -> Result<Option<Vec<String>>> {
        self.delete_event_impl(event_id).await
    }

    // 白名单与指派模块
    async fn add_event_teacher(&self, event_id: i64, teacher_id: i64) -> Result<()> {
        self.add_event_teacher_impl(event_id, teacher_id).await
    }

    async fn remove_event_teacher(&self, event_id: i64, teacher_id: i64) -> Result<bool> {
        self.remove_event_teacher_impl(event_id, teacher_id).await
    }

    async fn list_event_teachers(&self, event_id: i64) -> Result<Vec<User>> {
        self.list_event_teachers_impl(event_id).await
    }

    async fn list_event_teacher_ids(&self, event_id: i64) -> Result<Vec<i64>> {
        self.list_event_teacher_ids_impl(event_id).await
    }

    async fn add_event_reviewer(&self, event_id: i64, reviewer_id: i64) -> Result<()> {
        self.add_event_reviewer_impl(event_id, reviewer_id).await
    }

    async fn remove_event_reviewer(&self, event_id: i64, reviewer_id: i64) -> Result<bool> {
        self.remove_event_reviewer_impl(event_id, reviewer_id).await
    }

    async fn list_event_reviewers(&self, event_id: i64) -> Result<Vec<User>> {
        self.list_event_reviewers_impl(event_id).await
    }

    async fn list_event_reviewer_ids(&self, event_id: i64) -> Result<Vec<i64>> {
        self.list_event_reviewer_ids_impl(event_id).await
    }

    async fn add_reviewer_teacher(&self, reviewer_id: i64, teacher_id: i64) -> Result<()> {
        self.add_reviewer_teacher_impl(reviewer_id, teacher_id).await
    }

    async fn remove_reviewer_teacher(&self, reviewer_id: i64, teacher_id: i64) -> Result<bool> {
        self.remove_reviewer_teacher_impl(reviewer_id, teacher_id)
            .await
    }

    async fn list_reviewer_teacher_ids(&self, reviewer_id: i64) -> Result<Vec<i64>> {
        self.list_reviewer_teacher_ids_impl(reviewer_id).await
    }

    async fn list_reviewer_teachers(&self, reviewer_id: i64) -> Result<Vec<User>> {
        self.list_reviewer_teachers_impl(reviewer_id).await
    }

    // 文档模块
    async fn create_document(&self, document: NewDocument) -> Result<Document> {
        self.create_document_impl(document).await
    }

    async fn get_document_by_id(&self, document_id: i64) -> Result<Option<Document>> {
        self.get_document_by_id_impl(document_id).await
    }

    async fn list_documents_with_pagination(
        &self,
        query: DocumentListQuery,
    ) -> Result<DocumentListResponse> {
        self.list_documents_with_pagination_impl(query).await
    }

    async fn update_document_metadata(
        &self,
        document_id: i64,
        update: UpdateDocumentRequest,
    ) -> Result<Option<Document>> {
        self.update_document_metadata_impl(document_id, update).await
    }

    async fn replace_document_file(
        &self,
        document_id: i64,
        file_name: &str,
        file_path: &str,
    ) -> Result<Option<Document>> {
        self.replace_document_file_impl(document_id, file_name, file_path)
            .await
    }

    async fn delete_document(&self, document_id: i64) -> Result<bool> {
        self.delete_document_impl(document_id).await
    }

    // 评审模块
    async fn get_review(&self, document_id: i64, reviewer_id: i64) -> Result<Option<Review>> {
        self.get_review_impl(document_id, reviewer_id).await
    }

    async fn get_review_details(&self, review_id: i64) -> Result<Vec<ReviewDetail>> {
        self.get_review_details_impl(review_id).await
    }

    async fn list_reviews_with_details(&self, document_id: i64) -> Result<Vec<ReviewWithDetails>> {
        self.list_reviews_with_details_impl(document_id).await
    }

    async fn list_completed_reviews_with_details(
        &self,
        document_id: i64,
    ) -> Result<(Vec<Review>, Vec<ReviewDetail>)> {
        self.list_completed_reviews_with_details_impl(document_id)
            .await
    }

    async fn submit_review(
        &self,
        document_id: i64,
        reviewer_id: i64,
        composite_score: f64,
        comment: Option<String>,
        details: Vec<DimensionScoreInput>,
    ) -> Result<Review> {
        self.submit_review_impl(document_id, reviewer_id, composite_score, comment, details)
            .await
    }

    async fn list_reviews_by_reviewer(&self, reviewer_id: i64) -> Result<Vec<Review>> {
        self.list_reviews_by_reviewer_impl(reviewer_id).await
    }

    // 系统设置模块
    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.get_setting_impl(key).await
    }

    async fn set_setting(&self, key: &str, value: &str, updated_by: Option<i64>) -> Result<()> {
        self.set_setting_impl(key, value, updated_by).await
    }

    // 公告与评审说明模块
    async fn list_announcements(&self) -> Result<Vec<ContentItem>> {
        self.list_announcements_impl().await
    }

    async fn create_announcement(
        &self,
        created_by: i64,
        content: CreateContentRequest,
    ) -> Result<ContentItem> {
        self.create_announcement_impl(created_by, content).await
    }

    async fn update_announcement(
        &self,
        id: i64,
        update: UpdateContentRequest,
    ) -> Result<Option<ContentItem>> {
        self.update_announcement_impl(id, update).await
    }

    async fn delete_announcement(&self, id: i64) -> Result<bool> {
        self.delete_announcement_impl(id).await
    }

    async fn list_instructions(&self) -> Result<Vec<ContentItem>> {
        self.list_instructions_impl().await
    }

    async fn create_instruction(
        &self,
        created_by: i64,
        content: CreateContentRequest,
    ) -> Result<ContentItem> {
        self.create_instruction_impl(created_by, content).await
    }

    async fn update_instruction(
        &self,
        id: i64,
        update: UpdateContentRequest,
    ) -> Result<Option<ContentItem>> {
        self.update_instruction_impl(id, update).await
    }

    async fn delete_instruction(&self, id: i64) -> Result<bool> {
        self.delete_instruction_impl(id).await
    }
}

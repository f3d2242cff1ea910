//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod announcements;
pub mod documents;
pub mod event_reviewers;
pub mod event_teachers;
pub mod instructions;
pub mod review_details;
pub mod review_events;
pub mod reviewer_teachers;
pub mod reviews;
pub mod scoring_templates;
pub mod settings;
pub mod template_dimensions;
pub mod users;

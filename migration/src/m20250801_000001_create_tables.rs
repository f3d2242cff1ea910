use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::DisplayName).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建评分模板表
        manager
            .create_table(
                Table::create()
                    .table(ScoringTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScoringTemplates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScoringTemplates::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ScoringTemplates::Description).text().null())
                    .col(
                        ColumnDef::new(ScoringTemplates::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScoringTemplates::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建模板维度表
        manager
            .create_table(
                Table::create()
                    .table(TemplateDimensions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TemplateDimensions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TemplateDimensions::TemplateId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TemplateDimensions::Name).string().not_null())
                    .col(
                        ColumnDef::new(TemplateDimensions::Weight)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemplateDimensions::OrderIndex)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TemplateDimensions::Table, TemplateDimensions::TemplateId)
                            .to(ScoringTemplates::Table, ScoringTemplates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评审活动表
        manager
            .create_table(
                Table::create()
                    .table(ReviewEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReviewEvents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ReviewEvents::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ReviewEvents::Description).text().null())
                    .col(
                        ColumnDef::new(ReviewEvents::TemplateId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReviewEvents::StartTime).big_integer().null())
                    .col(ColumnDef::new(ReviewEvents::EndTime).big_integer().null())
                    .col(
                        ColumnDef::new(ReviewEvents::UploadDeadline)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ReviewEvents::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ReviewEvents::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReviewEvents::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReviewEvents::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReviewEvents::Table, ReviewEvents::TemplateId)
                            .to(ScoringTemplates::Table, ScoringTemplates::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReviewEvents::Table, ReviewEvents::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建活动教师白名单表
        manager
            .create_table(
                Table::create()
                    .table(EventTeachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventTeachers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EventTeachers::EventId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventTeachers::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventTeachers::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventTeachers::Table, EventTeachers::EventId)
                            .to(ReviewEvents::Table, ReviewEvents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventTeachers::Table, EventTeachers::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建活动评审白名单表
        manager
            .create_table(
                Table::create()
                    .table(EventReviewers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventReviewers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EventReviewers::EventId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventReviewers::ReviewerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventReviewers::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventReviewers::Table, EventReviewers::EventId)
                            .to(ReviewEvents::Table, ReviewEvents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventReviewers::Table, EventReviewers::ReviewerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评审-教师指派表
        manager
            .create_table(
                Table::create()
                    .table(ReviewerTeachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReviewerTeachers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ReviewerTeachers::ReviewerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReviewerTeachers::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReviewerTeachers::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReviewerTeachers::Table, ReviewerTeachers::ReviewerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReviewerTeachers::Table, ReviewerTeachers::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建文档表
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Documents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Documents::EventId).big_integer().null())
                    .col(
                        ColumnDef::new(Documents::UploaderId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Documents::TemplateId).big_integer().null())
                    .col(ColumnDef::new(Documents::Title).string().not_null())
                    .col(ColumnDef::new(Documents::Description).text().null())
                    .col(ColumnDef::new(Documents::FileName).string().not_null())
                    .col(ColumnDef::new(Documents::FilePath).string().not_null())
                    .col(ColumnDef::new(Documents::Status).string().not_null())
                    .col(ColumnDef::new(Documents::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Documents::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Documents::Table, Documents::EventId)
                            .to(ReviewEvents::Table, ReviewEvents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Documents::Table, Documents::UploaderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Documents::Table, Documents::TemplateId)
                            .to(ScoringTemplates::Table, ScoringTemplates::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评审表
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reviews::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reviews::DocumentId).big_integer().not_null())
                    .col(ColumnDef::new(Reviews::ReviewerId).big_integer().not_null())
                    .col(ColumnDef::new(Reviews::Score).double().null())
                    .col(ColumnDef::new(Reviews::Comment).text().null())
                    .col(ColumnDef::new(Reviews::Status).string().not_null())
                    .col(ColumnDef::new(Reviews::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Reviews::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reviews::Table, Reviews::DocumentId)
                            .to(Documents::Table, Documents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reviews::Table, Reviews::ReviewerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评审明细表
        manager
            .create_table(
                Table::create()
                    .table(ReviewDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReviewDetails::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ReviewDetails::ReviewId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReviewDetails::DimensionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReviewDetails::Score).double().not_null())
                    .col(ColumnDef::new(ReviewDetails::Comment).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReviewDetails::Table, ReviewDetails::ReviewId)
                            .to(Reviews::Table, Reviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReviewDetails::Table, ReviewDetails::DimensionId)
                            .to(TemplateDimensions::Table, TemplateDimensions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一约束：一个评审者对一个文档只有一条评审
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_reviews_document_reviewer")
                    .table(Reviews::Table)
                    .col(Reviews::DocumentId)
                    .col(Reviews::ReviewerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 唯一约束：一条评审内每个维度只有一条明细
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_review_details_review_dimension")
                    .table(ReviewDetails::Table)
                    .col(ReviewDetails::ReviewId)
                    .col(ReviewDetails::DimensionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 白名单与指派关系的唯一约束
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_event_teachers_event_teacher")
                    .table(EventTeachers::Table)
                    .col(EventTeachers::EventId)
                    .col(EventTeachers::TeacherId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_event_reviewers_event_reviewer")
                    .table(EventReviewers::Table)
                    .col(EventReviewers::EventId)
                    .col(EventReviewers::ReviewerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_reviewer_teachers_reviewer_teacher")
                    .table(ReviewerTeachers::Table)
                    .col(ReviewerTeachers::ReviewerId)
                    .col(ReviewerTeachers::TeacherId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 常用查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_template_dimensions_template_id")
                    .table(TemplateDimensions::Table)
                    .col(TemplateDimensions::TemplateId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_documents_event_id")
                    .table(Documents::Table)
                    .col(Documents::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_documents_uploader_id")
                    .table(Documents::Table)
                    .col(Documents::UploaderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reviews_document_id")
                    .table(Reviews::Table)
                    .col(Reviews::DocumentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reviews_reviewer_id")
                    .table(Reviews::Table)
                    .col(Reviews::ReviewerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_review_details_review_id")
                    .table(ReviewDetails::Table)
                    .col(ReviewDetails::ReviewId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(ReviewDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ReviewerTeachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventReviewers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventTeachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ReviewEvents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TemplateDimensions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScoringTemplates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    DisplayName,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ScoringTemplates {
    #[sea_orm(iden = "scoring_templates")]
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TemplateDimensions {
    #[sea_orm(iden = "template_dimensions")]
    Table,
    Id,
    TemplateId,
    Name,
    Weight,
    OrderIndex,
}

#[derive(DeriveIden)]
enum ReviewEvents {
    #[sea_orm(iden = "review_events")]
    Table,
    Id,
    Name,
    Description,
    TemplateId,
    StartTime,
    EndTime,
    UploadDeadline,
    IsActive,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EventTeachers {
    #[sea_orm(iden = "event_teachers")]
    Table,
    Id,
    EventId,
    TeacherId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum EventReviewers {
    #[sea_orm(iden = "event_reviewers")]
    Table,
    Id,
    EventId,
    ReviewerId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ReviewerTeachers {
    #[sea_orm(iden = "reviewer_teachers")]
    Table,
    Id,
    ReviewerId,
    TeacherId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Documents {
    #[sea_orm(iden = "documents")]
    Table,
    Id,
    EventId,
    UploaderId,
    TemplateId,
    Title,
    Description,
    FileName,
    FilePath,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Reviews {
    #[sea_orm(iden = "reviews")]
    Table,
    Id,
    DocumentId,
    ReviewerId,
    Score,
    Comment,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ReviewDetails {
    #[sea_orm(iden = "review_details")]
    Table,
    Id,
    ReviewId,
    DimensionId,
    Score,
    Comment,
}

pub use super::announcements::Entity as Announcements;
pub use super::documents::Entity as Documents;
pub use super::event_reviewers::Entity as EventReviewers;
pub use super::event_teachers::Entity as EventTeachers;
pub use super::instructions::Entity as Instructions;
pub use super::review_details::Entity as ReviewDetails;
pub use super::review_events::Entity as ReviewEvents;
pub use super::reviewer_teachers::Entity as ReviewerTeachers;
pub use super::reviews::Entity as Reviews;
pub use super::scoring_templates::Entity as ScoringTemplates;
pub use super::settings::Entity as Settings;
pub use super::template_dimensions::Entity as TemplateDimensions;
pub use super::users::Entity as Users;

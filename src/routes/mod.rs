pub mod auth;

pub mod users;

pub mod templates;

pub mod events;

pub mod documents;

pub mod reviews;

pub mod content;

pub mod system;

pub use auth::configure_auth_routes;
pub use content::configure_content_routes;
pub use documents::configure_document_routes;
pub use events::configure_event_routes;
pub use reviews::configure_review_routes;
pub use system::configure_system_routes;
pub use templates::configure_template_routes;
pub use users::configure_user_routes;

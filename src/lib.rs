pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{ServiceError, SiteService};
pub use domain::mail::{Branding, MailDispatcher};
pub use infra::config::AppConfig;
pub use storage::document::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
pub use storage::uploads::UploadStore;
pub use transport::http::{create_router, ApiDoc, AppState};

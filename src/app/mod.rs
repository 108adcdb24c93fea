pub mod catalog;
pub mod content;
pub mod error;
pub mod leads;
pub mod site_service;

pub use error::ServiceError;
pub use site_service::SiteService;

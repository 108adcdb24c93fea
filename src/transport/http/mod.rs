pub mod body;
pub mod cors;
pub mod error;
pub mod multipart;
pub mod router;
pub mod security;
pub mod types;
pub mod handlers {
    pub mod blogs;
    pub mod common;
    pub mod health;
    pub mod hospitals;
    pub mod leads;
    pub mod newsletter;
    pub mod products;
    pub mod services;
}

pub use cors::CorsPolicy;
pub use router::{create_router, ApiDoc};
pub use types::AppState;

// src/bin/api_server.rs

use globalcare_api::domain::mail::{Branding, MailDispatcher};
use globalcare_api::infra::config::{AppConfig, DEFAULT_LOG_FILTER};
use globalcare_api::infra::logging;
use globalcare_api::infra::mail::SmtpRelay;
use globalcare_api::storage::document;
use globalcare_api::transport::http::{self, CorsPolicy};
use globalcare_api::{SiteService, UploadStore};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    logging::init(DEFAULT_LOG_FILTER);

    // --- Store ---
    tracing::info!("connecting document store");
    let store = document::connect(&config.database_url, config.db_max_connections).await?;

    // --- Uploads ---
    let uploads = Arc::new(UploadStore::open(&config.upload_dir).await?);

    // --- Mail ---
    let relay = Arc::new(SmtpRelay::new(&config.smtp)?);
    let mut brand = Branding::default();
    if let Some(site_url) = &config.site_url {
        brand.site_url = site_url.clone();
    }
    let mailer = MailDispatcher::new(relay, config.mail_from.clone(), brand);

    let app_state = http::AppState {
        site: Arc::new(SiteService::new(store.clone(), uploads, mailer)),
        cors: Arc::new(CorsPolicy::new(config.cors_origins.iter().cloned())),
        max_upload_bytes: config.max_upload_bytes,
    };

    // --- API Server ---
    let app = http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", http::ApiDoc::openapi()));
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui", config.port);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received, closing store");
            store.close().await;
            tracing::info!("graceful shutdown complete");
        }
    }

    Ok(())
}

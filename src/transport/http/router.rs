use crate::domain::model::{
    AskQueryDraft, BroadcastDraft, ContactDraft, HospitalDraft, NewsletterDraft, QuoteDraft,
    ReviewDraft,
};
use crate::storage::uploads::PUBLIC_PREFIX;
use crate::transport::http::cors::cors_middleware;
use crate::transport::http::handlers::{
    blogs, health, hospitals, leads, newsletter, products, services,
};
use crate::transport::http::security::with_security_headers;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root_handler,
        health::healthcheck_handler,
        blogs::create_blog_handler,
        blogs::list_blogs_handler,
        blogs::get_blog_handler,
        blogs::delete_blog_handler,
        products::create_product_handler,
        products::list_products_handler,
        products::get_product_handler,
        products::delete_product_handler,
        products::review_product_handler,
        services::create_service_handler,
        services::list_services_handler,
        services::get_service_handler,
        services::delete_service_handler,
        services::review_service_handler,
        leads::submit_contact_handler,
        leads::list_contacts_handler,
        leads::get_contact_handler,
        leads::submit_quote_handler,
        leads::list_quotes_handler,
        leads::get_quote_handler,
        leads::submit_query_handler,
        leads::list_queries_handler,
        leads::get_query_handler,
        newsletter::subscribe_handler,
        newsletter::list_subscribers_handler,
        newsletter::send_newsletter_handler,
        hospitals::create_hospital_handler,
        hospitals::list_hospitals_handler,
        hospitals::get_hospital_handler,
        hospitals::delete_hospital_handler
    ),
    components(schemas(
        ApiResponse,
        ReviewDraft,
        ContactDraft,
        QuoteDraft,
        AskQueryDraft,
        NewsletterDraft,
        BroadcastDraft,
        HospitalDraft
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    let uploads = ServeDir::new(app_state.site.uploads().dir());
    let cors = app_state.cors.clone();
    // JSON, urlencoded and multipart bodies share one cap.
    let body_limit = DefaultBodyLimit::max(app_state.max_upload_bytes);

    let api = Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/blogs",
            post(blogs::create_blog_handler).get(blogs::list_blogs_handler),
        )
        .route(
            "/api/blogs/:id",
            get(blogs::get_blog_handler).delete(blogs::delete_blog_handler),
        )
        .route(
            "/api/products",
            post(products::create_product_handler).get(products::list_products_handler),
        )
        .route(
            "/api/products/:id",
            get(products::get_product_handler).delete(products::delete_product_handler),
        )
        .route("/api/products/:id/review", post(products::review_product_handler))
        .route(
            "/api/services",
            post(services::create_service_handler).get(services::list_services_handler),
        )
        .route(
            "/api/services/:id",
            get(services::get_service_handler).delete(services::delete_service_handler),
        )
        .route("/api/services/:id/review", post(services::review_service_handler))
        .route(
            "/api/contact",
            post(leads::submit_contact_handler).get(leads::list_contacts_handler),
        )
        .route("/api/contact/:id", get(leads::get_contact_handler))
        .route(
            "/api/quotes",
            post(leads::submit_quote_handler).get(leads::list_quotes_handler),
        )
        .route("/api/quotes/:id", get(leads::get_quote_handler))
        .route(
            "/api/ask-query",
            post(leads::submit_query_handler).get(leads::list_queries_handler),
        )
        .route("/api/ask-query/:id", get(leads::get_query_handler))
        .route(
            "/api/newsletter",
            post(newsletter::subscribe_handler).get(newsletter::list_subscribers_handler),
        )
        .route("/api/sendNewsletter", post(newsletter::send_newsletter_handler))
        .route(
            "/api/hospitals",
            post(hospitals::create_hospital_handler).get(hospitals::list_hospitals_handler),
        )
        .route(
            "/api/hospitals/:id",
            get(hospitals::get_hospital_handler).delete(hospitals::delete_hospital_handler),
        );

    with_security_headers(api)
        .nest_service(PUBLIC_PREFIX, uploads)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(cors, cors_middleware))
        .with_state(app_state)
}

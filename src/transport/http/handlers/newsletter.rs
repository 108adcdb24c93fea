use crate::domain::model::{BroadcastDraft, NewsletterDraft, Subscriber};
use crate::transport::http::body::JsonOrForm;
use crate::transport::http::handlers::common::list_response;
use crate::transport::http::types::{respond_with_message, ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// The welcome mail is sent in the background; its failure does not affect the response.
#[utoipa::path(
    post,
    path = "/api/newsletter",
    request_body = NewsletterDraft,
    responses(
        (status = 201, description = "Subscribed", body = ApiResponse),
        (status = 400, description = "Missing or invalid email", body = ApiResponse),
        (status = 409, description = "Email already subscribed", body = ApiResponse)
    )
)]
pub async fn subscribe_handler(
    State(state): State<AppState>,
    JsonOrForm(draft): JsonOrForm<NewsletterDraft>,
) -> Response {
    respond_with_message(
        StatusCode::CREATED,
        state.site.subscribe(draft).await,
        Some("Subscribed successfully"),
    )
}

#[utoipa::path(
    get,
    path = "/api/newsletter",
    responses((status = 200, description = "Subscribers, newest first", body = ApiResponse))
)]
pub async fn list_subscribers_handler(State(state): State<AppState>) -> Response {
    list_response::<Subscriber>(&state).await
}

/// Sends one message with every subscriber as a blind copy.
#[utoipa::path(
    post,
    path = "/api/sendNewsletter",
    request_body = BroadcastDraft,
    responses(
        (status = 200, description = "Newsletter sent; `data.recipients` is the subscriber count", body = ApiResponse),
        (status = 400, description = "Missing subject or message", body = ApiResponse),
        (status = 500, description = "Mail relay failure", body = ApiResponse)
    )
)]
pub async fn send_newsletter_handler(
    State(state): State<AppState>,
    JsonOrForm(draft): JsonOrForm<BroadcastDraft>,
) -> Response {
    match state.site.broadcast_newsletter(draft).await {
        Ok(recipients) => {
            let message = if recipients == 0 {
                "No subscribers to send to"
            } else {
                "Newsletter sent successfully"
            };
            (
                StatusCode::OK,
                Json(ApiResponse::ok(serde_json::json!({ "recipients": recipients })).with_message(message)),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

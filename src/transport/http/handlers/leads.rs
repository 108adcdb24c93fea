use crate::domain::model::{AskQuery, AskQueryDraft, Contact, ContactDraft, Quote, QuoteDraft};
use crate::transport::http::body::JsonOrForm;
use crate::transport::http::handlers::common::{fetch_response, list_response};
use crate::transport::http::types::{respond, AppState};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

/// Stores the request and mails an acknowledgement before answering.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactDraft,
    responses(
        (status = 201, description = "Contact stored and acknowledged", body = ApiResponse),
        (status = 400, description = "Missing name, email or phone", body = ApiResponse),
        (status = 500, description = "Store or mail relay failure (record may already be stored)", body = ApiResponse)
    )
)]
pub async fn submit_contact_handler(
    State(state): State<AppState>,
    JsonOrForm(draft): JsonOrForm<ContactDraft>,
) -> Response {
    respond(StatusCode::CREATED, state.site.submit_contact(draft).await)
}

#[utoipa::path(
    get,
    path = "/api/contact",
    responses((status = 200, description = "Contact requests, newest first", body = ApiResponse))
)]
pub async fn list_contacts_handler(State(state): State<AppState>) -> Response {
    list_response::<Contact>(&state).await
}

#[utoipa::path(
    get,
    path = "/api/contact/{id}",
    params(("id" = String, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact request", body = ApiResponse),
        (status = 404, description = "Contact not found", body = ApiResponse)
    )
)]
pub async fn get_contact_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    fetch_response::<Contact>(&state, &id).await
}

#[utoipa::path(
    post,
    path = "/api/quotes",
    request_body = QuoteDraft,
    responses(
        (status = 201, description = "Quote request stored and acknowledged", body = ApiResponse),
        (status = 400, description = "Missing name or email", body = ApiResponse),
        (status = 500, description = "Store or mail relay failure (record may already be stored)", body = ApiResponse)
    )
)]
pub async fn submit_quote_handler(
    State(state): State<AppState>,
    JsonOrForm(draft): JsonOrForm<QuoteDraft>,
) -> Response {
    respond(StatusCode::CREATED, state.site.submit_quote(draft).await)
}

#[utoipa::path(
    get,
    path = "/api/quotes",
    responses((status = 200, description = "Quote requests, newest first", body = ApiResponse))
)]
pub async fn list_quotes_handler(State(state): State<AppState>) -> Response {
    list_response::<Quote>(&state).await
}

#[utoipa::path(
    get,
    path = "/api/quotes/{id}",
    params(("id" = String, Path, description = "Quote id")),
    responses(
        (status = 200, description = "Quote request", body = ApiResponse),
        (status = 404, description = "Quote not found", body = ApiResponse)
    )
)]
pub async fn get_quote_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    fetch_response::<Quote>(&state, &id).await
}

#[utoipa::path(
    post,
    path = "/api/ask-query",
    request_body = AskQueryDraft,
    responses(
        (status = 201, description = "Query stored", body = ApiResponse),
        (status = 400, description = "Missing field", body = ApiResponse)
    )
)]
pub async fn submit_query_handler(
    State(state): State<AppState>,
    JsonOrForm(draft): JsonOrForm<AskQueryDraft>,
) -> Response {
    respond(StatusCode::CREATED, state.site.submit_query(draft).await)
}

#[utoipa::path(
    get,
    path = "/api/ask-query",
    responses((status = 200, description = "Queries, newest first", body = ApiResponse))
)]
pub async fn list_queries_handler(State(state): State<AppState>) -> Response {
    list_response::<AskQuery>(&state).await
}

#[utoipa::path(
    get,
    path = "/api/ask-query/{id}",
    params(("id" = String, Path, description = "Query id")),
    responses(
        (status = 200, description = "Query", body = ApiResponse),
        (status = 404, description = "Query not found", body = ApiResponse)
    )
)]
pub async fn get_query_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    fetch_response::<AskQuery>(&state, &id).await
}

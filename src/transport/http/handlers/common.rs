//! Response helpers shared by the per-entity handlers.

use crate::domain::model::Document;
use crate::transport::http::types::{respond, ApiResponse, AppState};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub async fn list_response<T: Document>(state: &AppState) -> Response {
    respond(StatusCode::OK, state.site.list::<T>().await)
}

pub async fn fetch_response<T: Document>(state: &AppState, id: &str) -> Response {
    respond(StatusCode::OK, state.site.fetch::<T>(id).await)
}

pub async fn delete_response<T: Document>(state: &AppState, id: &str) -> Response {
    match state.site.delete::<T>(id).await {
        Ok(record) => (
            StatusCode::OK,
            Json(
                ApiResponse::ok(serde_json::json!({ "_id": record.id }))
                    .with_message(format!("{} deleted successfully", T::LABEL)),
            ),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

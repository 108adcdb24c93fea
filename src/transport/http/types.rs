use crate::app::{ServiceError, SiteService};
use crate::transport::http::cors::CorsPolicy;
use axum::extract::multipart::MultipartRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteService>,
    pub cors: Arc<CorsPolicy>,
    /// Request body cap for every route, uploads included.
    pub max_upload_bytes: usize,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Renders a service result: `status` with the serialized value, or the mapped error.
pub fn respond<T: Serialize>(status: StatusCode, result: Result<T, ServiceError>) -> Response {
    respond_with_message(status, result, None)
}

pub fn respond_with_message<T: Serialize>(
    status: StatusCode,
    result: Result<T, ServiceError>,
    message: Option<&str>,
) -> Response {
    match result {
        Ok(value) => match serde_json::to_value(&value) {
            Ok(data) => {
                let mut body = ApiResponse::ok(data);
                body.message = message.map(str::to_string);
                (status, Json(body)).into_response()
            }
            Err(e) => {
                tracing::error!(error = %e, "response serialization failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::failure("Internal server error")),
                )
                    .into_response()
            }
        },
        Err(e) => e.into_response(),
    }
}

/// 400 for a request body that could not be read into the expected draft.
pub fn body_400(reason: impl std::fmt::Display) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::failure(format!("Invalid request body: {}", reason))),
    )
}

pub fn multipart_400(err: MultipartRejection) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::failure(format!("Invalid multipart body: {}", err))),
    )
}

use crate::domain::model::{ReviewDraft, Service, MAX_BROCHURES, MAX_SERVICE_IMAGES};
use crate::transport::http::body::JsonOrForm;
use crate::transport::http::handlers::common::{delete_response, fetch_response, list_response};
use crate::transport::http::multipart::{FileLimit, MultipartForm};
use crate::transport::http::types::{multipart_400, respond, AppState};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

const SERVICE_FILES: &[FileLimit] = &[
    FileLimit::new("images", MAX_SERVICE_IMAGES),
    FileLimit::new("brochure", MAX_BROCHURES),
];

/// Multipart fields: `title` (required), `description`, `specs` (JSON array of
/// `{title, value}`), `features` (JSON array of strings), up to ten `images` files and one
/// `brochure` file.
#[utoipa::path(
    post,
    path = "/api/services",
    responses(
        (status = 201, description = "Service created", body = ApiResponse),
        (status = 400, description = "Validation failed, malformed specs/features, or too many files", body = ApiResponse),
        (status = 500, description = "Upload or store failure", body = ApiResponse)
    )
)]
pub async fn create_service_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let multipart = match multipart {
        Ok(m) => m,
        Err(e) => return multipart_400(e).into_response(),
    };

    let result = async {
        let mut form = MultipartForm::read(multipart, SERVICE_FILES).await?;
        let images = form.take_files("images");
        let brochure = form.take_files("brochure").pop();
        state.site.create_service(form.draft()?, images, brochure).await
    }
    .await;
    respond(StatusCode::CREATED, result)
}

#[utoipa::path(
    get,
    path = "/api/services",
    responses((status = 200, description = "Services, newest first", body = ApiResponse))
)]
pub async fn list_services_handler(State(state): State<AppState>) -> Response {
    list_response::<Service>(&state).await
}

#[utoipa::path(
    get,
    path = "/api/services/{id}",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service", body = ApiResponse),
        (status = 404, description = "Service not found", body = ApiResponse)
    )
)]
pub async fn get_service_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    fetch_response::<Service>(&state, &id).await
}

#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service, its images and brochure deleted", body = ApiResponse),
        (status = 404, description = "Service not found", body = ApiResponse)
    )
)]
pub async fn delete_service_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    delete_response::<Service>(&state, &id).await
}

/// Service reviews do not keep the reviewer's email.
#[utoipa::path(
    post,
    path = "/api/services/{id}/review",
    params(("id" = String, Path, description = "Service id")),
    request_body = ReviewDraft,
    responses(
        (status = 200, description = "Review added; returns the service", body = ApiResponse),
        (status = 400, description = "Missing name or rating outside 1-5", body = ApiResponse),
        (status = 404, description = "Service not found", body = ApiResponse)
    )
)]
pub async fn review_service_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonOrForm(draft): JsonOrForm<ReviewDraft>,
) -> Response {
    respond(StatusCode::OK, state.site.add_review::<Service>(&id, draft).await)
}

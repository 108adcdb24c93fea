use crate::domain::model::{Product, ReviewDraft, MAX_PRODUCT_IMAGES};
use crate::transport::http::body::JsonOrForm;
use crate::transport::http::handlers::common::{delete_response, fetch_response, list_response};
use crate::transport::http::multipart::{FileLimit, MultipartForm};
use crate::transport::http::types::{multipart_400, respond, AppState};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

const PRODUCT_FILES: &[FileLimit] = &[FileLimit::new("images", MAX_PRODUCT_IMAGES)];

/// Multipart fields: `name` and `description` (required), `category`, `rating` (0-5),
/// `details`, `material`, `dimensions`, `ventilation`, `reusable` (`Yes`/`No`), and up to
/// four `images` files.
#[utoipa::path(
    post,
    path = "/api/products",
    responses(
        (status = 201, description = "Product created", body = ApiResponse),
        (status = 400, description = "Validation failed or too many images", body = ApiResponse),
        (status = 500, description = "Upload or store failure", body = ApiResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let multipart = match multipart {
        Ok(m) => m,
        Err(e) => return multipart_400(e).into_response(),
    };

    let result = async {
        let mut form = MultipartForm::read(multipart, PRODUCT_FILES).await?;
        let images = form.take_files("images");
        state.site.create_product(form.draft()?, images).await
    }
    .await;
    respond(StatusCode::CREATED, result)
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses((status = 200, description = "Products, newest first", body = ApiResponse))
)]
pub async fn list_products_handler(State(state): State<AppState>) -> Response {
    list_response::<Product>(&state).await
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ApiResponse),
        (status = 404, description = "Product not found", body = ApiResponse)
    )
)]
pub async fn get_product_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    fetch_response::<Product>(&state, &id).await
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product and its images deleted", body = ApiResponse),
        (status = 404, description = "Product not found", body = ApiResponse)
    )
)]
pub async fn delete_product_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    delete_response::<Product>(&state, &id).await
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/review",
    params(("id" = String, Path, description = "Product id")),
    request_body = ReviewDraft,
    responses(
        (status = 200, description = "Review added; returns the product", body = ApiResponse),
        (status = 400, description = "Missing name or rating outside 1-5", body = ApiResponse),
        (status = 404, description = "Product not found", body = ApiResponse)
    )
)]
pub async fn review_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonOrForm(draft): JsonOrForm<ReviewDraft>,
) -> Response {
    respond(StatusCode::OK, state.site.add_review::<Product>(&id, draft).await)
}

use crate::domain::model::Blog;
use crate::transport::http::handlers::common::{delete_response, fetch_response, list_response};
use crate::transport::http::multipart::{FileLimit, MultipartForm};
use crate::transport::http::types::{multipart_400, respond, AppState};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

const BLOG_FILES: &[FileLimit] = &[FileLimit::new("image", 1)];

/// Multipart fields: `title` (required), `tagline`, `dateTime`, `location`, `mapLink`,
/// and an optional `image` file.
#[utoipa::path(
    post,
    path = "/api/blogs",
    responses(
        (status = 201, description = "Blog created", body = ApiResponse),
        (status = 400, description = "Missing title or unexpected file", body = ApiResponse),
        (status = 500, description = "Upload or store failure", body = ApiResponse)
    )
)]
pub async fn create_blog_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let multipart = match multipart {
        Ok(m) => m,
        Err(e) => return multipart_400(e).into_response(),
    };

    let result = async {
        let mut form = MultipartForm::read(multipart, BLOG_FILES).await?;
        let image = form.take_files("image").pop();
        state.site.create_blog(form.draft()?, image).await
    }
    .await;
    respond(StatusCode::CREATED, result)
}

#[utoipa::path(
    get,
    path = "/api/blogs",
    responses((status = 200, description = "Blogs, newest first", body = ApiResponse))
)]
pub async fn list_blogs_handler(State(state): State<AppState>) -> Response {
    list_response::<Blog>(&state).await
}

#[utoipa::path(
    get,
    path = "/api/blogs/{id}",
    params(("id" = String, Path, description = "Blog id")),
    responses(
        (status = 200, description = "Blog", body = ApiResponse),
        (status = 404, description = "Blog not found", body = ApiResponse)
    )
)]
pub async fn get_blog_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    fetch_response::<Blog>(&state, &id).await
}

#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    params(("id" = String, Path, description = "Blog id")),
    responses(
        (status = 200, description = "Blog and its image deleted", body = ApiResponse),
        (status = 404, description = "Blog not found", body = ApiResponse)
    )
)]
pub async fn delete_blog_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    delete_response::<Blog>(&state, &id).await
}

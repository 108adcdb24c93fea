use crate::domain::model::{HospitalCard, HospitalDraft};
use crate::transport::http::body::JsonOrForm;
use crate::transport::http::handlers::common::{delete_response, fetch_response, list_response};
use crate::transport::http::types::{respond, AppState};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

#[utoipa::path(
    post,
    path = "/api/hospitals",
    request_body = HospitalDraft,
    responses(
        (status = 201, description = "Hospital card created", body = ApiResponse),
        (status = 400, description = "Missing name, location or description", body = ApiResponse)
    )
)]
pub async fn create_hospital_handler(
    State(state): State<AppState>,
    JsonOrForm(draft): JsonOrForm<HospitalDraft>,
) -> Response {
    respond(StatusCode::CREATED, state.site.create_hospital(draft).await)
}

/// Most recently added card first.
#[utoipa::path(
    get,
    path = "/api/hospitals",
    responses((status = 200, description = "Hospital cards, reverse insertion order", body = ApiResponse))
)]
pub async fn list_hospitals_handler(State(state): State<AppState>) -> Response {
    list_response::<HospitalCard>(&state).await
}

#[utoipa::path(
    get,
    path = "/api/hospitals/{id}",
    params(("id" = String, Path, description = "Hospital card id")),
    responses(
        (status = 200, description = "Hospital card", body = ApiResponse),
        (status = 404, description = "Hospital card not found", body = ApiResponse)
    )
)]
pub async fn get_hospital_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    fetch_response::<HospitalCard>(&state, &id).await
}

#[utoipa::path(
    delete,
    path = "/api/hospitals/{id}",
    params(("id" = String, Path, description = "Hospital card id")),
    responses(
        (status = 200, description = "Hospital card deleted", body = ApiResponse),
        (status = 404, description = "Hospital card not found", body = ApiResponse)
    )
)]
pub async fn delete_hospital_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    delete_response::<HospitalCard>(&state, &id).await
}

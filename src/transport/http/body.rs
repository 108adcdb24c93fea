//! Request body extractor for the non-upload endpoints.

use crate::transport::http::types::{body_400, ApiResponse};
use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::{Form, Json};
use serde::de::DeserializeOwned;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Deserializes a JSON body, or a urlencoded one when the content type says so.
///
/// An oversized body keeps its 413; every other failure is a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with(FORM_CONTENT_TYPE));

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| reject(e.status(), e.body_text()))?;
            Ok(Self(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| reject(e.status(), e.body_text()))?;
            Ok(Self(value))
        }
    }
}

fn reject(status: StatusCode, reason: String) -> (StatusCode, Json<ApiResponse>) {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        (status, Json(ApiResponse::failure("Request body too large")))
    } else {
        body_400(reason)
    }
}

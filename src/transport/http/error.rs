use crate::app::ServiceError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Persistence(_) | ServiceError::Upload(_) | ServiceError::Relay(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the client. Store and filesystem details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ServiceError::Persistence(_) => "Internal server error".to_string(),
            ServiceError::Upload(_) => "Failed to store uploaded files".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(ApiResponse::failure(self.public_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ValidationError;
    use crate::infra::mail::RelayError;
    use crate::storage::document::StoreError;

    #[test]
    fn statuses_follow_the_error_kind() {
        assert_eq!(
            ServiceError::from(ValidationError::MissingField("phone")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ServiceError::NotFound("Blog").status(), StatusCode::NOT_FOUND);
        let duplicate = StoreError::Duplicate {
            collection: "newsletters".to_string(),
            key: "a@b.c".to_string(),
        };
        assert_eq!(ServiceError::from(duplicate).status(), StatusCode::CONFLICT);
        assert_eq!(
            ServiceError::from(RelayError::Transport("refused".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn authentication_failures_keep_their_message() {
        let err = ServiceError::from(RelayError::Authentication("535".to_string()));
        assert_eq!(
            err.public_message(),
            "Email authentication failed. Please check credentials."
        );
    }
}

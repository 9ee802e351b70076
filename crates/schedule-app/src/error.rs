use salvo::http::StatusCode;
use salvo::writing::Json;
use serde::Serialize;
use thiserror::Error;

use schedule_service::error::ServiceError;
use schedule_store::error::StoreError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    /// HTTP status a handler answers with for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let Self::ServiceError(error) = self;
        match error {
            ServiceError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            ServiceError::ValidationError(_) | ServiceError::RecurError(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotFound(_) | ServiceError::StoreError(StoreError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            ServiceError::StoreError(StoreError::Directory(_) | StoreError::Http(_)) => {
                StatusCode::BAD_GATEWAY
            }
            ServiceError::InvalidConfiguration(_) | ServiceError::InvariantViolation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to return to the client.
    #[must_use]
    pub fn public_message(&self) -> String {
        let Self::ServiceError(error) = self;
        match error {
            ServiceError::ValidationError(msg) => msg.clone(),
            ServiceError::NotFound(what) => format!("{what} not found"),
            ServiceError::StoreError(StoreError::Directory(_) | StoreError::Http(_)) => {
                "Classroom service unavailable".to_string()
            }
            _ if self.status_code().is_server_error() => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// ## Summary
/// Logs `error` and writes its status and `{"error": ...}` body to `res`.
pub fn render_error(res: &mut salvo::Response, error: &AppError) {
    let status = error.status_code();
    if status.is_server_error() {
        tracing::error!(error = ?error, %status, "Request failed");
    } else {
        tracing::debug!(error = %error, %status, "Request rejected");
    }

    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: error.public_message(),
    }));
}

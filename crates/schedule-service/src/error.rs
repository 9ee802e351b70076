use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    StoreError(#[from] schedule_store::error::StoreError),

    #[error(transparent)]
    RecurError(#[from] schedule_recur::error::RecurError),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

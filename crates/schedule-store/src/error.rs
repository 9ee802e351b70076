use thiserror::Error;

/// Store and directory errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Schedule entry not found: {0}")]
    NotFound(uuid::Uuid),

    #[error("Membership directory error: {0}")]
    Directory(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

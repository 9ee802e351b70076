use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised by the guarded expansion entry points and input validation.
///
/// Plain expansion never fails; these only come from [`crate::expand_with`]
/// and the `validate_*` helpers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurError {
    #[error("Invalid window: from {from} is after to {to}")]
    InvalidWindow {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    #[error("Invalid interval: end {end} is before start {start}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Expansion exceeds the limit of {limit} occurrences")]
    TooManyOccurrences { limit: usize },
}

pub type RecurResult<T> = std::result::Result<T, RecurError>;

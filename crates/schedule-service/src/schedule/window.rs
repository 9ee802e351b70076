use chrono::{DateTime, NaiveDate, Utc};
use schedule_recur::validate_window;

use crate::error::{ServiceError, ServiceResult};

/// An inclusive query range `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl QueryWindow {
    /// ## Summary
    /// Builds a window, rejecting one whose `from` is after its `to`.
    ///
    /// ## Errors
    /// Returns `RecurError::InvalidWindow` wrapped in `ServiceError`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> ServiceResult<Self> {
        validate_window(from, to)?;
        Ok(Self { from, to })
    }

    /// ## Summary
    /// Parses both bounds with [`parse_instant`] and validates the window.
    ///
    /// ## Errors
    /// Returns `ValidationError` if a bound is missing or malformed, or an
    /// invalid-window error if `from` is after `to`.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> ServiceResult<Self> {
        let (Some(from), Some(to)) = (
            from.filter(|s| !s.is_empty()),
            to.filter(|s| !s.is_empty()),
        ) else {
            return Err(ServiceError::ValidationError(
                "From and to are required".to_string(),
            ));
        };

        Self::new(parse_instant(from)?, parse_instant(to)?)
    }
}

/// ## Summary
/// Parses an RFC 3339 instant, or a `YYYY-MM-DD` date meaning midnight UTC.
///
/// ## Errors
/// Returns `ValidationError` if the value is neither form.
pub fn parse_instant(value: &str) -> ServiceResult<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ServiceError::ValidationError(format!("Invalid date format: {value}")))
}

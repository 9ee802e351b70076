//! Calendar stepping for recurrence rules.

use chrono::{DateTime, Days, Months, TimeDelta, Utc};
use schedule_core::types::RecurrenceRule;

/// ## Summary
/// Advances `instant` by one period of `rule`.
///
/// Month and year steps clamp to the last day of the target month when the
/// day-of-month does not exist there: Jan 31 + 1 month is Feb 28 (Feb 29 in
/// leap years), Feb 29 + 1 year is Feb 28.
///
/// Returns `None` for `RecurrenceRule::None`, which never steps, and when the
/// result would leave the representable range.
#[must_use]
pub fn step(instant: DateTime<Utc>, rule: RecurrenceRule) -> Option<DateTime<Utc>> {
    match rule {
        RecurrenceRule::None => None,
        RecurrenceRule::Daily => instant.checked_add_days(Days::new(1)),
        RecurrenceRule::Weekly => instant.checked_add_days(Days::new(7)),
        RecurrenceRule::Monthly => instant.checked_add_months(Months::new(1)),
        RecurrenceRule::Yearly => instant.checked_add_months(Months::new(12)),
    }
}

/// Length of one period for rules whose period is a fixed duration in UTC.
///
/// Calendar months and years vary in length, so only daily and weekly rules
/// qualify.
#[must_use]
pub fn fixed_period(rule: RecurrenceRule) -> Option<TimeDelta> {
    match rule {
        RecurrenceRule::Daily => Some(TimeDelta::days(1)),
        RecurrenceRule::Weekly => Some(TimeDelta::weeks(1)),
        RecurrenceRule::None | RecurrenceRule::Monthly | RecurrenceRule::Yearly => None,
    }
}

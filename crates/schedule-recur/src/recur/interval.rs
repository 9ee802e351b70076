use chrono::{DateTime, TimeDelta, Utc};
use schedule_core::types::RecurrenceRule;
use serde::{Deserialize, Serialize};

use super::step::{fixed_period, step};
use crate::error::{RecurError, RecurResult};

/// A pair of absolute instants.
///
/// `start <= end` is expected but not enforced; see [`Interval::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// ## Summary
    /// Returns true if the start or the end of this interval falls inside the
    /// inclusive window `[from, to]`.
    ///
    /// This is not general interval intersection: an interval that begins
    /// before `from` and ends after `to` does not overlap.
    #[must_use]
    pub fn overlaps(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        let window = from..=to;
        window.contains(&self.start) || window.contains(&self.end)
    }

    /// ## Summary
    /// Moves both endpoints forward by one period of `rule`.
    ///
    /// Returns `None` when `rule` is `RecurrenceRule::None` or either
    /// endpoint leaves the representable range.
    #[must_use]
    pub fn step(self, rule: RecurrenceRule) -> Option<Self> {
        Some(Self {
            start: step(self.start, rule)?,
            end: step(self.end, rule)?,
        })
    }

    /// ## Summary
    /// Jumps over whole periods of `rule` lying entirely before `from`.
    ///
    /// The result is what repeated [`Interval::step`] calls would reach, and
    /// every skipped period had both its start and end strictly before
    /// `from`. Rules without a fixed period are returned unchanged.
    #[must_use]
    pub fn skip_before(self, rule: RecurrenceRule, from: DateTime<Utc>) -> Self {
        let Some(period) = fixed_period(rule) else {
            return self;
        };

        let latest = self.start.max(self.end);
        if latest >= from {
            return self;
        }

        let periods = from.signed_duration_since(latest).num_seconds() / period.num_seconds();
        if periods == 0 {
            return self;
        }

        self.shift(periods, period).unwrap_or(self)
    }

    fn shift(self, periods: i64, period: TimeDelta) -> Option<Self> {
        let jump = TimeDelta::try_seconds(periods.checked_mul(period.num_seconds())?)?;
        Some(Self {
            start: self.start.checked_add_signed(jump)?,
            end: self.end.checked_add_signed(jump)?,
        })
    }

    /// ## Summary
    /// Checks that the interval does not end before it starts.
    ///
    /// ## Errors
    /// Returns `RecurError::InvalidInterval` if `end < start`.
    pub fn validate(&self) -> RecurResult<()> {
        if self.end < self.start {
            return Err(RecurError::InvalidInterval {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end.signed_duration_since(self.start)
    }
}

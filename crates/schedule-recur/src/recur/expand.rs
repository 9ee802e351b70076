use std::iter::FusedIterator;

use chrono::{DateTime, Utc};
use schedule_core::types::{RecurrenceRule, RepeatEndPolicy};
use serde::{Deserialize, Serialize};

use super::interval::Interval;
use crate::error::{RecurError, RecurResult};

/// A stored entry as seen by the expander.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Owning resource (classroom), copied into every occurrence.
    pub resource_id: String,
    /// The first occurrence.
    pub interval: Interval,
    pub rule: RecurrenceRule,
    /// No occurrence of a repeating entry may start at or after this instant.
    pub repeat_end: Option<DateTime<Utc>>,
}

/// One concrete occurrence of a schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occurrence {
    pub resource_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Occurrence {
    #[must_use]
    pub const fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// Policy knobs for [`expand_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpansionOptions {
    /// Reject expansions of a single entry yielding more occurrences than this.
    pub max_occurrences: Option<usize>,
    pub repeat_end_policy: RepeatEndPolicy,
}

/// Lazy, ordered occurrences of one entry within a window.
///
/// Iterates over a private working copy of the entry's interval; the entry
/// itself is only borrowed.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    entry: &'a ScheduleEntry,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    stop_at: Option<DateTime<Utc>>,
    cursor: Option<Interval>,
}

impl<'a> Occurrences<'a> {
    fn new(
        entry: &'a ScheduleEntry,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        policy: RepeatEndPolicy,
    ) -> Self {
        let cursor = if entry.rule.repeats() {
            match entry.repeat_end {
                // The recurrence ended before the window begins.
                Some(repeat_end) if repeat_end <= from => None,
                _ => Some(entry.interval.skip_before(entry.rule, from)),
            }
        } else {
            Some(entry.interval)
        };

        let stop_at = match policy {
            RepeatEndPolicy::EntryGate => None,
            RepeatEndPolicy::PerOccurrence => entry.repeat_end,
        };

        Self {
            entry,
            from,
            to,
            stop_at,
            cursor,
        }
    }

    fn occurrence(&self, interval: Interval) -> Occurrence {
        Occurrence {
            resource_id: self.entry.resource_id.clone(),
            start: interval.start,
            end: interval.end,
        }
    }

    fn exhausted(&self, current: &Interval) -> bool {
        current.start >= self.to || self.stop_at.is_some_and(|stop| current.start >= stop)
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.entry.rule.repeats() {
            let interval = self.cursor.take()?;
            return interval
                .overlaps(self.from, self.to)
                .then(|| self.occurrence(interval));
        }

        while let Some(current) = self.cursor {
            if self.exhausted(&current) {
                self.cursor = None;
                break;
            }

            self.cursor = current.step(self.entry.rule);

            if current.overlaps(self.from, self.to) {
                return Some(self.occurrence(current));
            }
        }

        None
    }
}

impl FusedIterator for Occurrences<'_> {}

/// ## Summary
/// Returns a lazy iterator over the occurrences of `entry` overlapping the
/// inclusive window `[from, to]`, in increasing start order.
///
/// A non-repeating entry yields its own interval if it overlaps the window.
/// A repeating entry yields nothing when its `repeat_end` is at or before
/// `from`; otherwise every stepped interval starting before `to` that
/// overlaps the window, subject to `policy`.
#[must_use]
pub fn occurrences(
    entry: &ScheduleEntry,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    policy: RepeatEndPolicy,
) -> Occurrences<'_> {
    Occurrences::new(entry, from, to, policy)
}

/// ## Summary
/// Expands `entry` into every occurrence overlapping `[from, to]`.
///
/// `repeat_end` is only checked against `from` before iterating. Inputs are
/// not validated: `from > to` yields nothing, an inverted interval yields
/// inverted occurrences.
#[must_use]
pub fn expand(entry: &ScheduleEntry, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<Occurrence> {
    occurrences(entry, from, to, RepeatEndPolicy::EntryGate).collect()
}

/// ## Summary
/// Expands `entry` like [`expand`], honouring the repeat-end policy and the
/// occurrence limit in `options`.
///
/// ## Errors
/// Returns `RecurError::TooManyOccurrences` if the entry yields more than
/// `options.max_occurrences` occurrences in the window.
pub fn expand_with(
    entry: &ScheduleEntry,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    options: &ExpansionOptions,
) -> RecurResult<Vec<Occurrence>> {
    let iter = occurrences(entry, from, to, options.repeat_end_policy);

    let Some(limit) = options.max_occurrences else {
        return Ok(iter.collect());
    };

    let expanded: Vec<Occurrence> = iter.take(limit.saturating_add(1)).collect();
    if expanded.len() > limit {
        tracing::warn!(
            resource_id = %entry.resource_id,
            rule = %entry.rule,
            %from,
            %to,
            limit,
            "Expansion exceeds occurrence limit"
        );
        return Err(RecurError::TooManyOccurrences { limit });
    }

    tracing::trace!(
        resource_id = %entry.resource_id,
        rule = %entry.rule,
        count = expanded.len(),
        "Expanded entry"
    );
    Ok(expanded)
}

/// ## Summary
/// Checks that a query window is not inverted.
///
/// ## Errors
/// Returns `RecurError::InvalidWindow` if `from > to`.
pub fn validate_window(from: DateTime<Utc>, to: DateTime<Utc>) -> RecurResult<()> {
    if from > to {
        return Err(RecurError::InvalidWindow { from, to });
    }
    Ok(())
}

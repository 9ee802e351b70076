//! Recurrence expansion for schedule entries.
//!
//! Given one entry (a first interval, a [`RecurrenceRule`] and an optional
//! repeat end) and a query window, produces every concrete occurrence that
//! overlaps the window.

pub mod error;
pub mod recur;

pub use recur::{
    ExpansionOptions, Interval, Occurrence, Occurrences, ScheduleEntry, expand, expand_with,
    occurrences, validate_window,
};
pub use schedule_core::types::{RecurrenceRule, RepeatEndPolicy};

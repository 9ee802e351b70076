//! Interval overlap, calendar stepping and occurrence expansion.

mod expand;
mod interval;
pub mod step;

pub use expand::{
    ExpansionOptions, Occurrence, Occurrences, ScheduleEntry, expand, expand_with, occurrences,
    validate_window,
};
pub use interval::Interval;

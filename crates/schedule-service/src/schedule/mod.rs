//! Schedule entries and window queries over them.

pub mod entry;
pub mod query;
pub mod window;

use schedule_core::config::ScheduleConfig;
use schedule_recur::ExpansionOptions;

/// Expansion options derived from the `[schedule]` configuration section.
#[must_use]
pub fn expansion_options(config: &ScheduleConfig) -> ExpansionOptions {
    ExpansionOptions {
        max_occurrences: Some(config.max_occurrences),
        repeat_end_policy: config.repeat_end_policy,
    }
}

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How a schedule entry repeats.
///
/// The upper-case tokens (`NONE`, `DAILY`, ...) are the persisted and wire
/// vocabulary; they are used by serde, `Display` and `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecurrenceRule {
    /// A single occurrence equal to the entry's own interval.
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceRule {
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Yearly,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    #[must_use]
    pub const fn repeats(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl std::fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecurrenceRule {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| CoreError::ParseError(format!("unknown recurrence rule: {s}")))
    }
}

/// When a bounded recurrence's `repeat_end` is enforced during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatEndPolicy {
    /// `repeat_end` only rejects recurrences that ended before the window
    /// begins; occurrences inside the window are not cut off.
    #[default]
    EntryGate,
    /// Additionally stop at the first occurrence starting at or after
    /// `repeat_end`.
    PerOccurrence,
}

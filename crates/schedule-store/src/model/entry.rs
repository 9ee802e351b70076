use chrono::{DateTime, Utc};
use schedule_core::types::RecurrenceRule;
use schedule_recur::{Interval, ScheduleEntry};
use serde::{Deserialize, Serialize};

/// A persisted schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEntry {
    pub id: uuid::Uuid,
    pub tenant_id: String,
    pub classroom: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub repeat: RecurrenceRule,
    pub repeat_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The caller-supplied fields of an entry, used for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub tenant_id: String,
    pub classroom: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub repeat: RecurrenceRule,
    pub repeat_end: Option<DateTime<Utc>>,
}

impl StoredEntry {
    #[must_use]
    pub fn from_new(id: uuid::Uuid, entry: NewEntry, now: DateTime<Utc>) -> Self {
        Self {
            id,
            tenant_id: entry.tenant_id,
            classroom: entry.classroom,
            start: entry.start,
            end: entry.end,
            repeat: entry.repeat,
            repeat_end: entry.repeat_end,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every caller-supplied field, keeping identity and `created_at`.
    pub fn apply(&mut self, entry: NewEntry, now: DateTime<Utc>) {
        self.tenant_id = entry.tenant_id;
        self.classroom = entry.classroom;
        self.start = entry.start;
        self.end = entry.end;
        self.repeat = entry.repeat;
        self.repeat_end = entry.repeat_end;
        self.updated_at = now;
    }

    #[must_use]
    pub const fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    /// ## Summary
    /// Returns true if this entry may still produce occurrences at or after
    /// `from`, judged only by its `repeat_end`.
    #[must_use]
    pub fn active_since(&self, from: DateTime<Utc>) -> bool {
        self.repeat_end.is_none_or(|repeat_end| repeat_end >= from)
    }
}

impl From<&StoredEntry> for ScheduleEntry {
    fn from(entry: &StoredEntry) -> Self {
        Self {
            resource_id: entry.classroom.clone(),
            interval: entry.interval(),
            rule: entry.repeat,
            repeat_end: entry.repeat_end,
        }
    }
}

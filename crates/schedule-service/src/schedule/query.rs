use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use schedule_recur::{ExpansionOptions, Occurrence, ScheduleEntry, expand_with};
use schedule_store::directory::MembershipDirectory;
use schedule_store::store::EntryStore;
use serde::{Serialize, Serializer};

use super::window::QueryWindow;
use crate::error::ServiceResult;

/// One occurrence as returned to schedule readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledOccurrence {
    pub classroom_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classroom_name: Option<String>,
    #[serde(serialize_with = "serialize_millis")]
    pub start: DateTime<Utc>,
    #[serde(serialize_with = "serialize_millis")]
    pub end: DateTime<Utc>,
}

/// Writes instants as `2025-02-01T12:00:00.000Z`, always with milliseconds.
fn serialize_millis<S: Serializer>(
    instant: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl From<Occurrence> for ScheduledOccurrence {
    fn from(occurrence: Occurrence) -> Self {
        Self {
            classroom_id: occurrence.resource_id,
            classroom_name: None,
            start: occurrence.start,
            end: occurrence.end,
        }
    }
}

/// ## Summary
/// Returns every occurrence inside `window` of the entries in the classrooms
/// `user_id` belongs to within `tenant_id`, labelled with classroom names.
///
/// Occurrences are grouped per entry in store order; each group is ordered
/// by start.
///
/// ## Errors
/// Returns an error if the membership lookup or the store fails, or if a
/// single entry expands past `options.max_occurrences`.
#[tracing::instrument(skip(store, directory, options), fields(from = %window.from, to = %window.to))]
pub async fn query_schedule(
    store: &dyn EntryStore,
    directory: &dyn MembershipDirectory,
    tenant_id: &str,
    user_id: &str,
    window: QueryWindow,
    options: &ExpansionOptions,
) -> ServiceResult<Vec<ScheduledOccurrence>> {
    let classrooms = directory.classrooms_for_user(tenant_id, user_id).await?;
    tracing::debug!(classroom_count = classrooms.len(), "User classrooms fetched");

    if classrooms.is_empty() {
        tracing::debug!("User not in any classroom");
        return Ok(Vec::new());
    }

    let classroom_ids: Vec<String> = classrooms.iter().map(|c| c.classroom_id.clone()).collect();
    let entries = store
        .candidates(tenant_id, &classroom_ids, window.from)
        .await?;

    let mut occurrences: Vec<ScheduledOccurrence> = Vec::new();
    for entry in &entries {
        let expanded = expand_with(&ScheduleEntry::from(entry), window.from, window.to, options)?;
        occurrences.extend(expanded.into_iter().map(ScheduledOccurrence::from));
    }

    let names: HashMap<&str, &str> = classrooms
        .iter()
        .map(|c| (c.classroom_id.as_str(), c.name.as_str()))
        .collect();
    for occurrence in &mut occurrences {
        occurrence.classroom_name = names
            .get(occurrence.classroom_id.as_str())
            .map(|name| (*name).to_string());
    }

    tracing::info!(
        entry_count = entries.len(),
        occurrence_count = occurrences.len(),
        "Schedule entries fetched"
    );
    Ok(occurrences)
}

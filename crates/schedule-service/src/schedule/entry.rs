//! Validated create, read, update, delete and list of schedule entries.

use schedule_core::types::RecurrenceRule;
use schedule_recur::Interval;
use schedule_store::error::StoreError;
use schedule_store::model::entry::{NewEntry, StoredEntry};
use schedule_store::store::EntryStore;
use serde::Deserialize;

use super::window::parse_instant;
use crate::error::{ServiceError, ServiceResult};

/// Request body for creating or replacing an entry.
///
/// Every field is optional here so that missing fields surface as
/// validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRequest {
    pub tenant_id: Option<String>,
    pub classroom: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub repeat: Option<RecurrenceRule>,
    pub repeat_end: Option<String>,
}

fn required<'a>(value: Option<&'a str>, name: &str) -> ServiceResult<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServiceError::ValidationError(format!("{name} is required")))
}

impl EntryRequest {
    /// ## Summary
    /// Checks required fields, parses instants and rejects an interval whose
    /// end precedes its start. `repeat` defaults to `NONE`.
    ///
    /// ## Errors
    /// Returns `ValidationError` for a missing or malformed field, or
    /// `RecurError::InvalidInterval` if `end` is before `start`.
    pub fn validate(self) -> ServiceResult<NewEntry> {
        let tenant_id = required(self.tenant_id.as_deref(), "tenantId")?.to_string();
        let classroom = required(self.classroom.as_deref(), "classroom")?.to_string();
        let start = parse_instant(required(self.start.as_deref(), "start")?)?;
        let end = parse_instant(required(self.end.as_deref(), "end")?)?;
        let repeat_end = self
            .repeat_end
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(parse_instant)
            .transpose()?;

        Interval::new(start, end).validate()?;

        Ok(NewEntry {
            tenant_id,
            classroom,
            start,
            end,
            repeat: self.repeat.unwrap_or_default(),
            repeat_end,
        })
    }
}

/// ## Errors
/// Returns `ValidationError` if `id` is not a UUID.
pub fn parse_entry_id(id: &str) -> ServiceResult<uuid::Uuid> {
    uuid::Uuid::parse_str(id)
        .map_err(|_e| ServiceError::ValidationError(format!("Invalid entry id: {id}")))
}

fn not_found(error: StoreError) -> ServiceError {
    match error {
        StoreError::NotFound(id) => ServiceError::NotFound(format!("Entry {id}")),
        other => other.into(),
    }
}

/// ## Summary
/// Validates and stores a new entry.
///
/// ## Errors
/// Returns a validation error for a bad request, or a store error.
#[tracing::instrument(skip(store, request))]
pub async fn create_entry(
    store: &dyn EntryStore,
    request: EntryRequest,
) -> ServiceResult<StoredEntry> {
    let entry = request.validate()?;
    let stored = store.create(entry).await?;
    tracing::info!(id = %stored.id, classroom = %stored.classroom, "Schedule entry created");
    Ok(stored)
}

/// ## Errors
/// Returns `ValidationError` for a malformed id or `NotFound` for an unknown one.
#[tracing::instrument(skip(store))]
pub async fn get_entry(store: &dyn EntryStore, id: &str) -> ServiceResult<StoredEntry> {
    let id = parse_entry_id(id)?;
    store.get(id).await.map_err(not_found)
}

/// ## Summary
/// Replaces every caller-supplied field of an existing entry.
///
/// ## Errors
/// Returns `ValidationError` for a malformed id or body, or `NotFound` for an
/// unknown id.
#[tracing::instrument(skip(store, request))]
pub async fn update_entry(
    store: &dyn EntryStore,
    id: &str,
    request: EntryRequest,
) -> ServiceResult<StoredEntry> {
    let id = parse_entry_id(id)?;
    let entry = request.validate()?;
    let stored = store.update(id, entry).await.map_err(not_found)?;
    tracing::info!(id = %stored.id, "Schedule entry updated");
    Ok(stored)
}

/// ## Errors
/// Returns `ValidationError` for a malformed id or `NotFound` for an unknown one.
#[tracing::instrument(skip(store))]
pub async fn delete_entry(store: &dyn EntryStore, id: &str) -> ServiceResult<StoredEntry> {
    let id = parse_entry_id(id)?;
    let removed = store.delete(id).await.map_err(not_found)?;
    tracing::info!(id = %removed.id, "Schedule entry deleted");
    Ok(removed)
}

/// ## Errors
/// Returns `ValidationError` if either filter is missing, or a store error.
#[tracing::instrument(skip(store))]
pub async fn list_entries(
    store: &dyn EntryStore,
    tenant_id: Option<&str>,
    classroom: Option<&str>,
) -> ServiceResult<Vec<StoredEntry>> {
    let tenant_id = required(tenant_id, "tenantId")?;
    let classroom = required(classroom, "classroom")?;
    Ok(store.list(tenant_id, classroom).await?)
}

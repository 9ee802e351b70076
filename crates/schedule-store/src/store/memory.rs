use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use tokio::sync::RwLock;
use tracing::Instrument;

use super::EntryStore;
use crate::error::{StoreError, StoreResult};
use crate::model::entry::{NewEntry, StoredEntry};

/// In-process entry store.
///
/// Entries are keyed by v7 UUIDs, so iteration follows creation order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<uuid::Uuid, StoredEntry>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl EntryStore for MemoryStore {
    #[tracing::instrument(skip(self, entry), fields(tenant_id = %entry.tenant_id, classroom = %entry.classroom))]
    fn create<'a>(&'a self, entry: NewEntry) -> BoxFuture<'a, StoreResult<StoredEntry>> {
        Box::pin(async move {
            let stored = StoredEntry::from_new(uuid::Uuid::now_v7(), entry, Utc::now());
            self.entries.write().await.insert(stored.id, stored.clone());

            tracing::debug!(entry_id = %stored.id, "Schedule entry stored");
            Ok(stored)
        }
        .in_current_span())
    }

    #[tracing::instrument(skip(self))]
    fn get<'a>(&'a self, id: uuid::Uuid) -> BoxFuture<'a, StoreResult<StoredEntry>> {
        Box::pin(async move {
            self.entries
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or(StoreError::NotFound(id))
        }
        .in_current_span())
    }

    #[tracing::instrument(skip(self, entry))]
    fn update<'a>(
        &'a self,
        id: uuid::Uuid,
        entry: NewEntry,
    ) -> BoxFuture<'a, StoreResult<StoredEntry>> {
        Box::pin(async move {
            let mut entries = self.entries.write().await;
            let stored = entries.get_mut(&id).ok_or(StoreError::NotFound(id))?;
            stored.apply(entry, Utc::now());

            tracing::debug!("Schedule entry updated");
            Ok(stored.clone())
        }
        .in_current_span())
    }

    #[tracing::instrument(skip(self))]
    fn delete<'a>(&'a self, id: uuid::Uuid) -> BoxFuture<'a, StoreResult<StoredEntry>> {
        Box::pin(async move {
            let removed = self
                .entries
                .write()
                .await
                .remove(&id)
                .ok_or(StoreError::NotFound(id))?;

            tracing::debug!("Schedule entry removed");
            Ok(removed)
        }
        .in_current_span())
    }

    #[tracing::instrument(skip(self))]
    fn list<'a>(
        &'a self,
        tenant_id: &'a str,
        classroom: &'a str,
    ) -> BoxFuture<'a, StoreResult<Vec<StoredEntry>>> {
        Box::pin(async move {
            Ok(self
                .entries
                .read()
                .await
                .values()
                .filter(|e| e.tenant_id == tenant_id && e.classroom == classroom)
                .cloned()
                .collect())
        }
        .in_current_span())
    }

    #[tracing::instrument(skip(self, classrooms), fields(classroom_count = classrooms.len()))]
    fn candidates<'a>(
        &'a self,
        tenant_id: &'a str,
        classrooms: &'a [String],
        from: DateTime<Utc>,
    ) -> BoxFuture<'a, StoreResult<Vec<StoredEntry>>> {
        Box::pin(async move {
            let candidates: Vec<StoredEntry> = self
                .entries
                .read()
                .await
                .values()
                .filter(|e| e.tenant_id == tenant_id)
                .filter(|e| classrooms.contains(&e.classroom))
                .filter(|e| e.active_since(from))
                .cloned()
                .collect();

            tracing::trace!(count = candidates.len(), "Candidate entries loaded");
            Ok(candidates)
        }
        .in_current_span())
    }
}

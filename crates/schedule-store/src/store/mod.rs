use chrono::{DateTime, Utc};
use futures::future::BoxFuture;

use crate::error::StoreResult;
use crate::model::entry::{NewEntry, StoredEntry};

pub mod memory;

pub use memory::MemoryStore;

/// Persistence boundary for schedule entries.
pub trait EntryStore: Send + Sync {
    /// Stores a new entry under a fresh id.
    fn create<'a>(&'a self, entry: NewEntry) -> BoxFuture<'a, StoreResult<StoredEntry>>;

    /// ## Errors
    /// Returns `StoreError::NotFound` if no entry has this id.
    fn get<'a>(&'a self, id: uuid::Uuid) -> BoxFuture<'a, StoreResult<StoredEntry>>;

    /// ## Errors
    /// Returns `StoreError::NotFound` if no entry has this id.
    fn update<'a>(
        &'a self,
        id: uuid::Uuid,
        entry: NewEntry,
    ) -> BoxFuture<'a, StoreResult<StoredEntry>>;

    /// Removes an entry and returns it.
    ///
    /// ## Errors
    /// Returns `StoreError::NotFound` if no entry has this id.
    fn delete<'a>(&'a self, id: uuid::Uuid) -> BoxFuture<'a, StoreResult<StoredEntry>>;

    /// Lists every entry of one classroom of a tenant.
    fn list<'a>(
        &'a self,
        tenant_id: &'a str,
        classroom: &'a str,
    ) -> BoxFuture<'a, StoreResult<Vec<StoredEntry>>>;

    /// Entries of `tenant_id` in any of `classrooms` whose `repeat_end` is
    /// absent or not before `from`, in creation order.
    fn candidates<'a>(
        &'a self,
        tenant_id: &'a str,
        classrooms: &'a [String],
        from: DateTime<Utc>,
    ) -> BoxFuture<'a, StoreResult<Vec<StoredEntry>>>;
}

//! The record store boundary

use crate::core::error::StoreResult;
use crate::core::record::{FieldMap, Record};
use crate::core::watch::Subscription;
use async_trait::async_trait;
use uuid::Uuid;

/// Access to the document database holding the inventory collections
///
/// Implementations own persistence; the query engine never calls them. The
/// view layer loads a collection in full, filters and sorts client-side, and
/// sends mutations straight back here.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load every record of a collection, in store order
    ///
    /// No pagination and no filtering is pushed down. An unknown collection
    /// is empty.
    async fn list_all(&self, collection: &str) -> StoreResult<Vec<Record>>;

    /// Get one record by id
    async fn get(&self, collection: &str, id: &Uuid) -> StoreResult<Option<Record>>;

    /// Create a record and return the id the store assigned to it
    async fn create(&self, collection: &str, fields: FieldMap) -> StoreResult<Uuid>;

    /// Merge `fields` into an existing record
    async fn update(&self, collection: &str, id: &Uuid, fields: FieldMap) -> StoreResult<()>;

    /// Delete a record; its id is never handed out again
    async fn delete(&self, collection: &str, id: &Uuid) -> StoreResult<()>;

    /// Follow a collection live
    ///
    /// The subscription first yields the current snapshot, then a fresh
    /// full snapshot after every change. Dropping it stops delivery.
    async fn subscribe(&self, collection: &str) -> StoreResult<Subscription>;
}

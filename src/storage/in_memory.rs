//! In-memory implementation of RecordStore for testing and development

use crate::core::error::{StoreError, StoreResult};
use crate::core::events::{CollectionEvent, EventBus};
use crate::core::record::{FieldMap, Record};
use crate::core::service::RecordStore;
use crate::core::watch::{SUBSCRIPTION_BUFFER, Subscription};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

type Collections = HashMap<String, IndexMap<Uuid, Record>>;

/// In-memory record store
///
/// Collections keep insertion order. Every applied mutation is published on
/// the store's [`EventBus`]. Ids of deleted records are retired and never
/// assigned again. The store can be switched offline to exercise the
/// unavailable/write-error paths of callers.
#[derive(Clone)]
pub struct InMemoryRecordStore {
    collections: Arc<RwLock<Collections>>,
    retired: Arc<RwLock<HashSet<Uuid>>>,
    online: Arc<AtomicBool>,
    events: EventBus,
}

impl InMemoryRecordStore {
    /// Create an empty store with its own event bus
    pub fn new() -> Self {
        Self::with_event_bus(EventBus::default())
    }

    /// Create an empty store publishing on `events`
    pub fn with_event_bus(events: EventBus) -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            retired: Arc::new(RwLock::new(HashSet::new())),
            online: Arc::new(AtomicBool::new(true)),
            events,
        }
    }

    /// The bus mutations are published on
    pub fn event_bus(&self) -> &EventBus {
        &self.events
    }

    /// Simulate the store going away (`false`) or coming back (`true`)
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
        tracing::info!(online, "in-memory store availability changed");
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Insert a record with a preassigned id, e.g. fixture data
    ///
    /// Fails if the id is already live or has been retired.
    pub fn insert_record(&self, collection: &str, record: Record) -> StoreResult<()> {
        self.ensure_writable(collection)?;
        let mut collections = self.write_collections(collection)?;
        let records = collections.entry(collection.to_string()).or_default();

        let retired = self.retired.read().map_err(|e| {
            StoreError::write_error(collection, format!("Failed to acquire read lock: {}", e))
        })?;
        if records.contains_key(&record.id) || retired.contains(&record.id) {
            return Err(StoreError::write_error(
                collection,
                format!("id {} is already taken", record.id),
            ));
        }
        drop(retired);

        records.insert(record.id, record.clone());
        drop(collections);

        self.events.publish(CollectionEvent::Created {
            collection: collection.to_string(),
            record,
        });
        Ok(())
    }

    /// Number of records in a collection
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|c| c.get(collection).map_or(0, IndexMap::len))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn ensure_readable(&self, collection: &str) -> StoreResult<()> {
        if self.is_online() {
            Ok(())
        } else {
            Err(StoreError::unavailable(collection, "store is offline"))
        }
    }

    fn ensure_writable(&self, collection: &str) -> StoreResult<()> {
        if self.is_online() {
            Ok(())
        } else {
            Err(StoreError::write_error(collection, "store is offline"))
        }
    }

    fn write_collections(
        &self,
        collection: &str,
    ) -> StoreResult<std::sync::RwLockWriteGuard<'_, Collections>> {
        self.collections.write().map_err(|e| {
            StoreError::write_error(collection, format!("Failed to acquire write lock: {}", e))
        })
    }

    fn fresh_id(&self, collection: &str, live: &IndexMap<Uuid, Record>) -> StoreResult<Uuid> {
        let retired = self
            .retired
            .read()
            .map_err(|e| StoreError::write_error(collection, format!("Failed to acquire read lock: {}", e)))?;

        loop {
            let id = Uuid::new_v4();
            if !live.contains_key(&id) && !retired.contains(&id) {
                return Ok(id);
            }
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

fn snapshot_of(collections: &RwLock<Collections>, collection: &str) -> StoreResult<Vec<Record>> {
    let collections = collections.read().map_err(|e| {
        StoreError::unavailable(collection, format!("Failed to acquire read lock: {}", e))
    })?;

    Ok(collections
        .get(collection)
        .map(|records| records.values().cloned().collect())
        .unwrap_or_default())
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_all(&self, collection: &str) -> StoreResult<Vec<Record>> {
        self.ensure_readable(collection)?;
        let records = snapshot_of(&self.collections, collection)?;
        tracing::debug!(collection, count = records.len(), "collection listed");
        Ok(records)
    }

    async fn get(&self, collection: &str, id: &Uuid) -> StoreResult<Option<Record>> {
        self.ensure_readable(collection)?;
        let collections = self.collections.read().map_err(|e| {
            StoreError::unavailable(collection, format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(collections
            .get(collection)
            .and_then(|records| records.get(id))
            .cloned())
    }

    async fn create(&self, collection: &str, fields: FieldMap) -> StoreResult<Uuid> {
        self.ensure_writable(collection)?;
        let mut collections = self.write_collections(collection)?;
        let records = collections.entry(collection.to_string()).or_default();

        let id = self.fresh_id(collection, records)?;
        let mut record = Record::new(id, FieldMap::new());
        record.merge(fields);
        records.insert(id, record.clone());
        drop(collections);

        tracing::debug!(collection, record_id = %id, "record created");
        self.events.publish(CollectionEvent::Created {
            collection: collection.to_string(),
            record,
        });

        Ok(id)
    }

    async fn update(&self, collection: &str, id: &Uuid, fields: FieldMap) -> StoreResult<()> {
        self.ensure_writable(collection)?;
        let mut collections = self.write_collections(collection)?;

        let record = collections
            .get_mut(collection)
            .and_then(|records| records.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, *id))?;
        record.merge(fields);
        let updated = record.clone();
        drop(collections);

        tracing::debug!(collection, record_id = %id, "record updated");
        self.events.publish(CollectionEvent::Updated {
            collection: collection.to_string(),
            record: updated,
        });

        Ok(())
    }

    async fn delete(&self, collection: &str, id: &Uuid) -> StoreResult<()> {
        self.ensure_writable(collection)?;
        let mut collections = self.write_collections(collection)?;

        collections
            .get_mut(collection)
            .and_then(|records| records.shift_remove(id))
            .ok_or_else(|| StoreError::not_found(collection, *id))?;

        // Lock order: collections, then retired
        self.retired
            .write()
            .map_err(|e| StoreError::write_error(collection, format!("Failed to acquire write lock: {}", e)))?
            .insert(*id);
        drop(collections);

        tracing::debug!(collection, record_id = %id, "record deleted");
        self.events.publish(CollectionEvent::Deleted {
            collection: collection.to_string(),
            record_id: *id,
        });

        Ok(())
    }

    async fn subscribe(&self, collection: &str) -> StoreResult<Subscription> {
        self.ensure_readable(collection)?;

        // Listen before taking the snapshot so no change slips in between
        let mut events = self.events.subscribe();
        let initial = snapshot_of(&self.collections, collection)?;

        let (tx, rx) = mpsc::channel(SUBSCRIPTION_BUFFER);
        let collections = Arc::clone(&self.collections);
        let name = collection.to_string();

        let task = tokio::spawn(async move {
            if tx.send(initial).await.is_err() {
                return;
            }

            loop {
                match events.recv().await {
                    Ok(envelope) if envelope.event.collection() == name => {}
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // A fresh snapshot covers whatever was missed
                        tracing::warn!(collection = %name, skipped, "subscription lagged, resyncing");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }

                let snapshot = match snapshot_of(&collections, &name) {
                    Ok(snapshot) => snapshot,
                    Err(e) => {
                        tracing::warn!(collection = %name, error = %e, "snapshot failed");
                        continue;
                    }
                };

                if tx.send(snapshot).await.is_err() {
                    break;
                }
            }
        });

        tracing::debug!(collection, "subscription opened");
        Ok(Subscription::new(collection, rx, Some(task)))
    }
}

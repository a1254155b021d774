//! Sidebar badges showing how many records each collection holds

use crate::core::error::StoreResult;
use crate::core::service::RecordStore;
use crate::core::watch::{SizeWatch, watch_collection_size};
use indexmap::IndexMap;

/// One live size counter per collection, in sidebar order
pub struct BadgeBoard {
    watches: IndexMap<String, SizeWatch>,
}

impl BadgeBoard {
    /// Start a counter for each collection
    ///
    /// Fails on the first collection the store cannot subscribe to; counters
    /// already started are stopped again.
    pub async fn start<S, I>(store: &S, collections: I) -> StoreResult<Self>
    where
        S: RecordStore + ?Sized,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut watches = IndexMap::new();
        for collection in collections {
            let collection = collection.as_ref();
            let watch = watch_collection_size(store, collection).await?;
            watches.insert(collection.to_string(), watch);
        }
        Ok(Self { watches })
    }

    pub fn count(&self, collection: &str) -> Option<usize> {
        self.watches.get(collection).map(SizeWatch::current)
    }

    /// Current count of every badge
    pub fn counts(&self) -> IndexMap<String, usize> {
        self.watches
            .iter()
            .map(|(name, watch)| (name.clone(), watch.current()))
            .collect()
    }

    /// Mutable access to one counter, to await its next change
    pub fn watch_mut(&mut self, collection: &str) -> Option<&mut SizeWatch> {
        self.watches.get_mut(collection)
    }

    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }
}

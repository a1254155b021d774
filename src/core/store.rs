//! Query trait for anything holding a collection snapshot

use crate::core::aggregate::{Aggregate, aggregate};
use crate::core::engine::filter_and_sort;
use crate::core::error::QueryError;
use crate::core::query::Query;
use crate::core::record::Record;
use crate::core::schema::EntitySchema;

/// Trait for holders of a loaded snapshot that can be queried
///
/// Implementors only expose their schema and the snapshot; filtering,
/// sorting and aggregation come from the shared engine.
pub trait QueryableCollection {
    /// Schema of the collection
    fn schema(&self) -> &EntitySchema;

    /// The full snapshot, unfiltered
    fn snapshot(&self) -> &[Record];

    /// Filtered and sorted view of the snapshot
    fn query(&self, query: &Query) -> Result<Vec<Record>, QueryError> {
        filter_and_sort(self.snapshot(), query, &self.schema().fields)
    }

    /// Dashboard cards over the full snapshot
    fn stats(&self) -> Vec<Aggregate> {
        aggregate(self.snapshot(), &self.schema().cards)
    }
}

//! Core module containing the record model, the query engine and the store boundary

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod events;
pub mod field;
pub mod query;
pub mod record;
pub mod schema;
pub mod service;
pub mod store;
pub mod watch;

pub use aggregate::{Aggregate, AggregateSpec, Buckets, aggregate};
pub use engine::filter_and_sort;
pub use error::{ConfigError, DeskError, DeskResult, QueryError, StoreError, StoreResult};
pub use events::{CollectionEvent, EventBus, EventEnvelope};
pub use field::{FieldDescriptor, FieldKind, FieldValue};
pub use query::{ALL, Page, PaginationMeta, Query, SortDirection, SortSpec};
pub use record::{FieldMap, Record};
pub use schema::EntitySchema;
pub use service::RecordStore;
pub use store::QueryableCollection;
pub use watch::{SizeWatch, Subscription, WatchGuard, watch_collection, watch_collection_size};

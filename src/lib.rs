//! # AssetDesk
//!
//! The data layer of an IT asset inventory dashboard: PCs, hardware,
//! software, patches, vulnerabilities and users.
//!
//! ## Features
//!
//! - **Schema-driven pages**: every collection is described by an [`EntitySchema`](core::EntitySchema)
//! - **Pure query engine**: search, facet filters and stable typed sorting over a snapshot
//! - **Summary cards**: count and sum aggregates grouped by a field
//! - **Live snapshots**: subscriptions deliver the whole collection on every change
//! - **Badge counters**: per-collection size watches that stop when dropped
//! - **Configuration-based**: schemas can be loaded from YAML
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use assetdesk::prelude::*;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let store = InMemoryRecordStore::new();
//! store
//!     .create("pcs", fields! { "name" => "ws-01", "status" => "online" })
//!     .await?;
//!
//! let mut view = ListView::new(assetdesk::entities::pcs::schema());
//! view.load(&store).await;
//! view.set_facet("status", "online");
//!
//! for row in view.rows()? {
//!     println!("{:?}", row.get("name"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod storage;
pub mod view;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ALL, Aggregate, AggregateSpec, Buckets, EntitySchema, FieldDescriptor, FieldKind,
        FieldMap, FieldValue, Page, PaginationMeta, Query, QueryableCollection, Record,
        SortDirection, SortSpec, aggregate, filter_and_sort,
    };

    // === Errors ===
    pub use crate::core::{ConfigError, DeskError, DeskResult, QueryError, StoreError, StoreResult};

    // === Store boundary ===
    pub use crate::core::{
        CollectionEvent, EventBus, EventEnvelope, RecordStore, SizeWatch, Subscription,
        WatchGuard, watch_collection, watch_collection_size,
    };

    // === Macros ===
    pub use crate::fields;

    // === Storage ===
    pub use crate::storage::InMemoryRecordStore;

    // === Config ===
    pub use crate::config::DeskConfig;

    // === Views ===
    pub use crate::view::{BadgeBoard, ListView};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use uuid::Uuid;
}

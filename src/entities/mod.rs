//! Built-in schemas for the inventory pages
//!
//! Each module describes one collection: its fields, the facets offered as
//! dropdowns, the column the page opens sorted by, and its summary cards.

pub mod hardware;
pub mod patches;
pub mod pcs;
pub mod software;
pub mod users;
pub mod vulnerabilities;

use crate::core::schema::EntitySchema;

/// Every built-in schema, in sidebar order
pub fn builtin_schemas() -> Vec<EntitySchema> {
    vec![
        pcs::schema(),
        hardware::schema(),
        software::schema(),
        patches::schema(),
        vulnerabilities::schema(),
        users::schema(),
    ]
}

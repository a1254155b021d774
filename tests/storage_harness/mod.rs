//! Shared test harness for record store testing
//!
//! Provides inventory fixtures, snapshot helpers and the
//! `record_store_tests!` conformance suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod record_store_tests;

use assetdesk::core::field::FieldValue;
use assetdesk::core::record::{FieldMap, Record};
use assetdesk::fields;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub const PCS: &str = "pcs";
pub const USERS: &str = "users";

/// Fields of one PC document
pub fn pc(name: &str, status: &str, cost: f64) -> FieldMap {
    fields! {
        "name" => name,
        "hostname" => format!("{}.corp.local", name),
        "status" => status,
        "cost" => cost,
    }
}

/// Five PCs in a deliberately unsorted order
pub fn sample_pcs() -> Vec<FieldMap> {
    vec![
        pc("ws-04", "online", 1200.0),
        pc("ws-01", "offline", 800.0),
        pc("ws-05", "maintenance", 1500.0),
        pc("ws-02", "online", 950.0),
        pc("ws-03", "online", 1100.0),
    ]
}

/// Build a record with a fresh id, bypassing any store
pub fn record(fields: FieldMap) -> Record {
    Record::new(Uuid::new_v4(), fields)
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Values of one field across a snapshot, as text
pub fn column(rows: &[Record], field: &str) -> Vec<String> {
    rows.iter()
        .map(|r| r.get(field).map(FieldValue::to_text).unwrap_or_default())
        .collect()
}

pub fn ids(rows: &[Record]) -> Vec<Uuid> {
    rows.iter().map(|r| r.id).collect()
}

pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}

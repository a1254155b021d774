//! Storage implementations for the record store boundary

pub mod in_memory;

pub use in_memory::InMemoryRecordStore;

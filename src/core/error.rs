//! Typed error handling for assetdesk
//!
//! Errors are grouped by the layer that raises them so callers can match on
//! the cases they care about instead of inspecting messages.
//!
//! # Error Categories
//!
//! - [`QueryError`]: a list query was rejected before evaluation
//! - [`StoreError`]: the record store could not serve a call
//! - [`ConfigError`]: configuration could not be read or is inconsistent
//!
//! # Example
//!
//! ```rust,ignore
//! match view.click_column("warranty") {
//!     Ok(()) => {}
//!     Err(QueryError::InvalidSortKey { key, .. }) => {
//!         tracing::warn!(%key, "ignoring click on unknown column");
//!     }
//! }
//! ```

use thiserror::Error;
use uuid::Uuid;

/// The main error type, wrapping every category
#[derive(Debug, Error)]
pub enum DeskError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DeskError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DeskError::Query(e) => e.error_code(),
            DeskError::Store(e) => e.error_code(),
            DeskError::Config(e) => e.error_code(),
        }
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors raised while validating a list query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The sort key names a field the entity type does not declare
    #[error("Invalid sort key '{key}' (known fields: {})", available.join(", "))]
    InvalidSortKey { key: String, available: Vec<String> },
}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::InvalidSortKey { .. } => "INVALID_SORT_KEY",
        }
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors surfaced by a record store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached or refused to serve reads
    #[error("Store unavailable for collection '{collection}': {message}")]
    Unavailable { collection: String, message: String },

    /// A create, update or delete was not applied
    #[error("Write to collection '{collection}' failed: {message}")]
    WriteError { collection: String, message: String },

    /// No record with this id exists in the collection
    #[error("Record '{id}' not found in collection '{collection}'")]
    NotFound { collection: String, id: Uuid },
}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Unavailable { .. } => "STORE_UNAVAILABLE",
            StoreError::WriteError { .. } => "STORE_WRITE_ERROR",
            StoreError::NotFound { .. } => "RECORD_NOT_FOUND",
        }
    }

    /// Collection the failing call targeted
    pub fn collection(&self) -> &str {
        match self {
            StoreError::Unavailable { collection, .. }
            | StoreError::WriteError { collection, .. }
            | StoreError::NotFound { collection, .. } => collection,
        }
    }

    pub fn unavailable(collection: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            collection: collection.into(),
            message: message.into(),
        }
    }

    pub fn write_error(collection: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::WriteError {
            collection: collection.into(),
            message: message.into(),
        }
    }

    pub fn not_found(collection: impl Into<String>, id: Uuid) -> Self {
        StoreError::NotFound {
            collection: collection.into(),
            id,
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    Parse {
        file: Option<String>,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value is inconsistent with the rest of the configuration
    #[error("Invalid value '{value}' for '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Two entity schemas in one config share a collection name
    #[error("Collection '{collection}' is declared more than once")]
    DuplicateCollection { collection: String },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Parse { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::Io(_) => "CONFIG_IO_ERROR",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::DuplicateCollection { .. } => "CONFIG_DUPLICATE_COLLECTION",
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse {
            file: None,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Result type aliases
// =============================================================================

/// Result of a record store call
pub type StoreResult<T> = Result<T, StoreError>;

/// A specialized Result type for assetdesk operations
pub type DeskResult<T> = Result<T, DeskError>;

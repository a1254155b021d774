//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::schema::EntitySchema;
use crate::entities::builtin_schemas;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

fn default_event_capacity() -> usize {
    1024
}

fn default_page_size() -> usize {
    20
}

/// Complete configuration of the inventory dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskConfig {
    /// Entity schemas, one per collection
    #[serde(default)]
    pub entities: Vec<EntitySchema>,

    /// Buffer size of the store's change-event channel
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Rows per page in list tables
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            event_capacity: default_event_capacity(),
            page_size: default_page_size(),
        }
    }
}

impl DeskConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;

        tracing::info!(
            path = %path.display(),
            entities = config.entities.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check collection names are unique and every schema is consistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for schema in &self.entities {
            if !seen.insert(schema.collection.as_str()) {
                return Err(ConfigError::DuplicateCollection {
                    collection: schema.collection.clone(),
                });
            }
            schema.validate()?;
        }

        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_size".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Merge several configurations into one
    ///
    /// A later schema replaces an earlier one with the same collection name
    /// in place; new collections are appended. Scalar settings come from the
    /// last config.
    pub fn merge(configs: Vec<Self>) -> Self {
        let mut merged = Self::default();

        for config in configs {
            for schema in config.entities {
                match merged
                    .entities
                    .iter_mut()
                    .find(|s| s.collection == schema.collection)
                {
                    Some(existing) => *existing = schema,
                    None => merged.entities.push(schema),
                }
            }
            merged.event_capacity = config.event_capacity;
            merged.page_size = config.page_size;
        }

        merged
    }

    /// Find the schema of a collection
    pub fn schema(&self, collection: &str) -> Option<&EntitySchema> {
        self.entities.iter().find(|s| s.collection == collection)
    }

    /// Names of the configured collections, in declaration order
    pub fn collections(&self) -> Vec<&str> {
        self.entities.iter().map(|s| s.collection.as_str()).collect()
    }

    /// Configuration with the six built-in inventory schemas
    pub fn default_config() -> Self {
        Self {
            entities: builtin_schemas(),
            ..Self::default()
        }
    }
}

//! Entity schemas: the per-page description of a collection

use crate::core::aggregate::AggregateSpec;
use crate::core::error::ConfigError;
use crate::core::field::{FieldDescriptor, FieldKind, find_descriptor};
use crate::core::query::{ALL, Query, SortSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Everything a list page needs to know about one entity type
///
/// The schema is supplied by the caller (built-in or from configuration)
/// and is never stored alongside the records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntitySchema {
    /// Collection name in the record store (e.g., "pcs", "vulnerabilities")
    pub collection: String,

    /// Singular label (e.g., "pc", "vulnerability")
    pub singular: String,

    /// Declared fields; sort keys must name one of them
    pub fields: Vec<FieldDescriptor>,

    /// Fields offered as facet dropdowns
    #[serde(default)]
    pub facets: Vec<String>,

    /// Sort applied when the page opens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<SortSpec>,

    /// Summary cards computed over the whole collection
    #[serde(default)]
    pub cards: Vec<AggregateSpec>,
}

impl EntitySchema {
    pub fn new(collection: impl Into<String>, singular: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            singular: singular.into(),
            fields: Vec::new(),
            facets: Vec::new(),
            default_sort: None,
            cards: Vec::new(),
        }
    }

    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    pub fn facet(mut self, field: impl Into<String>) -> Self {
        self.facets.push(field.into());
        self
    }

    pub fn default_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = Some(sort);
        self
    }

    pub fn card(mut self, spec: AggregateSpec) -> Self {
        self.cards.push(spec);
        self
    }

    /// Look up a declared field
    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        find_descriptor(&self.fields, name)
    }

    /// Names of the fields free-text search looks at
    pub fn searchable_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.searchable)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// The query a freshly opened page starts with
    ///
    /// Every facet is set to [`ALL`] and the default sort, if any, applies.
    pub fn initial_query(&self) -> Query {
        let mut query = self
            .facets
            .iter()
            .fold(Query::new(), |q, facet| q.facet(facet.clone(), ALL));
        if let Some(sort) = &self.default_sort {
            query = query.sort_by(sort);
        }
        query
    }

    /// Check that every reference inside the schema names a declared field
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(self.invalid("fields", &field.name, "field declared twice"));
            }
        }

        if let Some(sort) = &self.default_sort
            && self.descriptor(&sort.field).is_none()
        {
            return Err(self.invalid("default_sort", &sort.field, "unknown field"));
        }

        for facet in &self.facets {
            if self.descriptor(facet).is_none() {
                return Err(self.invalid("facets", facet, "unknown field"));
            }
        }

        for card in &self.cards {
            if self.descriptor(&card.group_by).is_none() {
                return Err(self.invalid("cards.group_by", &card.group_by, "unknown field"));
            }
            if let Some(value_field) = &card.value_field {
                match self.descriptor(value_field) {
                    Some(d) if d.kind == FieldKind::Number => {}
                    Some(_) => {
                        return Err(self.invalid(
                            "cards.value_field",
                            value_field,
                            "summed fields must be numbers",
                        ));
                    }
                    None => {
                        return Err(self.invalid("cards.value_field", value_field, "unknown field"));
                    }
                }
            }
        }

        Ok(())
    }

    fn invalid(&self, field: &str, value: &str, message: &str) -> ConfigError {
        ConfigError::InvalidValue {
            field: format!("{}.{}", self.collection, field),
            value: value.to_string(),
            message: message.to_string(),
        }
    }
}

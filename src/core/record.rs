//! Generic inventory records

use crate::core::field::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordered field map of a record
pub type FieldMap = IndexMap<String, FieldValue>;

/// A document from one collection
///
/// The id is assigned by the store when the record is created and never
/// changes afterwards. The field set is whatever the entity type defines;
/// records of the same collection may carry different subsets of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Store-assigned identifier
    pub id: Uuid,

    /// Field values in document order
    #[serde(flatten)]
    pub fields: FieldMap,
}

impl Record {
    /// Create a record from an id and its fields
    pub fn new(id: Uuid, fields: FieldMap) -> Self {
        Self { id, fields }
    }

    /// Get a field value; `None` when the field is absent
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Get a field value, treating an explicit null the same as absence
    pub fn present(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    /// Set a single field
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Merge fields over the existing ones, keeping the id untouched
    pub fn merge(&mut self, fields: FieldMap) {
        for (name, value) in fields {
            if name == "id" {
                continue;
            }
            self.fields.insert(name, value);
        }
    }
}

/// Build a [`FieldMap`] from `name => value` pairs
///
/// ```rust,ignore
/// let fields = fields! { "hostname" => "ws-014", "cost" => 1200 };
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::core::record::FieldMap::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::core::record::FieldMap::new();
        $(
            map.insert(
                ::std::string::String::from($name),
                $crate::core::field::FieldValue::from($value),
            );
        )+
        map
    }};
}

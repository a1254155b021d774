//! Field values, field kinds and the kind-aware comparators used for sorting

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A scalar field value as stored in a document
///
/// Dates are carried as strings, exactly as the document store hands them
/// over; they are only parsed when a date-kind comparison needs them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl FieldValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// String form used for search, facet matching and grouping
    ///
    /// Null renders as the empty string.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::String(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Null => String::new(),
        }
    }

    /// Numeric form used for number sorting and sums
    ///
    /// Non-numeric values coerce to 0. Values that are not finite, such as
    /// `"1e400"`, `"inf"` or NaN, coerce to 0 as well.
    pub fn to_number(&self) -> f64 {
        let n = match self {
            FieldValue::Integer(i) => *i as f64,
            FieldValue::Float(f) => *f,
            FieldValue::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            FieldValue::Boolean(_) | FieldValue::Null => 0.0,
        };
        // -0.0 folds into 0.0 so total_cmp treats them as equal
        if n.is_finite() && n != 0.0 { n } else { 0.0 }
    }

    /// Timestamp in milliseconds since the epoch; unparsable values map to 0
    pub fn to_timestamp_millis(&self) -> i64 {
        match self {
            FieldValue::String(s) => parse_timestamp_millis(s).unwrap_or(0),
            FieldValue::Integer(i) => *i,
            FieldValue::Float(f) if f.is_finite() => *f as i64,
            _ => 0,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

/// Parse the date shapes the inventory documents carry
fn parse_timestamp_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis());
        }
    }

    None
}

/// How a field's values are compared and matched
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Enum,
}

impl FieldKind {
    /// Compare two (possibly absent) values according to this kind
    pub fn compare(&self, a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
        match self {
            FieldKind::Text | FieldKind::Enum => collate(&text_of(a), &text_of(b)),
            FieldKind::Number => number_of(a).total_cmp(&number_of(b)),
            FieldKind::Date => timestamp_of(a).cmp(&timestamp_of(b)),
        }
    }
}

fn text_of(value: Option<&FieldValue>) -> String {
    value.map(FieldValue::to_text).unwrap_or_default()
}

fn number_of(value: Option<&FieldValue>) -> f64 {
    value.map_or(0.0, FieldValue::to_number)
}

fn timestamp_of(value: Option<&FieldValue>) -> i64 {
    value.map_or(0, FieldValue::to_timestamp_millis)
}

/// Locale-style string collation
///
/// Case is ignored for the primary order; on a case-only difference the
/// lowercase form sorts first.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Describes one field of an entity type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as it appears in the documents
    pub name: String,

    /// Value kind, drives comparator selection
    pub kind: FieldKind,

    /// Whether free-text search looks at this field
    #[serde(default)]
    pub searchable: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            searchable: false,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Enum)
    }

    /// Mark the field as included in free-text search
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }
}

/// Look up a descriptor by field name
pub fn find_descriptor<'a>(fields: &'a [FieldDescriptor], name: &str) -> Option<&'a FieldDescriptor> {
    fields.iter().find(|f| f.name == name)
}

//! Dashboard summary statistics
//!
//! Cards report system-wide totals, so aggregation always runs over the full
//! snapshot, never over the filtered rows.

use crate::core::record::Record;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Describes one summary statistic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregateSpec {
    /// Field whose distinct values become the buckets
    pub group_by: String,

    /// Numeric field summed per bucket; counts records when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_field: Option<String>,

    /// Card title shown on the dashboard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl AggregateSpec {
    /// Count records per distinct value of `group_by`
    pub fn count_by(group_by: impl Into<String>) -> Self {
        Self {
            group_by: group_by.into(),
            value_field: None,
            label: None,
        }
    }

    /// Sum `value_field` per distinct value of `group_by`
    pub fn sum_by(group_by: impl Into<String>, value_field: impl Into<String>) -> Self {
        Self {
            group_by: group_by.into(),
            value_field: Some(value_field.into()),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Buckets of one statistic, keyed by the group-by value in first-seen order
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum Buckets {
    Counts(IndexMap<String, u64>),
    Sums(IndexMap<String, f64>),
}

/// The result of evaluating one [`AggregateSpec`]
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Aggregate {
    pub spec: AggregateSpec,
    pub buckets: Buckets,
}

impl Aggregate {
    /// Value of one bucket as f64, `None` when the value never occurred
    pub fn get(&self, key: &str) -> Option<f64> {
        match &self.buckets {
            Buckets::Counts(map) => map.get(key).map(|c| *c as f64),
            Buckets::Sums(map) => map.get(key).copied(),
        }
    }

    /// Count of one bucket; `None` for sums or unknown keys
    pub fn count(&self, key: &str) -> Option<u64> {
        match &self.buckets {
            Buckets::Counts(map) => map.get(key).copied(),
            Buckets::Sums(_) => None,
        }
    }

    /// Sum over every bucket
    pub fn total(&self) -> f64 {
        match &self.buckets {
            Buckets::Counts(map) => map.values().map(|c| *c as f64).sum(),
            Buckets::Sums(map) => map.values().sum(),
        }
    }

    /// Bucket keys in first-seen order
    pub fn keys(&self) -> Vec<&str> {
        match &self.buckets {
            Buckets::Counts(map) => map.keys().map(String::as_str).collect(),
            Buckets::Sums(map) => map.keys().map(String::as_str).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match &self.buckets {
            Buckets::Counts(map) => map.len(),
            Buckets::Sums(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Evaluate every spec over the full record set
pub fn aggregate(records: &[Record], specs: &[AggregateSpec]) -> Vec<Aggregate> {
    specs.iter().map(|spec| evaluate(records, spec)).collect()
}

/// Evaluate a single spec
///
/// Records whose group-by field is absent or null are left out of every
/// bucket rather than collected under an "unknown" key.
pub fn evaluate(records: &[Record], spec: &AggregateSpec) -> Aggregate {
    let grouped = records
        .iter()
        .filter_map(|r| r.present(&spec.group_by).map(|v| (v.to_text(), r)));

    let buckets = match &spec.value_field {
        None => {
            let mut counts: IndexMap<String, u64> = IndexMap::new();
            for (key, _) in grouped {
                *counts.entry(key).or_insert(0) += 1;
            }
            Buckets::Counts(counts)
        }
        Some(value_field) => {
            let mut sums: IndexMap<String, f64> = IndexMap::new();
            for (key, record) in grouped {
                let value = record.get(value_field).map_or(0.0, |v| v.to_number());
                *sums.entry(key).or_insert(0.0) += value;
            }
            Buckets::Sums(sums)
        }
    };

    Aggregate {
        spec: spec.clone(),
        buckets,
    }
}

/// Count records per distinct value of `field`
pub fn count_by(records: &[Record], field: &str) -> IndexMap<String, u64> {
    match evaluate(records, &AggregateSpec::count_by(field)).buckets {
        Buckets::Counts(map) => map,
        Buckets::Sums(_) => IndexMap::new(),
    }
}

/// Sum `value_field` per distinct value of `group_by`
pub fn sum_by(records: &[Record], group_by: &str, value_field: &str) -> IndexMap<String, f64> {
    match evaluate(records, &AggregateSpec::sum_by(group_by, value_field)).buckets {
        Buckets::Sums(map) => map,
        Buckets::Counts(_) => IndexMap::new(),
    }
}

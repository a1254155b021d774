//! The list query engine
//!
//! Every inventory page (PCs, hardware, software, patches, vulnerabilities,
//! users) renders the same pipeline over the snapshot it loaded:
//!
//! ```text
//! records ──▶ search(term) ──▶ facets (AND) ──▶ stable sort by kind ──▶ rows
//! ```
//!
//! All functions here are pure. They borrow the snapshot, never mutate it,
//! and return freshly collected vectors, so running the same query twice on
//! the same snapshot yields the same rows.

use crate::core::error::QueryError;
use crate::core::field::{FieldDescriptor, find_descriptor};
use crate::core::query::{Query, SortDirection};
use crate::core::record::Record;

/// Filter then sort `records` according to `query`
///
/// The sort key is checked first: a key that `fields` does not declare
/// rejects the whole query with [`QueryError::InvalidSortKey`].
pub fn filter_and_sort(
    records: &[Record],
    query: &Query,
    fields: &[FieldDescriptor],
) -> Result<Vec<Record>, QueryError> {
    let sort = match &query.sort_key {
        Some(key) => Some(validate_sort_key(key, fields)?),
        None => None,
    };

    let matched: Vec<&Record> = records
        .iter()
        .filter(|r| matches_search(r, &query.search_term, fields))
        .filter(|r| matches_facets(r, query))
        .collect();

    let mut rows: Vec<Record> = matched.into_iter().cloned().collect();
    if let Some(descriptor) = sort {
        sort_in_place(&mut rows, descriptor, query.sort_direction);
    }

    tracing::debug!(
        total = records.len(),
        matched = rows.len(),
        sort_key = ?query.sort_key,
        direction = %query.sort_direction,
        "query evaluated"
    );

    Ok(rows)
}

/// Resolve a sort key to its descriptor
pub fn validate_sort_key<'a>(
    key: &str,
    fields: &'a [FieldDescriptor],
) -> Result<&'a FieldDescriptor, QueryError> {
    find_descriptor(fields, key).ok_or_else(|| QueryError::InvalidSortKey {
        key: key.to_string(),
        available: fields.iter().map(|f| f.name.clone()).collect(),
    })
}

/// Keep records where any searchable field contains `term`, ignoring case
///
/// An empty term keeps everything.
pub fn search(records: &[Record], term: &str, fields: &[FieldDescriptor]) -> Vec<Record> {
    records
        .iter()
        .filter(|r| matches_search(r, term, fields))
        .cloned()
        .collect()
}

/// Keep records matching every facet of `query` that is not `"all"`
pub fn apply_facets(records: &[Record], query: &Query) -> Vec<Record> {
    records
        .iter()
        .filter(|r| matches_facets(r, query))
        .cloned()
        .collect()
}

/// Return a sorted copy of `records`
pub fn sort_records(
    records: &[Record],
    key: &str,
    direction: SortDirection,
    fields: &[FieldDescriptor],
) -> Result<Vec<Record>, QueryError> {
    let descriptor = validate_sort_key(key, fields)?;
    let mut rows = records.to_vec();
    sort_in_place(&mut rows, descriptor, direction);
    Ok(rows)
}

/// Whether a record passes the free-text search
pub fn matches_search(record: &Record, term: &str, fields: &[FieldDescriptor]) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();

    fields.iter().filter(|f| f.searchable).any(|f| {
        record
            .present(&f.name)
            .is_some_and(|v| v.to_text().to_lowercase().contains(&needle))
    })
}

/// Whether a record passes every active facet
///
/// Facet equality is exact and case-sensitive; a record without the field
/// never matches.
pub fn matches_facets(record: &Record, query: &Query) -> bool {
    query.active_facets().all(|(field, wanted)| {
        record
            .present(field)
            .is_some_and(|v| v.to_text() == wanted)
    })
}

// Vec::sort_by is stable, so equal keys keep their filtered order in both
// directions.
fn sort_in_place(rows: &mut [Record], descriptor: &FieldDescriptor, direction: SortDirection) {
    let name = descriptor.name.as_str();
    let kind = descriptor.kind;

    match direction {
        SortDirection::Asc => rows.sort_by(|a, b| kind.compare(a.get(name), b.get(name))),
        SortDirection::Desc => rows.sort_by(|a, b| kind.compare(b.get(name), a.get(name))),
    }
}

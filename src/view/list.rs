//! State of one list page
//!
//! The page owns the mutable bits (current query, loaded snapshot, last load
//! error) and hands borrowed data to the pure engine and aggregator on every
//! render.

use crate::core::aggregate::{Aggregate, aggregate};
use crate::core::engine::{filter_and_sort, validate_sort_key};
use crate::core::error::{QueryError, StoreError};
use crate::core::field::collate;
use crate::core::query::{ALL, Page, Query, SortDirection, paginate};
use crate::core::record::Record;
use crate::core::schema::EntitySchema;
use crate::core::service::RecordStore;
use crate::core::store::QueryableCollection;

/// A list page bound to one collection
#[derive(Debug, Clone)]
pub struct ListView {
    schema: EntitySchema,
    records: Vec<Record>,
    query: Query,
    last_error: Option<StoreError>,
}

impl ListView {
    /// Open a page with the schema's initial query and no data yet
    pub fn new(schema: EntitySchema) -> Self {
        let query = schema.initial_query();
        Self {
            schema,
            records: Vec::new(),
            query,
            last_error: None,
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Error of the last failed load, cleared by the next successful one
    pub fn last_error(&self) -> Option<&StoreError> {
        self.last_error.as_ref()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
    }

    /// Select a facet value; [`ALL`] lifts the constraint
    pub fn set_facet(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.query.facets.insert(field.into(), value.into());
    }

    pub fn clear_facet(&mut self, field: &str) {
        if let Some(value) = self.query.facets.get_mut(field) {
            *value = ALL.to_string();
        }
    }

    /// Back to the initial query
    pub fn reset(&mut self) {
        self.query = self.schema.initial_query();
    }

    /// Handle a click on a column header
    ///
    /// Clicking the current sort column flips the direction; clicking any
    /// other column sorts by it ascending. Unknown columns leave the query
    /// untouched.
    pub fn click_column(&mut self, column: &str) -> Result<(), QueryError> {
        validate_sort_key(column, &self.schema.fields)?;

        if self.query.sort_key.as_deref() == Some(column) {
            self.query.sort_direction = self.query.sort_direction.flipped();
        } else {
            self.query.sort_key = Some(column.to_string());
            self.query.sort_direction = SortDirection::Asc;
        }
        Ok(())
    }

    /// Load the collection from the store
    ///
    /// A failed load leaves the page with no data and records the error so
    /// the caller can show it and retry. Returns whether the load succeeded.
    pub async fn load<S>(&mut self, store: &S) -> bool
    where
        S: RecordStore + ?Sized,
    {
        match store.list_all(&self.schema.collection).await {
            Ok(records) => {
                self.replace_snapshot(records);
                true
            }
            Err(e) => {
                tracing::warn!(
                    collection = %self.schema.collection,
                    error = %e,
                    "load failed, showing empty list"
                );
                self.records.clear();
                self.last_error = Some(e);
                false
            }
        }
    }

    /// Replace the snapshot wholesale, e.g. with a subscription delivery
    pub fn replace_snapshot(&mut self, records: Vec<Record>) {
        self.records = records;
        self.last_error = None;
    }

    /// Rows to render for the current query
    pub fn rows(&self) -> Result<Vec<Record>, QueryError> {
        filter_and_sort(&self.records, &self.query, &self.schema.fields)
    }

    /// One page of the rows
    pub fn page(&self, page: usize, limit: usize) -> Result<Page<Record>, QueryError> {
        Ok(paginate(&self.rows()?, page, limit))
    }

    /// Summary cards over the whole snapshot, ignoring the current query
    pub fn cards(&self) -> Vec<Aggregate> {
        aggregate(&self.records, &self.schema.cards)
    }

    /// Distinct values present for a facet, collated, for its dropdown
    pub fn facet_options(&self, field: &str) -> Vec<String> {
        let mut options: Vec<String> = Vec::new();
        for record in &self.records {
            if let Some(value) = record.present(field) {
                let text = value.to_text();
                if !options.contains(&text) {
                    options.push(text);
                }
            }
        }
        options.sort_by(|a, b| collate(a, b));
        options
    }
}

impl QueryableCollection for ListView {
    fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    fn snapshot(&self) -> &[Record] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::pcs;
    use crate::fields;
    use crate::storage::InMemoryRecordStore;

    async fn seeded_store() -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new();
        for (name, status, cost) in [
            ("ws-03", "online", 900),
            ("ws-01", "offline", 1200),
            ("ws-02", "online", 700),
        ] {
            store
                .create(
                    pcs::COLLECTION,
                    fields! { "name" => name, "status" => status, "cost" => cost },
                )
                .await
                .unwrap();
        }
        store
    }

    fn names(rows: &[Record]) -> Vec<String> {
        rows.iter()
            .filter_map(|r| r.get("name").map(|v| v.to_text()))
            .collect()
    }

    #[tokio::test]
    async fn test_load_and_default_sort() {
        let store = seeded_store().await;
        let mut view = ListView::new(pcs::schema());

        assert!(view.load(&store).await);
        assert_eq!(names(&view.rows().unwrap()), vec!["ws-01", "ws-02", "ws-03"]);
    }

    #[tokio::test]
    async fn test_click_column_toggles_and_resets() {
        let store = seeded_store().await;
        let mut view = ListView::new(pcs::schema());
        view.load(&store).await;

        view.click_column("cost").unwrap();
        assert_eq!(view.query().sort_direction, SortDirection::Asc);
        assert_eq!(names(&view.rows().unwrap()), vec!["ws-02", "ws-03", "ws-01"]);

        view.click_column("cost").unwrap();
        assert_eq!(view.query().sort_direction, SortDirection::Desc);
        assert_eq!(names(&view.rows().unwrap()), vec!["ws-01", "ws-03", "ws-02"]);

        view.click_column("name").unwrap();
        assert_eq!(view.query().sort_key.as_deref(), Some("name"));
        assert_eq!(view.query().sort_direction, SortDirection::Asc);
    }

    #[tokio::test]
    async fn test_click_unknown_column_keeps_query() {
        let mut view = ListView::new(pcs::schema());
        let before = view.query().clone();

        assert!(view.click_column("warranty").is_err());
        assert_eq!(view.query(), &before);
    }

    #[tokio::test]
    async fn test_cards_ignore_filters() {
        let store = seeded_store().await;
        let mut view = ListView::new(pcs::schema());
        view.load(&store).await;

        view.set_facet("status", "offline");
        assert_eq!(view.rows().unwrap().len(), 1);

        let cards = view.cards();
        assert_eq!(cards[0].count("online"), Some(2));
        assert_eq!(cards[0].count("offline"), Some(1));

        view.clear_facet("status");
        assert_eq!(view.rows().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_load_yields_empty_list() {
        let store = seeded_store().await;
        let mut view = ListView::new(pcs::schema());
        view.load(&store).await;

        store.set_online(false);
        assert!(!view.load(&store).await);
        assert!(view.rows().unwrap().is_empty());
        assert!(matches!(view.last_error(), Some(StoreError::Unavailable { .. })));

        store.set_online(true);
        assert!(view.load(&store).await);
        assert!(view.last_error().is_none());
        assert_eq!(view.rows().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_facet_options_and_paging() {
        let store = seeded_store().await;
        let mut view = ListView::new(pcs::schema());
        view.load(&store).await;

        assert_eq!(view.facet_options("status"), vec!["offline", "online"]);

        let page = view.page(2, 2).unwrap();
        assert_eq!(names(&page.data), vec!["ws-03"]);
        assert_eq!(page.pagination.total, 3);
    }

    #[tokio::test]
    async fn test_reset_restores_initial_query() {
        let mut view = ListView::new(pcs::schema());
        view.set_search("ws");
        view.click_column("cost").unwrap();

        view.reset();
        assert_eq!(view.query(), &pcs::schema().initial_query());
    }
}

//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors carry stable machine-readable codes
//! - Error messages name the collection, field or file involved
//! - Conversions into `DeskError` keep the original error intact

use assetdesk::prelude::*;

// =============================================================================
// Error Code Tests
// =============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_invalid_sort_key_code() {
        let err = DeskError::from(QueryError::InvalidSortKey {
            key: "warranty".to_string(),
            available: vec!["name".to_string()],
        });
        assert_eq!(err.error_code(), "INVALID_SORT_KEY");
    }

    #[test]
    fn test_store_codes() {
        let cases = [
            (StoreError::unavailable("pcs", "offline"), "STORE_UNAVAILABLE"),
            (StoreError::write_error("pcs", "disk full"), "STORE_WRITE_ERROR"),
            (StoreError::not_found("pcs", Uuid::new_v4()), "RECORD_NOT_FOUND"),
        ];

        for (err, code) in cases {
            assert_eq!(err.error_code(), code);
            assert_eq!(DeskError::from(err).error_code(), code);
        }
    }

    #[test]
    fn test_config_code() {
        let err = DeskError::from(ConfigError::DuplicateCollection {
            collection: "pcs".to_string(),
        });
        assert_eq!(err.error_code(), "CONFIG_DUPLICATE_COLLECTION");
    }
}

// =============================================================================
// Message Tests
// =============================================================================

mod message_tests {
    use super::*;

    #[test]
    fn test_invalid_sort_key_lists_known_fields() {
        let err = QueryError::InvalidSortKey {
            key: "warranty".to_string(),
            available: vec!["name".to_string(), "cost".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("warranty"));
        assert!(message.contains("name, cost"));
    }

    #[test]
    fn test_store_errors_name_the_collection() {
        let id = Uuid::new_v4();
        let err = StoreError::not_found("patches", id);

        assert_eq!(err.collection(), "patches");
        assert!(err.to_string().contains(&id.to_string()));
        assert!(err.to_string().contains("patches"));
    }

    #[test]
    fn test_desk_error_is_transparent() {
        let inner = StoreError::unavailable("users", "store is offline");
        let outer = DeskError::from(inner.clone());
        assert_eq!(outer.to_string(), inner.to_string());
    }
}

// =============================================================================
// Propagation Tests
// =============================================================================

mod propagation_tests {
    use super::*;

    async fn rows_for(store: &InMemoryRecordStore, sort_key: &str) -> DeskResult<Vec<Record>> {
        let schema = assetdesk::entities::patches::schema();
        let records = store.list_all(&schema.collection).await?;
        let query = schema.initial_query().sort(sort_key, SortDirection::Asc);
        Ok(filter_and_sort(&records, &query, &schema.fields)?)
    }

    #[tokio::test]
    async fn test_question_mark_converts_both_layers() {
        let store = InMemoryRecordStore::new();

        let err = rows_for(&store, "nonexistent").await.unwrap_err();
        assert!(matches!(err, DeskError::Query(_)));

        store.set_online(false);
        let err = rows_for(&store, "nonexistent").await.unwrap_err();
        assert!(matches!(err, DeskError::Store(StoreError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn test_invalid_sort_key_on_empty_collection() {
        let store = InMemoryRecordStore::new();
        let err = rows_for(&store, "nonexistent").await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SORT_KEY");
    }
}

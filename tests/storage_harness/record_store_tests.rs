//! Macro-generated test suite for `RecordStore` contract validation.
//!
//! The `record_store_tests!` macro generates a test module that validates any
//! `RecordStore` implementation against the full contract: CRUD, snapshot
//! ordering, id assignment, subscriptions and concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use assetdesk::storage::InMemoryRecordStore;
//!
//! record_store_tests!(InMemoryRecordStore::new());
//! ```

/// Generate a full `RecordStore` conformance test suite.
///
/// `$factory` is re-evaluated for each test to ensure isolation. For the
/// concurrent access test, the returned store must also implement
/// `Clone + 'static` (shared state via Arc pattern).
#[macro_export]
macro_rules! record_store_tests {
    ($factory:expr) => {
        mod record_store_contract_tests {
            use super::*;
            use assetdesk::core::error::StoreError;
            use assetdesk::core::field::FieldValue;
            use assetdesk::core::service::RecordStore;
            use assetdesk::fields;
            use std::time::Duration;
            use uuid::Uuid;

            const TIMEOUT: Duration = Duration::from_secs(2);

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let store = $factory;
                let id = store.create(PCS, pc("ws-01", "online", 900.0)).await.unwrap();

                let record = store.get(PCS, &id).await.unwrap();
                assert!(record.is_some(), "Record should exist after create");
                let record = record.unwrap();
                assert_eq!(record.id, id);
                assert_eq!(record.get("name"), Some(&FieldValue::from("ws-01")));
                assert_eq!(record.get("cost"), Some(&FieldValue::from(900.0)));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;
                let result = store.get(PCS, &Uuid::new_v4()).await.unwrap();
                assert!(result.is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                assert!(store.list_all(PCS).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_returns_every_record_in_creation_order() {
                let store = $factory;
                let mut created = Vec::new();
                for fields in sample_pcs() {
                    created.push(store.create(PCS, fields).await.unwrap());
                }

                let all = store.list_all(PCS).await.unwrap();
                assert_count(&all, 5);
                assert_eq!(ids(&all), created);
            }

            #[tokio::test]
            async fn test_collections_are_isolated() {
                let store = $factory;
                store.create(PCS, pc("ws-01", "online", 1.0)).await.unwrap();
                store
                    .create(USERS, fields! { "name" => "Ada" })
                    .await
                    .unwrap();

                assert_count(&store.list_all(PCS).await.unwrap(), 1);
                assert_count(&store.list_all(USERS).await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_ids_are_unique() {
                let store = $factory;
                let mut seen = std::collections::HashSet::new();
                for i in 0..50 {
                    let id = store
                        .create(USERS, fields! { "n" => i as i64 })
                        .await
                        .unwrap();
                    assert!(seen.insert(id), "id {} assigned twice", id);
                }
            }

            #[tokio::test]
            async fn test_update_existing() {
                let store = $factory;
                let id = store.create(PCS, pc("ws-01", "online", 900.0)).await.unwrap();

                store
                    .update(PCS, &id, fields! { "status" => "offline", "owner" => "kim" })
                    .await
                    .unwrap();

                let record = store.get(PCS, &id).await.unwrap().unwrap();
                assert_eq!(record.get("status"), Some(&FieldValue::from("offline")));
                assert_eq!(record.get("owner"), Some(&FieldValue::from("kim")));
                assert_eq!(record.get("name"), Some(&FieldValue::from("ws-01")));
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory;
                let err = store
                    .update(PCS, &Uuid::new_v4(), fields! { "status" => "x" })
                    .await
                    .unwrap_err();
                assert!(matches!(err, StoreError::NotFound { .. }));
                assert_eq!(err.collection(), PCS);
            }

            #[tokio::test]
            async fn test_update_cannot_change_id() {
                let store = $factory;
                let id = store.create(PCS, pc("ws-01", "online", 1.0)).await.unwrap();

                store
                    .update(PCS, &id, fields! { "id" => "forged" })
                    .await
                    .unwrap();

                let record = store.get(PCS, &id).await.unwrap().unwrap();
                assert_eq!(record.id, id);
                assert!(record.get("id").is_none());
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory;
                let id = store.create(PCS, pc("ws-01", "online", 1.0)).await.unwrap();

                store.delete(PCS, &id).await.unwrap();
                assert!(store.get(PCS, &id).await.unwrap().is_none());
                assert!(store.list_all(PCS).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let store = $factory;
                let err = store.delete(PCS, &Uuid::new_v4()).await.unwrap_err();
                assert!(matches!(err, StoreError::NotFound { .. }));
            }

            // ==================================================================
            // Subscriptions
            // ==================================================================

            #[tokio::test]
            async fn test_subscribe_delivers_initial_snapshot() {
                let store = $factory;
                for fields in sample_pcs() {
                    store.create(PCS, fields).await.unwrap();
                }

                let mut sub = store.subscribe(PCS).await.unwrap();
                let first = tokio::time::timeout(TIMEOUT, sub.next_snapshot())
                    .await
                    .unwrap()
                    .unwrap();
                assert_count(&first, 5);
            }

            #[tokio::test]
            async fn test_subscribe_follows_every_mutation() {
                let store = $factory;
                let mut sub = store.subscribe(PCS).await.unwrap();
                let initial = tokio::time::timeout(TIMEOUT, sub.next_snapshot())
                    .await
                    .unwrap()
                    .unwrap();
                assert!(initial.is_empty());

                let id = store.create(PCS, pc("ws-01", "online", 1.0)).await.unwrap();
                let after_create = tokio::time::timeout(TIMEOUT, sub.next_snapshot())
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(ids(&after_create), vec![id]);

                store
                    .update(PCS, &id, fields! { "status" => "offline" })
                    .await
                    .unwrap();
                let after_update = tokio::time::timeout(TIMEOUT, sub.next_snapshot())
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(column(&after_update, "status"), vec!["offline"]);

                store.delete(PCS, &id).await.unwrap();
                let after_delete = tokio::time::timeout(TIMEOUT, sub.next_snapshot())
                    .await
                    .unwrap()
                    .unwrap();
                assert!(after_delete.is_empty());
            }

            #[tokio::test]
            async fn test_subscription_ignores_other_collections() {
                let store = $factory;
                let mut sub = store.subscribe(PCS).await.unwrap();
                tokio::time::timeout(TIMEOUT, sub.next_snapshot())
                    .await
                    .unwrap();

                store
                    .create(USERS, fields! { "name" => "Ada" })
                    .await
                    .unwrap();
                store.create(PCS, pc("ws-09", "online", 1.0)).await.unwrap();

                let next = tokio::time::timeout(TIMEOUT, sub.next_snapshot())
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(column(&next, "name"), vec!["ws-09"]);
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_access() {
                let store = $factory;
                let mut handles = Vec::new();

                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .create(PCS, pc(&format!("ws-{:02}", i), "online", i as f64))
                            .await
                    }));
                }

                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                assert_count(&store.list_all(PCS).await.unwrap(), 10);
            }
        }
    };
}

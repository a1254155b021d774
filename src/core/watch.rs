//! Live snapshots and scoped collection watches
//!
//! A [`Subscription`] is the raw feed a store hands out. [`watch_collection`]
//! forwards that feed to a callback, and [`watch_collection_size`] reduces it
//! to a badge counter. Every handle here tears its background task down when
//! dropped, so a view that goes away takes its listeners with it.

use crate::core::error::StoreResult;
use crate::core::record::Record;
use crate::core::service::RecordStore;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_stream::Stream;

/// Snapshots buffered per subscription before the producer waits
pub const SUBSCRIPTION_BUFFER: usize = 16;

/// A live feed of full collection snapshots
///
/// Each item replaces the previous one entirely; nothing is a diff.
pub struct Subscription {
    collection: String,
    rx: mpsc::Receiver<Vec<Record>>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Wrap a snapshot receiver and the task feeding it
    pub fn new(
        collection: impl Into<String>,
        rx: mpsc::Receiver<Vec<Record>>,
        task: Option<JoinHandle<()>>,
    ) -> Self {
        Self {
            collection: collection.into(),
            rx,
            task,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Wait for the next snapshot; `None` once the feed has ended
    pub async fn next_snapshot(&mut self) -> Option<Vec<Record>> {
        self.rx.recv().await
    }

    /// Stop the feed
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Stream for Subscription {
    type Item = Vec<Record>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        tracing::debug!(collection = %self.collection, "subscription closed");
    }
}

/// Owns a background watch task; aborts it on drop
#[must_use = "the watch stops as soon as the guard is dropped"]
pub struct WatchGuard {
    collection: String,
    task: JoinHandle<()>,
}

impl WatchGuard {
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Whether the watch task has stopped on its own
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Call `on_change` with every snapshot of `collection`
///
/// The first call carries the current contents. Must be called within a
/// tokio runtime.
pub async fn watch_collection<S, F>(
    store: &S,
    collection: &str,
    mut on_change: F,
) -> StoreResult<WatchGuard>
where
    S: RecordStore + ?Sized,
    F: FnMut(Vec<Record>) + Send + 'static,
{
    let mut subscription = store.subscribe(collection).await?;
    let task = tokio::spawn(async move {
        while let Some(snapshot) = subscription.next_snapshot().await {
            on_change(snapshot);
        }
    });

    tracing::debug!(collection, "collection watch started");

    Ok(WatchGuard {
        collection: collection.to_string(),
        task,
    })
}

/// Badge counter following the size of one collection
pub struct SizeWatch {
    rx: watch::Receiver<usize>,
    guard: WatchGuard,
}

impl SizeWatch {
    pub fn collection(&self) -> &str {
        self.guard.collection()
    }

    /// Latest known number of records
    pub fn current(&self) -> usize {
        *self.rx.borrow()
    }

    /// Wait until the size changes; `None` once the feed has ended
    pub async fn changed(&mut self) -> Option<usize> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

/// Start a size counter for `collection`
///
/// Resolves once the initial snapshot has arrived, so [`SizeWatch::current`]
/// is accurate from the start.
pub async fn watch_collection_size<S>(store: &S, collection: &str) -> StoreResult<SizeWatch>
where
    S: RecordStore + ?Sized,
{
    let mut subscription = store.subscribe(collection).await?;
    let initial = subscription
        .next_snapshot()
        .await
        .map_or(0, |snapshot| snapshot.len());

    let (tx, rx) = watch::channel(initial);
    let task = tokio::spawn(async move {
        while let Some(snapshot) = subscription.next_snapshot().await {
            // Only wake readers when the count actually moved
            tx.send_if_modified(|size| {
                let changed = *size != snapshot.len();
                *size = snapshot.len();
                changed
            });
        }
    });

    tracing::debug!(collection, size = initial, "size watch started");

    Ok(SizeWatch {
        rx,
        guard: WatchGuard {
            collection: collection.to_string(),
            task,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use tokio_stream::StreamExt;
    use uuid::Uuid;

    fn snapshot(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new(Uuid::new_v4(), fields! { "n" => i as i64 }))
            .collect()
    }

    #[tokio::test]
    async fn test_subscription_yields_in_order() {
        let (tx, rx) = mpsc::channel(4);
        let mut sub = Subscription::new("pcs", rx, None);

        tx.send(snapshot(1)).await.unwrap();
        tx.send(snapshot(3)).await.unwrap();
        drop(tx);

        assert_eq!(sub.next_snapshot().await.map(|s| s.len()), Some(1));
        assert_eq!(sub.next().await.map(|s| s.len()), Some(3));
        assert!(sub.next_snapshot().await.is_none());
        assert_eq!(sub.collection(), "pcs");
    }

    #[tokio::test]
    async fn test_dropping_subscription_aborts_feeder() {
        let (tx, rx) = mpsc::channel::<Vec<Record>>(1);
        let feeder = tokio::spawn(async move {
            let _tx = tx;
            std::future::pending::<()>().await;
        });
        let abort = feeder.abort_handle();

        let sub = Subscription::new("users", rx, Some(feeder));
        sub.unsubscribe();
        for _ in 0..16 {
            if abort.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }

        assert!(abort.is_finished());
    }
}

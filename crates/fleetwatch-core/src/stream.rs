// ── Reactive snapshot streams ──
//
// Subscriptions to the store's fleet snapshots. Every refresh and every
// live tick publishes a new snapshot, so one `changed()` wake-up per tick
// is the expected cadence for a dashboard redraw.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::{Fleet, Vessel};
use crate::store::flatten;

/// A subscription to a collection of entities.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via the `changed()` method or by converting to a `Stream`.
pub struct EntityStream<T: Send + Sync + 'static> {
    current: Arc<Vec<Arc<T>>>,
    receiver: watch::Receiver<Arc<Vec<Arc<T>>>>,
}

impl<T: Send + Sync + 'static> EntityStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<Arc<Vec<Arc<T>>>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Get the snapshot captured at creation time (or at the last `changed()`).
    pub fn current(&self) -> &Arc<Vec<Arc<T>>> {
        &self.current
    }

    /// Get the latest snapshot (may have changed since creation).
    pub fn latest(&self) -> Arc<Vec<Arc<T>>> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` if the sender (DataStore) has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<Vec<Arc<T>>>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    ///
    /// The stream yields the current snapshot first, then one item per
    /// subsequent change.
    pub fn into_stream(self) -> EntityWatchStream<T> {
        EntityWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

impl EntityStream<Fleet> {
    /// Vessels of the held snapshot, flattened in fleet order.
    pub fn current_vessels(&self) -> Vec<Arc<Vessel>> {
        flatten(&self.current)
    }

    /// Wait for the next snapshot and return its vessels.
    pub async fn changed_vessels(&mut self) -> Option<Vec<Arc<Vessel>>> {
        self.changed().await.map(|snap| flatten(&snap))
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct EntityWatchStream<T: Send + Sync + 'static> {
    inner: WatchStream<Arc<Vec<Arc<T>>>>,
}

impl<T: Send + Sync + 'static> Stream for EntityWatchStream<T> {
    type Item = Arc<Vec<Arc<T>>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use tokio_test::{assert_pending, assert_ready, task};

    #[test]
    fn changed_wakes_on_send() {
        let (tx, rx) = watch::channel(Arc::new(vec![Arc::new(1u32)]));
        let mut stream = EntityStream::new(rx);
        assert_eq!(stream.current().len(), 1);

        let mut changed = task::spawn(stream.changed());
        assert_pending!(changed.poll());

        tx.send_replace(Arc::new(vec![Arc::new(1u32), Arc::new(2)]));
        assert!(changed.is_woken());
        let snap = assert_ready!(changed.poll()).unwrap();
        assert_eq!(snap.len(), 2);
        drop(changed);
        assert_eq!(stream.current().len(), 2);
    }

    #[test]
    fn changed_returns_none_after_sender_drop() {
        let (tx, rx) = watch::channel(Arc::new(Vec::<Arc<u32>>::new()));
        let mut stream = EntityStream::new(rx);
        drop(tx);

        let mut changed = task::spawn(stream.changed());
        assert!(assert_ready!(changed.poll()).is_none());
    }

    #[tokio::test]
    async fn fleet_stream_flattens_vessels() {
        use crate::model::ConnectionStatus;
        use crate::test_support::{fleet, vessel};

        let north = fleet("North", "Oceanic", vec![vessel("A", ConnectionStatus::Online, 80)]);
        let (tx, rx) = watch::channel(Arc::new(vec![north.clone()]));
        let mut stream = EntityStream::new(rx);
        assert_eq!(stream.current_vessels().len(), 1);

        let south = fleet(
            "South",
            "Polar",
            vec![
                vessel("B", ConnectionStatus::Online, 70),
                vessel("C", ConnectionStatus::Offline, 0),
            ],
        );
        tx.send_replace(Arc::new(vec![north, south]));
        let vessels = stream.changed_vessels().await.unwrap();
        let names: Vec<_> = vessels.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn into_stream_yields_current_then_updates() {
        let (tx, rx) = watch::channel(Arc::new(vec![Arc::new("a")]));
        let mut stream = EntityStream::new(rx).into_stream();

        assert_eq!(stream.next().await.unwrap().len(), 1);
        tx.send_replace(Arc::new(vec![Arc::new("a"), Arc::new("b")]));
        assert_eq!(stream.next().await.unwrap().len(), 2);
    }
}

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::notification::{poller, NotificationSource, PollerHandle};

/// Unread badge count, polled independently of the notification list.
///
/// Overlapping refreshes are not ordered: whichever response lands last
/// is the value that sticks.
#[derive(Clone)]
pub struct UnreadCounter {
    source: Arc<dyn NotificationSource>,
    count: Arc<watch::Sender<u64>>,
}

impl UnreadCounter {
    pub fn new(source: Arc<dyn NotificationSource>) -> Self {
        let (count, _) = watch::channel(0);
        Self {
            source,
            count: Arc::new(count),
        }
    }

    /// Fetch the unread count and replace the stored value. Failures are
    /// logged and the previous value is kept.
    pub async fn refresh(&self) {
        match self.source.fetch_unread_count().await {
            Ok(count) => {
                let previous = self.count.send_replace(count);
                if previous != count {
                    tracing::debug!("Unread count changed from {} to {}", previous, count);
                }
            }
            Err(e) => {
                tracing::error!("Failed to load unread count: {}", e);
            }
        }
    }

    pub fn current(&self) -> u64 {
        *self.count.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.count.subscribe()
    }

    /// Refresh now, then every `period` until the handle is stopped.
    pub fn spawn_poller(&self, period: Duration) -> PollerHandle {
        let initial = self.clone();
        let tick = self.clone();
        poller::spawn(
            "unread count",
            period,
            move || async move { initial.refresh().await },
            move || {
                let counter = tick.clone();
                async move { counter.refresh().await }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::test_support::{network_error, notification, FakeSource};

    #[tokio::test]
    async fn test_refresh_replaces_count() {
        let source = FakeSource::with(vec![
            notification("a", false),
            notification("b", false),
            notification("c", true),
        ]);
        let counter = UnreadCounter::new(source.clone());
        assert_eq!(counter.current(), 0);

        counter.refresh().await;
        assert_eq!(counter.current(), 2);

        source.set_server_notifications(vec![notification("a", true)]);
        counter.refresh().await;
        assert_eq!(counter.current(), 0);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_value() {
        let source = FakeSource::with(vec![notification("a", false)]);
        let counter = UnreadCounter::new(source.clone());
        counter.refresh().await;
        assert_eq!(counter.current(), 1);

        source.fail_count(Some(network_error()));
        source.set_server_notifications(vec![]);
        counter.refresh().await;
        assert_eq!(counter.current(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_observe_changes() {
        let source = FakeSource::with(vec![notification("a", false), notification("b", false)]);
        let counter = UnreadCounter::new(source);
        let mut rx = counter.subscribe();

        counter.refresh().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_refreshes_on_mount_and_every_period() {
        let source = FakeSource::with(vec![notification("a", false)]);
        let counter = UnreadCounter::new(source.clone());

        let handle = counter.spawn_poller(Duration::from_secs(5));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(FakeSource::calls(&source.count_calls), 1);
        assert_eq!(counter.current(), 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(FakeSource::calls(&source.count_calls), 2);

        handle.stop().await;
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(FakeSource::calls(&source.count_calls), 2);
    }
}

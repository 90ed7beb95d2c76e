use std::sync::Arc;
use std::time::Duration;

use crate::notification::{NotificationSource, NotificationStore, PollerHandle, UnreadCounter};

/// Notification state for one admin session: both pollers and the state
/// they feed. Created at startup and torn down on shutdown.
pub struct NotificationSession {
    store: NotificationStore,
    counter: UnreadCounter,
    pollers: Vec<PollerHandle>,
}

impl NotificationSession {
    pub fn start(source: Arc<dyn NotificationSource>, poll_interval: Duration) -> Self {
        let counter = UnreadCounter::new(source.clone());
        let store = NotificationStore::new(source, counter.clone());

        let pollers = vec![
            counter.spawn_poller(poll_interval),
            store.spawn_poller(poll_interval),
        ];
        tracing::info!("Notification pollers started ({:?} period)", poll_interval);

        Self {
            store,
            counter,
            pollers,
        }
    }

    pub fn store(&self) -> &NotificationStore {
        &self.store
    }

    pub fn counter(&self) -> &UnreadCounter {
        &self.counter
    }

    pub async fn shutdown(self) {
        for poller in self.pollers {
            poller.stop().await;
        }
        tracing::info!("Notification pollers stopped");
    }
}

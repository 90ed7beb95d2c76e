use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::{
    error::NotificationError,
    notification::{
        notification_models::Notification, poller, NotificationSource, PollerHandle, UnreadCounter,
    },
    pending::PendingSet,
};

const LOAD_ERROR_FALLBACK: &str = "Failed to load notifications";

#[derive(Default)]
struct StoreState {
    notifications: Vec<Notification>,
    is_loading: bool,
    error: Option<String>,
}

/// What the notifications screen should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum Screen {
    Loading,
    Error(String),
    Empty,
    List,
}

#[derive(Debug, Clone)]
pub struct NotificationsSnapshot {
    pub notifications: Vec<Notification>,
    /// Computed from the local list; may lag the unread counter.
    pub unread_count: usize,
    pub is_loading: bool,
    pub error: Option<String>,
    pub pending_ids: Vec<String>,
}

impl NotificationsSnapshot {
    pub fn screen(&self) -> Screen {
        if self.is_loading {
            return Screen::Loading;
        }
        match (&self.error, self.notifications.is_empty()) {
            (Some(error), true) => Screen::Error(error.clone()),
            (None, true) => Screen::Empty,
            _ => Screen::List,
        }
    }
}

/// Owns the notification list and its fetch/mutate lifecycle.
#[derive(Clone)]
pub struct NotificationStore {
    source: Arc<dyn NotificationSource>,
    counter: UnreadCounter,
    state: Arc<RwLock<StoreState>>,
    pending: PendingSet,
}

impl NotificationStore {
    pub fn new(source: Arc<dyn NotificationSource>, counter: UnreadCounter) -> Self {
        Self {
            source,
            counter,
            state: Arc::new(RwLock::new(StoreState::default())),
            pending: PendingSet::new(),
        }
    }

    /// Fetch the full list. Only an initial load touches the loading flag;
    /// a failed load keeps whatever list was already there.
    pub async fn load(&self, is_initial: bool) {
        {
            let mut state = self.state.write().await;
            if is_initial {
                state.is_loading = true;
            }
            state.error = None;
        }

        match self.source.fetch_notifications().await {
            Ok(fetched) => {
                {
                    let mut state = self.state.write().await;
                    let merged = merge_read_flags(&state.notifications, fetched);
                    state.notifications = merged;
                    if is_initial {
                        state.is_loading = false;
                    }
                    tracing::debug!("Loaded {} notifications", state.notifications.len());
                }
                self.counter.refresh().await;
            }
            Err(e) => {
                let err = NotificationError::Fetch(e);
                tracing::error!("Failed to load notifications: {}", err);

                let message = err.to_string();
                let mut state = self.state.write().await;
                state.error = Some(if message.is_empty() {
                    LOAD_ERROR_FALLBACK.to_string()
                } else {
                    message
                });
                if is_initial {
                    state.is_loading = false;
                }
            }
        }
    }

    /// Mark one notification as read.
    ///
    /// Returns `Ok(false)` without calling upstream when a mark-read for the
    /// same id is already in flight.
    pub async fn mark_as_read(&self, notification_id: &str) -> Result<bool, NotificationError> {
        // Released on every exit path, including a dropped future.
        let Some(_pending) = self.pending.try_begin(notification_id) else {
            tracing::debug!("Notification {} is already being marked as read", notification_id);
            return Ok(false);
        };

        match self.source.mark_notification_read(notification_id).await {
            Ok(_) => {
                {
                    let mut state = self.state.write().await;
                    if let Some(entry) = state
                        .notifications
                        .iter_mut()
                        .find(|n| n.id == notification_id)
                    {
                        entry.is_read = true;
                    }
                }
                self.counter.refresh().await;
                Ok(true)
            }
            Err(e) => {
                let err = NotificationError::Mutation(e);
                tracing::error!("Failed to mark notification {} as read: {}", notification_id, err);
                Err(err)
            }
        }
    }

    /// Mark every notification as read. Nothing changes locally unless the
    /// upstream call succeeds.
    pub async fn mark_all_as_read(&self) -> Result<(), NotificationError> {
        match self.source.mark_all_notifications_read().await {
            Ok(()) => {
                {
                    let mut state = self.state.write().await;
                    for entry in state.notifications.iter_mut() {
                        entry.is_read = true;
                    }
                }
                self.counter.refresh().await;
                Ok(())
            }
            Err(e) => {
                let err = NotificationError::Mutation(e);
                tracing::error!("Failed to mark all notifications as read: {}", err);
                Err(err)
            }
        }
    }

    pub async fn unread_count(&self) -> usize {
        let state = self.state.read().await;
        state.notifications.iter().filter(|n| !n.is_read).count()
    }

    #[cfg(test)]
    pub fn is_pending(&self, notification_id: &str) -> bool {
        self.pending.contains(notification_id)
    }

    pub async fn snapshot(&self) -> NotificationsSnapshot {
        let state = self.state.read().await;
        NotificationsSnapshot {
            notifications: state.notifications.clone(),
            unread_count: state.notifications.iter().filter(|n| !n.is_read).count(),
            is_loading: state.is_loading,
            error: state.error.clone(),
            pending_ids: self.pending.ids(),
        }
    }

    /// Initial load now, then a background load every `period`.
    pub fn spawn_poller(&self, period: Duration) -> PollerHandle {
        let initial = self.clone();
        let tick = self.clone();
        poller::spawn(
            "notifications",
            period,
            move || async move { initial.load(true).await },
            move || {
                let store = tick.clone();
                async move { store.load(false).await }
            },
        )
    }
}

/// Replace the list with `fetched`, keeping entries we already hold as read
/// marked read.
fn merge_read_flags(current: &[Notification], mut fetched: Vec<Notification>) -> Vec<Notification> {
    let read_ids: HashSet<&str> = current
        .iter()
        .filter(|n| n.is_read)
        .map(|n| n.id.as_str())
        .collect();

    for entry in fetched.iter_mut() {
        if read_ids.contains(entry.id.as_str()) {
            entry.is_read = true;
        }
    }
    fetched
}

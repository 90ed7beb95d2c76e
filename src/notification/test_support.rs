use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{
    error::RequestError,
    notification::{
        notification_models::{Notification, NotificationKind},
        NotificationSource,
    },
};

pub fn notification(id: &str, is_read: bool) -> Notification {
    Notification {
        id: id.to_string(),
        kind: NotificationKind::AgentViewedRequest,
        request_id: format!("req-{}", id),
        agent_id: "agent-1".to_string(),
        agent_name: Some("Karim".to_string()),
        agent_phone_number: None,
        message: format!("Karim viewed request {}", id),
        is_read,
        created_at: "2025-01-05T14:30:00Z".to_string(),
    }
}

pub fn network_error() -> RequestError {
    RequestError::Network("connection refused".to_string())
}

/// In-memory marketplace that answers like the real API and counts calls.
#[derive(Default)]
pub struct FakeSource {
    server: Mutex<Vec<Notification>>,
    fetch_error: Mutex<Option<RequestError>>,
    count_error: Mutex<Option<RequestError>>,
    mark_read_error: Mutex<Option<RequestError>>,
    mark_all_error: Mutex<Option<RequestError>>,
    fetch_gate: Mutex<Option<Arc<Notify>>>,
    mark_read_gate: Mutex<Option<Arc<Notify>>>,
    pub fetch_calls: AtomicUsize,
    pub count_calls: AtomicUsize,
    pub mark_read_calls: AtomicUsize,
    pub mark_all_calls: AtomicUsize,
}

impl FakeSource {
    pub fn with(notifications: Vec<Notification>) -> Arc<Self> {
        let source = Self::default();
        *source.server.lock().unwrap() = notifications;
        Arc::new(source)
    }

    pub fn set_server_notifications(&self, notifications: Vec<Notification>) {
        *self.server.lock().unwrap() = notifications;
    }

    pub fn fail_fetch(&self, error: Option<RequestError>) {
        *self.fetch_error.lock().unwrap() = error;
    }

    pub fn fail_count(&self, error: Option<RequestError>) {
        *self.count_error.lock().unwrap() = error;
    }

    pub fn fail_mark_read(&self, error: Option<RequestError>) {
        *self.mark_read_error.lock().unwrap() = error;
    }

    pub fn fail_mark_all(&self, error: Option<RequestError>) {
        *self.mark_all_error.lock().unwrap() = error;
    }

    /// Holds every `fetch_notifications` call until the returned gate is notified.
    pub fn hold_fetch(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.fetch_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Holds every `mark_notification_read` call until the returned gate is notified.
    pub fn hold_mark_read(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.mark_read_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    /// Yields until `counter` reaches `expected`.
    pub async fn wait_for(counter: &AtomicUsize, expected: usize) {
        while counter.load(Ordering::SeqCst) < expected {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl NotificationSource for FakeSource {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, RequestError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.fetch_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(err) = self.fetch_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.server.lock().unwrap().clone())
    }

    async fn fetch_unread_notifications(&self) -> Result<Vec<Notification>, RequestError> {
        if let Some(err) = self.fetch_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self
            .server
            .lock()
            .unwrap()
            .iter()
            .filter(|n| !n.is_read)
            .cloned()
            .collect())
    }

    async fn fetch_unread_count(&self) -> Result<u64, RequestError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.count_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.server.lock().unwrap().iter().filter(|n| !n.is_read).count() as u64)
    }

    async fn mark_notification_read(&self, notification_id: &str) -> Result<Notification, RequestError> {
        self.mark_read_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.mark_read_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(err) = self.mark_read_error.lock().unwrap().clone() {
            return Err(err);
        }

        let mut server = self.server.lock().unwrap();
        let entry = server
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or_else(|| RequestError::Status {
                status: 404,
                message: "Notification not found".to_string(),
            })?;
        entry.is_read = true;
        Ok(entry.clone())
    }

    async fn mark_all_notifications_read(&self) -> Result<(), RequestError> {
        self.mark_all_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.mark_all_error.lock().unwrap().clone() {
            return Err(err);
        }
        for entry in self.server.lock().unwrap().iter_mut() {
            entry.is_read = true;
        }
        Ok(())
    }
}

use serde::Serialize;
use utoipa::ToSchema;

use crate::notification::{
    notification_models::Notification,
    notification_store::{NotificationsSnapshot, Screen},
};

/// A notification with the fields the screen renders next to it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    #[serde(flatten)]
    pub notification: Notification,
    pub agent_label: Option<String>,
    pub display_created_at: String,
    /// A mark-read for this entry is in flight.
    pub is_pending: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsView {
    pub notifications: Vec<NotificationItem>,
    pub unread_count: usize,
    pub is_loading: bool,
    pub error: Option<String>,
    pub screen: Screen,
}

impl From<NotificationsSnapshot> for NotificationsView {
    fn from(snapshot: NotificationsSnapshot) -> Self {
        let screen = snapshot.screen();
        let NotificationsSnapshot {
            notifications,
            unread_count,
            is_loading,
            error,
            pending_ids,
        } = snapshot;

        let notifications = notifications
            .into_iter()
            .map(|notification| NotificationItem {
                agent_label: notification.agent_label().map(str::to_string),
                display_created_at: notification.display_created_at(),
                is_pending: pending_ids.contains(&notification.id),
                notification,
            })
            .collect();

        Self {
            notifications,
            unread_count,
            is_loading,
            error,
            screen,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkReadResponse {
    /// False when a mark-read for this id was already in flight.
    pub applied: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCountResponse {
    pub count: u64,
}

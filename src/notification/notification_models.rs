use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    AgentViewedRequest,
    /// A type this build does not know about yet.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::AgentViewedRequest => write!(f, "agent_viewed_request"),
            NotificationKind::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub request_id: String,
    pub agent_id: String,
    pub agent_name: Option<String>,
    pub agent_phone_number: Option<String>,
    pub message: String,
    pub is_read: bool,
    /// ISO 8601, as sent by the marketplace API.
    pub created_at: String,
}

impl Notification {
    /// Name of the agent, falling back to their phone number. Blank values
    /// count as missing.
    pub fn agent_label(&self) -> Option<&str> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.is_empty())
        }
        present(&self.agent_name).or_else(|| present(&self.agent_phone_number))
    }

    /// Creation time as `Jan 5, 2025, 02:30 PM` (UTC). Unparseable
    /// timestamps are returned unchanged.
    pub fn display_created_at(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(created_at) => created_at
                .with_timezone(&Utc)
                .format("%b %-d, %Y, %I:%M %p")
                .to_string(),
            Err(_) => self.created_at.clone(),
        }
    }
}

/// Notification record as stored by the marketplace API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerNotification {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub request_id: String,
    pub agent_id: String,
    pub agent_name: Option<String>,
    pub agent_phone_number: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
}

impl From<ServerNotification> for Notification {
    fn from(server: ServerNotification) -> Self {
        Self {
            id: server.id,
            kind: server.kind,
            request_id: server.request_id,
            agent_id: server.agent_id,
            agent_name: server.agent_name,
            agent_phone_number: server.agent_phone_number,
            message: server.message,
            is_read: server.is_read,
            created_at: server.created_at,
        }
    }
}

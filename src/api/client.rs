use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};

use crate::{
    admin::dto::{AdminUser, ServerUser},
    error::RequestError,
    estate::estate_models::{EstateRequest, RequestStatus, ServerEstateRequest},
    notification::notification_models::{Notification, ServerNotification},
};

#[derive(Deserialize)]
struct NotificationsEnvelope {
    notifications: Vec<ServerNotification>,
}

#[derive(Deserialize)]
struct NotificationEnvelope {
    notification: ServerNotification,
}

#[derive(Deserialize)]
struct CountEnvelope {
    count: u64,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    users: Vec<ServerUser>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: ServerUser,
}

#[derive(Deserialize)]
struct RequestsEnvelope {
    requests: Vec<ServerEstateRequest>,
}

#[derive(Deserialize)]
struct RequestEnvelope {
    request: ServerEstateRequest,
}

/// REST client for the marketplace API.
///
/// Every call is awaited without a timeout; a slow response simply resolves
/// later. Records come back with `_id` and are converted to the API models
/// before they leave this type.
#[derive(Clone)]
pub struct MarketplaceClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl MarketplaceClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, RequestError> {
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RequestError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, RequestError> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| RequestError::Decode(e.to_string()))
    }

    pub async fn fetch_notifications(&self) -> Result<Vec<Notification>, RequestError> {
        let envelope: NotificationsEnvelope = self
            .send_json(self.request(Method::GET, "/api/admin/notifications"))
            .await?;
        Ok(envelope.notifications.into_iter().map(Notification::from).collect())
    }

    pub async fn fetch_unread_notifications(&self) -> Result<Vec<Notification>, RequestError> {
        let envelope: NotificationsEnvelope = self
            .send_json(self.request(Method::GET, "/api/admin/notifications/unread"))
            .await?;
        Ok(envelope.notifications.into_iter().map(Notification::from).collect())
    }

    pub async fn fetch_unread_count(&self) -> Result<u64, RequestError> {
        let envelope: CountEnvelope = self
            .send_json(self.request(Method::GET, "/api/admin/notifications/unread/count"))
            .await?;
        Ok(envelope.count)
    }

    pub async fn mark_notification_read(&self, notification_id: &str) -> Result<Notification, RequestError> {
        let path = format!("/api/admin/notifications/{}/read", notification_id);
        let envelope: NotificationEnvelope = self.send_json(self.request(Method::PUT, &path)).await?;
        Ok(envelope.notification.into())
    }

    pub async fn mark_all_notifications_read(&self) -> Result<(), RequestError> {
        self.send(self.request(Method::PUT, "/api/admin/notifications/read-all"))
            .await?;
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<AdminUser>, RequestError> {
        let envelope: UsersEnvelope = self
            .send_json(self.request(Method::GET, "/api/admin/users"))
            .await?;
        Ok(envelope.users.into_iter().map(AdminUser::from).collect())
    }

    pub async fn approve_agent(&self, user_id: &str) -> Result<AdminUser, RequestError> {
        let path = format!("/api/admin/agents/{}/approve", user_id);
        let envelope: UserEnvelope = self.send_json(self.request(Method::POST, &path)).await?;
        Ok(envelope.user.into())
    }

    pub async fn list_requests(&self) -> Result<Vec<EstateRequest>, RequestError> {
        let envelope: RequestsEnvelope = self
            .send_json(self.request(Method::GET, "/api/estate/requests"))
            .await?;
        Ok(envelope.requests.into_iter().map(EstateRequest::from).collect())
    }

    pub async fn update_request_status(
        &self,
        request_id: &str,
        status: RequestStatus,
    ) -> Result<EstateRequest, RequestError> {
        let path = format!("/api/estate/requests/{}/status", request_id);
        let builder = self
            .request(Method::PATCH, &path)
            .json(&serde_json::json!({ "status": status }));
        let envelope: RequestEnvelope = self.send_json(builder).await?;
        Ok(envelope.request.into())
    }
}

/// Human-readable message for a non-success response.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}

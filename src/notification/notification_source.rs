use async_trait::async_trait;

use crate::{
    api::MarketplaceClient, error::RequestError,
    notification::notification_models::Notification,
};

/// Upstream operations the notification pollers depend on.
#[async_trait]
pub trait NotificationSource: Send + Sync {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, RequestError>;

    async fn fetch_unread_notifications(&self) -> Result<Vec<Notification>, RequestError>;

    async fn fetch_unread_count(&self) -> Result<u64, RequestError>;

    async fn mark_notification_read(&self, notification_id: &str) -> Result<Notification, RequestError>;

    async fn mark_all_notifications_read(&self) -> Result<(), RequestError>;
}

#[async_trait]
impl NotificationSource for MarketplaceClient {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, RequestError> {
        MarketplaceClient::fetch_notifications(self).await
    }

    async fn fetch_unread_notifications(&self) -> Result<Vec<Notification>, RequestError> {
        MarketplaceClient::fetch_unread_notifications(self).await
    }

    async fn fetch_unread_count(&self) -> Result<u64, RequestError> {
        MarketplaceClient::fetch_unread_count(self).await
    }

    async fn mark_notification_read(&self, notification_id: &str) -> Result<Notification, RequestError> {
        MarketplaceClient::mark_notification_read(self, notification_id).await
    }

    async fn mark_all_notifications_read(&self) -> Result<(), RequestError> {
        MarketplaceClient::mark_all_notifications_read(self).await
    }
}

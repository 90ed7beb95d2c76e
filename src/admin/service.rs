use crate::{
    admin::dto::AdminUser,
    api::MarketplaceClient,
    error::{AppError, Result},
    pending::PendingSet,
};

#[derive(Clone)]
pub struct AdminService {
    client: MarketplaceClient,
    approving: PendingSet,
}

impl AdminService {
    pub fn new(client: MarketplaceClient) -> Self {
        Self {
            client,
            approving: PendingSet::new(),
        }
    }

    pub async fn list_users(&self) -> Result<Vec<AdminUser>> {
        self.client.list_users().await.map_err(|e| {
            tracing::error!("Failed to load users: {}", e);
            AppError::from(e)
        })
    }

    /// Approve an agent account. A second approval for the same user while the
    /// first is in flight is rejected.
    pub async fn approve_agent(&self, user_id: &str) -> Result<AdminUser> {
        let Some(_approving) = self.approving.try_begin(user_id) else {
            return Err(AppError::Conflict(format!(
                "Approval of user {} is already in progress",
                user_id
            )));
        };

        let user = self.client.approve_agent(user_id).await.map_err(|e| {
            tracing::error!("Failed to approve agent {}: {}", user_id, e);
            AppError::from(e)
        })?;

        tracing::info!("Approved agent {}", user.id);
        Ok(user)
    }

    #[cfg(test)]
    pub fn is_approving(&self, user_id: &str) -> bool {
        self.approving.contains(user_id)
    }
}

use crate::{
    api::MarketplaceClient,
    error::{AppError, Result},
    estate::estate_models::{EstateRequest, RequestStatus},
    pending::PendingSet,
};

/// Service layer for property requests.
#[derive(Clone)]
pub struct EstateService {
    client: MarketplaceClient,
    updating: PendingSet,
}

impl EstateService {
    pub fn new(client: MarketplaceClient) -> Self {
        Self {
            client,
            updating: PendingSet::new(),
        }
    }

    pub async fn list_requests(&self) -> Result<Vec<EstateRequest>> {
        self.client.list_requests().await.map_err(|e| {
            tracing::error!("Failed to load requests: {}", e);
            AppError::from(e)
        })
    }

    pub async fn update_request_status(
        &self,
        request_id: &str,
        status: RequestStatus,
    ) -> Result<EstateRequest> {
        let Some(_updating) = self.updating.try_begin(request_id) else {
            return Err(AppError::Conflict(format!(
                "Status update for request {} is already in progress",
                request_id
            )));
        };

        let request = self
            .client
            .update_request_status(request_id, status)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update request {} status: {}", request_id, e);
                AppError::from(e)
            })?;

        tracing::info!("Request {} moved to {}", request.id, request.status);
        Ok(request)
    }
}

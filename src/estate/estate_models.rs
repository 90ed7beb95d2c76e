use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Completed,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "Pending"),
            RequestStatus::InProgress => write!(f, "In Progress"),
            RequestStatus::Completed => write!(f, "Completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstateRequest {
    pub id: String,
    pub user_id: String,
    pub property_type: String,
    pub location: String,
    pub budget: String,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub surface: Option<String>,
    pub district: Option<String>,
    pub additional_requirements: Option<String>,
    pub status: RequestStatus,
    pub created_at: String,
}

/// Property request as stored by the marketplace API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerEstateRequest {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub property_type: String,
    pub location: String,
    pub budget: String,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub surface: Option<String>,
    pub district: Option<String>,
    pub additional_requirements: Option<String>,
    pub status: RequestStatus,
    pub created_at: String,
}

impl From<ServerEstateRequest> for EstateRequest {
    fn from(server: ServerEstateRequest) -> Self {
        Self {
            id: server.id,
            user_id: server.user_id,
            property_type: server.property_type,
            location: server.location,
            budget: server.budget,
            bedrooms: server.bedrooms,
            bathrooms: server.bathrooms,
            surface: server.surface,
            district: server.district,
            additional_requirements: server.additional_requirements,
            status: server.status,
            created_at: server.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateRequestStatusRequest {
    pub status: RequestStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RequestsResponse {
    pub requests: Vec<EstateRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RequestResponse {
    pub request: EstateRequest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_status_display() {
        assert_eq!(RequestStatus::Pending.to_string(), "Pending");
        assert_eq!(RequestStatus::InProgress.to_string(), "In Progress");
        assert_eq!(RequestStatus::Completed.to_string(), "Completed");
    }

    #[test]
    fn test_server_request_conversion() {
        let server: ServerEstateRequest = serde_json::from_value(json!({
            "_id": "r-7",
            "userId": "u-1",
            "propertyType": "Villa",
            "location": "Marrakech",
            "budget": "3,000,000 MAD",
            "bedrooms": "4",
            "status": "in_progress",
            "createdAt": "2025-03-10T08:15:00Z"
        }))
        .unwrap();

        let request = EstateRequest::from(server);
        assert_eq!(request.id, "r-7");
        assert_eq!(request.status, RequestStatus::InProgress);
        assert_eq!(request.bedrooms.as_deref(), Some("4"));
        assert_eq!(request.district, None);

        let api = serde_json::to_value(&request).unwrap();
        assert_eq!(api["status"], "in_progress");
        assert_eq!(api["propertyType"], "Villa");
    }
}

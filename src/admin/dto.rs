use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub phone_number: String,
    pub name: Option<String>,
    pub is_new_user: bool,
    pub is_agent: bool,
    pub is_approved: bool,
    pub created_at: String,
}

/// User record as stored by the marketplace API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub phone_number: String,
    pub name: Option<String>,
    pub is_new_user: bool,
    pub is_agent: bool,
    pub is_approved: bool,
    pub created_at: String,
}

impl From<ServerUser> for AdminUser {
    fn from(server: ServerUser) -> Self {
        Self {
            id: server.id,
            phone_number: server.phone_number,
            name: server.name,
            is_new_user: server.is_new_user,
            is_agent: server.is_agent,
            is_approved: server.is_approved,
            created_at: server.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<AdminUser>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub user: AdminUser,
}

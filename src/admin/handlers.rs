use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    admin::dto::{UserResponse, UsersResponse},
    error::Result,
    state::AppState,
};

/// Get all users
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    responses(
        (status = 200, description = "Users retrieved successfully", body = UsersResponse),
        (status = 502, description = "Marketplace API unavailable")
    )
)]
pub async fn get_all_users(State(state): State<AppState>) -> Result<Json<UsersResponse>> {
    let users = state.admin_service.list_users().await?;
    Ok(Json(UsersResponse { users }))
}

/// Approve an agent
#[utoipa::path(
    post,
    path = "/api/admin/agents/{user_id}/approve",
    tag = "admin",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Agent approved", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Approval already in progress"),
        (status = 502, description = "Marketplace API unavailable")
    )
)]
pub async fn approve_agent(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = state.admin_service.approve_agent(&user_id).await?;
    Ok(Json(UserResponse { user }))
}

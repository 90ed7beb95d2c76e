use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::Result,
    estate::estate_models::{RequestResponse, RequestsResponse, UpdateRequestStatusRequest},
    state::AppState,
};

/// Get all property requests
#[utoipa::path(
    get,
    path = "/api/requests",
    tag = "requests",
    responses(
        (status = 200, description = "Requests retrieved successfully", body = RequestsResponse),
        (status = 502, description = "Marketplace API unavailable")
    )
)]
pub async fn get_requests(State(state): State<AppState>) -> Result<Json<RequestsResponse>> {
    let requests = state.estate_service.list_requests().await?;
    Ok(Json(RequestsResponse { requests }))
}

/// Update request status
#[utoipa::path(
    patch,
    path = "/api/requests/{id}/status",
    tag = "requests",
    params(
        ("id" = String, Path, description = "Request ID")
    ),
    request_body = UpdateRequestStatusRequest,
    responses(
        (status = 200, description = "Request status updated", body = RequestResponse),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Update already in progress"),
        (status = 502, description = "Marketplace API unavailable")
    )
)]
pub async fn update_request_status(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Json(payload): Json<UpdateRequestStatusRequest>,
) -> Result<Json<RequestResponse>> {
    let request = state
        .estate_service
        .update_request_status(&request_id, payload.status)
        .await?;
    Ok(Json(RequestResponse { request }))
}

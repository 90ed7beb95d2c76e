use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive},
        Sse,
    },
    Json,
};
use futures::stream::{Stream, StreamExt};
use tokio_stream::wrappers::WatchStream;

use crate::{
    error::Result,
    notification::notification_dto::{
        MarkReadResponse, NotificationsResponse, NotificationsView, UnreadCountResponse,
    },
    state::AppState,
};

/// Current state of the notifications screen
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Polled notification list and screen state", body = NotificationsView)
    ),
    tag = "notifications"
)]
pub async fn get_notifications(State(state): State<AppState>) -> Json<NotificationsView> {
    Json(state.notification_store.snapshot().await.into())
}

/// Unread notifications, fetched straight from the marketplace
#[utoipa::path(
    get,
    path = "/api/notifications/unread",
    responses(
        (status = 200, description = "Unread notifications", body = NotificationsResponse),
        (status = 502, description = "Marketplace API unavailable")
    ),
    tag = "notifications"
)]
pub async fn get_unread_notifications(
    State(state): State<AppState>,
) -> Result<Json<NotificationsResponse>> {
    let notifications = state.notification_source.fetch_unread_notifications().await?;
    Ok(Json(NotificationsResponse { notifications }))
}

/// Mark notification as read
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    params(
        ("id" = String, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Mark-read applied, or already in flight", body = MarkReadResponse),
        (status = 404, description = "Notification not found"),
        (status = 502, description = "Marketplace API unavailable")
    ),
    tag = "notifications"
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(notification_id): Path<String>,
) -> Result<Json<MarkReadResponse>> {
    let applied = state.notification_store.mark_as_read(&notification_id).await?;
    Ok(Json(MarkReadResponse { applied }))
}

/// Mark all notifications as read
#[utoipa::path(
    put,
    path = "/api/notifications/read-all",
    responses(
        (status = 204, description = "All notifications marked as read"),
        (status = 502, description = "Marketplace API unavailable")
    ),
    tag = "notifications"
)]
pub async fn mark_all_notifications_read(State(state): State<AppState>) -> Result<StatusCode> {
    state.notification_store.mark_all_as_read().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Unread badge count
#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    responses(
        (status = 200, description = "Last polled unread count", body = UnreadCountResponse)
    ),
    tag = "notifications"
)]
pub async fn get_unread_count(State(state): State<AppState>) -> Json<UnreadCountResponse> {
    Json(UnreadCountResponse {
        count: state.unread_counter.current(),
    })
}

/// Refresh the unread badge count now
#[utoipa::path(
    post,
    path = "/api/notifications/unread-count/refresh",
    responses(
        (status = 200, description = "Unread count after the refresh", body = UnreadCountResponse)
    ),
    tag = "notifications"
)]
pub async fn refresh_unread_count(State(state): State<AppState>) -> Json<UnreadCountResponse> {
    state.unread_counter.refresh().await;
    Json(UnreadCountResponse {
        count: state.unread_counter.current(),
    })
}

/// Follow the unread badge count via Server-Sent Events
#[utoipa::path(
    get,
    path = "/api/notifications/unread-count/stream",
    responses(
        (status = 200, description = "SSE stream of unread counts")
    ),
    tag = "notifications"
)]
pub async fn unread_count_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let stream = WatchStream::new(state.unread_counter.subscribe()).map(|count| {
        Ok::<_, Infallible>(
            Event::default()
                .event("unread_count")
                .data(count.to_string()),
        )
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

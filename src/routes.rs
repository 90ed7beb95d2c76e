use crate::{
    admin::{dto as admin_dto, handlers as admin_handlers},
    estate::{estate_handlers, estate_models},
    notification::{
        notification_dto::{
            MarkReadResponse, NotificationItem, NotificationsResponse, NotificationsView,
            UnreadCountResponse,
        },
        notification_handlers,
        notification_models::{Notification, NotificationKind},
        notification_store::Screen,
    },
    state::AppState,
};
use axum::http::{header::{AUTHORIZATION, CONTENT_TYPE}, HeaderValue, Method};
use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::notification::notification_handlers::get_notifications,
        crate::notification::notification_handlers::get_unread_notifications,
        crate::notification::notification_handlers::mark_notification_read,
        crate::notification::notification_handlers::mark_all_notifications_read,
        crate::notification::notification_handlers::get_unread_count,
        crate::notification::notification_handlers::refresh_unread_count,
        crate::notification::notification_handlers::unread_count_stream,
        crate::admin::handlers::get_all_users,
        crate::admin::handlers::approve_agent,
        crate::estate::estate_handlers::get_requests,
        crate::estate::estate_handlers::update_request_status,
    ),
    components(
        schemas(
            Notification,
            NotificationKind,
            NotificationItem,
            NotificationsView,
            NotificationsResponse,
            Screen,
            MarkReadResponse,
            UnreadCountResponse,
            admin_dto::AdminUser,
            admin_dto::UsersResponse,
            admin_dto::UserResponse,
            estate_models::EstateRequest,
            estate_models::RequestStatus,
            estate_models::UpdateRequestStatusRequest,
            estate_models::RequestsResponse,
            estate_models::RequestResponse,
        )
    ),
    tags(
        (name = "notifications", description = "Polled notifications and unread badge"),
        (name = "admin", description = "User and agent management"),
        (name = "requests", description = "Property request tracking")
    )
)]
struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true);

    let notification_routes = Router::new()
        .route("/", get(notification_handlers::get_notifications))
        .route("/unread", get(notification_handlers::get_unread_notifications))
        .route("/read-all", put(notification_handlers::mark_all_notifications_read))
        .route("/:id/read", put(notification_handlers::mark_notification_read))
        .route("/unread-count", get(notification_handlers::get_unread_count))
        .route(
            "/unread-count/refresh",
            post(notification_handlers::refresh_unread_count),
        )
        .route(
            "/unread-count/stream",
            get(notification_handlers::unread_count_stream),
        );

    let admin_routes = Router::new()
        .route("/users", get(admin_handlers::get_all_users))
        .route("/agents/:user_id/approve", post(admin_handlers::approve_agent));

    let request_routes = Router::new()
        .route("/", get(estate_handlers::get_requests))
        .route("/:id/status", patch(estate_handlers::update_request_status));

    let api_routes = Router::new()
        .nest("/notifications", notification_routes)
        .nest("/admin", admin_routes)
        .nest("/requests", request_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub mod admin;
pub mod applications;
pub mod auth;
pub mod health;
pub mod jobs;
pub mod messages;
pub mod notifications;
pub mod users;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::get_config,
    middleware::{auth::require_admin, cors::permissive_cors, rate_limit},
    AppState,
};

pub fn app_router(state: AppState) -> Router {
    let config = get_config();

    let base_routes = Router::new().route("/health", get(health::health));

    let auth_api = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.public_rps),
            rate_limit::rps_middleware,
        ));

    let jobs_api = Router::new()
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/jobs/my-jobs", get(jobs::my_jobs))
        .route("/api/jobs/my-applications", get(jobs::my_applications))
        .route("/api/jobs/:id", get(jobs::get_job))
        .route("/api/jobs/:id/apply", post(jobs::apply_to_job))
        .route(
            "/api/jobs/applications/:id",
            delete(applications::withdraw_application),
        )
        .route(
            "/api/jobs/applications/:id/accept",
            put(applications::accept_application),
        )
        .route(
            "/api/jobs/applications/:id/reject",
            put(applications::reject_application),
        )
        .route(
            "/api/jobs/applications/:id/message",
            post(messages::send_message),
        )
        .route(
            "/api/jobs/applications/:id/messages",
            get(messages::list_messages),
        )
        .route(
            "/api/jobs/notifications",
            get(notifications::list_notifications),
        )
        .route(
            "/api/jobs/notifications/read-all",
            put(notifications::mark_all_read),
        )
        .route(
            "/api/jobs/notifications/:id/read",
            put(notifications::mark_notification_read),
        )
        .route("/api/users/me", get(users::me).put(users::update_me))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.api_rps),
            rate_limit::rps_middleware,
        ));

    let admin_api = Router::new()
        .route("/api/admin/jobs", get(admin::list_jobs))
        .route("/api/admin/jobs/:id/approve", put(admin::approve_job))
        .route("/api/admin/jobs/:id/reject", patch(admin::reject_job))
        .route("/api/admin/jobs/:id", delete(admin::delete_job))
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/users/:id/ban", put(admin::ban_user))
        .route("/api/admin/users/:id/unban", put(admin::unban_user))
        .layer(axum::middleware::from_fn(require_admin))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.api_rps),
            rate_limit::rps_middleware,
        ));

    base_routes
        .merge(auth_api)
        .merge(jobs_api)
        .merge(admin_api)
        .nest_service("/uploads", ServeDir::new(config.uploads_dir.clone()))
        .with_state(state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
}

//! Route definitions and router construction.
//!
//! Axum 0.8 uses brace syntax for path parameters: `{id}`, `{*path}`.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, patch, post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers::{self, admin::MAX_UPLOAD_BYTES};
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::me))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::admin::dashboard))
        .route(
            "/companies",
            get(handlers::admin::list_companies).post(handlers::admin::create_company),
        )
        .route(
            "/users",
            get(handlers::admin::list_users).post(handlers::admin::create_user),
        )
        .route("/users/{id}", patch(handlers::admin::update_user))
        .route(
            "/reports/upload",
            post(handlers::admin::upload_report).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/reports", get(handlers::admin::list_reports))
        .route(
            "/reports/{id}",
            patch(handlers::admin::update_report).delete(handlers::admin::delete_report),
        )
        .route("/activity-logs", get(handlers::admin::activity_logs))
}

fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(handlers::client::list_reports))
        .route("/reports/{id}", get(handlers::client::report))
        .route("/reports/{id}/view", get(handlers::client::view))
        .route("/reports/{id}/asset/{*path}", get(handlers::client::asset))
        .route("/reports/{id}/download", get(handlers::client::download))
        .route("/company", get(handlers::client::company))
}

/// All API routes without the `/api` prefix.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::service::root))
        .route("/health", get(handlers::service::health))
        .route(
            "/status",
            get(handlers::service::list_status).post(handlers::service::create_status),
        )
        .nest("/auth", auth_routes())
        .nest("/admin", admin_routes())
        .nest("/client", client_routes())
}

/// Create the main Axum router with all API routes under `/api`.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/api/", get(handlers::service::root))
        .nest("/api", api_routes().with_state(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

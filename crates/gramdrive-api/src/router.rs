//! Route definitions for the GramDrive HTTP API.
//!
//! Browse/mutate routes are mounted under `/api`; the router receives
//! `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use gramdrive_core::config::server::CorsConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(catalog_routes())
        .merge(transfer_routes())
        .merge(admin_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .route("/", get(handlers::health::liveness))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Catalog browse and tree mutations.
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::catalog::list_files))
        .route("/profile", get(handlers::catalog::profile))
        .route("/create_folder", post(handlers::catalog::create_folder))
        .route("/rename", post(handlers::catalog::rename))
        .route("/delete", post(handlers::catalog::delete))
        .route(
            "/delete_folder_recursive",
            post(handlers::catalog::delete_folder_recursive),
        )
        .route("/delete_all", post(handlers::catalog::delete_all))
        .route("/move_file", post(handlers::catalog::move_file))
}

/// Provider-content endpoints.
fn transfer_routes() -> Router<AppState> {
    Router::new()
        .route("/download", post(handlers::transfer::download))
        .route("/preview/{file_id}", get(handlers::transfer::preview))
}

/// Admin-gated endpoints.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", post(handlers::admin::list_users))
        .route("/admin/block", post(handlers::admin::block_user))
        .route("/admin/delete_user", post(handlers::admin::delete_user))
}

/// Builds a CORS tower layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new().allow_headers(Any);

    if config.allowed_origins.contains(&"*".to_string()) {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer.allow_methods(methods)
}

//! Application state shared across all handlers.

use std::sync::Arc;

use gramdrive_core::config::AppConfig;
use gramdrive_core::traits::transport::ChatTransport;
use gramdrive_service::{AccessService, CatalogService};

/// Shared dependencies passed to every Axum handler via `State`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Catalog engine.
    pub catalog: Arc<CatalogService>,
    /// Blocked/admin gating.
    pub access: Arc<AccessService>,
    /// Chat transport for download/preview.
    pub transport: Arc<dyn ChatTransport>,
}

//! GramDrive Server — personal cloud storage over a chat transport.
//!
//! Main entry point that wires all crates together and starts both
//! ingress paths: the bot long-poll loop and the HTTP API.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use gramdrive_core::config::AppConfig;
use gramdrive_core::error::AppError;
use gramdrive_core::result::AppResult;
use gramdrive_core::traits::transport::ChatTransport;
use gramdrive_database::connection::DatabasePool;
use gramdrive_database::repositories::item::ItemRepository;
use gramdrive_database::repositories::user::UserRepository;
use gramdrive_service::{
    AccessService, CatalogService, Distributor, IngestService, ShareService, TreeRenderer,
};
use gramdrive_transport::{BotHandlers, TelegramClient, UpdatePoller};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> AppResult<AppConfig> {
    let env = std::env::var("GRAMDRIVE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting GramDrive v{}", env!("CARGO_PKG_VERSION"));
    let config = Arc::new(config);

    // ── Database connection + migrations ─────────────────────────
    tracing::info!("Connecting to database...");
    let database = DatabasePool::connect(&config.database).await?;
    tracing::info!("Running database migrations...");
    gramdrive_database::migration::run_migrations(database.pool()).await?;
    tracing::info!("Database migrations complete");

    // ── Repositories ─────────────────────────────────────────────
    let items = Arc::new(ItemRepository::new(database.pool().clone()));
    let users = Arc::new(UserRepository::new(database.pool().clone()));

    // ── Transport ────────────────────────────────────────────────
    let client = Arc::new(TelegramClient::new(&config.telegram)?);
    let transport: Arc<dyn ChatTransport> = client.clone();

    // ── Services ─────────────────────────────────────────────────
    let catalog = Arc::new(CatalogService::new(items.clone()));
    let shares = Arc::new(ShareService::new(items.clone()));
    let renderer = Arc::new(TreeRenderer::new(items.clone()));
    let distributor = Arc::new(Distributor::new(
        items.clone(),
        transport.clone(),
        Duration::from_millis(config.telegram.send_delay_ms),
    ));
    let access = Arc::new(AccessService::new(
        users.clone(),
        items.clone(),
        config.access.admin_username.clone(),
    ));
    let ingest = Arc::new(IngestService::new(users.clone(), items.clone()));

    // ── Bot long-poll loop ───────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handlers = BotHandlers::new(
        client.clone(),
        access.clone(),
        ingest,
        shares.clone(),
        renderer,
        distributor,
    );
    let poller = UpdatePoller::new(client, handlers);
    let poller_handle = tokio::spawn(poller.run(shutdown_rx));

    // ── HTTP API ─────────────────────────────────────────────────
    let app_state = gramdrive_api::AppState {
        config: config.clone(),
        catalog,
        access,
        transport,
    };
    let app = gramdrive_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("GramDrive server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Wait for background tasks ────────────────────────────────
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let _ = tokio::time::timeout(grace, poller_handle).await;

    database.close().await;
    tracing::info!("GramDrive server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

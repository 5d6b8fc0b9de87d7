//! # Velvet Host Library
//!
//! Privileged backend process for Velvet POS. The renderer is an untrusted
//! UI process; this host owns the database, the receipt printer, and every
//! operation the renderer can invoke.
//!
//! ## Module Organization
//! ```text
//! velvet_host/
//! ├── lib.rs          ◄─── You are here (startup & shutdown)
//! ├── config.rs       ◄─── HostConfig (VELVET_* environment overrides)
//! ├── state.rs        ◄─── AppState shared by all handlers
//! ├── error.rs        ◄─── ApiError (what the renderer sees)
//! ├── printing.rs     ◄─── Printer transport (TCP / device file)
//! └── commands/
//!     ├── mod.rs      ◄─── Router wiring + response envelope
//!     ├── employee.rs ◄─── Staff registry operations
//!     ├── product.rs  ◄─── Catalog operations
//!     ├── bill.rs     ◄─── Billing operations
//!     ├── report.rs   ◄─── Analytics report
//!     ├── printer.rs  ◄─── Receipt printing
//!     └── config.rs   ◄─── Store config for the renderer
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod printing;
pub mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::HostConfig;
use state::AppState;
use velvet_db::{Database, DbConfig};

/// Runs the host until a shutdown signal arrives.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                         Host Startup                                    │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: info,velvet=debug,sqlx=warn (override with RUST_LOG)     │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • Defaults overridden by VELVET_* environment variables             │
/// │     • Resolved values logged for supervision                            │
/// │                                                                         │
/// │  3. Resolve Database Path ────────────────────────────────────────────► │
/// │     • macOS: ~/Library/Application Support/com.velvet.pos/velvet.db     │
/// │     • Windows: %APPDATA%\velvet\pos\velvet.db                           │
/// │     • Linux: ~/.local/share/velvet-pos/velvet.db                        │
/// │                                                                         │
/// │  4. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode                                              │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  5. Serve the Bridge ─────────────────────────────────────────────────► │
/// │     • axum router with every operation under /api                       │
/// │     • Graceful shutdown on ctrl-c / SIGTERM                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Velvet POS host");

    let config = HostConfig::from_env();
    info!(
        bind = %config.bind_addr,
        store = %config.store_name,
        receipt_width = config.receipt_width,
        printer_configured = config.printer.is_some(),
        "Configuration loaded"
    );

    let db_path = resolve_database_path(&config)?;
    info!(path = %db_path.display(), "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!("Database connected and migrations applied");

    let addr: SocketAddr = config.bind_addr.parse()?;
    let state = AppState::new(db.clone(), config);
    let app = commands::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Bridge listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Host shutdown complete");

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages everywhere
/// - `RUST_LOG=velvet=trace` - Show trace for velvet crates only
/// - Default: `info,velvet=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,velvet=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.velvet.pos/velvet.db`
/// - **Windows**: `%APPDATA%\velvet\pos\velvet.db`
/// - **Linux**: `~/.local/share/velvet-pos/velvet.db`
///
/// A `VELVET_DB_PATH` override (already folded into the config) wins over
/// all of these. Parent directories are created on demand either way.
fn resolve_database_path(config: &HostConfig) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = &config.database_path {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "velvet", "pos")
        .ok_or("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("velvet.db"))
}

/// Resolves when ctrl-c or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}

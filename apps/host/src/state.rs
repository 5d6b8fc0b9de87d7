//! # Shared Application State
//!
//! One state struct cloned into every bridge handler by axum.
//!
//! ## Why a Single State Type
//! The host has exactly two long-lived things: the database handle and the
//! resolved configuration. Handlers declare `State<AppState>` and pick what
//! they need; there is no per-request mutation, so no locks.

use std::sync::Arc;

use velvet_db::Database;

use crate::config::HostConfig;

/// Shared state behind every bridge operation.
///
/// `Database` wraps an `Arc`-backed pool and `HostConfig` is read-only
/// after startup, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<HostConfig>,
}

impl AppState {
    pub fn new(db: Database, config: HostConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }
}

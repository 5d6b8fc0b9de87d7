//! # velvet-db: Database Layer for Velvet POS
//!
//! This crate provides database access for the Velvet POS backend.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Velvet POS Data Flow                             │
//! │                                                                         │
//! │  Bridge Operation (make-bill)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     velvet-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐ │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │ │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │ │   │
//! │  │   │               │    │ EmployeeRepo   │    │              │ │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo    │    │ 001_initial_ │ │   │
//! │  │   │ Connection    │    │ BillRepo       │    │ schema.sql   │ │   │
//! │  │   │ Management    │    │ ReportRepo     │    │              │ │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘ │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/velvet-pos/velvet.db                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (employee, product, bill, report)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use velvet_db::{Database, DbConfig};
//!
//! // Create database with default config (runs migrations)
//! let config = DbConfig::new("path/to/velvet.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let employees = db.employees().list().await?;
//! let bill = db.bills().create(&draft).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::bill::BillRepository;
pub use repository::employee::EmployeeRepository;
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;

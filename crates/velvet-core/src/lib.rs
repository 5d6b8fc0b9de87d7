//! # velvet-core: Pure Business Logic for Velvet POS
//!
//! This crate is the **heart** of Velvet POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Velvet POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Renderer (untrusted UI)                       │   │
//! │  │    Dashboard ──► Make Bill ──► Catalog ──► Bill History        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over loopback                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  Bridge Operations (apps/host)                  │   │
//! │  │    add-employee, make-bill, bill-history, analytics, ...       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ velvet-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  receipt  │  │ validation│  │   │
//! │  │   │  Employee │  │   Money   │  │  layout   │  │   rules   │  │   │
//! │  │   │  Product  │  │  Discount │  │  ESC/POS  │  │  checks   │  │   │
//! │  │   │   Bill    │  │  totals   │  │  bytes    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   velvet-db (Database Layer)                    │   │
//! │  │             SQLite queries, migrations, repositories            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Employee, Product, Bill, report types)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`receipt`] - Fixed-width receipt layout and ESC/POS rendering
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use velvet_core::money::{bill_totals, Discount, Money};
//!
//! // Create money from cents (never from floats!)
//! let haircut = Money::from_cents(2500); // $25.00
//!
//! // Totals for a two-item bill with 10% off
//! let totals = bill_totals(&[2500, 1500], Some(Discount::Percent(1000)));
//!
//! assert_eq!(totals.subtotal_cents, 4000);
//! assert_eq!(totals.discount_cents, 400);
//! assert_eq!(totals.total_cents, 3600);
//! # let _ = haircut;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use velvet_core::Money` instead of
// `use velvet_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::{Discount, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed on a single bill.
///
/// ## Business Reason
/// Prevents runaway bills and ensures reasonable transaction sizes.
/// Can be made configurable in future versions.
pub const MAX_BILL_ITEMS: usize = 100;

/// Maximum percentage discount in basis points (10000 = 100%).
pub const MAX_DISCOUNT_BPS: u32 = 10_000;

/// Default receipt paper width in characters.
///
/// 58mm thermal paper prints 32 columns at standard font; 80mm paper
/// prints 48. The layout adapts to whatever width is configured.
pub const DEFAULT_RECEIPT_WIDTH: usize = 32;

//! # Bridge Operations Module
//!
//! Every operation the renderer can invoke, wired onto an axum router.
//!
//! ## Operation Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (router + response envelope)
//! ├── employee.rs ◄─── add-employee, get-employees, update-employee, delete-employee
//! ├── product.rs  ◄─── add-product, get-products, update-product, delete-product
//! ├── bill.rs     ◄─── make-bill, bill-history, update-bill, delete-bill
//! ├── report.rs   ◄─── analytics
//! ├── printer.rs  ◄─── print-receipt
//! └── config.rs   ◄─── get-config
//! ```
//!
//! ## How Operations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bridge Operation Flow                                │
//! │                                                                         │
//! │  Renderer                                                               │
//! │  ────────                                                               │
//! │  const res = await fetch('http://127.0.0.1:7700/api/make-bill', {       │
//! │    method: 'POST',                                                      │
//! │    body: JSON.stringify({ employeeId: 3, productIds: [4, 4, 9] })       │
//! │  });                                                                    │
//! │         │                                                               │
//! │         │ (JSON over loopback HTTP)                                     │
//! │         ▼                                                               │
//! │  Host                                                                   │
//! │  ────                                                                   │
//! │  async fn make_bill(                                                    │
//! │      State(state): State<AppState>,   ◄── Injected by axum              │
//! │      Json(req): Json<MakeBillRequest> ◄── Deserialized camelCase body   │
//! │  ) -> Result<Json<Reply<BillDto>>, ApiError>                            │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Renderer receives the response envelope                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Response Envelope
//! Success and failure share one envelope shape, so the renderer can branch
//! on `success` without looking at HTTP status codes:
//! ```json
//! { "success": true,  "message": "Bill created successfully!", "data": { ... } }
//! { "success": false, "code": "NOT_FOUND", "message": "Bill not found: 9" }
//! ```

pub mod bill;
pub mod config;
pub mod employee;
pub mod printer;
pub mod product;
pub mod report;

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

// =============================================================================
// Response Envelope
// =============================================================================

/// Success envelope for bridge replies.
#[derive(Debug, Clone, Serialize)]
pub struct Reply<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Reply<T> {
    /// A successful reply carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Reply {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl Reply<()> {
    /// A successful reply with no payload (deletes, print jobs).
    pub fn done(message: impl Into<String>) -> Self {
        Reply {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Form fields arrive as empty strings when left blank; store them as NULLs.
pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Router
// =============================================================================

/// Builds the bridge router with every operation mounted under `/api`.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(state.config.renderer_origin.as_deref());

    Router::new()
        .route("/health", get(health))
        // Staff registry
        .route("/api/add-employee", post(employee::add_employee))
        .route("/api/get-employees", post(employee::get_employees))
        .route("/api/update-employee", post(employee::update_employee))
        .route("/api/delete-employee", post(employee::delete_employee))
        // Catalog
        .route("/api/add-product", post(product::add_product))
        .route("/api/get-products", post(product::get_products))
        .route("/api/update-product", post(product::update_product))
        .route("/api/delete-product", post(product::delete_product))
        // Billing
        .route("/api/make-bill", post(bill::make_bill))
        .route("/api/bill-history", post(bill::bill_history))
        .route("/api/update-bill", post(bill::update_bill))
        .route("/api/delete-bill", post(bill::delete_bill))
        // Dashboard
        .route("/api/analytics", post(report::analytics))
        // Peripherals and config
        .route("/api/print-receipt", post(printer::print_receipt))
        .route("/api/get-config", get(config::get_config))
        .layer(cors)
        .with_state(state)
}

/// CORS for the renderer. A configured origin is enforced exactly;
/// otherwise any origin may call, which the loopback bind already bounds.
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(raw) = origin else {
        return CorsLayer::permissive();
    };

    match raw.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            tracing::warn!(origin = raw, "Invalid renderer origin, allowing any");
            CorsLayer::permissive()
        }
    }
}

/// GET `/health` - liveness and database reachability for supervision.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let database = state.db.health_check().await;
    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if database { "ok" } else { "degraded" },
            "database": database,
        })),
    )
}

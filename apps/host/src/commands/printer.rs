//! # Receipt Printing
//!
//! `print-receipt` re-renders a stored bill and pushes the ESC/POS bytes to
//! the configured printer. The bill is looked up first: asking to print a
//! bill that does not exist is a not-found failure even when no printer is
//! configured. Printer trouble maps to `PRINTER_ERROR` (HTTP 502) so the
//! renderer can distinguish "fix the printer" from "fix the request".

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::{debug, info};

use crate::commands::Reply;
use crate::error::ApiError;
use crate::printing;
use crate::state::AppState;
use velvet_core::receipt::{render_escpos, render_text};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintReceiptRequest {
    pub bill_id: i64,
}

/// POST `/api/print-receipt`
pub async fn print_receipt(
    State(state): State<AppState>,
    Json(req): Json<PrintReceiptRequest>,
) -> Result<Json<Reply<()>>, ApiError> {
    debug!(bill_id = req.bill_id, "print-receipt command");
    let start = Instant::now();

    let bill = state
        .db
        .bills()
        .get(req.bill_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Bill", req.bill_id))?;

    let Some(connection) = state.config.printer.clone() else {
        return Err(ApiError::printer("No printer configured"));
    };

    let options = state.config.receipt_options();
    debug!(receipt = %render_text(&options, &bill), "Rendered receipt");

    let bytes = render_escpos(&options, &bill);
    printing::send(&connection, &bytes)
        .await
        .map_err(|err| ApiError::printer(err.to_string()))?;

    info!(
        bill_id = req.bill_id,
        bytes = bytes.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Receipt printed"
    );

    Ok(Json(Reply::done("Receipt sent to printer!")))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostConfig;
    use crate::error::ErrorCode;
    use velvet_core::{BillDraft, NewEmployee, NewProduct};
    use velvet_db::{Database, DbConfig};

    async fn state_with_bill(config: HostConfig) -> (AppState, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let amira = db
            .employees()
            .insert(&NewEmployee {
                name: "Amira Khan".to_string(),
                phone: None,
                email: None,
            })
            .await
            .unwrap();
        let haircut = db
            .products()
            .insert(&NewProduct {
                name: "Haircut & Style".to_string(),
                price_cents: 2500,
                description: None,
            })
            .await
            .unwrap();
        let bill = db
            .bills()
            .create(&BillDraft {
                employee_id: amira.id,
                product_ids: vec![haircut.id],
                customer_name: None,
                customer_phone: None,
                discount: None,
            })
            .await
            .unwrap();

        (AppState::new(db, config), bill.id)
    }

    #[tokio::test]
    async fn test_missing_bill_is_not_found_even_without_printer() {
        let (state, _) = state_with_bill(HostConfig::default()).await;

        let err = print_receipt(State(state), Json(PrintReceiptRequest { bill_id: 999 }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_no_printer_configured_is_printer_error() {
        let (state, bill_id) = state_with_bill(HostConfig::default()).await;

        let err = print_receipt(State(state), Json(PrintReceiptRequest { bill_id }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PrinterError);
        assert!(err.message.contains("No printer configured"));
    }

    #[tokio::test]
    async fn test_prints_escpos_job_to_device_path() {
        let path = std::env::temp_dir().join(format!(
            "velvet-host-print-{}.bin",
            std::process::id()
        ));
        let config = HostConfig {
            printer: Some(path.to_string_lossy().into_owned()),
            ..HostConfig::default()
        };
        let (state, bill_id) = state_with_bill(config).await;

        let reply = print_receipt(State(state), Json(PrintReceiptRequest { bill_id }))
            .await
            .unwrap();
        assert!(reply.0.success);

        let bytes = tokio::fs::read(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        // Initialize at the front, feed-and-cut at the tail.
        assert!(bytes.starts_with(b"\x1B\x40"));
        assert!(bytes.ends_with(b"\x1D\x56\x41\x03"));
    }
}

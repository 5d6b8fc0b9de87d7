//! Store identity for the renderer.
//!
//! The renderer shows the store name on the title bar and the currency symbol
//! next to every price, so it fetches this once at startup. Only display
//! fields cross the bridge; the printer connection string stays host-side and
//! is reported as a plain "configured" flag.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::commands::Reply;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    pub store_name: String,
    pub store_address: Vec<String>,
    pub currency_symbol: String,
    pub receipt_width: usize,
    pub printer_configured: bool,
}

/// GET `/api/get-config`
///
/// Infallible; everything comes from the in-memory config.
pub async fn get_config(State(state): State<AppState>) -> Json<Reply<ConfigDto>> {
    debug!("get-config command");

    let config = &state.config;
    let dto = ConfigDto {
        store_name: config.store_name.clone(),
        store_address: config.store_address.clone(),
        currency_symbol: config.currency_symbol.clone(),
        receipt_width: config.receipt_width,
        printer_configured: config.printer.is_some(),
    };

    Json(Reply::ok("Config fetched successfully!", dto))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostConfig;
    use velvet_db::{Database, DbConfig};

    async fn state(config: HostConfig) -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AppState::new(db, config)
    }

    #[tokio::test]
    async fn test_reports_store_identity() {
        let reply = get_config(State(state(HostConfig::default()).await)).await;

        let dto = reply.0.data.unwrap();
        assert_eq!(dto.store_name, "Velvet POS Dev Store");
        assert_eq!(dto.currency_symbol, "$");
        assert!(!dto.printer_configured);
    }

    #[tokio::test]
    async fn test_printer_flag_does_not_echo_connection_string() {
        let config = HostConfig {
            printer: Some("tcp://192.168.1.50:9100".to_string()),
            ..HostConfig::default()
        };
        let reply = get_config(State(state(config).await)).await;

        let json = serde_json::to_string(&reply.0).unwrap();
        assert!(json.contains("\"printerConfigured\":true"));
        assert!(!json.contains("tcp://"));
    }

    #[tokio::test]
    async fn test_config_dto_serializes_camel_case() {
        let reply = get_config(State(state(HostConfig::default()).await)).await;

        let json = serde_json::to_value(&reply.0.data.unwrap()).unwrap();
        assert!(json.get("storeName").is_some());
        assert!(json.get("storeAddress").is_some());
        assert!(json.get("receiptWidth").is_some());
        assert!(json.get("currencySymbol").is_some());
    }
}

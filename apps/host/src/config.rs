//! # Host Configuration
//!
//! Runtime configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`VELVET_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so the state holds it
//! behind a plain `Arc`. If hot-reloading is added later, we'd wrap in
//! `RwLock`.

use std::path::PathBuf;

use velvet_core::receipt::ReceiptOptions;
use velvet_core::DEFAULT_RECEIPT_WIDTH;

/// Host configuration.
///
/// ## Fields
/// Every field has a development default; production deployments override
/// them through `VELVET_*` environment variables.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Address the bridge listens on. Loopback by default; the renderer is
    /// the only intended client.
    pub bind_addr: String,

    /// Database file override. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Store name (printed on receipts, shown in the renderer header).
    pub store_name: String,

    /// Store address lines (printed on receipts).
    pub store_address: Vec<String>,

    /// Currency symbol for display.
    pub currency_symbol: String,

    /// Receipt paper width in characters (32 for 58mm paper, 48 for 80mm).
    pub receipt_width: usize,

    /// Farewell line at the bottom of every receipt.
    pub receipt_footer: String,

    /// Printer connection string: `tcp://host:port` or a device file path.
    /// `None` disables printing (dev mode).
    pub printer: Option<String>,

    /// Exact renderer origin allowed by CORS. `None` allows any origin,
    /// which the loopback bind already bounds.
    pub renderer_origin: Option<String>,
}

impl Default for HostConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Bridge: `127.0.0.1:7700`
    /// - Store: "Velvet POS Dev Store"
    /// - Currency: $
    /// - Receipt: 32 columns
    /// - Printer: none (dev mode)
    fn default() -> Self {
        HostConfig {
            bind_addr: "127.0.0.1:7700".to_string(),
            database_path: None,
            store_name: "Velvet POS Dev Store".to_string(),
            store_address: vec!["123 Main Street".to_string(), "City, ST 12345".to_string()],
            currency_symbol: "$".to_string(),
            receipt_width: DEFAULT_RECEIPT_WIDTH,
            receipt_footer: "Thank you for your visit!".to_string(),
            printer: None,
            renderer_origin: None,
        }
    }
}

impl HostConfig {
    /// Creates a HostConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `VELVET_BIND_ADDR`: Bridge listen address (default `127.0.0.1:7700`)
    /// - `VELVET_DB_PATH`: Database file path
    /// - `VELVET_STORE_NAME`: Store name on receipts
    /// - `VELVET_STORE_ADDRESS`: Address lines, `|`-separated
    /// - `VELVET_CURRENCY_SYMBOL`: Currency symbol
    /// - `VELVET_RECEIPT_WIDTH`: Paper width in characters
    /// - `VELVET_RECEIPT_FOOTER`: Receipt farewell line
    /// - `VELVET_PRINTER`: Printer connection (`tcp://host:port` or device path)
    /// - `VELVET_RENDERER_ORIGIN`: Exact CORS origin for the renderer
    pub fn from_env() -> Self {
        let mut config = HostConfig::default();

        if let Ok(addr) = std::env::var("VELVET_BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Ok(path) = std::env::var("VELVET_DB_PATH") {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Ok(name) = std::env::var("VELVET_STORE_NAME") {
            config.store_name = name;
        }

        if let Ok(address) = std::env::var("VELVET_STORE_ADDRESS") {
            config.store_address = split_address(&address);
        }

        if let Ok(symbol) = std::env::var("VELVET_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Ok(width_str) = std::env::var("VELVET_RECEIPT_WIDTH") {
            if let Ok(width) = width_str.parse::<usize>() {
                config.receipt_width = width;
            }
        }

        if let Ok(footer) = std::env::var("VELVET_RECEIPT_FOOTER") {
            config.receipt_footer = footer;
        }

        if let Ok(printer) = std::env::var("VELVET_PRINTER") {
            if !printer.trim().is_empty() {
                config.printer = Some(printer);
            }
        }

        if let Ok(origin) = std::env::var("VELVET_RENDERER_ORIGIN") {
            config.renderer_origin = Some(origin);
        }

        config
    }

    /// Receipt rendering options derived from the store fields.
    pub fn receipt_options(&self) -> ReceiptOptions {
        ReceiptOptions {
            width: self.receipt_width,
            store_name: self.store_name.clone(),
            address_lines: self.store_address.clone(),
            currency_symbol: self.currency_symbol.clone(),
            footer: self.receipt_footer.clone(),
        }
    }
}

/// Splits a `|`-separated address into trimmed, non-empty lines.
fn split_address(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HostConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:7700");
        assert_eq!(config.receipt_width, DEFAULT_RECEIPT_WIDTH);
        assert!(config.printer.is_none());
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_split_address() {
        assert_eq!(
            split_address("12 Rose Lane | Springfield, OR 97477"),
            vec!["12 Rose Lane".to_string(), "Springfield, OR 97477".to_string()]
        );
        assert_eq!(split_address(" | | "), Vec::<String>::new());
        assert_eq!(split_address("One line"), vec!["One line".to_string()]);
    }

    #[test]
    fn test_receipt_options_mirror_store_fields() {
        let mut config = HostConfig::default();
        config.store_name = "Velvet Beauty Salon".to_string();
        config.receipt_width = 48;
        config.currency_symbol = "€".to_string();

        let options = config.receipt_options();
        assert_eq!(options.store_name, "Velvet Beauty Salon");
        assert_eq!(options.width, 48);
        assert_eq!(options.currency_symbol, "€");
        assert_eq!(options.address_lines, config.store_address);
    }
}

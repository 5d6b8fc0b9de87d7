//! # Receipt Layout
//!
//! Renders a bill as a fixed-width receipt.
//!
//! ## Two Renderings, One Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Receipt Pipeline                                 │
//! │                                                                         │
//! │   Bill ──► layout() ──► Vec<ReceiptLine>                               │
//! │                              │                                          │
//! │                ┌─────────────┴─────────────┐                            │
//! │                ▼                           ▼                            │
//! │          render_text()              render_escpos()                     │
//! │          (plain string,             (printer bytes: init,               │
//! │           padding-aligned,           alignment/emphasis commands,       │
//! │           used in tests and          paper feed, cut)                   │
//! │           print previews)                                               │
//! │                                                                         │
//! │   Same lines in, so what the preview shows is what the printer cuts    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Layout (32 columns shown)
//! ```text
//!          VELVET SALON
//!        12 Rose Street
//! ================================
//! Bill #42
//! Date: 2026-03-14 15:09
//! Served by: Amira Khan
//! Customer: Dana Reeve
//! --------------------------------
//! Haircut & Style           $25.00
//! Beard Trim                $15.00
//! --------------------------------
//! Subtotal                  $40.00
//! Discount                  -$4.00
//! TOTAL                     $36.00
//! ================================
//!    Thank you for your visit!
//! ```

use crate::types::Bill;
use crate::DEFAULT_RECEIPT_WIDTH;

/// Width of the right-aligned amount column, including a leading gap.
const AMOUNT_COL: usize = 10;

/// Narrowest layout that still fits a name next to the amount column.
const MIN_WIDTH: usize = 20;

// =============================================================================
// Options
// =============================================================================

/// Store identity and paper geometry for receipt rendering.
#[derive(Debug, Clone)]
pub struct ReceiptOptions {
    /// Paper width in characters (32 for 58mm paper, 48 for 80mm).
    pub width: usize,
    /// Store name, printed double-size in the header.
    pub store_name: String,
    /// Address lines, centered under the store name.
    pub address_lines: Vec<String>,
    /// Currency symbol for amounts.
    pub currency_symbol: String,
    /// Centered farewell line at the bottom.
    pub footer: String,
}

impl Default for ReceiptOptions {
    fn default() -> Self {
        ReceiptOptions {
            width: DEFAULT_RECEIPT_WIDTH,
            store_name: "VELVET POS".to_string(),
            address_lines: Vec::new(),
            currency_symbol: "$".to_string(),
            footer: "Thank you for your visit!".to_string(),
        }
    }
}

// =============================================================================
// Line Model
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emphasis {
    None,
    Bold,
    /// Bold and double width+height. Header only.
    Banner,
}

#[derive(Debug, Clone)]
struct ReceiptLine {
    text: String,
    align: Align,
    emphasis: Emphasis,
}

impl ReceiptLine {
    fn plain(text: impl Into<String>) -> Self {
        ReceiptLine {
            text: text.into(),
            align: Align::Left,
            emphasis: Emphasis::None,
        }
    }

    fn centered(text: impl Into<String>) -> Self {
        ReceiptLine {
            text: text.into(),
            align: Align::Center,
            emphasis: Emphasis::None,
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders the receipt as plain text.
///
/// Deterministic for a given bill and options: tests assert on the exact
/// output, and the host logs it at debug level before printing.
pub fn render_text(options: &ReceiptOptions, bill: &Bill) -> String {
    let width = effective_width(options);
    let mut out = String::new();

    for line in layout(options, bill) {
        let text = match line.align {
            Align::Left => line.text,
            Align::Center => center(&line.text, width),
        };
        out.push_str(text.trim_end());
        out.push('\n');
    }

    out
}

/// Renders the receipt as ESC/POS bytes for a thermal printer.
///
/// Alignment and emphasis use printer commands instead of space padding,
/// so centered text stays centered whatever font the printer selects.
pub fn render_escpos(options: &ReceiptOptions, bill: &Bill) -> Vec<u8> {
    let mut esc: Vec<u8> = Vec::with_capacity(512);
    let mut align = Align::Left;

    esc.extend_from_slice(b"\x1B\x40"); // ESC @ init
    esc.extend_from_slice(b"\x1B\x61\x00"); // ESC a 0 left

    for line in layout(options, bill) {
        if line.align != align {
            match line.align {
                Align::Left => esc.extend_from_slice(b"\x1B\x61\x00"),
                Align::Center => esc.extend_from_slice(b"\x1B\x61\x01"),
            }
            align = line.align;
        }

        match line.emphasis {
            Emphasis::None => {
                esc.extend_from_slice(line.text.as_bytes());
            }
            Emphasis::Bold => {
                esc.extend_from_slice(b"\x1B\x45\x01"); // ESC E 1 bold on
                esc.extend_from_slice(line.text.as_bytes());
                esc.extend_from_slice(b"\x1B\x45\x00"); // ESC E 0 bold off
            }
            Emphasis::Banner => {
                esc.extend_from_slice(b"\x1B\x45\x01");
                esc.extend_from_slice(b"\x1D\x21\x11"); // GS ! 0x11 double width+height
                esc.extend_from_slice(line.text.as_bytes());
                esc.extend_from_slice(b"\x1D\x21\x00"); // GS ! 0 normal size
                esc.extend_from_slice(b"\x1B\x45\x00");
            }
        }
        esc.push(b'\n');
    }

    esc.extend_from_slice(b"\n\n");
    esc.extend_from_slice(b"\x1D\x56\x41\x03"); // GS V A 3 cut with feed

    esc
}

/// Formats a cent amount with the currency symbol: 1234 → "$12.34".
pub fn format_cents(cents: i64, symbol: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    format!("{}{}{}.{:02}", sign, symbol, (cents / 100).abs(), (cents % 100).abs())
}

// =============================================================================
// Layout
// =============================================================================

fn layout(options: &ReceiptOptions, bill: &Bill) -> Vec<ReceiptLine> {
    let width = effective_width(options);
    let symbol = options.currency_symbol.as_str();
    let mut lines = Vec::new();

    // Header
    lines.push(ReceiptLine {
        text: options.store_name.clone(),
        align: Align::Center,
        emphasis: Emphasis::Banner,
    });
    for address in &options.address_lines {
        lines.push(ReceiptLine::centered(address.clone()));
    }
    lines.push(ReceiptLine::plain("=".repeat(width)));

    // Bill metadata
    lines.push(ReceiptLine::plain(format!("Bill #{}", bill.id)));
    lines.push(ReceiptLine::plain(format!(
        "Date: {}",
        bill.created_at.format("%Y-%m-%d %H:%M")
    )));
    lines.push(ReceiptLine::plain(format!(
        "Served by: {}",
        bill.employee_name
    )));
    if let Some(customer) = &bill.customer_name {
        if !customer.trim().is_empty() {
            lines.push(ReceiptLine::plain(format!("Customer: {}", customer)));
        }
    }
    lines.push(ReceiptLine::plain("-".repeat(width)));

    // Line items, one per unit
    for item in &bill.items {
        for line in amount_lines(&item.name, item.price_cents, symbol, width) {
            lines.push(ReceiptLine::plain(line));
        }
    }
    lines.push(ReceiptLine::plain("-".repeat(width)));

    // Totals
    for line in amount_lines("Subtotal", bill.subtotal_cents, symbol, width) {
        lines.push(ReceiptLine::plain(line));
    }
    if bill.discount_cents > 0 {
        for line in amount_lines("Discount", -bill.discount_cents, symbol, width) {
            lines.push(ReceiptLine::plain(line));
        }
    }
    for line in amount_lines("TOTAL", bill.total_cents, symbol, width) {
        lines.push(ReceiptLine {
            text: line,
            align: Align::Left,
            emphasis: Emphasis::Bold,
        });
    }
    lines.push(ReceiptLine::plain("=".repeat(width)));

    // Footer
    if !options.footer.is_empty() {
        lines.push(ReceiptLine::centered(options.footer.clone()));
    }

    lines
}

fn effective_width(options: &ReceiptOptions) -> usize {
    options.width.max(MIN_WIDTH)
}

/// Lays out a label and a right-aligned amount within `width` columns.
///
/// Labels wider than the name column wrap word-by-word; the amount rides
/// on the last line.
fn amount_lines(label: &str, cents: i64, symbol: &str, width: usize) -> Vec<String> {
    let amount = format_cents(cents, symbol);
    let name_col = width - AMOUNT_COL;
    let mut lines = wrap(label, name_col);

    let last = lines.pop().unwrap_or_default();
    lines.push(format!(
        "{last:<name_col$}{amount:>amount_col$}",
        amount_col = AMOUNT_COL,
    ));
    lines
}

/// Greedy word wrap. Words wider than `col` are hard-split.
fn wrap(text: &str, col: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();

        if chars.len() <= col {
            let space = if current.is_empty() { 0 } else { 1 };
            if current.chars().count() + space + chars.len() <= col {
                if space == 1 {
                    current.push(' ');
                }
                current.extend(chars.iter());
            } else {
                lines.push(std::mem::take(&mut current));
                current.extend(chars.iter());
            }
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            for chunk in chars.chunks(col) {
                if chunk.len() == col {
                    lines.push(chunk.iter().collect());
                } else {
                    current = chunk.iter().collect();
                }
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = (width - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BillItem;
    use chrono::TimeZone;
    use chrono::Utc;

    fn sample_bill() -> Bill {
        Bill {
            id: 42,
            employee_id: 1,
            employee_name: "Amira Khan".to_string(),
            customer_name: Some("Dana Reeve".to_string()),
            customer_phone: None,
            subtotal_cents: 4000,
            discount_cents: 400,
            total_cents: 3600,
            created_at: Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 0).unwrap(),
            items: vec![
                BillItem {
                    product_id: 4,
                    name: "Haircut & Style".to_string(),
                    price_cents: 2500,
                },
                BillItem {
                    product_id: 9,
                    name: "Beard Trim".to_string(),
                    price_cents: 1500,
                },
            ],
        }
    }

    fn options() -> ReceiptOptions {
        ReceiptOptions {
            width: 32,
            store_name: "VELVET SALON".to_string(),
            address_lines: vec!["12 Rose Street".to_string()],
            currency_symbol: "$".to_string(),
            footer: "Thank you for your visit!".to_string(),
        }
    }

    #[test]
    fn test_render_text_golden() {
        let text = render_text(&options(), &sample_bill());
        let expected = "          VELVET SALON
         12 Rose Street
================================
Bill #42
Date: 2026-03-14 15:09
Served by: Amira Khan
Customer: Dana Reeve
--------------------------------
Haircut & Style           $25.00
Beard Trim                $15.00
--------------------------------
Subtotal                  $40.00
Discount                  -$4.00
TOTAL                     $36.00
================================
   Thank you for your visit!
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_lines_fit_width() {
        let text = render_text(&options(), &sample_bill());
        for line in text.lines() {
            assert!(
                line.chars().count() <= 32,
                "line wider than paper: {:?}",
                line
            );
        }
    }

    #[test]
    fn test_long_name_wraps_with_amount_on_last_line() {
        let mut bill = sample_bill();
        bill.items = vec![BillItem {
            product_id: 7,
            name: "Deep Conditioning Treatment Deluxe".to_string(),
            price_cents: 5500,
        }];

        let text = render_text(&options(), &bill);
        assert!(text.contains("Deep Conditioning"));
        // The amount appears right-aligned on the wrapped name's last line
        let amount_line = text
            .lines()
            .find(|l| l.contains("$55.00"))
            .expect("amount line missing");
        assert!(amount_line.chars().count() <= 32);
        assert!(amount_line.ends_with("$55.00"));
    }

    #[test]
    fn test_no_discount_line_when_zero() {
        let mut bill = sample_bill();
        bill.discount_cents = 0;
        bill.total_cents = bill.subtotal_cents;

        let text = render_text(&options(), &bill);
        assert!(!text.contains("Discount"));
        assert!(text.contains("TOTAL"));
    }

    #[test]
    fn test_anonymous_customer_line_omitted() {
        let mut bill = sample_bill();
        bill.customer_name = None;

        let text = render_text(&options(), &bill);
        assert!(!text.contains("Customer:"));
    }

    #[test]
    fn test_escpos_framing() {
        let bytes = render_escpos(&options(), &sample_bill());

        assert!(bytes.starts_with(b"\x1B\x40"));
        assert!(bytes.ends_with(b"\x1D\x56\x41\x03"));

        let haystack = bytes.as_slice();
        let contains = |needle: &[u8]| haystack.windows(needle.len()).any(|w| w == needle);
        assert!(contains(b"VELVET SALON"));
        assert!(contains(b"$36.00"));
        assert!(contains(b"\x1D\x21\x11"), "store name not double-sized");
        assert!(contains(b"\x1B\x61\x01"), "no centering command");
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(1234, "$"), "$12.34");
        assert_eq!(format_cents(5, "$"), "$0.05");
        assert_eq!(format_cents(-400, "$"), "-$4.00");
        assert_eq!(format_cents(0, "Rs "), "Rs 0.00");
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        assert_eq!(wrap("Haircut", 22), vec!["Haircut".to_string()]);
    }

    #[test]
    fn test_wrap_splits_oversized_word() {
        let lines = wrap("Supercalifragilisticexpialidocious", 10);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 10);
        }
    }

    #[test]
    fn test_narrow_width_clamped() {
        let mut opts = options();
        opts.width = 4;
        // Must not panic; layout clamps to a printable minimum
        let text = render_text(&opts, &sample_bill());
        assert!(text.contains("TOTAL"));
    }
}

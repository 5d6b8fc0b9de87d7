//! # Domain Types
//!
//! Core domain types used throughout Velvet POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Employee     │   │     Product     │   │      Bill       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (rowid)     │   │  id (rowid)     │   │  id (rowid)     │       │
//! │  │  name           │   │  name           │   │  employee_id FK │       │
//! │  │  phone?         │   │  price_cents    │   │  customer info  │       │
//! │  │  email? UNIQUE  │   │  description?   │   │  totals         │       │
//! │  └─────────────────┘   └─────────────────┘   │  items[]        │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌───────────────────────────────────────┐       │
//! │  │    BillItem     │   │            SalesReport                │       │
//! │  │  ─────────────  │   │  monthly sales • today's sales        │       │
//! │  │  product_id     │   │  top products  • per-employee month   │       │
//! │  │  name, price    │   │  product count                        │       │
//! │  └─────────────────┘   └───────────────────────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entity ids are SQLite rowids (INTEGER PRIMARY KEY AUTOINCREMENT), so they
//! are `i64` everywhere and 0 never identifies a stored row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Discount, Money};
use crate::validation::{validate_discount, validate_person_name, validate_phone};
use crate::MAX_BILL_ITEMS;

// =============================================================================
// Employee
// =============================================================================

/// A staff member who can be credited with bills.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Employee {
    /// Unique identifier (database rowid).
    pub id: i64,

    /// Display name shown in pickers and on receipts.
    pub name: String,

    /// Contact phone number.
    pub phone: Option<String>,

    /// Contact email. Unique across employees when present.
    pub email: Option<String>,

    /// When the employee was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the employee was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating or updating an employee.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewEmployee {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// A product or service available for sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (database rowid).
    pub id: i64,

    /// Display name shown in the picker and on receipts.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Optional description for product details.
    pub description: Option<String>,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Fields for creating or updating a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub price_cents: i64,
    pub description: Option<String>,
}

// =============================================================================
// Bill
// =============================================================================

/// One unit of a product on a bill.
///
/// Name and unit price are captured at sale time, so a bill renders the
/// same receipt forever even after the catalog changes.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct BillItem {
    pub product_id: i64,
    /// Product name at time of sale.
    pub name: String,
    /// Unit price in cents at time of sale.
    pub price_cents: i64,
}

impl BillItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// An invoice linking a customer, an employee, and a set of purchased
/// products with computed subtotal/discount/final total.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bill {
    /// Unique identifier (database rowid).
    pub id: i64,

    /// The employee credited with the sale.
    pub employee_id: i64,

    /// Employee name joined in for display (the employee row may be
    /// deleted later; bills cascade with it).
    pub employee_name: String,

    /// Walk-in customers have no stored record, just an optional name.
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,

    /// Sum of line item unit prices.
    pub subtotal_cents: i64,

    /// Discount amount applied.
    pub discount_cents: i64,

    /// Final amount charged: subtotal - discount.
    pub total_cents: i64,

    /// When the bill was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// The purchased units, one entry per unit sold.
    pub items: Vec<BillItem>,
}

impl Bill {
    /// Returns the final total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// What the renderer submits to create (or replace the contents of) a bill.
///
/// Quantity is expressed by repetition in `product_ids`, matching how the
/// bill page submits its picker state: two haircuts arrive as the haircut
/// id appearing twice.
///
/// Totals are NOT part of the draft. The bill transaction computes them
/// from catalog prices so an untrusted renderer cannot write arbitrary
/// amounts.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillDraft {
    pub employee_id: i64,
    pub product_ids: Vec<i64>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub discount: Option<Discount>,
}

impl BillDraft {
    /// Validates the draft before it reaches the database transaction.
    ///
    /// ## Checks
    /// - At least one product, at most [`MAX_BILL_ITEMS`]
    /// - Customer name/phone well-formed when present
    /// - Discount within range
    pub fn validate(&self) -> CoreResult<()> {
        if self.product_ids.is_empty() {
            return Err(CoreError::EmptyBill);
        }

        if self.product_ids.len() > MAX_BILL_ITEMS {
            return Err(CoreError::BillTooLarge {
                max: MAX_BILL_ITEMS,
            });
        }

        if let Some(name) = &self.customer_name {
            if !name.trim().is_empty() {
                validate_person_name(name)?;
            }
        }
        validate_phone(self.customer_phone.as_deref())?;

        if let Some(discount) = &self.discount {
            validate_discount(discount)?;
        }

        Ok(())
    }
}

// =============================================================================
// Analytics Report Types
// =============================================================================

/// Sales for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct MonthlySales {
    /// Month key in `YYYY-MM` form.
    pub month: String,
    pub bill_count: i64,
    pub total_cents: i64,
}

/// Sales so far today (UTC day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TodaySales {
    pub bill_count: i64,
    pub total_cents: i64,
}

/// A best-selling product, by units sold across all bills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TopProduct {
    pub product_name: String,
    pub units_sold: i64,
}

/// One employee's totals for the current calendar month.
///
/// Every employee appears, zeros included, so the dashboard table is
/// complete without renderer-side merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct EmployeeMonthlySales {
    pub employee_name: String,
    pub bill_count: i64,
    pub total_cents: i64,
}

/// The composite analytics report the dashboard renders.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesReport {
    /// Trailing twelve months, oldest first.
    pub monthly_sales: Vec<MonthlySales>,
    pub today: TodaySales,
    /// Top five products by units sold.
    pub top_products: Vec<TopProduct>,
    /// Total number of catalog products.
    pub total_products: i64,
    /// Current-month totals per employee.
    pub employee_month: Vec<EmployeeMonthlySales>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> BillDraft {
        BillDraft {
            employee_id: 1,
            product_ids: vec![4, 4, 9],
            customer_name: Some("Dana Reeve".to_string()),
            customer_phone: Some("555-0100".to_string()),
            discount: Some(Discount::Percent(1000)),
        }
    }

    #[test]
    fn test_draft_validates() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_draft_rejects_empty_items() {
        let mut d = draft();
        d.product_ids.clear();
        assert!(matches!(d.validate(), Err(CoreError::EmptyBill)));
    }

    #[test]
    fn test_draft_rejects_oversized_bill() {
        let mut d = draft();
        d.product_ids = vec![1; MAX_BILL_ITEMS + 1];
        assert!(matches!(d.validate(), Err(CoreError::BillTooLarge { .. })));
    }

    #[test]
    fn test_draft_rejects_bad_phone() {
        let mut d = draft();
        d.customer_phone = Some("not a phone".to_string());
        assert!(matches!(d.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_draft_allows_anonymous_customer() {
        let mut d = draft();
        d.customer_name = None;
        d.customer_phone = None;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_draft_rejects_oversized_percent_discount() {
        let mut d = draft();
        d.discount = Some(Discount::Percent(20000));
        assert!(matches!(d.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_product_price_as_money() {
        let product = Product {
            id: 1,
            name: "Haircut".to_string(),
            price_cents: 2500,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(product.price().cents(), 2500);
    }

    /// The bridge serializes report types as-is inside DTOs; the month key
    /// format is part of the contract with the dashboard charts.
    #[test]
    fn test_monthly_sales_serializes_month_key() {
        let row = MonthlySales {
            month: "2026-08".to_string(),
            bill_count: 3,
            total_cents: 12300,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["month"], "2026-08");
        assert_eq!(json["total_cents"], 12300);
    }
}

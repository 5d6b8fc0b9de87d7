//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, the
//! `Discount` type, and the bill totals calculation.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many retail systems:                                                │
//! │    $10.00 / 3 = $3.33 (×3 = $9.99)  → Lost $0.01!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1000 cents / 3 = 333 cents (×3 = 999 cents)                         │
//! │    We KNOW we lost 1 cent, and handle it explicitly                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use velvet_core::money::{Discount, Money};
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;            // $21.98
//! let total = price + Money::from_cents(500); // $15.99
//!
//! // Discounts work on cents too
//! let off = Discount::Percent(1000).amount_on(Money::from_cents(4000));
//! assert_eq!(off.cents(), 400); // 10% of $40.00
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections and refunds
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Product.price_cents ──┬──► bill line item ──► Bill.subtotal_cents     │
/// │                        │                                                │
/// │                        └──► Displayed as "$10.99" on receipts          │
/// │                                                                         │
/// │  subtotal ──► Discount ──► Bill.total_cents ──► Analytics sums         │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use velvet_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The database, calculations, and bridge all use cents.
    /// Only the UI converts to dollars for display.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Subtracts, stopping at zero instead of going negative.
    ///
    /// Used when applying discounts: a discount larger than the subtotal
    /// must produce a free bill, not a negative one.
    ///
    /// ## Example
    /// ```rust
    /// use velvet_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(500);
    /// let discount = Money::from_cents(800);
    /// assert_eq!(subtotal.saturating_sub(discount).cents(), 0);
    /// ```
    #[inline]
    pub fn saturating_sub(&self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging. Use [`crate::receipt`] or frontend formatting for
/// actual display to handle currency symbols properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A discount applied to a bill's subtotal.
///
/// The renderer offers two discount modes on the bill page and both are
/// preserved here:
///
/// - `Percent`: basis points of the subtotal (1000 = 10%)
/// - `Fixed`: a flat amount in cents
///
/// ## Rounding
/// Percentage discounts use the same integer rounding as the rest of the
/// system: `(subtotal × bps + 5000) / 10000`, computed in i128 so large
/// subtotals cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Discount {
    /// Percentage of the subtotal, in basis points (1000 = 10%).
    Percent(u32),
    /// Flat amount in cents.
    Fixed(Money),
}

impl Discount {
    /// Computes the discount amount for a given subtotal.
    ///
    /// The result is clamped to `[0, subtotal]`: a discount can never be
    /// negative and can never exceed what is being discounted.
    ///
    /// ## Example
    /// ```rust
    /// use velvet_core::money::{Discount, Money};
    ///
    /// let subtotal = Money::from_cents(10000); // $100.00
    ///
    /// let pct = Discount::Percent(1000); // 10%
    /// assert_eq!(pct.amount_on(subtotal).cents(), 1000);
    ///
    /// let flat = Discount::Fixed(Money::from_cents(2500));
    /// assert_eq!(flat.amount_on(subtotal).cents(), 2500);
    ///
    /// // A $150 discount on a $100 bill takes the bill to zero, not below
    /// let oversized = Discount::Fixed(Money::from_cents(15000));
    /// assert_eq!(oversized.amount_on(subtotal).cents(), 10000);
    /// ```
    pub fn amount_on(&self, subtotal: Money) -> Money {
        let raw = match self {
            Discount::Percent(bps) => {
                let cents = (subtotal.cents() as i128 * *bps as i128 + 5000) / 10000;
                Money::from_cents(cents as i64)
            }
            Discount::Fixed(amount) => *amount,
        };

        // Clamp to [0, subtotal]
        if raw.is_negative() {
            Money::zero()
        } else if raw > subtotal {
            subtotal
        } else {
            raw
        }
    }
}

// =============================================================================
// Bill Totals
// =============================================================================

/// The three computed amounts stored on every bill header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillTotals {
    /// Sum of line item unit prices.
    pub subtotal_cents: i64,
    /// Discount amount actually applied (post-clamping).
    pub discount_cents: i64,
    /// `subtotal - discount`. Never negative.
    pub total_cents: i64,
}

/// Computes bill totals from line item unit prices and an optional discount.
///
/// This is THE totals calculation: the bill-creation transaction stores
/// exactly what this function returns, and receipts re-display the stored
/// values. The renderer's own preview math is advisory only.
///
/// ```text
/// unit prices [2500, 1500, 1500]
///      │
///      ▼
/// subtotal = 5500
///      │
///      ▼
/// Discount::Percent(1000) → discount = 550
///      │
///      ▼
/// total = 4950
/// ```
pub fn bill_totals(unit_prices_cents: &[i64], discount: Option<Discount>) -> BillTotals {
    let subtotal = unit_prices_cents
        .iter()
        .fold(Money::zero(), |acc, &cents| acc + Money::from_cents(cents));

    let discount_amount = match discount {
        Some(d) => d.amount_on(subtotal),
        None => Money::zero(),
    };

    BillTotals {
        subtotal_cents: subtotal.cents(),
        discount_cents: discount_amount.cents(),
        total_cents: subtotal.saturating_sub(discount_amount).cents(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_saturating_sub() {
        let a = Money::from_cents(500);
        let b = Money::from_cents(800);
        assert_eq!(a.saturating_sub(b).cents(), 0);
        assert_eq!(b.saturating_sub(a).cents(), 300);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(positive.is_positive());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_percent_discount_basic() {
        // $100.00 at 10% = $10.00 off
        let subtotal = Money::from_cents(10000);
        let off = Discount::Percent(1000).amount_on(subtotal);
        assert_eq!(off.cents(), 1000);
    }

    #[test]
    fn test_percent_discount_rounding() {
        // $10.00 at 8.25% = $0.825 → rounds to $0.83
        let subtotal = Money::from_cents(1000);
        let off = Discount::Percent(825).amount_on(subtotal);
        assert_eq!(off.cents(), 83);
    }

    #[test]
    fn test_fixed_discount_clamped_to_subtotal() {
        let subtotal = Money::from_cents(500);
        let off = Discount::Fixed(Money::from_cents(800)).amount_on(subtotal);
        assert_eq!(off.cents(), 500);
    }

    #[test]
    fn test_negative_fixed_discount_ignored() {
        let subtotal = Money::from_cents(500);
        let off = Discount::Fixed(Money::from_cents(-100)).amount_on(subtotal);
        assert_eq!(off.cents(), 0);
    }

    #[test]
    fn test_full_percent_discount() {
        let subtotal = Money::from_cents(4200);
        let off = Discount::Percent(10000).amount_on(subtotal);
        assert_eq!(off.cents(), 4200);
    }

    #[test]
    fn test_bill_totals_no_discount() {
        let totals = bill_totals(&[2500, 1500, 1500], None);
        assert_eq!(totals.subtotal_cents, 5500);
        assert_eq!(totals.discount_cents, 0);
        assert_eq!(totals.total_cents, 5500);
    }

    #[test]
    fn test_bill_totals_percent_discount() {
        let totals = bill_totals(&[2500, 1500, 1500], Some(Discount::Percent(1000)));
        assert_eq!(totals.subtotal_cents, 5500);
        assert_eq!(totals.discount_cents, 550);
        assert_eq!(totals.total_cents, 4950);
    }

    #[test]
    fn test_bill_totals_fixed_discount() {
        let totals = bill_totals(&[2000, 2000], Some(Discount::Fixed(Money::from_cents(500))));
        assert_eq!(totals.subtotal_cents, 4000);
        assert_eq!(totals.discount_cents, 500);
        assert_eq!(totals.total_cents, 3500);
    }

    #[test]
    fn test_bill_totals_empty_items() {
        let totals = bill_totals(&[], Some(Discount::Percent(5000)));
        assert_eq!(totals.subtotal_cents, 0);
        assert_eq!(totals.discount_cents, 0);
        assert_eq!(totals.total_cents, 0);
    }

    #[test]
    fn test_bill_totals_never_negative() {
        let totals = bill_totals(&[300], Some(Discount::Fixed(Money::from_cents(9999))));
        assert_eq!(totals.total_cents, 0);
        assert_eq!(totals.discount_cents, 300);
    }

    /// Repeated product ids are the quantity mechanism; three units of the
    /// same price must sum like any other three lines.
    #[test]
    fn test_bill_totals_repeated_units() {
        let totals = bill_totals(&[1500, 1500, 1500], None);
        assert_eq!(totals.subtotal_cents, 4500);
    }
}

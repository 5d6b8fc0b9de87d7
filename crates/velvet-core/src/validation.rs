//! # Validation Module
//!
//! Input validation utilities for Velvet POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Renderer forms                                               │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Bridge operation (Rust)                                      │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (employee email)                               │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  The renderer is untrusted; layers 2 and 3 assume nothing from it      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use velvet_core::validation::{validate_person_name, validate_price_cents};
//!
//! validate_person_name("Amira Khan").unwrap();
//! validate_price_cents(2500).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Discount;
use crate::MAX_DISCOUNT_BPS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a person's name (employee or customer).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
pub fn validate_person_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a product/service name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an optional phone number.
///
/// ## Rules
/// - Absent or empty is fine (phone is optional everywhere)
/// - At most 20 characters
/// - Digits, spaces, and `+ - ( )` only
pub fn validate_phone(phone: Option<&str>) -> ValidationResult<()> {
    let phone = match phone {
        Some(p) if !p.trim().is_empty() => p.trim(),
        _ => return Ok(()),
    };

    if phone.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: 20,
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, and + - ( )".to_string(),
        });
    }

    Ok(())
}

/// Validates an optional email address.
///
/// Deliberately loose: one `@` with something on both sides and a dot in
/// the domain. The point is catching typos in a form, not RFC 5321.
pub fn validate_email(email: Option<&str>) -> ValidationResult<()> {
    let email = match email {
        Some(e) if !e.trim().is_empty() => e.trim(),
        _ => return Ok(()),
    };

    if email.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 100,
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@domain.tld".to_string(),
    };

    if email.contains(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(invalid());
    }

    Ok(())
}

/// Validates an optional product description.
pub fn validate_description(description: Option<&str>) -> ValidationResult<()> {
    if let Some(d) = description {
        if d.len() > 500 {
            return Err(ValidationError::TooLong {
                field: "description".to_string(),
                max: 500,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (complimentary services)
///
/// ## Example
/// ```rust
/// use velvet_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());  // $10.99
/// assert!(validate_price_cents(0).is_ok());     // Free item
/// assert!(validate_price_cents(-100).is_err()); // Invalid
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a discount before it is applied.
///
/// ## Rules
/// - Percentage discounts may not exceed 100% (10000 bps)
/// - Fixed discounts must be non-negative (clamping handles overshoot,
///   but a negative "discount" is a surcharge and gets rejected)
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    match discount {
        Discount::Percent(bps) => {
            if *bps > MAX_DISCOUNT_BPS {
                return Err(ValidationError::OutOfRange {
                    field: "discount".to_string(),
                    min: 0,
                    max: MAX_DISCOUNT_BPS as i64,
                });
            }
        }
        Discount::Fixed(amount) => {
            if amount.is_negative() {
                return Err(ValidationError::MustBePositive {
                    field: "discount".to_string(),
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_person_name() {
        assert!(validate_person_name("Amira Khan").is_ok());
        assert!(validate_person_name("").is_err());
        assert!(validate_person_name("   ").is_err());
        assert!(validate_person_name(&"A".repeat(150)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Haircut & Style").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone(None).is_ok());
        assert!(validate_phone(Some("")).is_ok());
        assert!(validate_phone(Some("+1 (555) 010-2244")).is_ok());
        assert!(validate_phone(Some("555-0100")).is_ok());

        assert!(validate_phone(Some("call me maybe")).is_err());
        assert!(validate_phone(Some(&"5".repeat(30))).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email(None).is_ok());
        assert!(validate_email(Some("")).is_ok());
        assert!(validate_email(Some("amira@example.com")).is_ok());

        assert!(validate_email(Some("no-at-sign")).is_err());
        assert!(validate_email(Some("@example.com")).is_err());
        assert!(validate_email(Some("amira@")).is_err());
        assert!(validate_email(Some("amira@nodot")).is_err());
        assert!(validate_email(Some("am ira@example.com")).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_discount() {
        use crate::money::Money;
        assert!(validate_discount(&Discount::Percent(0)).is_ok());
        assert!(validate_discount(&Discount::Percent(10000)).is_ok());
        assert!(validate_discount(&Discount::Percent(10001)).is_err());

        assert!(validate_discount(&Discount::Fixed(Money::from_cents(500))).is_ok());
        assert!(validate_discount(&Discount::Fixed(Money::from_cents(-1))).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some("Includes wash and blow-dry")).is_ok());
        assert!(validate_description(Some(&"x".repeat(501))).is_err());
    }
}

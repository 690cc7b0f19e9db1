//! # Validation Module
//!
//! Input validation for outlet settings.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Settings forms (TypeScript)                                  │
//! │  ├── Required name, markup/discount toggles                            │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: settings-api (Rust)                                          │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::pricing::Percentage;
use crate::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_PERCENTAGE_BPS, MAX_TIER_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a price tier name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use bountip_core::validation::validate_tier_name;
///
/// assert_eq!(validate_tier_name("  Wholesale ").unwrap(), "Wholesale");
/// assert!(validate_tier_name("   ").is_err());
/// ```
pub fn validate_tier_name(name: &str) -> ValidationResult<String> {
    validate_text("name", name, MAX_TIER_NAME_LEN)
}

/// Validates an outlet or product name and returns it trimmed.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    validate_text(field, name, MAX_NAME_LEN)
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates an optional description.
///
/// Blank descriptions collapse to `None`.
pub fn validate_description(description: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(Some(description.to_string()))
}

/// Validates a three-letter currency code and returns it uppercased.
///
/// ```rust
/// use bountip_core::validation::validate_currency;
///
/// assert_eq!(validate_currency("ngn").unwrap(), "NGN");
/// assert!(validate_currency("NAIRA").is_err());
/// ```
pub fn validate_currency(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::required("currency"));
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::invalid_format(
            "currency",
            "must be a three-letter ISO 4217 code",
        ));
    }

    Ok(code.to_ascii_uppercase())
}

/// Validates the business identifier carried by a request.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Letters, digits, hyphens and underscores only
pub fn validate_business_id(id: &str) -> ValidationResult<String> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::required("businessId"));
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "businessId".to_string(),
            max: 64,
        });
    }

    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(ValidationError::invalid_format(
            "businessId",
            "must contain only letters, numbers, hyphens, and underscores",
        ));
    }

    Ok(id.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a markup/discount percentage: 0 to 100 with at most two
/// decimals, so the stored basis points equal what was submitted.
///
/// ## Example
/// ```rust
/// use bountip_core::validation::validate_percentage;
///
/// assert_eq!(validate_percentage("markupPercentage", 12.5).unwrap().bps(), 1250);
/// assert!(validate_percentage("markupPercentage", -1.0).is_err());
/// assert!(validate_percentage("markupPercentage", 100.5).is_err());
/// assert!(validate_percentage("markupPercentage", 33.333).is_err());
/// ```
pub fn validate_percentage(field: &str, value: f64) -> ValidationResult<Percentage> {
    if !value.is_finite() {
        return Err(ValidationError::invalid_format(field, "must be a finite number"));
    }

    let scaled = value * 100.0;
    if scaled < 0.0 || scaled > MAX_PERCENTAGE_BPS as f64 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }

    // tolerance absorbs binary noise such as 12.35 × 100 = 1234.9999999999998
    let bps = scaled.round();
    if (scaled - bps).abs() > 1e-6 {
        return Err(ValidationError::invalid_format(
            field,
            "must have at most two decimal places",
        ));
    }

    Ok(Percentage::from_bps(bps as u32))
}

/// Validates a product price.
///
/// Zero is allowed; negative prices are not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
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
    fn test_validate_tier_name() {
        assert_eq!(validate_tier_name("VIP").unwrap(), "VIP");
        assert_eq!(validate_tier_name(" Staff price ").unwrap(), "Staff price");
        assert_eq!(validate_tier_name("").unwrap_err(), ValidationError::required("name"));
        assert!(validate_tier_name(&"A".repeat(101)).is_err());
        assert!(validate_tier_name(&"A".repeat(100)).is_ok());
    }

    #[test]
    fn test_validate_description() {
        assert_eq!(validate_description(None).unwrap(), None);
        assert_eq!(validate_description(Some("   ")).unwrap(), None);
        assert_eq!(
            validate_description(Some(" For resellers ")).unwrap(),
            Some("For resellers".to_string())
        );
        assert!(validate_description(Some(&"x".repeat(501))).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert_eq!(validate_percentage("p", 0.0).unwrap().bps(), 0);
        assert_eq!(validate_percentage("p", 100.0).unwrap().bps(), 10_000);
        assert_eq!(validate_percentage("p", 33.33).unwrap().bps(), 3333);
        assert_eq!(validate_percentage("p", 12.35).unwrap().bps(), 1235);
        assert_eq!(validate_percentage("p", 0.01).unwrap().bps(), 1);
        assert!(validate_percentage("p", f64::NAN).is_err());
        assert!(validate_percentage("p", -0.01).is_err());
        assert!(validate_percentage("p", 101.0).is_err());
    }

    #[test]
    fn test_validate_percentage_rejects_extra_decimals() {
        for value in [33.333, 0.005, 99.999] {
            let err = validate_percentage("markupPercentage", value).unwrap_err();
            assert_eq!(
                err.to_string(),
                "markupPercentage has invalid format: must have at most two decimal places"
            );
        }
    }

    #[test]
    fn test_validate_currency() {
        assert_eq!(validate_currency("usd").unwrap(), "USD");
        assert!(validate_currency("").is_err());
        assert!(validate_currency("U5D").is_err());
    }

    #[test]
    fn test_validate_business_id() {
        assert_eq!(validate_business_id(" biz-001 ").unwrap(), "biz-001");
        assert!(validate_business_id("").is_err());
        assert!(validate_business_id("has space").is_err());
        assert!(validate_business_id(&"b".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
    }
}

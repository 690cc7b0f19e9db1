//! # Error Types
//!
//! Domain-specific error types for bountip-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bountip-core errors (this file)                                       │
//! │  ├── CoreError        - Pricing and domain errors                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bountip-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  settings-api errors                                                   │
//! │  └── ApiError         - What the client sees (serialized envelope)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Client                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An argument could not be interpreted at all.
    ///
    /// ## When This Occurs
    /// - A base price such as `"abc"` reaches the tier calculator
    /// - A base price too large to represent in minor units
    #[error("{0}")]
    InvalidArgument(String),

    /// Outlet does not exist or belongs to another business.
    #[error("Outlet not found: {0}")]
    OutletNotFound(i64),

    /// Price tier does not exist within the outlet.
    #[error("Price tier not found: {0}")]
    TierNotFound(i64),

    /// Product does not exist within the outlet.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CoreError::InvalidArgument(message.into())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., non-finite number, bad currency code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// A new price tier carries neither a markup nor a discount.
    #[error("Price tier must have either a markup or discount rule.")]
    MissingPricingRule,

    /// A batch contained nothing to save.
    #[error("No new price tiers to save.")]
    NothingToSave,
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message_is_verbatim() {
        let err = CoreError::invalid_argument("Invalid basePrice: not a number");
        assert_eq!(err.to_string(), "Invalid basePrice: not a number");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "markupPercentage".to_string(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.to_string(), "markupPercentage must be between 0 and 100");

        assert_eq!(
            ValidationError::MissingPricingRule.to_string(),
            "Price tier must have either a markup or discount rule."
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

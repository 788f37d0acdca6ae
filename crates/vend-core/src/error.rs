//! # Error Types
//!
//! Domain-specific error types for vend-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vend-core errors (this file)                                          │
//! │  ├── CoreError        - Purchase flow failures                         │
//! │  └── ValidationError  - Bad config or bad input labels                 │
//! │                                                                         │
//! │  vend-cli errors (separate crate)                                      │
//! │  └── ConfigError      - Config file loading failures                   │
//! │                                                                         │
//! │  NOT errors: an unavailable selection (None) and change that cannot    │
//! │  be made (empty Change / Refunded). Those are ordinary outcomes.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, amounts)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Purchase flow errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The item is not stocked by this machine at all.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// The item exists but has no units left.
    #[error("Item out of stock: {0}")]
    OutOfStock(String),

    /// The input source stopped before enough money was inserted.
    ///
    /// ## When This Occurs
    /// ```text
    /// Select crisps (£1.00)
    ///      │
    ///      ▼
    /// Insert 50p ... input closes
    ///      │
    ///      ▼
    /// PaymentIncomplete { tendered: £0.50, price: £1.00 }
    ///      │
    ///      ▼
    /// Nothing vended, stock untouched
    /// ```
    #[error("Payment incomplete: tendered {tendered} of {price}")]
    PaymentIncomplete { tendered: Money, price: Money },

    /// A coin label that is not one of the accepted denominations.
    #[error("Unknown denomination: {0}")]
    UnknownDenomination(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::PaymentIncomplete {
            tendered: Money::from_pence(50),
            price: Money::from_pence(100),
        };
        assert_eq!(
            err.to_string(),
            "Payment incomplete: tendered £0.50 of £1.00"
        );

        let err = CoreError::OutOfStock("haribo".to_string());
        assert_eq!(err.to_string(), "Item out of stock: haribo");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "item name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(
            core_err.to_string(),
            "Validation error: item name is required"
        );
    }
}

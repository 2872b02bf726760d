//! # Error Types
//!
//! Domain-specific error types for buttonsmith-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  buttonsmith-core errors (this file)                                   │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  buttonsmith-db errors (separate crate)                                │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → route handler → JSON    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error Here
//! Dangling references inside a catalog snapshot (a category whose parent was
//! deleted, a button pointing at a removed category) are handled gracefully
//! by the aggregator - treated as root / uncategorized - and never surface as
//! errors. Pricing and counting are total functions over their input domain.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (slug, id, quantity, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Category cannot be found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Button cannot be found.
    #[error("Button not found: {0}")]
    ButtonNotFound(String),

    /// Order cannot be found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Order is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Marking a cancelled order as paid
    /// - Shipping an order that was never paid
    #[error("Order {order_id} is {current_status}, cannot perform operation")]
    InvalidOrderStatus {
        order_id: String,
        current_status: String,
    },

    /// Order quantity exceeds what checkout accepts.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
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

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, invalid slug).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Pricing tiers do not monotonically decrease with quantity.
    ///
    /// ## When This Occurs
    /// - Admin saves a config where a deeper tier is more expensive
    /// - Thresholds are out of order (tier2 below tier1)
    ///
    /// The pricing engine itself never raises this: it assumes the invariant
    /// and this variant exists to reject bad configs at the write boundary.
    #[error("Inconsistent pricing config: {reason}")]
    InconsistentPricing { reason: String },

    /// Duplicate value (e.g., duplicate slug or SKU).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
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
    fn test_error_messages() {
        let err = CoreError::QuantityTooLarge {
            requested: 99_999,
            max: 50_000,
        };
        assert_eq!(
            err.to_string(),
            "Quantity 99999 exceeds maximum allowed (50000)"
        );

        let err = CoreError::CategoryNotFound("band-buttons".to_string());
        assert_eq!(err.to_string(), "Category not found: band-buttons");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "slug".to_string(),
        };
        assert_eq!(err.to_string(), "slug is required");

        let err = ValidationError::InconsistentPricing {
            reason: "tier1_price must not exceed single_price".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Inconsistent pricing config: tier1_price must not exceed single_price"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

//! # Validation Module
//!
//! Input validation utilities for the Buttonsmith shop.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront (TypeScript)                                      │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Route Handler (Rust)                                         │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (slug, sku, order_number)                      │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quantity Contract
//! The pricing engine clamps negative quantities to 0 (total function, no
//! side effects). Checkout must not rely on that: `validate_order_quantity`
//! rejects non-positive and oversized quantities before an order is created.

use crate::error::ValidationError;
use crate::types::{Category, PricingConfig};
use crate::{MAX_CATEGORY_DEPTH, MAX_ORDER_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a button SKU.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Should contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use buttonsmith_core::validation::validate_sku;
///
/// assert!(validate_sku("BTN-PUNK-001").is_ok());
/// assert!(validate_sku("").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a category or button display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
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

/// Validates a URL slug.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
/// - Lowercase alphanumeric and hyphens only
///
/// ## Example
/// ```rust
/// use buttonsmith_core::validation::validate_slug;
///
/// assert!(validate_slug("band-buttons").is_ok());
/// assert!(validate_slug("Band Buttons").is_err());
/// ```
pub fn validate_slug(slug: &str) -> ValidationResult<()> {
    let slug = slug.trim();

    if slug.is_empty() {
        return Err(ValidationError::Required {
            field: "slug".to_string(),
        });
    }

    if slug.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "slug".to_string(),
            max: 100,
        });
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "slug".to_string(),
            reason: "must contain only lowercase letters, numbers, and hyphens".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order quantity at the checkout boundary.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ORDER_QUANTITY
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Checkout: Create Order                                                 │
/// │                                                                         │
/// │  User enters quantity: 150                                             │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_order_quantity(150) ← THIS FUNCTION                          │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 50000? → Error: out of range                           │
/// │       │                                                                 │
/// │       └── OK → Proceed with pricing::quote + order creation            │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_order_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ORDER_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ORDER_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional giveaways)
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

/// Validates a pricing configuration before it is written to the settings
/// store.
///
/// ## Rules (the invariant the pricing engine assumes)
/// - All prices and thresholds non-negative
/// - `tier2_threshold >= tier1_threshold`
/// - `single_price >= tier1_price >= tier2_price` (discounts must not
///   increase price as quantity grows)
///
/// ## Example
/// ```rust
/// use buttonsmith_core::types::PricingConfig;
/// use buttonsmith_core::validation::validate_pricing_config;
///
/// assert!(validate_pricing_config(&PricingConfig::default()).is_ok());
/// ```
pub fn validate_pricing_config(config: &PricingConfig) -> ValidationResult<()> {
    if config.single_price.is_negative()
        || config.tier1_price.is_negative()
        || config.tier2_price.is_negative()
        || config.shipping.is_negative()
    {
        return Err(ValidationError::InconsistentPricing {
            reason: "prices must be non-negative".to_string(),
        });
    }

    if config.tier1_threshold < 0 || config.tier2_threshold < config.tier1_threshold {
        return Err(ValidationError::InconsistentPricing {
            reason: "thresholds must satisfy tier2 >= tier1 >= 0".to_string(),
        });
    }

    if config.tier1_price > config.single_price {
        return Err(ValidationError::InconsistentPricing {
            reason: "tier1_price must not exceed single_price".to_string(),
        });
    }

    if config.tier2_price > config.tier1_price {
        return Err(ValidationError::InconsistentPricing {
            reason: "tier2_price must not exceed tier1_price".to_string(),
        });
    }

    Ok(())
}

/// Validates that placing a category under `parent_id` stays within the
/// navigation depth limit.
///
/// ## Rules
/// - Walking `parent_id` up through the snapshot must reach a root within
///   MAX_CATEGORY_DEPTH steps
/// - `None` (a new root) is always valid
///
/// The walk is bounded, so a cyclic parent chain in a corrupted snapshot is
/// reported as too deep instead of looping.
pub fn validate_category_depth(
    parent_id: Option<&str>,
    categories: &[Category],
) -> ValidationResult<()> {
    let mut current = parent_id;
    let mut depth = 1usize;

    while let Some(id) = current {
        if depth >= MAX_CATEGORY_DEPTH {
            return Err(ValidationError::OutOfRange {
                field: "category depth".to_string(),
                min: 1,
                max: MAX_CATEGORY_DEPTH as i64,
            });
        }
        depth += 1;
        current = categories
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| c.parent_id.as_deref());
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use buttonsmith_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

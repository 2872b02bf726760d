//! # Pricing Engine
//!
//! Tiered volume pricing for custom buttons: pure functions mapping
//! `(quantity, PricingConfig)` to price figures. No side effects, no I/O,
//! fully deterministic.
//!
//! ## Tier Evaluation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHY TIER 2 IS CHECKED FIRST                                            │
//! │                                                                         │
//! │  Thresholds are cumulative minimums, not exclusive ranges:              │
//! │    quantity 250 satisfies BOTH tier1 (>= 100) and tier2 (>= 200)       │
//! │                                                                         │
//! │  Checking ascending would always short-circuit to the shallowest        │
//! │  discount. The highest threshold must win:                              │
//! │                                                                         │
//! │    qty >= tier2_threshold ──► tier2_price   (deepest discount)         │
//! │    qty >= tier1_threshold ──► tier1_price                              │
//! │    otherwise              ──► single_price                             │
//! │                                                                         │
//! │  Boundaries are inclusive: qty == threshold gets that tier's price.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Defensive Quantity Handling
//! A negative quantity is a caller contract violation; validation at the
//! request boundary rejects it (see [`crate::validation::validate_order_quantity`]).
//! The engine itself clamps to 0 instead of erroring - it has no side effects
//! to protect, and a total function keeps storefront price previews resilient.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::PricingConfig;

// =============================================================================
// Derived Types
// =============================================================================

/// The next better price point a buyer can reach by increasing quantity.
///
/// Used for "order N more to pay $X each" messaging on the cart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NextTier {
    /// Quantity at which the better price applies (inclusive).
    pub threshold: i64,
    /// Per-unit price at that quantity.
    pub price: Money,
}

/// A complete price quote for a quantity, as handed to the cart and checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quote {
    /// Quantity the quote was computed for (after clamping to >= 0).
    pub quantity: i64,
    /// Per-unit price at this quantity.
    pub unit_price: Money,
    /// `unit_price × quantity`.
    pub subtotal: Money,
    /// Flat shipping add-on.
    pub shipping: Money,
    /// `subtotal + shipping`.
    pub total: Money,
    /// Next better tier, if one exists.
    pub next_tier: Option<NextTier>,
}

// =============================================================================
// Operations
// =============================================================================

/// Returns the per-unit price for the given quantity.
///
/// Tier boundaries are inclusive of the threshold: a quantity exactly equal
/// to a threshold receives that tier's price. Negative quantities clamp to 0.
///
/// ## Example
/// ```rust
/// use buttonsmith_core::pricing::price_per_unit;
/// use buttonsmith_core::types::PricingConfig;
///
/// let config = PricingConfig::default();
/// assert_eq!(price_per_unit(99, &config).cents(), 500);  // below tier 1
/// assert_eq!(price_per_unit(100, &config).cents(), 450); // at tier 1
/// assert_eq!(price_per_unit(200, &config).cents(), 400); // at tier 2
/// ```
pub fn price_per_unit(quantity: i64, config: &PricingConfig) -> Money {
    let quantity = quantity.max(0);

    // Highest threshold first: thresholds are cumulative minimums, so an
    // ascending check would never reach the deeper discounts.
    if quantity >= config.tier2_threshold {
        config.tier2_price
    } else if quantity >= config.tier1_threshold {
        config.tier1_price
    } else {
        config.single_price
    }
}

/// Returns the next better (lower) price point the buyer could reach by
/// increasing quantity, or `None` when already at the deepest tier.
///
/// ## Example
/// ```rust
/// use buttonsmith_core::pricing::next_tier;
/// use buttonsmith_core::types::PricingConfig;
///
/// let config = PricingConfig::default();
///
/// let tier = next_tier(50, &config).unwrap();
/// assert_eq!(tier.threshold, 100);
///
/// assert!(next_tier(200, &config).is_none());
/// ```
pub fn next_tier(quantity: i64, config: &PricingConfig) -> Option<NextTier> {
    let quantity = quantity.max(0);

    if quantity >= config.tier2_threshold {
        // No better tier exists.
        None
    } else if quantity >= config.tier1_threshold {
        Some(NextTier {
            threshold: config.tier2_threshold,
            price: config.tier2_price,
        })
    } else {
        Some(NextTier {
            threshold: config.tier1_threshold,
            price: config.tier1_price,
        })
    }
}

/// Returns `quantity × price_per_unit(quantity)`.
pub fn subtotal(quantity: i64, config: &PricingConfig) -> Money {
    let quantity = quantity.max(0);
    price_per_unit(quantity, config).multiply_quantity(quantity)
}

/// Returns the order total: subtotal plus flat shipping when requested.
///
/// ## Example
/// ```rust
/// use buttonsmith_core::pricing::order_total;
/// use buttonsmith_core::types::PricingConfig;
///
/// let config = PricingConfig::default();
/// // 150 × $4.50 + $8.00 = $683.00
/// assert_eq!(order_total(150, &config, true).cents(), 68_300);
/// ```
pub fn order_total(quantity: i64, config: &PricingConfig, include_shipping: bool) -> Money {
    let mut total = subtotal(quantity, config);
    if include_shipping {
        total += config.shipping;
    }
    total
}

/// Computes the full quote bundle the cart and checkout pages consume.
pub fn quote(quantity: i64, config: &PricingConfig) -> Quote {
    let quantity = quantity.max(0);
    let unit_price = price_per_unit(quantity, config);
    let subtotal = unit_price.multiply_quantity(quantity);

    Quote {
        quantity,
        unit_price,
        subtotal,
        shipping: config.shipping,
        total: subtotal + config.shipping,
        next_tier: next_tier(quantity, config),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> PricingConfig {
        PricingConfig::default()
    }

    #[test]
    fn test_price_per_unit_default_tiers() {
        let config = default_config();

        assert_eq!(price_per_unit(50, &config).cents(), 500);
        assert_eq!(price_per_unit(99, &config).cents(), 500);
        assert_eq!(price_per_unit(100, &config).cents(), 450);
        assert_eq!(price_per_unit(150, &config).cents(), 450);
        assert_eq!(price_per_unit(199, &config).cents(), 450);
        assert_eq!(price_per_unit(200, &config).cents(), 400);
        assert_eq!(price_per_unit(5000, &config).cents(), 400);
    }

    #[test]
    fn test_threshold_inclusive_on_discount_side() {
        let config = default_config();

        // Boundary is inclusive: qty == threshold gets the discount,
        // qty == threshold - 1 does not.
        assert_eq!(
            price_per_unit(config.tier1_threshold, &config),
            config.tier1_price
        );
        assert_eq!(
            price_per_unit(config.tier1_threshold - 1, &config),
            config.single_price
        );
        assert_eq!(
            price_per_unit(config.tier2_threshold, &config),
            config.tier2_price
        );
        assert_eq!(
            price_per_unit(config.tier2_threshold - 1, &config),
            config.tier1_price
        );
    }

    #[test]
    fn test_price_monotonically_decreases_with_quantity() {
        let config = default_config();

        let mut last = price_per_unit(0, &config);
        for qty in 1..=500 {
            let current = price_per_unit(qty, &config);
            assert!(
                current <= last,
                "price rose from {} to {} at qty {}",
                last,
                current,
                qty
            );
            last = current;
        }
    }

    #[test]
    fn test_zero_quantity() {
        let config = default_config();

        assert_eq!(price_per_unit(0, &config), config.single_price);
        assert_eq!(subtotal(0, &config).cents(), 0);
        assert_eq!(order_total(0, &config, false).cents(), 0);
        assert_eq!(order_total(0, &config, true), config.shipping);
    }

    #[test]
    fn test_negative_quantity_clamps_to_zero() {
        let config = default_config();

        assert_eq!(price_per_unit(-5, &config), config.single_price);
        assert_eq!(subtotal(-5, &config).cents(), 0);

        let q = quote(-5, &config);
        assert_eq!(q.quantity, 0);
        assert_eq!(q.subtotal.cents(), 0);
    }

    #[test]
    fn test_next_tier_ladder() {
        let config = default_config();

        let first = next_tier(50, &config).unwrap();
        assert_eq!(first.threshold, 100);
        assert_eq!(first.price.cents(), 450);

        let second = next_tier(100, &config).unwrap();
        assert_eq!(second.threshold, 200);
        assert_eq!(second.price.cents(), 400);

        let second = next_tier(199, &config).unwrap();
        assert_eq!(second.threshold, 200);
    }

    #[test]
    fn test_next_tier_exhausted_at_deepest_tier() {
        let config = default_config();

        assert!(next_tier(config.tier2_threshold, &config).is_none());
        assert!(next_tier(config.tier2_threshold + 1000, &config).is_none());
    }

    #[test]
    fn test_order_total_spec_scenario() {
        let config = default_config();

        // 150 × $4.50 + $8.00 shipping = $683.00
        assert_eq!(order_total(150, &config, true).cents(), 68_300);
        assert_eq!(order_total(150, &config, false).cents(), 67_500);
    }

    #[test]
    fn test_quote_bundle() {
        let config = default_config();
        let q = quote(150, &config);

        assert_eq!(q.quantity, 150);
        assert_eq!(q.unit_price.cents(), 450);
        assert_eq!(q.subtotal.cents(), 67_500);
        assert_eq!(q.shipping.cents(), 800);
        assert_eq!(q.total.cents(), 68_300);

        let tier = q.next_tier.unwrap();
        assert_eq!(tier.threshold, 200);
        assert_eq!(tier.price.cents(), 400);
    }

    #[test]
    fn test_equal_thresholds_prefer_deepest_tier() {
        // Degenerate but valid config: both discounts start at 100.
        let config = PricingConfig {
            single_price: Money::from_cents(500),
            tier1_price: Money::from_cents(450),
            tier1_threshold: 100,
            tier2_price: Money::from_cents(400),
            tier2_threshold: 100,
            shipping: Money::from_cents(800),
        };

        assert_eq!(price_per_unit(100, &config).cents(), 400);
        assert!(next_tier(100, &config).is_none());
        // Below both thresholds the ladder still reports tier 1 first.
        let tier = next_tier(50, &config).unwrap();
        assert_eq!(tier.threshold, 100);
        assert_eq!(tier.price.cents(), 450);
    }
}

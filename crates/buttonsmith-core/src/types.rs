//! # Domain Types
//!
//! Core domain types used throughout the Buttonsmith shop.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │     Button      │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  parent_id?     │   │  category_id?   │   │  order_number   │       │
//! │  │  name, slug     │   │  sku, name      │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   │  total_cents    │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  PricingConfig  │   │   OrderStatus   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  3 tier prices  │   │  Pending        │                             │
//! │  │  2 thresholds   │   │  Paid           │                             │
//! │  │  flat shipping  │   │  Shipped        │                             │
//! │  └─────────────────┘   │  Cancelled      │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tree References
//! `Category.parent_id` and `Button.category_id` are plain string references,
//! not loaded relations. The [`crate::catalog`] module consumes flat slices of
//! these rows and tolerates references to ids missing from the snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Pricing Configuration
// =============================================================================

/// Volume pricing configuration for custom buttons.
///
/// ## Tier Semantics
/// Thresholds are cumulative minimums, inclusive on the discount side:
/// ```text
/// quantity:   0 ──────── 99 │ 100 ─────── 199 │ 200 ──────────►
/// unit price:  single_price │    tier1_price  │   tier2_price
/// ```
///
/// ## Invariant (caller-supplied)
/// `tier2_threshold >= tier1_threshold >= 0` and
/// `single_price >= tier1_price >= tier2_price`. The pricing engine does not
/// re-validate this; [`crate::validation::validate_pricing_config`] enforces
/// it at the admin-settings write boundary.
///
/// ## Lifecycle
/// Loaded from the settings store per request, never mutated. Safe to cache
/// across requests as a read-only snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingConfig {
    /// Per-unit price below the first threshold.
    pub single_price: Money,

    /// Per-unit price at or above `tier1_threshold`.
    pub tier1_price: Money,

    /// Quantity at which the first discount applies (inclusive).
    pub tier1_threshold: i64,

    /// Per-unit price at or above `tier2_threshold` (deepest discount).
    pub tier2_price: Money,

    /// Quantity at which the deepest discount applies (inclusive).
    pub tier2_threshold: i64,

    /// Flat shipping add-on, independent of quantity.
    pub shipping: Money,
}

/// Compiled-in fallback used when the settings store has no pricing row:
/// $5.00 single, $4.50 at 100, $4.00 at 200, $8.00 flat shipping.
impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            single_price: Money::from_cents(500),
            tier1_price: Money::from_cents(450),
            tier1_threshold: 100,
            tier2_price: Money::from_cents(400),
            tier2_threshold: 200,
            shipping: Money::from_cents(800),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A catalog category. Categories form a tree via `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Parent category, `None` for roots.
    ///
    /// Must not form a cycle. A parent id that is missing from the loaded
    /// snapshot is treated as a root by the aggregator rather than an error.
    pub parent_id: Option<String>,

    /// Display name shown in storefront navigation.
    pub name: String,

    /// URL slug, unique across categories.
    pub slug: String,

    /// Whether the category is visible (soft delete).
    pub is_active: bool,

    /// When the category was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the category was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Button
// =============================================================================

/// A button design in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Button {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The single category this button is directly assigned to.
    ///
    /// `None` means uncategorized: the button is excluded from every
    /// category's direct and recursive counts.
    pub category_id: Option<String>,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown on the storefront.
    pub name: String,

    /// Optional description for the detail page.
    pub description: Option<String>,

    /// Artwork preview image.
    pub image_url: Option<String>,

    /// Whether the button is visible (soft delete).
    pub is_active: bool,

    /// When the button was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the button was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of a storefront order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order created, awaiting payment at the hosted processor.
    Pending,
    /// Payment confirmed.
    Paid,
    /// Order fulfilled and shipped.
    Shipped,
    /// Order cancelled before fulfillment.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Order
// =============================================================================

/// A custom-button order.
///
/// Price figures are frozen onto the order at creation time (snapshot
/// pattern): later pricing-config changes never alter an existing order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: String,
    /// Human-readable order number shown to the customer.
    pub order_number: String,
    pub status: OrderStatus,
    /// Number of buttons ordered.
    pub quantity: i64,
    /// Unit price in cents at time of order (frozen).
    pub unit_price_cents: i64,
    /// Subtotal in cents (unit price × quantity, frozen).
    pub subtotal_cents: i64,
    /// Flat shipping in cents at time of order (frozen).
    pub shipping_cents: i64,
    /// Grand total in cents (subtotal + shipping, frozen).
    pub total_cents: i64,
    pub customer_email: String,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pricing_config() {
        let config = PricingConfig::default();
        assert_eq!(config.single_price.cents(), 500);
        assert_eq!(config.tier1_price.cents(), 450);
        assert_eq!(config.tier1_threshold, 100);
        assert_eq!(config.tier2_price.cents(), 400);
        assert_eq!(config.tier2_threshold, 200);
        assert_eq!(config.shipping.cents(), 800);
    }

    #[test]
    fn test_default_pricing_config_satisfies_invariant() {
        let config = PricingConfig::default();
        assert!(config.single_price >= config.tier1_price);
        assert!(config.tier1_price >= config.tier2_price);
        assert!(config.tier2_threshold >= config.tier1_threshold);
        assert!(config.tier1_threshold >= 0);
    }

    #[test]
    fn test_order_status_default() {
        let status = OrderStatus::default();
        assert_eq!(status, OrderStatus::Pending);
    }

    #[test]
    fn test_order_money_accessors() {
        let now = Utc::now();
        let order = Order {
            id: "o1".to_string(),
            order_number: "BTN-0001".to_string(),
            status: OrderStatus::Pending,
            quantity: 150,
            unit_price_cents: 450,
            subtotal_cents: 67_500,
            shipping_cents: 800,
            total_cents: 68_300,
            customer_email: "crafts@example.com".to_string(),
            notes: None,
            created_at: now,
            updated_at: now,
            paid_at: None,
        };
        assert_eq!(order.unit_price().cents(), 450);
        assert_eq!(order.subtotal().cents(), 67_500);
        assert_eq!(order.total().cents(), 68_300);
    }
}

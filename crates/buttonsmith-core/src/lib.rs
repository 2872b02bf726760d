//! # buttonsmith-core: Pure Business Logic for the Buttonsmith Shop
//!
//! This crate is the **heart** of the Buttonsmith storefront. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Buttonsmith Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront (TypeScript)                         │   │
//! │  │    Category Pages ──► Cart ──► Checkout ──► Admin Dashboard     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Route Handlers                               │   │
//! │  │    fetch rows ──► call core ──► format response                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ buttonsmith-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │  catalog  │  │ validation│  │   │
//! │  │   │  Category │  │  tiers    │  │  counts   │  │   rules   │  │   │
//! │  │   │  Button   │  │  quotes   │  │  tree     │  │   checks  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                buttonsmith-db (Database Layer)                  │   │
//! │  │           SQLite queries, migrations, repositories              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Button, Order, PricingConfig, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Tiered volume pricing engine
//! - [`catalog`] - Category tree aggregation (direct + recursive counts)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Total Functions**: Pricing and aggregation never panic; bad references
//!    degrade gracefully instead of crashing a storefront request
//!
//! ## Example Usage
//!
//! ```rust
//! use buttonsmith_core::pricing;
//! use buttonsmith_core::types::PricingConfig;
//!
//! let config = PricingConfig::default();
//!
//! // 150 buttons lands in the first discount tier: $4.50 each
//! let unit = pricing::price_per_unit(150, &config);
//! assert_eq!(unit.cents(), 450);
//!
//! // 150 × $4.50 + $8.00 shipping = $683.00
//! let total = pricing::order_total(150, &config, true);
//! assert_eq!(total.cents(), 68_300);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use buttonsmith_core::Money` instead of
// `use buttonsmith_core::money::Money`

pub use catalog::CategoryCounts;
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use pricing::{NextTier, Quote};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity accepted on a single custom-button order.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 100000 instead of 1000).
/// Orders above this go through the custom-request form instead of checkout.
pub const MAX_ORDER_QUANTITY: i64 = 50_000;

/// Maximum category nesting depth accepted by the admin dashboard.
///
/// ## Business Reason
/// The aggregator handles arbitrary depth, but the storefront navigation
/// renders at most this many levels. Enforced at category-write time.
pub const MAX_CATEGORY_DEPTH: usize = 16;

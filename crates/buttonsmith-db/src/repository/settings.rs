//! # Settings Repository
//!
//! Persistence for the shop's pricing configuration.
//!
//! ## Single-Row Store
//! The `settings` table holds at most one row (id fixed to 1). When the row
//! is absent the shop runs on `PricingConfig::default()`, so a fresh database
//! prices orders correctly before the admin ever opens the settings page.
//!
//! ## Write Path
//! ```text
//! Admin form ──► validate_pricing_config ──► UPSERT row 1 ──► next quote
//!                       │
//!                       └── rejects inverted tiers / negative prices
//!                           BEFORE they can reach checkout
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use buttonsmith_core::validation::validate_pricing_config;
use buttonsmith_core::{Money, PricingConfig};

/// Repository for pricing configuration storage.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

/// Raw settings row; cents columns are converted to `Money` on the way out.
#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    single_price_cents: i64,
    tier1_price_cents: i64,
    tier1_threshold: i64,
    tier2_price_cents: i64,
    tier2_threshold: i64,
    shipping_cents: i64,
}

impl From<SettingsRow> for PricingConfig {
    fn from(row: SettingsRow) -> Self {
        PricingConfig {
            single_price: Money::from_cents(row.single_price_cents),
            tier1_price: Money::from_cents(row.tier1_price_cents),
            tier1_threshold: row.tier1_threshold,
            tier2_price: Money::from_cents(row.tier2_price_cents),
            tier2_threshold: row.tier2_threshold,
            shipping: Money::from_cents(row.shipping_cents),
        }
    }
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Loads the active pricing configuration.
    ///
    /// Falls back to `PricingConfig::default()` when no row has been saved,
    /// so this never fails on an empty database.
    pub async fn pricing_config(&self) -> DbResult<PricingConfig> {
        let row = sqlx::query_as::<_, SettingsRow>(
            "SELECT single_price_cents, tier1_price_cents, tier1_threshold, \
             tier2_price_cents, tier2_threshold, shipping_cents \
             FROM settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(row.into()),
            None => {
                debug!("No stored pricing configuration, using defaults");
                Ok(PricingConfig::default())
            }
        }
    }

    /// Saves the pricing configuration, replacing any existing row.
    ///
    /// ## Returns
    /// * `Ok(())` - Configuration stored
    /// * `Err(DbError::InvalidPricing)` - Rejected by core validation
    ///   (negative amounts, inverted thresholds, or prices that rise
    ///   with quantity)
    pub async fn save_pricing_config(&self, config: &PricingConfig) -> DbResult<()> {
        validate_pricing_config(config)?;

        info!(
            single = config.single_price.cents(),
            tier1 = config.tier1_price.cents(),
            tier2 = config.tier2_price.cents(),
            "Saving pricing configuration"
        );

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO settings (
                id, single_price_cents, tier1_price_cents, tier1_threshold,
                tier2_price_cents, tier2_threshold, shipping_cents, updated_at
            ) VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                single_price_cents = excluded.single_price_cents,
                tier1_price_cents = excluded.tier1_price_cents,
                tier1_threshold = excluded.tier1_threshold,
                tier2_price_cents = excluded.tier2_price_cents,
                tier2_threshold = excluded.tier2_threshold,
                shipping_cents = excluded.shipping_cents,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(config.single_price.cents())
        .bind(config.tier1_price.cents())
        .bind(config.tier1_threshold)
        .bind(config.tier2_price.cents())
        .bind(config.tier2_threshold)
        .bind(config.shipping.cents())
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_database_yields_defaults() {
        let db = test_db().await;

        let config = db.settings().pricing_config().await.unwrap();
        assert_eq!(config, PricingConfig::default());
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let db = test_db().await;

        let custom = PricingConfig {
            single_price: Money::from_cents(600),
            tier1_price: Money::from_cents(500),
            tier1_threshold: 50,
            tier2_price: Money::from_cents(425),
            tier2_threshold: 250,
            shipping: Money::from_cents(1_000),
        };

        db.settings().save_pricing_config(&custom).await.unwrap();
        let loaded = db.settings().pricing_config().await.unwrap();
        assert_eq!(loaded, custom);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_row() {
        let db = test_db().await;

        let first = PricingConfig::default();
        db.settings().save_pricing_config(&first).await.unwrap();

        let second = PricingConfig {
            shipping: Money::from_cents(0),
            ..PricingConfig::default()
        };
        db.settings().save_pricing_config(&second).await.unwrap();

        let loaded = db.settings().pricing_config().await.unwrap();
        assert!(loaded.shipping.is_zero());
    }

    #[tokio::test]
    async fn test_invalid_config_rejected_before_write() {
        let db = test_db().await;

        // Bulk price higher than single price: never valid.
        let inverted = PricingConfig {
            tier1_price: Money::from_cents(900),
            ..PricingConfig::default()
        };

        let err = db
            .settings()
            .save_pricing_config(&inverted)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidPricing(_)));

        // Nothing was persisted.
        let loaded = db.settings().pricing_config().await.unwrap();
        assert_eq!(loaded, PricingConfig::default());
    }
}

//! # Order Repository
//!
//! Database operations for custom-button orders.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── create() → Order { status: Pending }                           │
//! │         Pricing figures frozen from the engine at this moment          │
//! │                                                                         │
//! │  2. PAYMENT (hosted processor webhook)                                 │
//! │     └── mark_paid() → Order { status: Paid, paid_at: now }             │
//! │                                                                         │
//! │  3. FULFILLMENT                                                        │
//! │     └── update_status(Shipped)                                         │
//! │                                                                         │
//! │  (any point before shipping)                                           │
//! │     └── update_status(Cancelled)                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Unit price, subtotal, shipping and total are copied onto the order row at
//! creation. This preserves order history even when the admin later changes
//! the pricing configuration.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use buttonsmith_core::pricing;
use buttonsmith_core::{Order, OrderStatus, PricingConfig};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

const ORDER_COLUMNS: &str = "id, order_number, status, quantity, unit_price_cents, \
     subtotal_cents, shipping_cents, total_cents, customer_email, notes, \
     created_at, updated_at, paid_at";

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Creates a new pending order, freezing pricing-engine figures.
    ///
    /// ## Arguments
    /// * `quantity` - Number of buttons (caller validates via
    ///   `validation::validate_order_quantity` before reaching here)
    /// * `customer_email` - Where the confirmation goes
    /// * `notes` - Free-form customer notes
    /// * `config` - The pricing snapshot in effect at checkout time
    pub async fn create(
        &self,
        quantity: i64,
        customer_email: &str,
        notes: Option<&str>,
        config: &PricingConfig,
    ) -> DbResult<Order> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let order_number = generate_order_number();
        let quote = pricing::quote(quantity, config);

        debug!(id = %id, order_number = %order_number, quantity, "Creating order");

        let order = Order {
            id: id.clone(),
            order_number,
            status: OrderStatus::Pending,
            quantity: quote.quantity,
            unit_price_cents: quote.unit_price.cents(),
            subtotal_cents: quote.subtotal.cents(),
            shipping_cents: quote.shipping.cents(),
            total_cents: quote.total.cents(),
            customer_email: customer_email.to_string(),
            notes: notes.map(str::to_string),
            created_at: now,
            updated_at: now,
            paid_at: None,
        };

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_number, status, quantity,
                unit_price_cents, subtotal_cents, shipping_cents, total_cents,
                customer_email, notes, created_at, updated_at, paid_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&order.id)
        .bind(&order.order_number)
        .bind(order.status)
        .bind(order.quantity)
        .bind(order.unit_price_cents)
        .bind(order.subtotal_cents)
        .bind(order.shipping_cents)
        .bind(order.total_cents)
        .bind(&order.customer_email)
        .bind(&order.notes)
        .bind(order.created_at)
        .bind(order.updated_at)
        .bind(order.paid_at)
        .execute(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets an order by its customer-facing order number.
    pub async fn get_by_order_number(&self, order_number: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE order_number = ?1"
        ))
        .bind(order_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Lists the most recent orders (admin dashboard).
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Marks a pending order as paid (payment-processor confirmation).
    ///
    /// ## Returns
    /// * `Ok(())` - Order transitioned to Paid
    /// * `Err(DbError::NotFound)` - No pending order with that id
    pub async fn mark_paid(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Marking order paid");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                status = ?2,
                paid_at = ?3,
                updated_at = ?3
            WHERE id = ?1 AND status = ?4
            "#,
        )
        .bind(id)
        .bind(OrderStatus::Paid)
        .bind(now)
        .bind(OrderStatus::Pending)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Pending order", id));
        }

        Ok(())
    }

    /// Updates an order's status (admin fulfillment actions).
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> DbResult<()> {
        debug!(id = %id, ?status, "Updating order status");

        let now = Utc::now();

        let result = sqlx::query("UPDATE orders SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .bind(now)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    /// Counts all orders (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Generates a customer-facing order number.
///
/// Format: `BTN-YYYYMMDD-XXXXXX` where the suffix is a random fragment.
/// Uniqueness is enforced by the database; a collision within one day is
/// vanishingly unlikely but would surface as a `UniqueViolation`.
fn generate_order_number() -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix = Uuid::new_v4().simple().to_string();
    format!("BTN-{}-{}", date, &suffix[..6].to_uppercase())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_freezes_pricing_snapshot() {
        let db = test_db().await;
        let config = PricingConfig::default();

        // 150 buttons: tier 1 price, $683.00 with shipping.
        let order = db
            .orders()
            .create(150, "crafts@example.com", None, &config)
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.unit_price_cents, 450);
        assert_eq!(order.subtotal_cents, 67_500);
        assert_eq!(order.shipping_cents, 800);
        assert_eq!(order.total_cents, 68_300);

        let fetched = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(fetched.total_cents, 68_300);
        assert_eq!(fetched.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_get_by_order_number() {
        let db = test_db().await;
        let config = PricingConfig::default();

        let order = db
            .orders()
            .create(50, "a@example.com", Some("rush please"), &config)
            .await
            .unwrap();
        assert!(order.order_number.starts_with("BTN-"));

        let fetched = db
            .orders()
            .get_by_order_number(&order.order_number)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.id, order.id);
        assert_eq!(fetched.notes.as_deref(), Some("rush please"));
    }

    #[tokio::test]
    async fn test_mark_paid_transitions_pending_only() {
        let db = test_db().await;
        let config = PricingConfig::default();

        let order = db
            .orders()
            .create(100, "a@example.com", None, &config)
            .await
            .unwrap();

        db.orders().mark_paid(&order.id).await.unwrap();
        let paid = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(paid.status, OrderStatus::Paid);
        assert!(paid.paid_at.is_some());

        // Second confirmation is a no-op failure, not a double transition.
        let err = db.orders().mark_paid(&order.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_status_and_list_recent() {
        let db = test_db().await;
        let config = PricingConfig::default();

        let first = db
            .orders()
            .create(10, "a@example.com", None, &config)
            .await
            .unwrap();
        db.orders()
            .create(20, "b@example.com", None, &config)
            .await
            .unwrap();

        db.orders()
            .update_status(&first.id, OrderStatus::Cancelled)
            .await
            .unwrap();

        let recent = db.orders().list_recent(10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(db.orders().count().await.unwrap(), 2);

        let err = db
            .orders()
            .update_status("missing", OrderStatus::Shipped)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}

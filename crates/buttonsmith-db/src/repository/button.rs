//! # Button Repository
//!
//! Database operations for the button catalog.
//!
//! ## Key Operations
//! - Flat snapshot fetches for the aggregation layer
//! - `list_by_category_ids` paired with `catalog::descendant_ids` to answer
//!   "all buttons under this category, subcategories included"
//! - CRUD with soft deletes
//!
//! ## Category Page Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              "Band Buttons" page, subcategories included                │
//! │                                                                         │
//! │  categories = db.categories().list_active()                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ids = catalog::descendant_ids("band-buttons-id", &categories)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  buttons = db.buttons().list_by_category_ids(&ids)  ← THIS REPO        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use buttonsmith_core::Button;

/// Repository for button database operations.
#[derive(Debug, Clone)]
pub struct ButtonRepository {
    pool: SqlitePool,
}

const BUTTON_COLUMNS: &str =
    "id, category_id, sku, name, description, image_url, is_active, created_at, updated_at";

impl ButtonRepository {
    /// Creates a new ButtonRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ButtonRepository { pool }
    }

    /// Lists every button, including soft-deleted ones (admin view).
    pub async fn list_all(&self) -> DbResult<Vec<Button>> {
        let buttons = sqlx::query_as::<_, Button>(&format!(
            "SELECT {BUTTON_COLUMNS} FROM buttons ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(buttons)
    }

    /// Lists active buttons - the storefront snapshot the aggregator counts.
    pub async fn list_active(&self) -> DbResult<Vec<Button>> {
        let buttons = sqlx::query_as::<_, Button>(&format!(
            "SELECT {BUTTON_COLUMNS} FROM buttons WHERE is_active = 1 ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(buttons)
    }

    /// Lists active buttons assigned to any of the given category ids.
    ///
    /// The id set usually comes from `catalog::descendant_ids`, so a category
    /// page shows buttons from the whole subtree. An empty set short-circuits
    /// to an empty result without touching the database.
    pub async fn list_by_category_ids(&self, category_ids: &HashSet<String>) -> DbResult<Vec<Button>> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        debug!(count = category_ids.len(), "Listing buttons by category ids");

        // SQLite has no array binds; expand one placeholder per id.
        let placeholders = std::iter::repeat("?")
            .take(category_ids.len())
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {BUTTON_COLUMNS} FROM buttons \
             WHERE is_active = 1 AND category_id IN ({placeholders}) \
             ORDER BY name"
        );

        let mut query = sqlx::query_as::<_, Button>(&sql);
        for id in category_ids {
            query = query.bind(id);
        }

        let buttons = query.fetch_all(&self.pool).await?;
        Ok(buttons)
    }

    /// Gets a button by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Button>> {
        let button = sqlx::query_as::<_, Button>(&format!(
            "SELECT {BUTTON_COLUMNS} FROM buttons WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(button)
    }

    /// Gets a button by its SKU.
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<Button>> {
        let button = sqlx::query_as::<_, Button>(&format!(
            "SELECT {BUTTON_COLUMNS} FROM buttons WHERE sku = ?1"
        ))
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;

        Ok(button)
    }

    /// Inserts a new button.
    ///
    /// ## Returns
    /// * `Ok(Button)` - Inserted button
    /// * `Err(DbError::UniqueViolation)` - SKU already exists
    pub async fn insert(&self, button: &Button) -> DbResult<Button> {
        debug!(sku = %button.sku, "Inserting button");

        sqlx::query(
            r#"
            INSERT INTO buttons (
                id, category_id, sku, name, description, image_url,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&button.id)
        .bind(&button.category_id)
        .bind(&button.sku)
        .bind(&button.name)
        .bind(&button.description)
        .bind(&button.image_url)
        .bind(button.is_active)
        .bind(button.created_at)
        .bind(button.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(button.clone())
    }

    /// Updates an existing button.
    pub async fn update(&self, button: &Button) -> DbResult<()> {
        debug!(id = %button.id, "Updating button");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE buttons SET
                category_id = ?2,
                sku = ?3,
                name = ?4,
                description = ?5,
                image_url = ?6,
                is_active = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&button.id)
        .bind(&button.category_id)
        .bind(&button.sku)
        .bind(&button.name)
        .bind(&button.description)
        .bind(&button.image_url)
        .bind(button.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Button", &button.id));
        }

        Ok(())
    }

    /// Soft-deletes a button by setting is_active = false.
    ///
    /// ## Why Soft Delete?
    /// - Historical orders may reference this design
    /// - Can be restored if deleted by mistake
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting button");

        let now = Utc::now();

        let result = sqlx::query("UPDATE buttons SET is_active = 0, updated_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(now)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Button", id));
        }

        Ok(())
    }

    /// Counts active buttons (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM buttons WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to build a new button with a generated id and timestamps.
pub fn new_button(sku: &str, name: &str, category_id: Option<&str>) -> Button {
    let now = Utc::now();
    Button {
        id: Uuid::new_v4().to_string(),
        category_id: category_id.map(str::to_string),
        sku: sku.to_string(),
        name: name.to_string(),
        description: None,
        image_url: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::category::new_category;
    use buttonsmith_core::catalog;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let db = test_db().await;
        let repo = db.buttons();

        let button = new_button("BTN-001", "Anarchy Pin", None);
        repo.insert(&button).await.unwrap();

        let fetched = repo.get_by_id(&button.id).await.unwrap().unwrap();
        assert_eq!(fetched.sku, "BTN-001");
        assert!(fetched.category_id.is_none());

        let by_sku = repo.get_by_sku("BTN-001").await.unwrap().unwrap();
        assert_eq!(by_sku.id, button.id);
    }

    #[tokio::test]
    async fn test_duplicate_sku_maps_to_unique_violation() {
        let db = test_db().await;
        let repo = db.buttons();

        repo.insert(&new_button("BTN-001", "First", None))
            .await
            .unwrap();
        let err = repo
            .insert(&new_button("BTN-001", "Second", None))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_by_category_ids_covers_subtree() {
        let db = test_db().await;

        let root = new_category("Bands", "bands", None);
        db.categories().insert(&root).await.unwrap();
        let child = new_category("Punk", "punk", Some(&root.id));
        db.categories().insert(&child).await.unwrap();

        db.buttons()
            .insert(&new_button("BTN-R", "Root Pin", Some(&root.id)))
            .await
            .unwrap();
        db.buttons()
            .insert(&new_button("BTN-C", "Child Pin", Some(&child.id)))
            .await
            .unwrap();
        db.buttons()
            .insert(&new_button("BTN-X", "Unrelated", None))
            .await
            .unwrap();

        let categories = db.categories().list_active().await.unwrap();
        let ids = catalog::descendant_ids(&root.id, &categories);

        let buttons = db.buttons().list_by_category_ids(&ids).await.unwrap();
        assert_eq!(buttons.len(), 2);

        let empty = db
            .buttons()
            .list_by_category_ids(&Default::default())
            .await
            .unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_counts_feed_the_aggregator() {
        let db = test_db().await;

        let root = new_category("Bands", "bands", None);
        db.categories().insert(&root).await.unwrap();
        let child = new_category("Punk", "punk", Some(&root.id));
        db.categories().insert(&child).await.unwrap();

        db.buttons()
            .insert(&new_button("BTN-1", "A", Some(&root.id)))
            .await
            .unwrap();
        db.buttons()
            .insert(&new_button("BTN-2", "B", Some(&child.id)))
            .await
            .unwrap();
        // Uncategorized: contributes to nothing.
        db.buttons()
            .insert(&new_button("BTN-3", "C", None))
            .await
            .unwrap();

        let categories = db.categories().list_active().await.unwrap();
        let buttons = db.buttons().list_active().await.unwrap();
        let counts = catalog::count_buttons_by_category(&categories, &buttons);

        assert_eq!(counts[&root.id].direct, 1);
        assert_eq!(counts[&root.id].total, 2);
        assert_eq!(counts[&child.id].direct, 1);
        assert_eq!(counts[&child.id].total, 1);
    }

    #[tokio::test]
    async fn test_soft_delete() {
        let db = test_db().await;
        let repo = db.buttons();

        let button = new_button("BTN-001", "Temp", None);
        repo.insert(&button).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        repo.soft_delete(&button.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }
}

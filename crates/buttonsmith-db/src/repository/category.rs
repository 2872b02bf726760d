//! # Category Repository
//!
//! Database operations for the category tree.
//!
//! ## Snapshot Contract
//! The aggregation layer (`buttonsmith_core::catalog`) consumes the FULL set
//! of relevant categories in one flat list - there is no pagination here.
//! `list_all`/`list_active` are the snapshot fetchers; tree structure is
//! resolved in memory by the core, never via recursive SQL.
//!
//! ## Soft Deletes
//! Categories are never hard-deleted: historical buttons may reference them
//! and the aggregator tolerates the resulting dangling ids by design.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use buttonsmith_core::Category;

/// Repository for category database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CategoryRepository::new(pool);
///
/// // Snapshot for the aggregator
/// let categories = repo.list_active().await?;
///
/// // Get by slug for a storefront page
/// let category = repo.get_by_slug("band-buttons").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

const CATEGORY_COLUMNS: &str = "id, parent_id, name, slug, is_active, created_at, updated_at";

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists every category, including soft-deleted ones.
    ///
    /// Used by the admin dashboard and by count queries that must cover the
    /// whole tree.
    pub async fn list_all(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Lists active categories - the storefront snapshot.
    pub async fn list_active(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE is_active = 1 ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Category))` - Category found
    /// * `Ok(None)` - Category not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Gets a category by its URL slug.
    pub async fn get_by_slug(&self, slug: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE slug = ?1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Inserts a new category.
    ///
    /// ## Returns
    /// * `Ok(Category)` - Inserted category
    /// * `Err(DbError::UniqueViolation)` - Slug already exists
    pub async fn insert(&self, category: &Category) -> DbResult<Category> {
        debug!(slug = %category.slug, "Inserting category");

        sqlx::query(
            r#"
            INSERT INTO categories (
                id, parent_id, name, slug, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&category.id)
        .bind(&category.parent_id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.is_active)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(category.clone())
    }

    /// Updates an existing category.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Category doesn't exist
    pub async fn update(&self, category: &Category) -> DbResult<()> {
        debug!(id = %category.id, "Updating category");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE categories SET
                parent_id = ?2,
                name = ?3,
                slug = ?4,
                is_active = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&category.id)
        .bind(&category.parent_id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", &category.id));
        }

        Ok(())
    }

    /// Soft-deletes a category by setting is_active = false.
    ///
    /// Children keep their `parent_id`; once the parent drops out of the
    /// active snapshot, the aggregator promotes them to roots.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting category");

        let now = Utc::now();

        let result =
            sqlx::query("UPDATE categories SET is_active = 0, updated_at = ?2 WHERE id = ?1")
                .bind(id)
                .bind(now)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }

    /// Counts active categories (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to build a new category with a generated id and timestamps.
///
/// ## Usage
/// ```rust,ignore
/// let category = new_category("Band Buttons", "band-buttons", None);
/// db.categories().insert(&category).await?;
/// ```
pub fn new_category(name: &str, slug: &str, parent_id: Option<&str>) -> Category {
    let now = Utc::now();
    Category {
        id: Uuid::new_v4().to_string(),
        parent_id: parent_id.map(str::to_string),
        name: name.to_string(),
        slug: slug.to_string(),
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

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let db = test_db().await;
        let repo = db.categories();

        let root = new_category("Band Buttons", "band-buttons", None);
        repo.insert(&root).await.unwrap();

        let fetched = repo.get_by_id(&root.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Band Buttons");
        assert!(fetched.parent_id.is_none());

        let by_slug = repo.get_by_slug("band-buttons").await.unwrap().unwrap();
        assert_eq!(by_slug.id, root.id);
    }

    #[tokio::test]
    async fn test_duplicate_slug_maps_to_unique_violation() {
        let db = test_db().await;
        let repo = db.categories();

        repo.insert(&new_category("A", "same-slug", None))
            .await
            .unwrap();
        let err = repo
            .insert(&new_category("B", "same-slug", None))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_tree_snapshot_round_trip() {
        let db = test_db().await;
        let repo = db.categories();

        let root = new_category("Bands", "bands", None);
        repo.insert(&root).await.unwrap();
        let child = new_category("Punk", "punk", Some(&root.id));
        repo.insert(&child).await.unwrap();

        let snapshot = repo.list_active().await.unwrap();
        assert_eq!(snapshot.len(), 2);

        let ids = buttonsmith_core::catalog::descendant_ids(&root.id, &snapshot);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&child.id));
    }

    #[tokio::test]
    async fn test_soft_delete_excludes_from_active_list() {
        let db = test_db().await;
        let repo = db.categories();

        let category = new_category("Temp", "temp", None);
        repo.insert(&category).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        repo.soft_delete(&category.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.list_active().await.unwrap().is_empty());
        // Still present in the full list.
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_category() {
        let db = test_db().await;
        let repo = db.categories();

        let ghost = new_category("Ghost", "ghost", None);
        let err = repo.update(&ghost).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}

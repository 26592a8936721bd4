//! Repository for the `categories` table.

use quill_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CategoryStats};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides create and read operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a category unless the name is already taken.
    ///
    /// Returns `None` when a category with the same name exists, ignoring
    /// case; the unique index on `lower(name)` makes the check and the
    /// insert a single statement.
    pub async fn create_if_absent(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name)
             VALUES ($1)
             ON CONFLICT ((lower(name))) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by name, ignoring case.
    pub async fn find_by_name_ci(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE lower(name) = lower($1)
             ORDER BY id ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all categories with total and published post counts.
    pub async fn list_with_counts(pool: &PgPool) -> Result<Vec<CategoryStats>, sqlx::Error> {
        sqlx::query_as::<_, CategoryStats>(
            "SELECT c.id, c.name,
                    COUNT(p.id) AS num_posts,
                    COUNT(p.id) FILTER (WHERE p.status = 'published') AS num_published_posts
             FROM categories c
             LEFT JOIN post_categories pc ON pc.category_id = c.id
             LEFT JOIN posts p ON p.id = pc.post_id
             GROUP BY c.id, c.name
             ORDER BY c.name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Return the subset of `ids` that exist, sorted ascending.
    pub async fn existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM categories WHERE id = ANY($1) ORDER BY id ASC",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }
}

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;

/// Data-access contract for categories.
///
/// The service layer depends only on this trait; the Postgres implementation
/// below is wired in at the composition root.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All rows, soft-deleted included, in creation order
    async fn find_all(&self) -> Result<Vec<Category>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>>;

    /// Exact, case-sensitive name match
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>>;

    /// Insert-or-update by id
    async fn save(&self, category: &Category) -> Result<Category>;

    async fn delete(&self, category: &Category) -> Result<()>;
}

const CATEGORY_COLUMNS: &str =
    "id, name, description, created_at, updated_at, deleted_at, is_deleted, is_active";

/// Postgres-backed repository over the `categories` table
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category by id: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(category)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category by name: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(category)
    }

    async fn save(&self, category: &Category) -> Result<Category> {
        let saved = sqlx::query_as::<_, Category>(&format!(
            r#"
            INSERT INTO categories (id, name, description, created_at, updated_at, deleted_at, is_deleted, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                updated_at = EXCLUDED.updated_at,
                deleted_at = EXCLUDED.deleted_at,
                is_deleted = EXCLUDED.is_deleted,
                is_active = EXCLUDED.is_active
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.created_at)
        .bind(category.updated_at)
        .bind(category.deleted_at)
        .bind(category.is_deleted)
        .bind(category.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The unique index on name is the authoritative duplicate guard;
            // the service-level lookup is only an early exit.
            if is_unique_violation(&e) {
                return AppError::Conflict(
                    "Category with the same name already exists".to_string(),
                );
            }
            tracing::error!("Failed to save category: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(saved)
    }

    async fn delete(&self, category: &Category) -> Result<()> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(())
    }
}

/// Postgres SQLSTATE 23505 (unique_violation)
fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505")
}

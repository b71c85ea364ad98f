use sqlx::{SqliteConnection, SqlitePool};

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryDetailDto, CategoryTreeDto, CreateCategoryDto};
use crate::features::categories::models::{Category, SubcategoryUsage};
use crate::shared::types::ConflictDetails;

/// Service for category operations
pub struct CategoryService {
    pool: SqlitePool,
}

impl CategoryService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List top-level categories with their direct subcategories
    pub async fn list_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, parent_id
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(CategoryTreeDto::build_tree(&categories))
    }

    /// Get a single category with its direct subcategories
    pub async fn get(&self, id: i64) -> Result<CategoryDetailDto> {
        let mut conn = self.pool.acquire().await?;

        let category = find_category(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;
        let subcategories = find_subcategories(&mut conn, id).await?;

        Ok(CategoryDetailDto::new(category, &subcategories))
    }

    /// Create a category, optionally under an existing parent.
    ///
    /// `dto` must already have passed `validate_dto`.
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryDetailDto> {
        let name = dto.name.unwrap_or_default();

        let mut tx = self.pool.begin().await?;

        if let Some(parent_id) = dto.parent_id {
            if find_category(&mut tx, parent_id).await?.is_none() {
                return Err(AppError::InvalidReference(
                    "Parent category not found".to_string(),
                ));
            }
        }

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, parent_id)
            VALUES (?, ?)
            RETURNING id, name, parent_id
            "#,
        )
        .bind(&name)
        .bind(dto.parent_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {:?}", e);
            AppError::Database(e)
        })?;

        tx.commit().await?;

        tracing::info!(
            "Category created: id={}, parent_id={:?}",
            category.id,
            category.parent_id
        );

        Ok(CategoryDetailDto::new(category, &[]))
    }

    /// Delete a category that owns neither menu items nor subcategories
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        if find_category(&mut tx, id).await?.is_none() {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        let items_count = count_items(&mut tx, id).await?;
        if items_count > 0 {
            tracing::warn!(
                "Refused to delete category {}: {} menu items",
                id,
                items_count
            );
            return Err(AppError::conflict(
                "Cannot delete category with menu items",
                ConflictDetails {
                    items_count: Some(items_count),
                    ..Default::default()
                },
            ));
        }

        let subcategories_count = find_subcategories(&mut tx, id).await?.len() as i64;
        if subcategories_count > 0 {
            tracing::warn!(
                "Refused to delete category {}: {} subcategories",
                id,
                subcategories_count
            );
            return Err(AppError::conflict(
                "Cannot delete category with subcategories",
                ConflictDetails {
                    subcategories_count: Some(subcategories_count),
                    ..Default::default()
                },
            ));
        }

        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category: {:?}", e);
                AppError::Database(e)
            })?;

        tx.commit().await?;

        tracing::info!("Category deleted: id={}", id);
        Ok(())
    }

    /// Delete a category together with its direct subcategories.
    ///
    /// Refused when a subcategory still owns menu items or subcategories of
    /// its own. Every subcategory is checked before anything is removed, so a
    /// refusal leaves the tree untouched. Menu items attached to the category
    /// itself lose their category reference. Returns the number of
    /// subcategories removed.
    pub async fn force_delete(&self, id: i64) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        if find_category(&mut tx, id).await?.is_none() {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        let subcategories = subcategory_usage(&mut tx, id).await?;

        if let Some(blocking) = subcategories.iter().find(|s| s.items_count > 0) {
            tracing::warn!(
                "Refused to force delete category {}: subcategory {} has {} menu items",
                id,
                blocking.id,
                blocking.items_count
            );
            return Err(AppError::conflict(
                format!(
                    "Cannot delete subcategory \"{}\" with menu items",
                    blocking.name
                ),
                ConflictDetails {
                    subcategory_name: Some(blocking.name.clone()),
                    items_count: Some(blocking.items_count),
                    ..Default::default()
                },
            ));
        }

        // Only one level below the category is removed
        if let Some(blocking) = subcategories.iter().find(|s| s.subcategories_count > 0) {
            tracing::warn!(
                "Refused to force delete category {}: subcategory {} has {} subcategories",
                id,
                blocking.id,
                blocking.subcategories_count
            );
            return Err(AppError::conflict(
                format!(
                    "Cannot delete subcategory \"{}\" with subcategories",
                    blocking.name
                ),
                ConflictDetails {
                    subcategory_name: Some(blocking.name.clone()),
                    subcategories_count: Some(blocking.subcategories_count),
                    ..Default::default()
                },
            ));
        }

        sqlx::query("DELETE FROM categories WHERE parent_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete subcategories: {:?}", e);
                AppError::Database(e)
            })?;

        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category: {:?}", e);
                AppError::Database(e)
            })?;

        tx.commit().await?;

        tracing::info!(
            "Category force deleted: id={}, subcategories_removed={}",
            id,
            subcategories.len()
        );
        Ok(subcategories.len())
    }
}

async fn find_category(conn: &mut SqliteConnection, id: i64) -> Result<Option<Category>> {
    sqlx::query_as::<_, Category>("SELECT id, name, parent_id FROM categories WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category: {:?}", e);
            AppError::Database(e)
        })
}

async fn find_subcategories(conn: &mut SqliteConnection, parent_id: i64) -> Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name, parent_id
        FROM categories
        WHERE parent_id = ?
        ORDER BY id
        "#,
    )
    .bind(parent_id)
    .fetch_all(conn)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list subcategories: {:?}", e);
        AppError::Database(e)
    })
}

async fn count_items(conn: &mut SqliteConnection, category_id: i64) -> Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menu_items WHERE category_id = ?")
        .bind(category_id)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count menu items: {:?}", e);
            AppError::Database(e)
        })
}

async fn subcategory_usage(
    conn: &mut SqliteConnection,
    parent_id: i64,
) -> Result<Vec<SubcategoryUsage>> {
    sqlx::query_as::<_, SubcategoryUsage>(
        r#"
        SELECT c.id, c.name,
               (SELECT COUNT(*) FROM menu_items m WHERE m.category_id = c.id) AS items_count,
               (SELECT COUNT(*) FROM categories g WHERE g.parent_id = c.id) AS subcategories_count
        FROM categories c
        WHERE c.parent_id = ?
        ORDER BY c.id
        "#,
    )
    .bind(parent_id)
    .fetch_all(conn)
    .await
    .map_err(|e| {
        tracing::error!("Failed to inspect subcategories: {:?}", e);
        AppError::Database(e)
    })
}

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use crate::core::error::{AppError, Result};
use crate::features::menu_items::dtos::{MenuItemInput, MenuItemResponseDto};
use crate::features::menu_items::models::MenuItemWithCategory;

const SELECT_WITH_CATEGORY: &str = r#"
    SELECT m.id, m.name, m.description, m.price, m.image_url, m.category_id,
           c.name AS category_name, p.name AS parent_category_name,
           m.created_at, m.updated_at
    FROM menu_items m
    LEFT JOIN categories c ON c.id = m.category_id
    LEFT JOIN categories p ON p.id = c.parent_id
"#;

/// Service for menu item operations
pub struct MenuItemService {
    pool: SqlitePool,
}

impl MenuItemService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all menu items ordered by id
    pub async fn list(&self) -> Result<Vec<MenuItemResponseDto>> {
        let items = sqlx::query_as::<_, MenuItemWithCategory>(&format!(
            "{} ORDER BY m.id",
            SELECT_WITH_CATEGORY
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list menu items: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(items.into_iter().map(|m| m.into()).collect())
    }

    /// Create a menu item in an existing category
    pub async fn create(&self, input: MenuItemInput) -> Result<MenuItemResponseDto> {
        let mut tx = self.pool.begin().await?;

        ensure_category(&mut tx, input.category_id).await?;

        let now = Utc::now();
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO menu_items (name, description, price, image_url, category_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.image_url)
        .bind(input.category_id)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create menu item: {:?}", e);
            AppError::Database(e)
        })?;

        let item = find_item(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Menu item {} vanished after insert", id)))?;

        tx.commit().await?;

        tracing::info!(
            "Menu item created: id={}, category_id={}",
            id,
            input.category_id
        );

        Ok(item.into())
    }

    /// Replace every field of an existing menu item
    pub async fn update(&self, id: i64, input: MenuItemInput) -> Result<MenuItemResponseDto> {
        let mut tx = self.pool.begin().await?;

        if find_item(&mut tx, id).await?.is_none() {
            return Err(AppError::NotFound("Item not found".to_string()));
        }
        ensure_category(&mut tx, input.category_id).await?;

        sqlx::query(
            r#"
            UPDATE menu_items
            SET name = ?, description = ?, price = ?, image_url = ?, category_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.image_url)
        .bind(input.category_id)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update menu item: {:?}", e);
            AppError::Database(e)
        })?;

        let item = find_item(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

        tx.commit().await?;

        tracing::info!("Menu item updated: id={}", id);
        Ok(item.into())
    }

    /// Delete a menu item
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete menu item: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Item not found".to_string()));
        }

        tracing::info!("Menu item deleted: id={}", id);
        Ok(())
    }
}

async fn find_item(conn: &mut SqliteConnection, id: i64) -> Result<Option<MenuItemWithCategory>> {
    sqlx::query_as::<_, MenuItemWithCategory>(&format!("{} WHERE m.id = ?", SELECT_WITH_CATEGORY))
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get menu item: {:?}", e);
            AppError::Database(e)
        })
}

async fn ensure_category(conn: &mut SqliteConnection, category_id: i64) -> Result<()> {
    let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories WHERE id = ?")
        .bind(category_id)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up category: {:?}", e);
            AppError::Database(e)
        })?;

    if exists == 0 {
        return Err(AppError::InvalidReference("Invalid category_id".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{seed_category, seed_item, test_pool};
    use fake::faker::lorem::en::Word;
    use fake::Fake;
    use std::time::Duration;

    fn input(name: &str, category_id: i64, price: f64) -> MenuItemInput {
        MenuItemInput {
            name: name.to_string(),
            category_id,
            price,
            description: String::new(),
            image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_then_update_refreshes_updated_at() {
        let pool = test_pool().await;
        let mains = seed_category(&pool, "Mains", None).await;
        let sides = seed_category(&pool, "Sides", None).await;
        let service = MenuItemService::new(pool);

        let created = service.create(input("Burger", mains, 9.5)).await.unwrap();
        assert_eq!(created.name, "Burger");
        assert_eq!(created.price, 9.5);
        assert_eq!(created.created_at, created.updated_at);

        tokio::time::sleep(Duration::from_millis(5)).await;

        let mut replacement = input("Cheeseburger", sides, 10.0);
        replacement.description = "With cheddar".to_string();
        let updated = service.update(created.id, replacement).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Cheeseburger");
        assert_eq!(updated.category_id, Some(sides));
        assert_eq!(updated.category_name.as_deref(), Some("Sides"));
        assert_eq!(updated.description, "With cheddar");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_create_with_unknown_category() {
        let service = MenuItemService::new(test_pool().await);

        let result = service.create(input("Burger", 99, 1.0)).await;

        assert!(matches!(result, Err(AppError::InvalidReference(_))));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_errors() {
        let pool = test_pool().await;
        let mains = seed_category(&pool, "Mains", None).await;
        let item = seed_item(&pool, "Burger", Some(mains)).await;
        let service = MenuItemService::new(pool);

        assert!(matches!(
            service.update(item + 1, input("Burger", mains, 1.0)).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.update(item, input("Burger", mains + 10, 1.0)).await,
            Err(AppError::InvalidReference(_))
        ));

        let unchanged = service.list().await.unwrap();
        assert_eq!(unchanged[0].category_id, Some(mains));
    }

    #[tokio::test]
    async fn test_list_denormalizes_category_context() {
        let pool = test_pool().await;
        let drinks = seed_category(&pool, "Drinks", None).await;
        let soda = seed_category(&pool, "Soda", Some(drinks)).await;
        let water = seed_item(&pool, "Water", Some(drinks)).await;
        let cola = seed_item(&pool, "Cola", Some(soda)).await;
        let loose = seed_item(&pool, "Bread", None).await;
        let service = MenuItemService::new(pool);

        let items = service.list().await.unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![water, cola, loose]);

        let top_level = &items[0];
        assert_eq!(top_level.category_name.as_deref(), Some("Drinks"));
        assert_eq!(top_level.parent_category, None);
        assert_eq!(top_level.subcategory, None);

        let nested = &items[1];
        assert_eq!(nested.category_name.as_deref(), Some("Soda"));
        assert_eq!(nested.parent_category.as_deref(), Some("Drinks"));
        assert_eq!(nested.subcategory.as_deref(), Some("Soda"));

        let uncategorized = &items[2];
        assert_eq!(uncategorized.category_id, None);
        assert_eq!(uncategorized.category_name, None);
        assert_eq!(uncategorized.parent_category, None);
        assert_eq!(uncategorized.subcategory, None);
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        let mains = seed_category(&pool, "Mains", None).await;
        let name: String = Word().fake();
        let item = seed_item(&pool, &name, Some(mains)).await;
        let service = MenuItemService::new(pool);

        service.delete(item).await.unwrap();

        assert!(service.list().await.unwrap().is_empty());
        assert!(matches!(
            service.delete(item).await,
            Err(AppError::NotFound(_))
        ));
    }
}

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::menu_items::dtos::MenuItemResponseDto;

/// Menu item row joined with its category and the category's parent
#[derive(Debug, Clone, FromRow)]
pub struct MenuItemWithCategory {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub parent_category_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MenuItemWithCategory> for MenuItemResponseDto {
    fn from(m: MenuItemWithCategory) -> Self {
        // The subcategory is the item's own category, but only when it is nested
        let subcategory = m
            .parent_category_name
            .as_ref()
            .and(m.category_name.clone());

        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            price: m.price,
            image_url: m.image_url,
            category_id: m.category_id,
            category_name: m.category_name,
            parent_category: m.parent_category_name,
            subcategory,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for creating or replacing a menu item.
///
/// Updates are full replacements: every call must resupply `name` and
/// `category_id`, and omitted optional fields fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct MenuItemPayloadDto {
    #[validate(
        required(message = "name and category_id are required"),
        length(min = 1, message = "name and category_id are required")
    )]
    pub name: Option<String>,

    #[validate(required(message = "name and category_id are required"))]
    pub category_id: Option<i64>,

    /// Defaults to 0
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,

    /// Defaults to an empty string
    pub description: Option<String>,

    /// Defaults to an empty string
    pub image_url: Option<String>,
}

/// Menu item fields with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemInput {
    pub name: String,
    pub category_id: i64,
    pub price: f64,
    pub description: String,
    pub image_url: String,
}

/// Applies defaults to a payload that has already passed `validate_dto`
impl From<MenuItemPayloadDto> for MenuItemInput {
    fn from(dto: MenuItemPayloadDto) -> Self {
        Self {
            name: dto.name.unwrap_or_default(),
            category_id: dto.category_id.unwrap_or_default(),
            price: dto.price.unwrap_or(0.0),
            description: dto.description.unwrap_or_default(),
            image_url: dto.image_url.unwrap_or_default(),
        }
    }
}

/// Menu item with denormalized category context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuItemResponseDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub category_id: Option<i64>,
    /// Name of the owning category
    pub category_name: Option<String>,
    /// Name of the owning category's parent, when the category is nested
    pub parent_category: Option<String>,
    /// Same as `category_name`, but only when the category is nested
    pub subcategory: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

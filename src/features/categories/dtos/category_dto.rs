use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::Category;

/// Request DTO for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    /// Display name (required)
    #[validate(
        required(message = "Name required"),
        length(min = 1, message = "Name required")
    )]
    pub name: Option<String>,

    /// Parent category; omit or null for a top-level category
    pub parent_id: Option<i64>,
}

/// Short category shape used inside listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategorySummaryDto {
    pub id: i64,
    pub name: String,
}

impl From<&Category> for CategorySummaryDto {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
        }
    }
}

/// Top-level category with its direct subcategories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryTreeDto {
    pub id: i64,
    pub name: String,
    pub subcategories: Vec<CategorySummaryDto>,
}

impl CategoryTreeDto {
    /// Build the listing from a flat list ordered by id.
    ///
    /// Only roots and their direct children are returned; anything nested
    /// deeper is not part of the listing.
    pub fn build_tree(categories: &[Category]) -> Vec<CategoryTreeDto> {
        categories
            .iter()
            .filter(|c| c.parent_id.is_none())
            .map(|root| CategoryTreeDto {
                id: root.id,
                name: root.name.clone(),
                subcategories: children_of(root.id, categories),
            })
            .collect()
    }
}

/// Full category detail, returned on creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryDetailDto {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub subcategories: Vec<CategorySummaryDto>,
}

impl CategoryDetailDto {
    pub fn new(category: Category, subcategories: &[Category]) -> Self {
        Self {
            subcategories: children_of(category.id, subcategories),
            id: category.id,
            name: category.name,
            parent_id: category.parent_id,
        }
    }
}

fn children_of(parent_id: i64, categories: &[Category]) -> Vec<CategorySummaryDto> {
    categories
        .iter()
        .filter(|c| c.parent_id == Some(parent_id))
        .map(CategorySummaryDto::from)
        .collect()
}

use sqlx::FromRow;

/// Database model for category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

/// A direct subcategory together with what still hangs off it
#[derive(Debug, Clone, FromRow)]
pub struct SubcategoryUsage {
    pub id: i64,
    pub name: String,
    pub items_count: i64,
    /// Categories nested under this subcategory
    pub subcategories_count: i64,
}

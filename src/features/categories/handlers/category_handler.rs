use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::categories::dtos::{CategoryDetailDto, CategoryTreeDto, CreateCategoryDto};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ErrorResponse, MessageResponse};
use crate::shared::validation::validate_dto;

/// List top-level categories with their direct subcategories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Category tree", body = Vec<CategoryTreeDto>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<Vec<CategoryTreeDto>>> {
    let tree = service.list_tree().await?;
    Ok(Json(tree))
}

/// Get category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryDetailDto),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<CategoryDetailDto>> {
    let category = service.get(id).await?;
    Ok(Json(category))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = CategoryDetailDto),
        (status = 400, description = "Missing name or unknown parent", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "categories",
    security(
        ("admin_password" = [])
    )
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<CategoryDetailDto>)> {
    validate_dto(&dto)?;

    let category = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Delete a category without menu items or subcategories
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 400, description = "Category still has menu items or subcategories", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "categories",
    security(
        ("admin_password" = [])
    )
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>> {
    service.delete(id).await?;
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}

/// Delete a category together with its subcategories
///
/// Refused as a whole if any subcategory still has menu items or nested
/// subcategories.
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}/force",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category and subcategories deleted", body = MessageResponse),
        (status = 400, description = "A subcategory still has menu items or subcategories", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "categories",
    security(
        ("admin_password" = [])
    )
)]
pub async fn force_delete_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>> {
    service.force_delete(id).await?;
    Ok(Json(MessageResponse::new(
        "Category and subcategories deleted successfully",
    )))
}

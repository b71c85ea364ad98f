use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::menu_items::dtos::{MenuItemInput, MenuItemPayloadDto, MenuItemResponseDto};
use crate::features::menu_items::services::MenuItemService;
use crate::shared::types::{ErrorResponse, MessageResponse};
use crate::shared::validation::validate_dto;

/// Public menu listing
#[utoipa::path(
    get,
    path = "/api/menu",
    responses(
        (status = 200, description = "All menu items ordered by id", body = Vec<MenuItemResponseDto>),
    ),
    tag = "menu"
)]
pub async fn list_menu(
    State(service): State<Arc<MenuItemService>>,
) -> Result<Json<Vec<MenuItemResponseDto>>> {
    let items = service.list().await?;
    Ok(Json(items))
}

/// Menu listing for the admin panel
#[utoipa::path(
    get,
    path = "/api/admin/items",
    responses(
        (status = 200, description = "All menu items ordered by id", body = Vec<MenuItemResponseDto>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "menu",
    security(
        ("admin_password" = [])
    )
)]
pub async fn list_items_admin(
    State(service): State<Arc<MenuItemService>>,
) -> Result<Json<Vec<MenuItemResponseDto>>> {
    let items = service.list().await?;
    Ok(Json(items))
}

/// Create a menu item
#[utoipa::path(
    post,
    path = "/api/admin/items",
    request_body = MenuItemPayloadDto,
    responses(
        (status = 201, description = "Menu item created", body = MenuItemResponseDto),
        (status = 400, description = "Missing fields or invalid category_id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "menu",
    security(
        ("admin_password" = [])
    )
)]
pub async fn create_item(
    State(service): State<Arc<MenuItemService>>,
    AppJson(dto): AppJson<MenuItemPayloadDto>,
) -> Result<(StatusCode, Json<MenuItemResponseDto>)> {
    validate_dto(&dto)?;

    let item = service.create(MenuItemInput::from(dto)).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Replace a menu item
///
/// All fields must be supplied again; omitted optional fields are reset to
/// their defaults.
#[utoipa::path(
    put,
    path = "/api/admin/items/{id}",
    params(
        ("id" = i64, Path, description = "Menu item id")
    ),
    request_body = MenuItemPayloadDto,
    responses(
        (status = 200, description = "Menu item updated", body = MenuItemResponseDto),
        (status = 400, description = "Missing fields or invalid category_id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "menu",
    security(
        ("admin_password" = [])
    )
)]
pub async fn update_item(
    State(service): State<Arc<MenuItemService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<MenuItemPayloadDto>,
) -> Result<Json<MenuItemResponseDto>> {
    validate_dto(&dto)?;

    let item = service.update(id, MenuItemInput::from(dto)).await?;
    Ok(Json(item))
}

/// Delete a menu item
#[utoipa::path(
    delete,
    path = "/api/admin/items/{id}",
    params(
        ("id" = i64, Path, description = "Menu item id")
    ),
    responses(
        (status = 200, description = "Menu item deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "menu",
    security(
        ("admin_password" = [])
    )
)]
pub async fn delete_item(
    State(service): State<Arc<MenuItemService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>> {
    service.delete(id).await?;
    Ok(Json(MessageResponse::new("Item deleted successfully")))
}

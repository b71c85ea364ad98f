use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::menu_items::handlers;
use crate::features::menu_items::services::MenuItemService;

/// Public menu routes (no authentication required)
pub fn routes(service: Arc<MenuItemService>) -> Router {
    Router::new()
        .route("/api/menu", get(handlers::list_menu))
        .with_state(service)
}

/// Item management routes, nested under `/api/admin`
pub fn admin_routes(service: Arc<MenuItemService>) -> Router {
    Router::new()
        .route(
            "/items",
            get(handlers::list_items_admin).post(handlers::create_item),
        )
        .route(
            "/items/{id}",
            put(handlers::update_item).delete(handlers::delete_item),
        )
        .with_state(service)
}

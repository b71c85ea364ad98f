use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::core::app;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::menu_items::{dtos as menu_items_dtos, handlers as menu_items_handlers};
use crate::shared::types::{ConflictDetails, ErrorResponse, HealthResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        app::health_check,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::delete_category,
        categories_handlers::force_delete_category,
        // Menu items
        menu_items_handlers::list_menu,
        menu_items_handlers::list_items_admin,
        menu_items_handlers::create_item,
        menu_items_handlers::update_item,
        menu_items_handlers::delete_item,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            ConflictDetails,
            MessageResponse,
            HealthResponse,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::CategorySummaryDto,
            categories_dtos::CategoryTreeDto,
            categories_dtos::CategoryDetailDto,
            // Menu items
            menu_items_dtos::MenuItemPayloadDto,
            menu_items_dtos::MenuItemResponseDto,
        )
    ),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "categories", description = "Menu categories and subcategories"),
        (name = "menu", description = "Menu items"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Menu API",
        version = "0.1.0",
        description = "Restaurant menu management API",
    )
)]
pub struct ApiDoc;

/// Adds the admin shared-secret scheme (raw `Authorization` header)
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_password",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("Authorization"))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

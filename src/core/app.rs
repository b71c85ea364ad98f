use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use sqlx::SqlitePool;
use tower_http::services::{ServeDir, ServeFile};

use crate::core::middleware;
use crate::features::auth::AdminGate;
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::menu_items::{routes as menu_items_routes, MenuItemService};
use crate::shared::types::HealthResponse;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Build the API router: public routes, admin routes behind the shared-secret
/// gate, and the front-end bundle for every other path.
pub fn build_router(pool: SqlitePool, admin_password: &str, static_dir: &Path) -> Router {
    let category_service = Arc::new(CategoryService::new(pool.clone()));
    tracing::info!("Category service initialized");

    let menu_item_service = Arc::new(MenuItemService::new(pool));
    tracing::info!("Menu item service initialized");

    let gate = Arc::new(AdminGate::new(admin_password));

    let admin_routes = Router::new()
        .merge(categories_routes::admin_routes(Arc::clone(&category_service)))
        .merge(menu_items_routes::admin_routes(Arc::clone(&menu_item_service)))
        .route_layer(axum::middleware::from_fn_with_state(
            gate,
            middleware::admin_auth_middleware,
        ));

    let public_routes = Router::new()
        .merge(categories_routes::routes(category_service))
        .merge(menu_items_routes::routes(menu_item_service))
        .route("/health", get(health_check));

    // Unknown paths fall through to the SPA, which handles its own routing
    let frontend =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .merge(public_routes)
        .nest("/api/admin", admin_routes)
        .fallback_service(frontend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{seed_category, seed_item, test_pool, TEST_ADMIN_PASSWORD};
    use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
    use axum_test::{TestRequest, TestServer};
    use serde_json::{json, Value};

    async fn server_with_pool() -> (TestServer, SqlitePool) {
        let pool = test_pool().await;
        let app = build_router(
            pool.clone(),
            TEST_ADMIN_PASSWORD,
            Path::new("does-not-exist"),
        );
        (TestServer::new(app).unwrap(), pool)
    }

    async fn server() -> TestServer {
        server_with_pool().await.0
    }

    fn as_admin(request: TestRequest) -> TestRequest {
        request.add_header(
            AUTHORIZATION,
            HeaderValue::from_static(TEST_ADMIN_PASSWORD),
        )
    }

    #[tokio::test]
    async fn test_health() {
        let response = server().await.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_create_categories_and_list_tree() {
        let server = server().await;

        let drinks = as_admin(server.post("/api/admin/categories"))
            .json(&json!({ "name": "Drinks" }))
            .await;
        assert_eq!(drinks.status_code(), StatusCode::CREATED);
        assert_eq!(
            drinks.json::<Value>(),
            json!({ "id": 1, "name": "Drinks", "parent_id": null, "subcategories": [] })
        );

        let soda = as_admin(server.post("/api/admin/categories"))
            .json(&json!({ "name": "Soda", "parent_id": 1 }))
            .await;
        assert_eq!(soda.status_code(), StatusCode::CREATED);

        let tree = server.get("/api/categories").await;
        assert_eq!(tree.status_code(), StatusCode::OK);
        assert_eq!(
            tree.json::<Value>(),
            json!([{ "id": 1, "name": "Drinks", "subcategories": [{ "id": 2, "name": "Soda" }] }])
        );

        let detail = server.get("/api/categories/2").await;
        assert_eq!(detail.json::<Value>()["parent_id"], json!(1));
    }

    #[tokio::test]
    async fn test_create_category_with_body_credential() {
        let server = server().await;

        let response = server
            .post("/api/admin/categories")
            .json(&json!({ "name": "Drinks", "admin_password": TEST_ADMIN_PASSWORD }))
            .await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_create_category_validation() {
        let server = server().await;

        let missing = as_admin(server.post("/api/admin/categories"))
            .json(&json!({}))
            .await;
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.json::<Value>(), json!({ "error": "Name required" }));

        let orphan = as_admin(server.post("/api/admin/categories"))
            .json(&json!({ "name": "Soda", "parent_id": 9 }))
            .await;
        assert_eq!(orphan.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            orphan.json::<Value>(),
            json!({ "error": "Parent category not found" })
        );
    }

    #[tokio::test]
    async fn test_admin_routes_require_credential() {
        let (server, pool) = server_with_pool().await;
        let id = seed_category(&pool, "Mains", None).await;
        seed_item(&pool, "Burger", Some(id)).await;

        let anonymous = server.get("/api/admin/items").await;
        assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(anonymous.json::<Value>(), json!({ "error": "Unauthorized" }));

        let wrong = server
            .get("/api/admin/items")
            .add_header(AUTHORIZATION, HeaderValue::from_static("guess"))
            .await;
        assert_eq!(wrong.status_code(), StatusCode::UNAUTHORIZED);

        let create = server
            .post("/api/admin/items")
            .json(&json!({ "name": "Fries", "category_id": id }))
            .await;
        assert_eq!(create.status_code(), StatusCode::UNAUTHORIZED);

        let delete = server.delete(&format!("/api/admin/categories/{}", id)).await;
        assert_eq!(delete.status_code(), StatusCode::UNAUTHORIZED);

        let listed = as_admin(server.get("/api/admin/items")).await;
        assert_eq!(listed.status_code(), StatusCode::OK);
        assert_eq!(listed.json::<Vec<Value>>().len(), 1);
    }

    #[tokio::test]
    async fn test_item_lifecycle() {
        let (server, pool) = server_with_pool().await;
        let drinks = seed_category(&pool, "Drinks", None).await;
        let soda = seed_category(&pool, "Soda", Some(drinks)).await;

        let created = as_admin(server.post("/api/admin/items"))
            .json(&json!({ "name": "Cola", "category_id": soda, "price": 2.5 }))
            .await;
        assert_eq!(created.status_code(), StatusCode::CREATED);
        let item = created.json::<Value>();
        assert_eq!(item["price"], json!(2.5));
        assert_eq!(item["description"], json!(""));
        assert_eq!(item["category_name"], json!("Soda"));
        assert_eq!(item["parent_category"], json!("Drinks"));
        assert_eq!(item["subcategory"], json!("Soda"));
        assert_eq!(item["created_at"], item["updated_at"]);

        let id = item["id"].as_i64().unwrap();

        let updated = as_admin(server.put(&format!("/api/admin/items/{}", id)))
            .json(&json!({ "name": "Water", "category_id": drinks }))
            .await;
        assert_eq!(updated.status_code(), StatusCode::OK);
        let item = updated.json::<Value>();
        assert_eq!(item["name"], json!("Water"));
        assert_eq!(item["price"], json!(0.0));
        assert_eq!(item["parent_category"], Value::Null);
        assert_eq!(item["subcategory"], Value::Null);

        let menu = server.get("/api/menu").await;
        assert_eq!(menu.json::<Vec<Value>>().len(), 1);

        let deleted = as_admin(server.delete(&format!("/api/admin/items/{}", id))).await;
        assert_eq!(deleted.status_code(), StatusCode::OK);
        assert_eq!(
            deleted.json::<Value>(),
            json!({ "message": "Item deleted successfully" })
        );

        let again = as_admin(server.delete(&format!("/api/admin/items/{}", id))).await;
        assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(again.json::<Value>(), json!({ "error": "Item not found" }));
    }

    #[tokio::test]
    async fn test_item_validation_errors() {
        let (server, pool) = server_with_pool().await;
        let mains = seed_category(&pool, "Mains", None).await;

        let missing = as_admin(server.post("/api/admin/items"))
            .json(&json!({ "name": "Burger" }))
            .await;
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            missing.json::<Value>(),
            json!({ "error": "name and category_id are required" })
        );

        let unknown = as_admin(server.post("/api/admin/items"))
            .json(&json!({ "name": "Burger", "category_id": mains + 5 }))
            .await;
        assert_eq!(unknown.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(unknown.json::<Value>(), json!({ "error": "Invalid category_id" }));

        let not_found = as_admin(server.put("/api/admin/items/77"))
            .json(&json!({ "name": "Burger", "category_id": mains }))
            .await;
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let partial = as_admin(server.put("/api/admin/items/77"))
            .json(&json!({ "price": 3.0 }))
            .await;
        assert_eq!(partial.status_code(), StatusCode::BAD_REQUEST);

        assert!(server.get("/api/menu").await.json::<Vec<Value>>().is_empty());
    }

    #[tokio::test]
    async fn test_delete_category_conflicts() {
        let (server, pool) = server_with_pool().await;
        let drinks = seed_category(&pool, "Drinks", None).await;
        let soda = seed_category(&pool, "Soda", Some(drinks)).await;

        let blocked = as_admin(server.delete(&format!("/api/admin/categories/{}", drinks))).await;
        assert_eq!(blocked.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            blocked.json::<Value>(),
            json!({ "error": "Cannot delete category with subcategories", "subcategories_count": 1 })
        );

        seed_item(&pool, "Cola", Some(soda)).await;
        let blocked = as_admin(server.delete(&format!("/api/admin/categories/{}", soda))).await;
        assert_eq!(
            blocked.json::<Value>(),
            json!({ "error": "Cannot delete category with menu items", "items_count": 1 })
        );

        let forced =
            as_admin(server.delete(&format!("/api/admin/categories/{}/force", drinks))).await;
        assert_eq!(forced.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            forced.json::<Value>(),
            json!({
                "error": "Cannot delete subcategory \"Soda\" with menu items",
                "subcategory_name": "Soda",
                "items_count": 1
            })
        );

        let tree = server.get("/api/categories").await.json::<Value>();
        assert_eq!(tree[0]["subcategories"][0]["name"], json!("Soda"));
    }

    #[tokio::test]
    async fn test_force_delete_refuses_nested_tree() {
        let (server, pool) = server_with_pool().await;
        let drinks = seed_category(&pool, "Drinks", None).await;
        let soda = seed_category(&pool, "Soda", Some(drinks)).await;
        seed_category(&pool, "Cola", Some(soda)).await;

        let forced =
            as_admin(server.delete(&format!("/api/admin/categories/{}/force", drinks))).await;
        assert_eq!(forced.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            forced.json::<Value>(),
            json!({
                "error": "Cannot delete subcategory \"Soda\" with subcategories",
                "subcategory_name": "Soda",
                "subcategories_count": 1
            })
        );
    }

    #[tokio::test]
    async fn test_force_delete_category() {
        let (server, pool) = server_with_pool().await;
        let drinks = seed_category(&pool, "Drinks", None).await;
        seed_category(&pool, "Soda", Some(drinks)).await;

        let forced =
            as_admin(server.delete(&format!("/api/admin/categories/{}/force", drinks))).await;
        assert_eq!(forced.status_code(), StatusCode::OK);
        assert_eq!(
            forced.json::<Value>(),
            json!({ "message": "Category and subcategories deleted successfully" })
        );

        assert!(server.get("/api/categories").await.json::<Vec<Value>>().is_empty());

        let missing =
            as_admin(server.delete(&format!("/api/admin/categories/{}/force", drinks))).await;
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.json::<Value>(), json!({ "error": "Category not found" }));
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_json_not_found() {
        let server = server().await;

        let item = as_admin(server.delete("/api/admin/items/abc")).await;
        assert_eq!(item.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(item.json::<Value>(), json!({ "error": "Not found" }));

        let category = server.get("/api/categories/abc").await;
        assert_eq!(category.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(category.json::<Value>(), json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn test_frontend_bundle_is_served() {
        let dir = std::env::temp_dir().join(format!("menu-frontend-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<div id=\"app\"></div>").unwrap();
        std::fs::write(dir.join("asset.js"), "console.log(1);").unwrap();

        let pool = test_pool().await;
        let server =
            TestServer::new(build_router(pool.clone(), TEST_ADMIN_PASSWORD, &dir)).unwrap();
        seed_category(&pool, "Drinks", None).await;

        let asset = server.get("/asset.js").await;
        assert_eq!(asset.status_code(), StatusCode::OK);
        assert_eq!(asset.text(), "console.log(1);");

        let client_route = server.get("/some/client/route").await;
        assert_eq!(client_route.status_code(), StatusCode::OK);
        assert_eq!(client_route.text(), "<div id=\"app\"></div>");

        let api = server.get("/api/categories").await;
        assert_eq!(api.json::<Value>()[0]["name"], json!("Drinks"));

        let admin = server.get("/api/admin/items").await;
        assert_eq!(admin.status_code(), StatusCode::UNAUTHORIZED);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let server = server().await;

        let response = as_admin(server.post("/api/admin/items"))
            .bytes("{not json".into())
            .content_type("application/json")
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
}

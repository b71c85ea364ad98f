#[cfg(test)]
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
#[cfg(test)]
use sqlx::SqlitePool;
#[cfg(test)]
use std::str::FromStr;

/// Admin secret used by router tests
#[cfg(test)]
pub const TEST_ADMIN_PASSWORD: &str = "test-secret";

/// Fresh in-memory database with migrations applied.
///
/// A single connection that never expires: every connection to
/// `sqlite::memory:` gets its own database.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();

    crate::core::database::run_migrations(&pool).await.unwrap();
    pool
}

#[cfg(test)]
pub async fn seed_category(pool: &SqlitePool, name: &str, parent_id: Option<i64>) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO categories (name, parent_id) VALUES (?, ?) RETURNING id",
    )
    .bind(name)
    .bind(parent_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[cfg(test)]
pub async fn seed_item(pool: &SqlitePool, name: &str, category_id: Option<i64>) -> i64 {
    let now = chrono::Utc::now();
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO menu_items (name, description, price, image_url, category_id, created_at, updated_at)
        VALUES (?, '', 1.0, '', ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(category_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[cfg(test)]
pub async fn category_exists(pool: &SqlitePool, id: i64) -> bool {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
        > 0
}

#[cfg(test)]
pub async fn item_category(pool: &SqlitePool, item_id: i64) -> Option<i64> {
    sqlx::query_scalar::<_, Option<i64>>("SELECT category_id FROM menu_items WHERE id = ?")
        .bind(item_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

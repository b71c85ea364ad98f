//! Menu categories.
//!
//! Categories form a two-level tree: top-level categories and their direct
//! subcategories. Deletion is guarded so that no category disappears while
//! menu items or subcategories still point at it, unless a force delete is
//! requested.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/categories` | No | Top-level categories with subcategories |
//! | GET | `/api/categories/{id}` | No | Single category detail |
//! | POST | `/api/admin/categories` | Admin | Create category |
//! | DELETE | `/api/admin/categories/{id}` | Admin | Delete an unused category |
//! | DELETE | `/api/admin/categories/{id}/force` | Admin | Delete category and its subcategories |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;

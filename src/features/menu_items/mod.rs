//! Menu items.
//!
//! Every item belongs to at most one category. Listings denormalize the
//! category context (category name, parent category name, subcategory name)
//! so the front end can group items without a second request.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/menu` | No | All items ordered by id |
//! | GET | `/api/admin/items` | Admin | Same listing for the admin panel |
//! | POST | `/api/admin/items` | Admin | Create item |
//! | PUT | `/api/admin/items/{id}` | Admin | Replace all item fields |
//! | DELETE | `/api/admin/items/{id}` | Admin | Delete item |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::MenuItemService;

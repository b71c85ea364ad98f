pub mod auth;
pub mod categories;
pub mod menu_items;

pub mod menu_item_dto;

pub use menu_item_dto::*;

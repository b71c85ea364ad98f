pub mod menu_item_handler;

pub use menu_item_handler::{
    __path_create_item, __path_delete_item, __path_list_items_admin, __path_list_menu,
    __path_update_item, create_item, delete_item, list_items_admin, list_menu, update_item,
};

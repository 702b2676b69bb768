pub mod get_resources;
pub mod list_items;

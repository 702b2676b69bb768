pub mod compile_filter;
pub mod get_fields;
pub mod get_operators;
pub mod restore_filter;

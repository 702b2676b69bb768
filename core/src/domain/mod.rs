pub mod catalog;
pub mod common;
pub mod filter;
pub mod listing;

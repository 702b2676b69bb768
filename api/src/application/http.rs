pub mod filter;
pub mod health;
pub mod query_extractor;
pub mod query_params;
pub mod resource;
pub mod server;

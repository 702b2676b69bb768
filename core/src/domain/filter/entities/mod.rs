pub mod condition;
pub mod errors;
pub mod field;

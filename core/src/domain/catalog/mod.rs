pub mod entities;
pub mod fields;

pub use entities::*;
pub use fields::fields_for;

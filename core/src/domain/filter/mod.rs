pub mod codec;
pub mod compiler;
pub mod decompiler;
pub mod display;
pub mod entities;
pub mod helpers;
pub mod policies;
pub mod ports;
pub mod registry;
pub mod resolver;
pub mod services;
pub mod value_objects;

pub use codec::{SerializeOptions, deserialize, serialize};
pub use compiler::compile;
pub use decompiler::decompile;
pub use display::{describe, describe_chip, describe_relation};
pub use entities::{condition::*, field::*};
pub use policies::{disabled_operators, incompatible};
pub use value_objects::*;

// FILE: src/core/mod.rs

pub mod constants;
pub mod initial;
pub mod properties;
pub mod registry;
pub mod units;
pub mod values;

pub use properties::{KnownProp, PropKey, Shorthand};
pub use registry::{build_registry, Registry};
pub use units::Unit;
pub use values::*;

// FILE: src/validation/mod.rs

pub mod content;
pub mod declarations;
pub mod descriptors;
pub mod expanders;
pub mod fonts;
pub mod grid;
pub mod helpers;
pub mod images;
pub mod longhands;

pub use declarations::{preprocess_declarations, validate, validate_longhand, validate_non_shorthand};
pub use descriptors::{
    preprocess_descriptors, CounterStyleDescriptors, DescriptorSet, FontFaceDescriptors,
};
pub use expanders::{expand, expand_validate_pending, NamedProperty};
pub use longhands::{validate_known, validate_value};

//! Untyped values.
//!
//! [`Dynamic`] is what the deserializer produces when no target type is
//! known, and the intermediate form assigned into typed fields.
//! [`DynamicAttributes`] lets a record keep attributes it does not declare.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use attributes::DynamicAttributes;
pub use value::Dynamic;

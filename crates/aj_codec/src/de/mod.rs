//! JSON tree to object graph.

// -----------------------------------------------------------------------------
// Modules

mod driver;
mod validate;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use driver::DeserializeDriver;

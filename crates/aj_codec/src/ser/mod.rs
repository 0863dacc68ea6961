//! Object graph to JSON tree.

// -----------------------------------------------------------------------------
// Modules

mod driver;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use driver::SerializeDriver;

/// Emitted in place of values nested deeper than `max_depth`.
pub const DEPTH_SENTINEL: &str = "...";

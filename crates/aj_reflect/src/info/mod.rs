//! The declared-type graph.
//!
//! Every attribute report may carry a [`TypeHint`] describing the static
//! type of the field. The deserializer follows it to build nested records
//! and collections, and validation checks runtime values against it.

// -----------------------------------------------------------------------------
// Modules

mod type_hint;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use type_hint::{RecordHint, TypeHint};

pub(crate) use type_hint::RegisterFn;
pub use typed::Typed;

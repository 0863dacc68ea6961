//! Structural capabilities of reflected values.
//!
//! ## Menu
//!
//! - [`ReflectRef`]: the shape of a value, returned by [`Reflect::reflect_ref`].
//! - [`Sequence`]: lists, sets and tuples, see [`SequenceKind`].
//! - [`Map`]: key-value containers.
//! - [`Record`]: named-field types, usually derived.
//! - [`ApplyError`]: a [`Dynamic`] could not be converted into a typed value.
//!
//! [`Reflect::reflect_ref`]: crate::Reflect::reflect_ref
//! [`Dynamic`]: crate::dynamic::Dynamic

// -----------------------------------------------------------------------------
// Modules

mod apply_error;
mod kind;
mod map_ops;
mod record_ops;
mod sequence_ops;

// -----------------------------------------------------------------------------
// Exports

pub use apply_error::ApplyError;
pub use kind::ReflectRef;
pub use map_ops::{Map, MapIter};
pub use record_ops::{Record, RecordFieldIter, SetFieldError};
pub use sequence_ops::{Sequence, SequenceIter, SequenceKind};

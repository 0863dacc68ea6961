#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code refers to `::aj_reflect`, which must also resolve
// inside this crate for its own tests and doc tests.
extern crate self as aj_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod impls;
mod reflection;

pub mod dynamic;
pub mod info;
pub mod ops;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use reflection::{FromDynamic, Reflect};
pub use aj_reflect_derive as derive;

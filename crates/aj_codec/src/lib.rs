#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod codec;
mod config;
mod de;
mod error;
mod handler;
mod ser;

pub mod datetime;

// -----------------------------------------------------------------------------
// Exports

pub use codec::Codec;
pub use config::{CodecConfig, DateTimeEncoding};
pub use error::{AmbiguousAttributeNameError, DeserializeError};
pub use error::{EmptyRequiredAttributeError, TypeMismatchError, ValidationError};
pub use handler::SerializeHandler;
pub use ser::DEPTH_SENTINEL;

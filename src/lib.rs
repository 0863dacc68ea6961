#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use aj_codec as codec;
pub use aj_reflect as reflect;
pub use aj_utils as utils;

pub use aj_codec::{Codec, CodecConfig};

pub mod prelude {
    //! The items most programs need.

    pub use aj_codec::{Codec, CodecConfig, DateTimeEncoding, DeserializeError};
    pub use aj_reflect::derive::Record;
    pub use aj_reflect::dynamic::{Dynamic, DynamicAttributes};
    pub use aj_reflect::registry::{DuplicatePolicy, Groups, TypeMetadata};
}

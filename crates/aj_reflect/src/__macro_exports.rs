//! Items referred to by code generated from `#[derive(Record)]`.
//!
//! The user crate may be `no_std` or lack `extern crate alloc`, so generated
//! code reaches `alloc` through this module.

pub use alloc::boxed::Box;
pub use core::any::type_name;

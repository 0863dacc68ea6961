use alloc::sync::Arc;

use chrono::NaiveDateTime;

use crate::Reflect;
use crate::ops::{Map, Record, Sequence};

/// An immutable view of a reflected value.
///
/// Integers are widened to `i64` / `u64` and floats to `f64`. Timestamps
/// are reported as a naive UTC date-time.
///
/// [`Pointer`](ReflectRef::Pointer) and [`Shared`](ReflectRef::Shared)
/// are transparent wrappers: `Box<T>`, `Option<T>` (when `Some`), `Arc<T>`
/// and a live `Weak<T>`. Consumers look through them to the inner value.
pub enum ReflectRef<'a> {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(&'a str),
    DateTime(NaiveDateTime),
    Sequence(&'a dyn Sequence),
    Map(&'a dyn Map),
    Record(&'a dyn Record),
    Pointer(&'a dyn Reflect),
    /// An upgraded weak pointer.
    Shared(Arc<dyn Reflect>),
}

impl ReflectRef<'_> {
    /// Returns `true` for null and for pointers to null.
    ///
    /// ```rust
    /// # use aj_reflect::Reflect;
    /// let value: Option<Box<Option<u8>>> = Some(Box::new(None));
    /// assert!(value.reflect_ref().is_null());
    /// assert!(!Some(1_u8).reflect_ref().is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Pointer(inner) => inner.reflect_ref().is_null(),
            Self::Shared(inner) => inner.reflect_ref().is_null(),
            _ => false,
        }
    }

    /// A short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Char(_) | Self::Str(_) => "string",
            Self::DateTime(_) => "datetime",
            Self::Sequence(_) => "sequence",
            Self::Map(_) => "map",
            Self::Record(_) => "record",
            Self::Pointer(inner) => inner.reflect_ref().kind_name(),
            Self::Shared(inner) => inner.reflect_ref().kind_name(),
        }
    }
}

use alloc::boxed::Box;

use thiserror::Error;

use crate::Reflect;
use crate::dynamic::{Dynamic, DynamicAttributes};
use crate::ops::ApplyError;

pub type RecordFieldIter<'a> = Box<dyn Iterator<Item = (&'a str, &'a dyn Reflect)> + 'a>;

/// A type with named fields.
///
/// Prefer [`#[derive(Record)]`](crate::derive::Record) over a manual
/// implementation. The derive also implements [`Reflect`],
/// [`FromDynamic`](crate::FromDynamic), [`Typed`](crate::info::Typed)
/// and [`GetTypeMetadata`](crate::registry::GetTypeMetadata).
///
/// # Examples
///
/// ```rust
/// use aj_reflect::{derive::Record, dynamic::Dynamic, ops::Record as _};
///
/// #[derive(Record, Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let mut point = Point::default();
/// point.set_field("x", Dynamic::Int(4)).unwrap();
/// assert_eq!(point.x, 4);
///
/// let names: Vec<_> = point.iter_fields().map(|(name, _)| name).collect();
/// assert_eq!(names, ["x", "y"]);
/// assert!(point.set_field("z", Dynamic::Int(1)).is_err());
/// ```
pub trait Record: Reflect {
    /// Returns a declared field, falling back to dynamic attributes.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Number of declared fields.
    fn field_len(&self) -> usize;

    /// Declared fields in declaration order.
    ///
    /// Dynamic attributes are not included, see
    /// [`dynamic_attributes`](Record::dynamic_attributes).
    fn iter_fields(&self) -> RecordFieldIter<'_>;

    /// Converts `value` into the type of field `name` and assigns it.
    ///
    /// When there is no such field the value is handed back in
    /// [`SetFieldError::NoSuchField`].
    fn set_field(&mut self, name: &str, value: Dynamic) -> Result<(), SetFieldError>;

    /// Extra attributes carried by this record, if it keeps any.
    #[inline]
    fn dynamic_attributes(&self) -> Option<&DynamicAttributes> {
        None
    }

    #[inline]
    fn dynamic_attributes_mut(&mut self) -> Option<&mut DynamicAttributes> {
        None
    }
}

/// Failure of [`Record::set_field`].
#[derive(Debug, Error)]
pub enum SetFieldError {
    #[error("no such field")]
    NoSuchField(Dynamic),
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

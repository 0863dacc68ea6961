use crate::dynamic::Dynamic;
use crate::ops::ApplyError;

/// Builds a typed value out of a [`Dynamic`].
///
/// Used by [`Record::set_field`](crate::ops::Record::set_field) to assign
/// deserialized values, and by the codec to produce the final result.
///
/// ```rust
/// # use aj_reflect::{FromDynamic, dynamic::Dynamic};
/// let value = Dynamic::List(vec![Dynamic::Int(1), Dynamic::UInt(2)]);
/// assert_eq!(Vec::<u8>::from_dynamic(value).unwrap(), [1, 2]);
///
/// assert!(u8::from_dynamic(Dynamic::Int(-1)).is_err());
/// ```
pub trait FromDynamic: Sized {
    fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError>;
}

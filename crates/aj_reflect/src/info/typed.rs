use crate::info::TypeHint;

/// Types with a statically known [`TypeHint`].
///
/// ```rust
/// # use aj_reflect::info::{TypeHint, Typed};
/// assert_eq!(<Vec<Option<u8>>>::type_hint().to_string(), "List<Option<int>>");
/// assert_eq!(String::type_hint(), TypeHint::Str);
/// ```
pub trait Typed {
    fn type_hint() -> TypeHint;
}

use alloc::string::{String, ToString};
use core::any::type_name;

use crate::dynamic::Dynamic;
use crate::impls::impl_any_methods;
use crate::info::{TypeHint, Typed};
use crate::ops::{ApplyError, ReflectRef};
use crate::registry::DEFAULT_DATETIME_FORMAT;
use crate::{FromDynamic, Reflect};

fn out_of_range(value: impl ToString, target: &'static str) -> ApplyError {
    ApplyError::OutOfRange {
        value: value.to_string(),
        target,
    }
}

macro_rules! impl_integer {
    ($variant:ident as $wide:ty: $($ty:ty),*) => {
        $(
            impl Reflect for $ty {
                #[inline]
                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::$variant(*self as $wide)
                }

                impl_any_methods!();
            }

            impl FromDynamic for $ty {
                fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError> {
                    match value {
                        Dynamic::Int(v) => <$ty>::try_from(v).map_err(|_| out_of_range(v, type_name::<$ty>())),
                        Dynamic::UInt(v) => <$ty>::try_from(v).map_err(|_| out_of_range(v, type_name::<$ty>())),
                        other => Err(ApplyError::mismatched("integer", other.kind_name())),
                    }
                }
            }

            impl Typed for $ty {
                #[inline]
                fn type_hint() -> TypeHint {
                    TypeHint::Int
                }
            }
        )*
    };
}

impl_integer!(Int as i64: i8, i16, i32, i64, isize);
impl_integer!(UInt as u64: u8, u16, u32, u64, usize);

macro_rules! impl_float {
    ($($ty:ty),*) => {
        $(
            impl Reflect for $ty {
                #[inline]
                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Float(f64::from(*self))
                }

                impl_any_methods!();
            }

            impl FromDynamic for $ty {
                fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError> {
                    match value {
                        Dynamic::Float(v) => Ok(v as $ty),
                        Dynamic::Int(v) => Ok(v as $ty),
                        Dynamic::UInt(v) => Ok(v as $ty),
                        other => Err(ApplyError::mismatched("float", other.kind_name())),
                    }
                }
            }

            impl Typed for $ty {
                #[inline]
                fn type_hint() -> TypeHint {
                    TypeHint::Float
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl Reflect for bool {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Bool(*self)
    }

    impl_any_methods!();
}

impl FromDynamic for bool {
    fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError> {
        match value {
            Dynamic::Bool(v) => Ok(v),
            other => Err(ApplyError::mismatched("bool", other.kind_name())),
        }
    }
}

impl Typed for bool {
    #[inline]
    fn type_hint() -> TypeHint {
        TypeHint::Bool
    }
}

impl Reflect for char {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Char(*self)
    }

    impl_any_methods!();
}

impl FromDynamic for char {
    fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError> {
        match value {
            Dynamic::Str(text) => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(ApplyError::mismatched("a single character", "string")),
                }
            }
            other => Err(ApplyError::mismatched("string", other.kind_name())),
        }
    }
}

impl Typed for char {
    #[inline]
    fn type_hint() -> TypeHint {
        TypeHint::Str
    }
}

impl Reflect for String {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Str(self)
    }

    impl_any_methods!();
}

impl FromDynamic for String {
    fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError> {
        match value {
            Dynamic::Str(v) => Ok(v),
            // Untyped input may have been read as a timestamp.
            Dynamic::DateTime(v) => Ok(v.format(DEFAULT_DATETIME_FORMAT).to_string()),
            other => Err(ApplyError::mismatched("string", other.kind_name())),
        }
    }
}

impl Typed for String {
    #[inline]
    fn type_hint() -> TypeHint {
        TypeHint::Str
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::FromDynamic;
    use crate::dynamic::Dynamic;
    use crate::ops::ApplyError;

    #[test]
    fn integers_are_range_checked() {
        assert_eq!(i8::from_dynamic(Dynamic::Int(-8)), Ok(-8));
        assert_eq!(u64::from_dynamic(Dynamic::UInt(u64::MAX)), Ok(u64::MAX));
        assert!(matches!(
            u8::from_dynamic(Dynamic::Int(300)),
            Err(ApplyError::OutOfRange { target: "u8", .. })
        ));
        assert!(i32::from_dynamic(Dynamic::Float(1.0)).is_err());
    }

    #[test]
    fn floats_accept_integers() {
        assert_eq!(f64::from_dynamic(Dynamic::Int(2)), Ok(2.0));
        assert_eq!(f32::from_dynamic(Dynamic::Float(0.5)), Ok(0.5));
    }

    #[test]
    fn chars_need_one_character() {
        assert_eq!(char::from_dynamic(Dynamic::from("x")), Ok('x'));
        assert!(char::from_dynamic(Dynamic::from("xy")).is_err());
        assert_eq!(
            String::from_dynamic(Dynamic::from("xy")).as_deref(),
            Ok("xy")
        );
    }
}

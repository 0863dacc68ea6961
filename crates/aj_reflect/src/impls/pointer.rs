use alloc::boxed::Box;
use alloc::sync::{Arc, Weak};

use crate::dynamic::Dynamic;
use crate::impls::impl_any_methods;
use crate::info::{TypeHint, Typed};
use crate::ops::{ApplyError, ReflectRef};
use crate::{FromDynamic, Reflect};

// -----------------------------------------------------------------------------
// Option

impl<T: Reflect> Reflect for Option<T> {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        match self {
            Some(value) => ReflectRef::Pointer(value),
            None => ReflectRef::Null,
        }
    }

    impl_any_methods!();
}

impl<T: FromDynamic> FromDynamic for Option<T> {
    fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError> {
        match value {
            Dynamic::Null => Ok(None),
            value => T::from_dynamic(value).map(Some),
        }
    }
}

impl<T: Typed> Typed for Option<T> {
    #[inline]
    fn type_hint() -> TypeHint {
        TypeHint::Optional(Box::new(T::type_hint()))
    }
}

// -----------------------------------------------------------------------------
// Box and Arc

macro_rules! impl_owning_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Reflect> Reflect for $ptr<T> {
                #[inline]
                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Pointer(&**self)
                }

                impl_any_methods!();
            }

            impl<T: FromDynamic> FromDynamic for $ptr<T> {
                #[inline]
                fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError> {
                    T::from_dynamic(value).map($ptr::new)
                }
            }

            impl<T: Typed> Typed for $ptr<T> {
                #[inline]
                fn type_hint() -> TypeHint {
                    T::type_hint()
                }
            }
        )*
    };
}

impl_owning_pointer!(Box, Arc);

// -----------------------------------------------------------------------------
// Weak

/// A dead reference is null.
impl<T: Reflect> Reflect for Weak<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        match self.upgrade() {
            Some(shared) => ReflectRef::Shared(shared),
            None => ReflectRef::Null,
        }
    }

    impl_any_methods!();
}

/// Only null converts, to an empty reference.
impl<T> FromDynamic for Weak<T> {
    fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError> {
        match value {
            Dynamic::Null => Ok(Weak::new()),
            other => Err(ApplyError::mismatched("null (weak reference)", other.kind_name())),
        }
    }
}

impl<T: Typed> Typed for Weak<T> {
    #[inline]
    fn type_hint() -> TypeHint {
        TypeHint::Optional(Box::new(T::type_hint()))
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::sync::{Arc, Weak};

    use crate::Reflect;
    use crate::ops::ReflectRef;

    #[test]
    fn weak_follows_live_target() {
        let shared = Arc::new(5_u8);
        let weak = Arc::downgrade(&shared);
        assert!(matches!(weak.reflect_ref(), ReflectRef::Shared(_)));

        drop(shared);
        assert!(weak.reflect_ref().is_null());
        assert!(Weak::<u8>::new().reflect_ref().is_null());
    }

    #[test]
    fn owning_pointers_are_transparent() {
        let value = Box::new(Some(3_i32));
        let ReflectRef::Pointer(inner) = value.reflect_ref() else {
            panic!("expected a pointer");
        };
        assert!(matches!(inner.reflect_ref(), ReflectRef::Pointer(_)));
    }
}

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::dynamic::Dynamic;
use crate::impls::impl_any_methods;
use crate::info::{TypeHint, Typed};
use crate::ops::{ApplyError, ReflectRef, Sequence, SequenceIter, SequenceKind};
use crate::{FromDynamic, Reflect};

fn tuple_items<const N: usize>(value: Dynamic) -> Result<[Dynamic; N], ApplyError> {
    let items: Vec<Dynamic> = match value {
        Dynamic::Tuple(items) | Dynamic::List(items) | Dynamic::Set(items) => items,
        other => return Err(ApplyError::mismatched("tuple", other.kind_name())),
    };
    <[Dynamic; N]>::try_from(items).map_err(|items| ApplyError::DifferentSize {
        expected: N,
        found: items.len(),
    })
}

macro_rules! impl_tuple {
    ($len:literal: $($name:ident $var:ident $index:tt),+) => {
        impl<$($name: Reflect),+> Reflect for ($($name,)+) {
            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Sequence(self)
            }

            impl_any_methods!();
        }

        impl<$($name: Reflect),+> Sequence for ($($name,)+) {
            #[inline]
            fn sequence_kind(&self) -> SequenceKind {
                SequenceKind::Tuple
            }

            #[inline]
            fn len(&self) -> usize {
                $len
            }

            fn items(&self) -> SequenceIter<'_> {
                Box::new([$(&self.$index as &dyn Reflect),+].into_iter())
            }
        }

        impl<$($name: FromDynamic),+> FromDynamic for ($($name,)+) {
            fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError> {
                let [$($var),+] = tuple_items::<$len>(value)?;
                Ok(($($name::from_dynamic($var)?,)+))
            }
        }

        impl<$($name: Typed),+> Typed for ($($name,)+) {
            #[inline]
            fn type_hint() -> TypeHint {
                TypeHint::Tuple(vec![$($name::type_hint()),+])
            }
        }
    };
}

impl_tuple!(1: A a 0);
impl_tuple!(2: A a 0, B b 1);
impl_tuple!(3: A a 0, B b 1, C c 2);
impl_tuple!(4: A a 0, B b 1, C c 2, D d 3);
impl_tuple!(5: A a 0, B b 1, C c 2, D d 3, E e 4);
impl_tuple!(6: A a 0, B b 1, C c 2, D d 3, E e 4, F f 5);

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use crate::FromDynamic;
    use crate::dynamic::Dynamic;
    use crate::ops::ApplyError;

    #[test]
    fn arity_must_match() {
        let value = Dynamic::Tuple(vec![Dynamic::from(1), Dynamic::from("x")]);
        assert_eq!(
            <(u8, String)>::from_dynamic(value),
            Ok((1, String::from("x")))
        );

        let value = Dynamic::List(vec![Dynamic::from(1)]);
        assert_eq!(
            <(u8, u8)>::from_dynamic(value),
            Err(ApplyError::DifferentSize {
                expected: 2,
                found: 1
            })
        );
    }
}

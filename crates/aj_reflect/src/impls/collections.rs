use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};
use std::collections::{HashMap, HashSet};

use crate::dynamic::Dynamic;
use crate::impls::impl_any_methods;
use crate::info::{TypeHint, Typed};
use crate::ops::{ApplyError, Map, MapIter, ReflectRef, Sequence, SequenceIter, SequenceKind};
use crate::{FromDynamic, Reflect};

// -----------------------------------------------------------------------------
// Helpers

fn dynamic_items(value: Dynamic) -> Result<Vec<Dynamic>, ApplyError> {
    match value {
        Dynamic::List(items) | Dynamic::Set(items) | Dynamic::Tuple(items) => Ok(items),
        other => Err(ApplyError::mismatched("sequence", other.kind_name())),
    }
}

/// Guesses the scalar a map key was printed from.
fn scalar_from_text(text: &str) -> Option<Dynamic> {
    match text {
        "true" => return Some(Dynamic::Bool(true)),
        "false" => return Some(Dynamic::Bool(false)),
        _ => {}
    }
    if let Ok(v) = text.parse::<i64>() {
        return Some(Dynamic::Int(v));
    }
    if let Ok(v) = text.parse::<u64>() {
        return Some(Dynamic::UInt(v));
    }
    text.parse::<f64>().ok().map(Dynamic::Float)
}

/// Converts a textual map key into `K`.
///
/// The text itself is tried first, then the scalar it spells.
pub(crate) fn key_from_text<K: FromDynamic>(key: String) -> Result<K, ApplyError> {
    let err = match K::from_dynamic(Dynamic::Str(key.clone())) {
        Ok(k) => return Ok(k),
        Err(err) => err,
    };
    let source = match scalar_from_text(&key) {
        Some(scalar) => match K::from_dynamic(scalar) {
            Ok(k) => return Ok(k),
            Err(err) => err,
        },
        None => err,
    };
    Err(ApplyError::InvalidKey {
        key,
        source: Box::new(source),
    })
}

// -----------------------------------------------------------------------------
// Sequences

macro_rules! impl_sequence {
    ($kind:ident => $hint:ident: $($ty:ident<T $(, $s:ident)?> where [$($bound:tt)*]),* $(,)?) => {
        $(
            impl<T, $($s)?> Reflect for $ty<T $(, $s)?>
            where
                T: Reflect + $($bound)*,
                $($s: BuildHasher + Send + Sync + 'static,)?
            {
                #[inline]
                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Sequence(self)
                }

                impl_any_methods!();
            }

            impl<T, $($s)?> Sequence for $ty<T $(, $s)?>
            where
                T: Reflect + $($bound)*,
                $($s: BuildHasher + Send + Sync + 'static,)?
            {
                #[inline]
                fn sequence_kind(&self) -> SequenceKind {
                    SequenceKind::$kind
                }

                #[inline]
                fn len(&self) -> usize {
                    <$ty<T $(, $s)?>>::len(self)
                }

                fn items(&self) -> SequenceIter<'_> {
                    Box::new(<&$ty<T $(, $s)?> as IntoIterator>::into_iter(self).map(|item| item as &dyn Reflect))
                }
            }

            impl<T, $($s)?> FromDynamic for $ty<T $(, $s)?>
            where
                T: FromDynamic + $($bound)*,
                $($s: BuildHasher + Default,)?
            {
                fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError> {
                    dynamic_items(value)?.into_iter().map(T::from_dynamic).collect()
                }
            }

            impl<T, $($s)?> Typed for $ty<T $(, $s)?>
            where
                T: Typed,
            {
                #[inline]
                fn type_hint() -> TypeHint {
                    TypeHint::$hint(Box::new(T::type_hint()))
                }
            }
        )*
    };
}

impl_sequence!(List => List: Vec<T> where [Sized], VecDeque<T> where [Sized]);
impl_sequence!(Set => Set: BTreeSet<T> where [Ord], HashSet<T, S> where [Eq + Hash]);

// -----------------------------------------------------------------------------
// Maps

macro_rules! impl_map {
    ($($ty:ident<K, V $(, $s:ident)?> where [$($bound:tt)*]),* $(,)?) => {
        $(
            impl<K, V, $($s)?> Reflect for $ty<K, V $(, $s)?>
            where
                K: Reflect + $($bound)*,
                V: Reflect,
                $($s: BuildHasher + Send + Sync + 'static,)?
            {
                #[inline]
                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Map(self)
                }

                impl_any_methods!();
            }

            impl<K, V, $($s)?> Map for $ty<K, V $(, $s)?>
            where
                K: Reflect + $($bound)*,
                V: Reflect,
                $($s: BuildHasher + Send + Sync + 'static,)?
            {
                #[inline]
                fn len(&self) -> usize {
                    <$ty<K, V $(, $s)?>>::len(self)
                }

                fn entries(&self) -> MapIter<'_> {
                    Box::new(
                        <&$ty<K, V $(, $s)?> as IntoIterator>::into_iter(self)
                            .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)),
                    )
                }
            }

            impl<K, V, $($s)?> FromDynamic for $ty<K, V $(, $s)?>
            where
                K: FromDynamic + $($bound)*,
                V: FromDynamic,
                $($s: BuildHasher + Default,)?
            {
                fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError> {
                    match value {
                        Dynamic::Map(entries) => entries
                            .into_iter()
                            .map(|(k, v)| Ok::<_, ApplyError>((key_from_text::<K>(k)?, V::from_dynamic(v)?)))
                            .collect(),
                        other => Err(ApplyError::mismatched("map", other.kind_name())),
                    }
                }
            }

            impl<K, V, $($s)?> Typed for $ty<K, V $(, $s)?>
            where
                V: Typed,
            {
                #[inline]
                fn type_hint() -> TypeHint {
                    TypeHint::Map(Box::new(V::type_hint()))
                }
            }
        )*
    };
}

impl_map!(BTreeMap<K, V> where [Ord], HashMap<K, V, S> where [Eq + Hash]);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::{BTreeMap, BTreeSet};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use super::key_from_text;
    use crate::dynamic::Dynamic;
    use crate::ops::{ApplyError, ReflectRef};
    use crate::{FromDynamic, Reflect};

    #[test]
    fn keys_fall_back_to_scalars() {
        assert_eq!(key_from_text::<String>("12".into()), Ok(String::from("12")));
        assert_eq!(key_from_text::<u16>("12".into()), Ok(12));
        assert_eq!(key_from_text::<bool>("true".into()), Ok(true));
        assert!(matches!(
            key_from_text::<u16>("x".into()),
            Err(ApplyError::InvalidKey { .. })
        ));
    }

    #[test]
    fn maps_from_dynamic() {
        let mut entries = BTreeMap::new();
        entries.insert(String::from("1"), Dynamic::from(10));
        entries.insert(String::from("2"), Dynamic::from(20));
        let map = HashMap::<u8, i64>::from_dynamic(Dynamic::Map(entries)).unwrap();
        assert_eq!(map[&2], 20);
    }

    #[test]
    fn sets_deduplicate() {
        let value = Dynamic::List(vec![Dynamic::from(1), Dynamic::from(1), Dynamic::from(3)]);
        let set = BTreeSet::<u8>::from_dynamic(value).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), [1, 3]);
    }

    #[test]
    fn map_entries_are_reflected() {
        let mut map = BTreeMap::new();
        map.insert(String::from("a"), 1_u8);
        let ReflectRef::Map(reflected) = map.reflect_ref() else {
            panic!("expected a map");
        };
        let (key, value) = reflected.entries().next().unwrap();
        assert!(matches!(key.reflect_ref(), ReflectRef::Str("a")));
        assert!(matches!(value.reflect_ref(), ReflectRef::UInt(1)));
    }
}

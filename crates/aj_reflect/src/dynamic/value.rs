use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use chrono::NaiveDateTime;

use crate::info::{TypeHint, Typed};
use crate::ops::{ApplyError, Map, MapIter, ReflectRef, Sequence, SequenceIter, SequenceKind};
use crate::{FromDynamic, Reflect};

// -----------------------------------------------------------------------------
// Dynamic

/// A value without a static type.
///
/// ```rust
/// # use aj_reflect::dynamic::Dynamic;
/// let value = Dynamic::from(vec![Dynamic::from(1), Dynamic::from("a")]);
/// assert_eq!(value.kind_name(), "list");
/// assert_eq!(value.as_slice().unwrap()[1].as_str(), Some("a"));
/// ```
#[derive(Debug, Default)]
pub enum Dynamic {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    DateTime(NaiveDateTime),
    List(Vec<Dynamic>),
    /// Elements are unique.
    Set(Vec<Dynamic>),
    Tuple(Vec<Dynamic>),
    Map(BTreeMap<String, Dynamic>),
    /// A constructed record.
    Record(Box<dyn Reflect>),
}

impl Dynamic {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::DateTime(_) => "datetime",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Tuple(_) => "tuple",
            Self::Map(_) => "map",
            Self::Record(_) => "record",
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::UInt(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(v) => Some(*v),
            _ => None,
        }
    }

    /// Elements of a list, set or tuple.
    pub fn as_slice(&self) -> Option<&[Dynamic]> {
        match self {
            Self::List(v) | Self::Set(v) | Self::Tuple(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Dynamic>> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Looks up `key` in a map.
    pub fn get(&self, key: &str) -> Option<&Dynamic> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Borrows a constructed record as `T`.
    pub fn downcast_record_ref<T: Reflect>(&self) -> Option<&T> {
        match self {
            Self::Record(v) => v.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Builds a set, dropping repeated elements.
    ///
    /// ```rust
    /// # use aj_reflect::dynamic::Dynamic;
    /// let set = Dynamic::set_from([Dynamic::from(1), Dynamic::from(1), Dynamic::from(2)]);
    /// assert_eq!(set.as_slice().unwrap().len(), 2);
    /// ```
    pub fn set_from(items: impl IntoIterator<Item = Dynamic>) -> Self {
        let mut unique: Vec<Dynamic> = Vec::new();
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Self::Set(unique)
    }
}

/// Records never compare equal, everything else compares structurally.
impl PartialEq for Dynamic {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Int(a), Self::UInt(b)) | (Self::UInt(b), Self::Int(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::List(a), Self::List(b))
            | (Self::Set(a), Self::Set(b))
            | (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from {
    ($variant:ident: $($ty:ty => $conv:expr),* $(,)?) => {
        $(
            impl From<$ty> for Dynamic {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant($conv(value))
                }
            }
        )*
    };
}

impl_from!(Bool: bool => core::convert::identity);
impl_from!(Int: i8 => i64::from, i16 => i64::from, i32 => i64::from, i64 => core::convert::identity);
impl_from!(UInt: u8 => u64::from, u16 => u64::from, u32 => u64::from, u64 => core::convert::identity);
impl_from!(Float: f32 => f64::from, f64 => core::convert::identity);
impl_from!(Str: String => core::convert::identity, &str => String::from);
impl_from!(DateTime: NaiveDateTime => core::convert::identity);
impl_from!(List: Vec<Dynamic> => core::convert::identity);
impl_from!(Map: BTreeMap<String, Dynamic> => core::convert::identity);

impl<T> From<Option<T>> for Dynamic
where
    Dynamic: From<T>,
{
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::from)
    }
}

// -----------------------------------------------------------------------------
// Reflection

impl Reflect for Dynamic {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        match self {
            Self::Null => ReflectRef::Null,
            Self::Bool(v) => ReflectRef::Bool(*v),
            Self::Int(v) => ReflectRef::Int(*v),
            Self::UInt(v) => ReflectRef::UInt(*v),
            Self::Float(v) => ReflectRef::Float(*v),
            Self::Str(v) => ReflectRef::Str(v),
            Self::DateTime(v) => ReflectRef::DateTime(*v),
            Self::List(_) | Self::Set(_) | Self::Tuple(_) => ReflectRef::Sequence(self),
            Self::Map(_) => ReflectRef::Map(self),
            Self::Record(v) => ReflectRef::Pointer(&**v),
        }
    }

    crate::impls::impl_any_methods!();
}

impl Sequence for Dynamic {
    fn sequence_kind(&self) -> SequenceKind {
        match self {
            Self::Set(_) => SequenceKind::Set,
            Self::Tuple(_) => SequenceKind::Tuple,
            _ => SequenceKind::List,
        }
    }

    fn len(&self) -> usize {
        self.as_slice().map_or(0, <[Dynamic]>::len)
    }

    fn items(&self) -> SequenceIter<'_> {
        let items = self.as_slice().unwrap_or_default();
        Box::new(items.iter().map(|item| item as &dyn Reflect))
    }
}

impl Map for Dynamic {
    fn len(&self) -> usize {
        self.as_map().map_or(0, BTreeMap::len)
    }

    fn entries(&self) -> MapIter<'_> {
        match self {
            Self::Map(map) => Box::new(
                map.iter()
                    .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)),
            ),
            _ => Box::new(core::iter::empty()),
        }
    }
}

impl FromDynamic for Dynamic {
    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, ApplyError> {
        Ok(value)
    }
}

impl Typed for Dynamic {
    #[inline]
    fn type_hint() -> TypeHint {
        TypeHint::Any
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;

    use super::Dynamic;
    use crate::Reflect;
    use crate::ops::{ReflectRef, SequenceKind};

    #[test]
    fn mixed_sign_integers_compare_by_value() {
        assert_eq!(Dynamic::Int(3), Dynamic::UInt(3));
        assert_ne!(Dynamic::Int(-3), Dynamic::UInt(3));
        assert_ne!(Dynamic::Int(3), Dynamic::Float(3.0));
    }

    #[test]
    fn records_are_transparent() {
        let value = Dynamic::Record(Box::new(7_u8));
        assert!(matches!(value.reflect_ref(), ReflectRef::Pointer(_)));
        assert_eq!(value.downcast_record_ref::<u8>(), Some(&7));
        assert_ne!(value, Dynamic::Record(Box::new(7_u8)));
    }

    #[test]
    fn sets_are_sequences() {
        let value = Dynamic::set_from(vec![Dynamic::from("a"), Dynamic::from("a")]);
        let ReflectRef::Sequence(seq) = value.reflect_ref() else {
            panic!("expected a sequence");
        };
        assert_eq!(seq.sequence_kind(), SequenceKind::Set);
        assert_eq!(seq.len(), 1);
    }
}

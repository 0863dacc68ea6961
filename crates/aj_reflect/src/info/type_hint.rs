use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use crate::Reflect;
use crate::ops::{ReflectRef, SequenceKind};
use crate::registry::{GetTypeMetadata, RegisterError, TypeReportRegistry};

pub(crate) type RegisterFn = fn(&mut TypeReportRegistry) -> Result<(), RegisterError>;

// -----------------------------------------------------------------------------
// RecordHint

/// Identifies a record type inside a [`TypeHint`].
///
/// Hints built with [`RecordHint::of`] also know how to register the
/// record, so registering an outer type registers the records it refers to.
#[derive(Clone, Copy)]
pub struct RecordHint {
    type_id: TypeId,
    type_path: &'static str,
    register: Option<RegisterFn>,
}

impl RecordHint {
    /// A hint for a record that can register itself.
    #[inline]
    pub fn of<T: GetTypeMetadata>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>(),
            register: Some(TypeReportRegistry::register::<T>),
        }
    }

    /// A hint for a record whose report is registered by hand.
    #[inline]
    pub fn new(type_id: TypeId, type_path: &'static str) -> Self {
        Self {
            type_id,
            type_path,
            register: None,
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub(crate) fn register_fn(&self) -> Option<RegisterFn> {
        self.register
    }
}

impl PartialEq for RecordHint {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for RecordHint {}

impl fmt::Debug for RecordHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordHint").field(&self.type_path).finish()
    }
}

// -----------------------------------------------------------------------------
// TypeHint

/// A static type descriptor.
///
/// `Int` covers every integer width and `Str` covers `char`. Map keys are
/// always text on the wire, so only the value type is described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    Any,
    Bool,
    Int,
    Float,
    Str,
    DateTime,
    Optional(Box<TypeHint>),
    List(Box<TypeHint>),
    Set(Box<TypeHint>),
    Tuple(Vec<TypeHint>),
    Map(Box<TypeHint>),
    Record(RecordHint),
}

impl TypeHint {
    /// Returns `true` if `value` has the shape this hint describes.
    ///
    /// Null is only accepted by [`Any`](TypeHint::Any) and
    /// [`Optional`](TypeHint::Optional). Floats accept integers.
    ///
    /// ```rust
    /// # use aj_reflect::info::{TypeHint, Typed};
    /// let hint = <Vec<f64>>::type_hint();
    /// assert!(hint.accepts(&vec![1.5_f64]));
    /// assert!(hint.accepts(&vec![1_i32, 2]));
    /// assert!(!hint.accepts(&vec![String::from("text")]));
    /// assert!(!TypeHint::Int.accepts(&None::<i32>));
    /// ```
    pub fn accepts(&self, value: &dyn Reflect) -> bool {
        self.accepts_ref(value.reflect_ref())
    }

    fn accepts_ref(&self, value: ReflectRef<'_>) -> bool {
        match value {
            ReflectRef::Pointer(inner) => self.accepts(inner),
            ReflectRef::Shared(inner) => self.accepts(&*inner),
            value => match self {
                Self::Any => true,
                Self::Optional(inner) => value.is_null() || inner.accepts_ref(value),
                Self::Bool => matches!(value, ReflectRef::Bool(_)),
                Self::Int => matches!(value, ReflectRef::Int(_) | ReflectRef::UInt(_)),
                Self::Float => matches!(
                    value,
                    ReflectRef::Float(_) | ReflectRef::Int(_) | ReflectRef::UInt(_)
                ),
                Self::Str => matches!(value, ReflectRef::Str(_) | ReflectRef::Char(_)),
                Self::DateTime => matches!(value, ReflectRef::DateTime(_)),
                Self::List(item) => accepts_items(&value, SequenceKind::List, item),
                Self::Set(item) => accepts_items(&value, SequenceKind::Set, item),
                Self::Tuple(items) => match value {
                    ReflectRef::Sequence(seq)
                        if seq.sequence_kind() == SequenceKind::Tuple
                            && seq.len() == items.len() =>
                    {
                        seq.items().zip(items).all(|(v, hint)| hint.accepts(v))
                    }
                    _ => false,
                },
                Self::Map(item) => match value {
                    ReflectRef::Map(map) => map.entries().all(|(_, v)| item.accepts(v)),
                    _ => false,
                },
                Self::Record(hint) => match value {
                    ReflectRef::Record(record) => record.ty_id() == hint.type_id,
                    _ => false,
                },
            },
        }
    }

    /// Calls `f` with every record hint reachable from this one.
    pub fn visit_records(&self, f: &mut impl FnMut(&RecordHint)) {
        match self {
            Self::Record(hint) => f(hint),
            Self::Optional(inner) | Self::List(inner) | Self::Set(inner) | Self::Map(inner) => {
                inner.visit_records(f);
            }
            Self::Tuple(items) => items.iter().for_each(|item| item.visit_records(f)),
            _ => {}
        }
    }

    /// The hint of the elements when this hint is a collection.
    ///
    /// `Optional` is looked through.
    pub fn element(&self) -> Option<&TypeHint> {
        match self {
            Self::List(inner) | Self::Set(inner) | Self::Map(inner) => Some(inner),
            Self::Optional(inner) => inner.element(),
            _ => None,
        }
    }
}

fn accepts_items(value: &ReflectRef<'_>, kind: SequenceKind, item: &TypeHint) -> bool {
    match value {
        ReflectRef::Sequence(seq) if seq.sequence_kind() == kind => {
            seq.items().all(|v| item.accepts(v))
        }
        _ => false,
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Str => f.write_str("str"),
            Self::DateTime => f.write_str("datetime"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
            Self::List(inner) => write!(f, "List<{inner}>"),
            Self::Set(inner) => write!(f, "Set<{inner}>"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Self::Map(inner) => write!(f, "Map<str, {inner}>"),
            Self::Record(hint) => f.write_str(hint.type_path),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;

    use super::TypeHint;
    use crate::info::Typed;

    #[test]
    fn tuples_check_arity() {
        let hint = <(i32, String)>::type_hint();
        assert!(hint.accepts(&(1_i32, String::from("a"))));
        assert!(!hint.accepts(&vec![1_i32, 2]));
        assert_eq!(hint.to_string(), "(int, str)");
    }

    #[test]
    fn maps_check_values() {
        let mut map = BTreeMap::new();
        map.insert(String::from("a"), 1_u8);
        assert!(TypeHint::Map(TypeHint::Int.into()).accepts(&map));
        assert!(!TypeHint::Map(TypeHint::Str.into()).accepts(&map));
        assert!(!TypeHint::List(TypeHint::Int.into()).accepts(&map));
    }

    #[test]
    fn optional_accepts_null() {
        let hint = <Option<bool>>::type_hint();
        assert!(hint.accepts(&None::<bool>));
        assert!(hint.accepts(&Some(true)));
        assert!(TypeHint::Any.accepts(&None::<bool>));
    }
}

use alloc::boxed::Box;

use crate::Reflect;

/// The flavour of a [`Sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// Ordered, e.g. `Vec<T>`.
    List,
    /// Unique elements, e.g. `HashSet<T>`.
    Set,
    /// Fixed arity, e.g. `(A, B)`.
    Tuple,
}

pub type SequenceIter<'a> = Box<dyn Iterator<Item = &'a dyn Reflect> + 'a>;

/// Lists, sets and tuples.
///
/// ```rust
/// # use aj_reflect::{Reflect, ops::{ReflectRef, SequenceKind}};
/// let value = vec![1_u8, 2, 3];
/// let ReflectRef::Sequence(seq) = value.reflect_ref() else { unreachable!() };
/// assert_eq!(seq.sequence_kind(), SequenceKind::List);
/// assert_eq!(seq.items().count(), 3);
/// ```
pub trait Sequence: Reflect {
    fn sequence_kind(&self) -> SequenceKind;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements in storage order.
    fn items(&self) -> SequenceIter<'_>;
}

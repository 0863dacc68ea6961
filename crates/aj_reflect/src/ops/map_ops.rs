use alloc::boxed::Box;

use crate::Reflect;

pub type MapIter<'a> = Box<dyn Iterator<Item = (&'a dyn Reflect, &'a dyn Reflect)> + 'a>;

/// Key-value containers such as `HashMap<K, V>` and `BTreeMap<K, V>`.
pub trait Map: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in the container's iteration order.
    fn entries(&self) -> MapIter<'_>;
}

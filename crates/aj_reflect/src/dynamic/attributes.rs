use alloc::string::String;
use alloc::vec::Vec;

use crate::dynamic::Dynamic;

/// Attributes a record received without declaring them.
///
/// A record opts in by marking one field `#[aj(dynamic)]`. The
/// deserializer then stores unknown keys here instead of dropping them,
/// and the fallback serializer emits them after the declared fields.
///
/// ```rust
/// # use aj_reflect::dynamic::{Dynamic, DynamicAttributes};
/// let mut attrs = DynamicAttributes::default();
/// attrs.insert("color", Dynamic::from("red"));
/// attrs.insert("color", Dynamic::from("blue"));
/// assert_eq!(attrs.len(), 1);
/// assert_eq!(attrs.get("color").and_then(Dynamic::as_str), Some("blue"));
/// ```
#[derive(Debug, Default, PartialEq)]
pub struct DynamicAttributes {
    entries: Vec<(String, Dynamic)>,
}

impl DynamicAttributes {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces an attribute, keeping first-insertion order.
    pub fn insert(&mut self, name: impl Into<String>, value: Dynamic) -> Option<Dynamic> {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => Some(core::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Dynamic> {
        self.entries
            .iter()
            .find_map(|(key, value)| (key == name).then_some(value))
    }

    pub fn remove(&mut self, name: &str) -> Option<Dynamic> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Dynamic)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

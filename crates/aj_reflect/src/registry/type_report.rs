use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use aj_utils::hash::HashMap;

use crate::registry::{AttributeNotFound, AttributeReport, Constructor, Groups, RegisterError};

/// How a JSON key maps onto a [`TypeReport`].
#[derive(Debug, Clone, Copy)]
pub enum WireName<'a> {
    /// The key is the wire name of this attribute.
    Attribute(&'a AttributeReport),
    /// The key is not a wire name, but it is the attribute name of an
    /// attribute serialized under another key.
    Ambiguous(&'a AttributeReport),
    Unknown,
}

/// The merged attribute reports of one registered type.
///
/// Attributes keep their merge order: inherited ones first at the position
/// of the base, then the type's own.
#[derive(Clone)]
pub struct TypeReport {
    type_id: TypeId,
    type_path: &'static str,
    alias: Option<String>,
    attributes: Vec<AttributeReport>,
    by_name: HashMap<String, usize>,
    by_wire: HashMap<String, usize>,
    constructor: Option<Constructor>,
}

impl TypeReport {
    /// Indexes `attributes`, rejecting duplicated wire names.
    pub(crate) fn new(
        type_id: TypeId,
        type_path: &'static str,
        alias: Option<String>,
        attributes: Vec<AttributeReport>,
        constructor: Option<Constructor>,
    ) -> Result<Self, RegisterError> {
        let mut by_name = HashMap::default();
        let mut by_wire: HashMap<String, usize> = HashMap::default();

        for (index, report) in attributes.iter().enumerate() {
            by_name.insert(report.attribute_name().to_string(), index);
            if let Some(&first) = by_wire.get(report.wire_name()) {
                return Err(RegisterError::DuplicateWireName {
                    type_path,
                    wire_name: report.wire_name().to_string(),
                    first: attributes[first].attribute_name().to_string(),
                    second: report.attribute_name().to_string(),
                });
            }
            by_wire.insert(report.wire_name().to_string(), index);
        }

        Ok(Self {
            type_id,
            type_path,
            alias,
            attributes,
            by_name,
            by_wire,
            constructor,
        })
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
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    #[inline]
    pub fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }

    /// Looks up an attribute by its name in the host type.
    pub fn get(&self, attribute_name: &str) -> Option<&AttributeReport> {
        self.by_name
            .get(attribute_name)
            .map(|&index| &self.attributes[index])
    }

    pub fn contains(&self, attribute_name: &str) -> bool {
        self.by_name.contains_key(attribute_name)
    }

    /// Looks up an attribute by its key in the JSON tree.
    pub fn get_by_wire_name(&self, wire_name: &str) -> Result<&AttributeReport, AttributeNotFound> {
        self.by_wire
            .get(wire_name)
            .map(|&index| &self.attributes[index])
            .ok_or_else(|| AttributeNotFound {
                type_path: self.type_path,
                wire_name: wire_name.to_string(),
            })
    }

    /// Classifies a JSON key, see [`WireName`].
    pub fn resolve_wire_name(&self, key: &str) -> WireName<'_> {
        if let Ok(report) = self.get_by_wire_name(key) {
            WireName::Attribute(report)
        } else if let Some(report) = self.get(key) {
            WireName::Ambiguous(report)
        } else {
            WireName::Unknown
        }
    }

    /// Attributes passing the group filter, in order.
    pub fn visible<'a>(
        &'a self,
        groups: Option<&'a Groups>,
    ) -> impl Iterator<Item = &'a AttributeReport> + 'a {
        self.attributes.iter().filter(move |a| a.passes(groups))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &AttributeReport> {
        self.attributes.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl fmt::Debug for TypeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeReport")
            .field("type_path", &self.type_path)
            .field("alias", &self.alias)
            .field("attributes", &self.attributes)
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;
    use core::any::TypeId;

    use super::{TypeReport, WireName};
    use crate::registry::{AttributeReport, Groups, RegisterError};

    fn report() -> TypeReport {
        TypeReport::new(
            TypeId::of::<()>(),
            "Sample",
            None,
            vec![
                AttributeReport::new("a").with_wire_name("aa"),
                AttributeReport::new("b").with_groups(Some(Groups::from_iter(["x"]))),
                AttributeReport::new("c"),
            ],
            None,
        )
        .unwrap()
    }

    #[test]
    fn wire_names_resolve() {
        let report = report();
        assert!(matches!(report.resolve_wire_name("aa"), WireName::Attribute(a) if a.attribute_name() == "a"));
        assert!(matches!(report.resolve_wire_name("a"), WireName::Ambiguous(a) if a.wire_name() == "aa"));
        assert!(matches!(report.resolve_wire_name("z"), WireName::Unknown));
        assert_eq!(report.get_by_wire_name("b").unwrap().attribute_name(), "b");
        assert_eq!(report.get_by_wire_name("a").unwrap_err().wire_name, "a");
    }

    #[test]
    fn visible_filters_by_group() {
        let report = report();
        let empty = Groups::new();
        let names: vec::Vec<_> = report.visible(Some(&empty)).map(|a| a.attribute_name()).collect();
        assert_eq!(names, ["a", "c"]);
        assert_eq!(report.visible(None).count(), 3);
    }

    #[test]
    fn duplicate_wire_names_are_rejected() {
        let err = TypeReport::new(
            TypeId::of::<()>(),
            "Sample",
            None,
            vec![
                AttributeReport::new("a").with_wire_name("x"),
                AttributeReport::new("b").with_wire_name("x"),
            ],
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RegisterError::DuplicateWireName { ref first, ref second, .. } if first == "a" && second == "b"
        ));
    }
}

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use aj_utils::hash::HashSet;
use chrono::format::{Item, StrftimeItems};

use crate::info::TypeHint;
use crate::registry::{AnnotationParseError, RawAttributeMetadata};

/// The format applied to timestamps without an explicit `d_format`.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

// -----------------------------------------------------------------------------
// Groups

/// A set of group tags.
///
/// ```rust
/// # use aj_reflect::registry::Groups;
/// let admin = Groups::from_iter(["admin", "audit"]);
/// assert!(admin.intersects(&Groups::from_iter(["audit"])));
/// assert!(!admin.intersects(&Groups::new()));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Groups(HashSet<String>);

impl Groups {
    #[inline]
    pub fn new() -> Self {
        Self(HashSet::default())
    }

    #[inline]
    pub fn insert(&mut self, group: impl Into<String>) -> bool {
        self.0.insert(group.into())
    }

    #[inline]
    pub fn contains(&self, group: &str) -> bool {
        self.0.contains(group)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns `true` if both sets share at least one tag.
    pub fn intersects(&self, other: &Groups) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|group| large.contains(group))
    }
}

impl<S: Into<String>> FromIterator<S> for Groups {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Debug for Groups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sorted: Vec<&str> = self.iter().collect();
        sorted.sort_unstable();
        f.debug_set().entries(sorted).finish()
    }
}

// -----------------------------------------------------------------------------
// AttributeReport

/// The serialization contract of one attribute.
///
/// ```rust
/// # use aj_reflect::registry::{AttributeReport, Groups};
/// let report = AttributeReport::new("email").with_groups(Some(Groups::from_iter(["admin"])));
///
/// assert!(report.passes(None));
/// assert!(report.passes(Some(&Groups::from_iter(["admin", "public"]))));
/// assert!(!report.passes(Some(&Groups::from_iter(["public"]))));
/// assert!(!report.passes(Some(&Groups::new())));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeReport {
    attribute_name: String,
    wire_name: String,
    groups: Option<Groups>,
    datetime_format: String,
    declared_type: Option<TypeHint>,
    required: bool,
}

impl AttributeReport {
    /// A report with every option at its default.
    pub fn new(attribute_name: impl Into<String>) -> Self {
        let attribute_name = attribute_name.into();
        Self {
            wire_name: attribute_name.clone(),
            attribute_name,
            groups: None,
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            declared_type: None,
            required: false,
        }
    }

    #[inline]
    pub fn with_wire_name(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = wire_name.into();
        self
    }

    #[inline]
    pub fn with_groups(mut self, groups: Option<Groups>) -> Self {
        self.groups = groups;
        self
    }

    #[inline]
    pub fn with_datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = format.into();
        self
    }

    #[inline]
    pub fn with_declared_type(mut self, hint: Option<TypeHint>) -> Self {
        self.declared_type = hint;
        self
    }

    #[inline]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// The field's name in the host type.
    #[inline]
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// The key used in the JSON tree.
    #[inline]
    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    /// `None` means the attribute is visible whatever groups are requested.
    #[inline]
    pub fn groups(&self) -> Option<&Groups> {
        self.groups.as_ref()
    }

    #[inline]
    pub fn datetime_format(&self) -> &str {
        &self.datetime_format
    }

    #[inline]
    pub fn declared_type(&self) -> Option<&TypeHint> {
        self.declared_type.as_ref()
    }

    #[inline]
    pub fn required(&self) -> bool {
        self.required
    }

    pub(crate) fn set_declared_type(&mut self, hint: Option<TypeHint>) {
        self.declared_type = hint;
    }

    /// Group filter.
    ///
    /// No request passes everything. Otherwise untagged attributes pass and
    /// tagged ones need a tag in common with the request.
    pub fn passes(&self, requested: Option<&Groups>) -> bool {
        match (requested, &self.groups) {
            (None, _) | (Some(_), None) => true,
            (Some(requested), Some(groups)) => groups.intersects(requested),
        }
    }

    /// Builds a report from raw `key -> text` options.
    pub fn from_raw(
        type_path: &'static str,
        attribute_name: &str,
        raw: &RawAttributeMetadata,
    ) -> Result<Self, AnnotationParseError> {
        let error = |option: &str, reason: String| AnnotationParseError {
            type_path,
            attribute: attribute_name.to_string(),
            option: option.to_string(),
            reason,
        };

        let mut report = Self::new(attribute_name);
        for (option, value) in raw {
            match option.as_str() {
                "name" => {
                    if value.is_empty() {
                        return Err(error(option, "the wire name is empty".to_string()));
                    }
                    report.wire_name = value.clone();
                }
                "groups" => {
                    let groups = parse_groups(value).map_err(|reason| error(option, reason))?;
                    report.groups = Some(groups);
                }
                "d_format" => {
                    if StrftimeItems::new(value).any(|item| matches!(item, Item::Error)) {
                        return Err(error(option, alloc::format!("`{value}` is not a valid format")));
                    }
                    report.datetime_format = value.clone();
                }
                "required" => report.required = !value.eq_ignore_ascii_case("false"),
                _ => return Err(error(option, "unknown option".to_string())),
            }
        }
        Ok(report)
    }
}

/// Parses a JSON list of string or integer tags.
fn parse_groups(text: &str) -> Result<Groups, String> {
    use serde_json::Value;

    let Value::Array(items) = serde_json::from_str::<Value>(text).map_err(|e| e.to_string())?
    else {
        return Err(alloc::format!("expected a list of tags, found `{text}`"));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(tag) => Ok(tag),
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
            other => Err(alloc::format!("`{other}` is not a valid tag")),
        })
        .collect()
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::{String, ToString};

    use super::{AttributeReport, DEFAULT_DATETIME_FORMAT, Groups};

    fn raw(options: &[(&str, &str)]) -> BTreeMap<String, String> {
        options
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let report = AttributeReport::from_raw("T", "a", &BTreeMap::new()).unwrap();
        assert_eq!(report.wire_name(), "a");
        assert_eq!(report.groups(), None);
        assert_eq!(report.datetime_format(), DEFAULT_DATETIME_FORMAT);
        assert!(!report.required());
    }

    #[test]
    fn options_are_applied() {
        let report = AttributeReport::from_raw(
            "T",
            "a",
            &raw(&[
                ("name", "aa"),
                ("groups", r#"["admin", 7]"#),
                ("d_format", "%Y/%m/%d"),
                ("required", "True"),
            ]),
        )
        .unwrap();
        assert_eq!(report.wire_name(), "aa");
        assert_eq!(report.groups(), Some(&Groups::from_iter(["admin", "7"])));
        assert_eq!(report.datetime_format(), "%Y/%m/%d");
        assert!(report.required());

        let report = AttributeReport::from_raw("T", "a", &raw(&[("required", "FALSE")])).unwrap();
        assert!(!report.required());
    }

    #[test]
    fn malformed_options_are_rejected() {
        for options in [
            [("groups", "admin")],
            [("groups", r#"{"a": 1}"#)],
            [("groups", "[1.5]")],
            [("groups", "[[\"a\"]]")],
            [("d_format", "%Q")],
            [("colour", "red")],
        ] {
            let err = AttributeReport::from_raw("T", "a", &raw(&options)).unwrap_err();
            assert_eq!(err.attribute, "a");
            assert_eq!(err.option, options[0].0);
        }
    }

    #[test]
    fn explicit_empty_groups_only_pass_without_filter() {
        let report = AttributeReport::new("a").with_groups(Some(Groups::new()));
        assert!(report.passes(None));
        assert!(!report.passes(Some(&Groups::from_iter(["x"]))));

        let untagged = AttributeReport::new("b");
        assert!(untagged.passes(Some(&Groups::new())));
    }
}

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{TypeId, type_name};
use core::fmt;

use crate::dynamic::Dynamic;
use crate::info::{RegisterFn, TypeHint};
use crate::ops::Record;
use crate::registry::{ConstructError, TypeReportRegistry};

/// Raw `option -> text` metadata of one attribute.
///
/// See the [module docs](crate::registry) for the recognized keys.
pub type RawAttributeMetadata = BTreeMap<String, String>;

/// Builds a fresh, default-filled instance from caller arguments.
pub type Constructor =
    Arc<dyn Fn(&[Dynamic]) -> Result<Box<dyn Record>, ConstructError> + Send + Sync>;

/// Types that can describe themselves to the registry.
///
/// Usually implemented by [`#[derive(Record)]`](crate::derive::Record).
pub trait GetTypeMetadata: 'static {
    fn type_metadata() -> TypeMetadata;
}

#[derive(Clone, Copy)]
pub(crate) struct BaseType {
    pub type_id: TypeId,
    pub register: Option<RegisterFn>,
}

// -----------------------------------------------------------------------------
// TypeMetadata

/// The raw description of a type, input of
/// [`TypeReportRegistry::register_type`].
///
/// # Examples
///
/// ```rust
/// use aj_reflect::registry::{TypeMetadata, TypeReportRegistry};
/// use aj_reflect::info::TypeHint;
///
/// struct Account;
///
/// let metadata = TypeMetadata::of::<Account>()
///     .alias("account")
///     .attribute("id", [("required", "true")])
///     .attribute("owner", [("name", "owner_name"), ("groups", r#"["admin"]"#)])
///     .hint("id", TypeHint::Int)
///     .hint("created", TypeHint::DateTime);
///
/// let mut registry = TypeReportRegistry::new();
/// registry.register_type(metadata).unwrap();
///
/// let report = registry.get_with_alias("account").unwrap();
/// let names: Vec<_> = report.iter().map(|a| a.wire_name()).collect();
/// assert_eq!(names, ["id", "created", "owner_name"]);
/// ```
#[derive(Clone)]
pub struct TypeMetadata {
    type_id: TypeId,
    type_path: &'static str,
    alias: Option<String>,
    bases: Vec<BaseType>,
    attributes: Vec<(String, RawAttributeMetadata)>,
    hints: Vec<(String, TypeHint)>,
    constructor: Option<Constructor>,
}

impl TypeMetadata {
    #[inline]
    pub fn of<T: 'static>() -> Self {
        Self::new(TypeId::of::<T>(), type_name::<T>())
    }

    pub fn new(type_id: TypeId, type_path: &'static str) -> Self {
        Self {
            type_id,
            type_path,
            alias: None,
            bases: Vec::new(),
            attributes: Vec::new(),
            hints: Vec::new(),
            constructor: None,
        }
    }

    /// A unique name the type can be looked up by.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds a base type, registered on demand by
    /// [`TypeReportRegistry::register`].
    pub fn extends<B: GetTypeMetadata>(mut self) -> Self {
        self.bases.push(BaseType {
            type_id: TypeId::of::<B>(),
            register: Some(TypeReportRegistry::register::<B>),
        });
        self
    }

    /// Adds a base type that must already be registered to take effect.
    pub fn extends_id(mut self, type_id: TypeId) -> Self {
        self.bases.push(BaseType {
            type_id,
            register: None,
        });
        self
    }

    /// Sets the raw options of attribute `name`, replacing earlier ones.
    pub fn attribute<K, V>(
        self,
        name: impl Into<String>,
        options: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let raw = options
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.raw_attribute(name, raw)
    }

    pub fn raw_attribute(mut self, name: impl Into<String>, raw: RawAttributeMetadata) -> Self {
        let name = name.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = raw,
            None => self.attributes.push((name, raw)),
        }
        self
    }

    /// Declares the static type of attribute `name`.
    ///
    /// Hinted attributes without explicit options still get a report.
    pub fn hint(mut self, name: impl Into<String>, hint: TypeHint) -> Self {
        let name = name.into();
        match self.hints.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = hint,
            None => self.hints.push((name, hint)),
        }
        self
    }

    pub fn constructor<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Dynamic]) -> Result<Box<dyn Record>, ConstructError> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(f));
        self
    }

    /// Uses [`Default`] as the constructor, rejecting any argument.
    pub fn default_constructor<T: Record + Default>(self) -> Self {
        self.constructor(|args: &[Dynamic]| {
            if args.is_empty() {
                Ok(Box::new(T::default()) as Box<dyn Record>)
            } else {
                Err(ConstructError::UnexpectedArguments {
                    type_path: type_name::<T>(),
                    count: args.len(),
                })
            }
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
    pub fn get_alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn base_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.bases.iter().map(|base| base.type_id)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &RawAttributeMetadata)> {
        self.attributes.iter().map(|(n, raw)| (n.as_str(), raw))
    }

    pub fn hints(&self) -> impl Iterator<Item = (&str, &TypeHint)> {
        self.hints.iter().map(|(n, hint)| (n.as_str(), hint))
    }

    #[inline]
    pub fn get_constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }

    pub(crate) fn bases(&self) -> &[BaseType] {
        &self.bases
    }

    pub(crate) fn hint_of(&self, name: &str) -> Option<&TypeHint> {
        self.hints.iter().find(|(n, _)| n == name).map(|(_, hint)| hint)
    }

    pub(crate) fn raw_of(&self, name: &str) -> Option<&RawAttributeMetadata> {
        self.attributes.iter().find(|(n, _)| n == name).map(|(_, raw)| raw)
    }

    /// Register functions of the records named by the hints.
    pub(crate) fn dependencies(&self) -> Vec<RegisterFn> {
        let mut out = Vec::new();
        for (_, hint) in &self.hints {
            hint.visit_records(&mut |record| {
                if record.type_id() != self.type_id
                    && let Some(f) = record.register_fn()
                {
                    out.push(f);
                }
            });
        }
        out
    }
}

impl fmt::Debug for TypeMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .attributes
            .iter()
            .map(|(n, _)| n.to_string())
            .collect();
        f.debug_struct("TypeMetadata")
            .field("type_path", &self.type_path)
            .field("alias", &self.alias)
            .field("bases", &self.bases.len())
            .field("attributes", &names)
            .field("hints", &self.hints)
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::TypeMetadata;
    use crate::dynamic::Dynamic;
    use crate::info::TypeHint;
    use crate::registry::ConstructError;

    #[test]
    fn later_entries_replace_earlier_ones() {
        let metadata = TypeMetadata::of::<u8>()
            .attribute("a", [("name", "x")])
            .attribute("b", [("name", "y")])
            .attribute("a", [("name", "z")])
            .hint("a", TypeHint::Int)
            .hint("a", TypeHint::Str);

        let attrs: Vec<_> = metadata
            .attributes()
            .map(|(n, raw)| (n, raw["name"].as_str()))
            .collect();
        assert_eq!(attrs, [("a", "z"), ("b", "y")]);
        assert_eq!(metadata.hint_of("a"), Some(&TypeHint::Str));
    }

    #[test]
    fn default_constructor_rejects_arguments() {
        #[derive(crate::derive::Record, Default)]
        struct Empty {}

        let metadata = TypeMetadata::of::<Empty>().default_constructor::<Empty>();
        let construct = metadata.get_constructor().unwrap();
        assert!(construct(&[]).is_ok());
        assert!(matches!(
            construct(&[Dynamic::Int(1)]),
            Err(ConstructError::UnexpectedArguments { count: 1, .. })
        ));
    }
}

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use aj_utils::TypeIdMap;
use aj_utils::hash::HashMap;

use crate::registry::{AttributeReport, DuplicateTypeRegistrationError, GetTypeMetadata};
use crate::registry::{RegisterError, TypeMetadata, TypeReport};

/// What happens when a registered type is registered again.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The new report replaces the old one.
    #[default]
    Replace,
    /// [`TypeReportRegistry::register_type`] fails.
    Reject,
}

// -----------------------------------------------------------------------------
// TypeReportRegistry

/// Stores the [`TypeReport`] of every registered type.
///
/// # Example
///
/// ```
/// use aj_reflect::derive::Record;
/// use aj_reflect::registry::TypeReportRegistry;
///
/// #[derive(Record, Default)]
/// struct Address {
///     city: String,
/// }
///
/// #[derive(Record, Default)]
/// #[aj(alias = "person")]
/// struct Person {
///     #[aj(name = "full_name")]
///     name: String,
///     addresses: Vec<Address>,
/// }
///
/// let mut registry = TypeReportRegistry::new();
/// registry.register::<Person>().unwrap();
///
/// // Records reachable from the fields are registered too.
/// assert!(registry.contains_type::<Address>());
///
/// let person = registry.get_with_alias("person").unwrap();
/// assert_eq!(person.get("name").unwrap().wire_name(), "full_name");
/// ```
#[derive(Default)]
pub struct TypeReportRegistry {
    reports: TypeIdMap<Arc<TypeReport>>,
    aliases: HashMap<String, TypeId>,
    policy: DuplicatePolicy,
}

impl TypeReportRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    #[inline]
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    #[inline]
    pub fn set_policy(&mut self, policy: DuplicatePolicy) {
        self.policy = policy;
    }

    /// Registers `T`, its bases and the records its fields refer to.
    ///
    /// Types already present are skipped, whatever the policy.
    pub fn register<T: GetTypeMetadata>(&mut self) -> Result<(), RegisterError> {
        if self.contains_type::<T>() {
            return Ok(());
        }
        let metadata = T::type_metadata();

        for base in metadata.bases() {
            if let Some(register) = base.register {
                register(self)?;
            }
        }

        let dependencies = metadata.dependencies();
        self.register_type(metadata)?;

        for register in dependencies {
            register(self)?;
        }
        Ok(())
    }

    /// Builds the report of `metadata` and stores it.
    ///
    /// Bases must already be registered to be merged. On error nothing
    /// is stored.
    pub fn register_type(&mut self, metadata: TypeMetadata) -> Result<(), RegisterError> {
        let type_id = metadata.type_id();
        let type_path = metadata.type_path();

        if self.policy == DuplicatePolicy::Reject && self.reports.contains(&type_id) {
            return Err(DuplicateTypeRegistrationError::Type { type_path }.into());
        }
        if let Some(alias) = metadata.get_alias()
            && let Some(owner) = self.aliases.get(alias)
            && *owner != type_id
        {
            let owner = self.reports.get(owner).map_or("?", |report| report.type_path());
            return Err(DuplicateTypeRegistrationError::Alias {
                alias: alias.into(),
                owner,
            }
            .into());
        }

        let report = self.build_report(&metadata)?;
        if let Some(alias) = report.alias() {
            self.aliases.insert(alias.into(), type_id);
        }

        let attributes = report.len();
        if let Some(old) = self.reports.insert(type_id, Arc::new(report)) {
            log::warn!("replaced the report of `{type_path}`");
            if let Some(stale) = old.alias()
                && Some(stale) != metadata.get_alias()
            {
                self.aliases.remove(stale);
            }
        }
        log::debug!("registered `{type_path}` with {attributes} attribute(s)");
        Ok(())
    }

    fn build_report(&self, metadata: &TypeMetadata) -> Result<TypeReport, RegisterError> {
        let type_path = metadata.type_path();
        let mut attributes: Vec<AttributeReport> = Vec::new();

        // Earlier bases take precedence.
        for base in metadata.bases() {
            let Some(report) = self.reports.get(&base.type_id) else {
                log::debug!("`{type_path}` extends an unregistered type, nothing inherited");
                continue;
            };
            for inherited in report.iter() {
                if !attributes
                    .iter()
                    .any(|a| a.attribute_name() == inherited.attribute_name())
                {
                    attributes.push(inherited.clone());
                }
            }
        }

        let mut own: Vec<&str> = metadata.hints().map(|(name, _)| name).collect();
        for (name, _) in metadata.attributes() {
            if !own.contains(&name) {
                own.push(name);
            }
        }

        for name in own {
            let hint = metadata.hint_of(name).cloned();
            let position = attributes.iter().position(|a| a.attribute_name() == name);

            match (metadata.raw_of(name), position) {
                (Some(raw), position) => {
                    let mut report = AttributeReport::from_raw(type_path, name, raw)?;
                    let declared = hint.or_else(|| {
                        position.and_then(|index| attributes[index].declared_type().cloned())
                    });
                    report.set_declared_type(declared);
                    match position {
                        Some(index) => attributes[index] = report,
                        None => attributes.push(report),
                    }
                }
                // A bare hint never overrides inherited options.
                (None, Some(index)) => {
                    if hint.is_some() {
                        attributes[index].set_declared_type(hint);
                    }
                }
                (None, None) => {
                    attributes.push(AttributeReport::new(name).with_declared_type(hint));
                }
            }
        }

        TypeReport::new(
            metadata.type_id(),
            type_path,
            metadata.get_alias().map(String::from),
            attributes,
            metadata.get_constructor().cloned(),
        )
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.reports.contains(&type_id)
    }

    #[inline]
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.reports.contains_type::<T>()
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeReport> {
        self.reports.get(&type_id).map(|report| &**report)
    }

    #[inline]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&TypeReport> {
        self.get(TypeId::of::<T>())
    }

    /// Returns a handle on the report of `type_id` that outlives any lock
    /// on the registry. Later registrations do not affect it.
    #[inline]
    pub fn get_shared(&self, type_id: TypeId) -> Option<Arc<TypeReport>> {
        self.reports.get(&type_id).cloned()
    }

    pub fn get_with_alias(&self, alias: &str) -> Option<&TypeReport> {
        match self.aliases.get(alias) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeReport> {
        self.reports.values().map(|report| &**report)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Removes every report. The policy is kept.
    pub fn clear(&mut self) {
        self.reports.clear();
        self.aliases.clear();
    }
}

impl fmt::Debug for TypeReportRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.reports.values().map(|report| report.type_path()))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// TypeReportRegistryArc

/// A [`TypeReportRegistry`] shared between codecs and threads.
#[derive(Clone, Default)]
pub struct TypeReportRegistryArc {
    pub internal: Arc<RwLock<TypeReportRegistry>>,
}

impl TypeReportRegistryArc {
    pub fn new(registry: TypeReportRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, TypeReportRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, TypeReportRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Looks up a report, holding the read lock only for the lookup.
    pub fn report(&self, type_id: TypeId) -> Option<Arc<TypeReport>> {
        self.read().get_shared(type_id)
    }
}

impl fmt::Debug for TypeReportRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read().fmt(f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{DuplicatePolicy, TypeReportRegistry, TypeReportRegistryArc};
    use crate::derive::Record;
    use crate::info::TypeHint;
    use crate::registry::{DuplicateTypeRegistrationError, RegisterError, TypeMetadata};

    struct Parent;
    struct Child;
    struct Other;

    fn names(registry: &TypeReportRegistry, ty: core::any::TypeId) -> Vec<(&str, &str)> {
        registry
            .get(ty)
            .unwrap()
            .iter()
            .map(|a| (a.attribute_name(), a.wire_name()))
            .collect()
    }

    fn parent() -> TypeMetadata {
        TypeMetadata::of::<Parent>()
            .attribute("a", [("name", "aa")])
            .attribute("b", [("groups", r#"["admin"]"#)])
            .hint("a", TypeHint::Int)
            .hint("b", TypeHint::Str)
    }

    #[test]
    fn child_overrides_parent() {
        let mut registry = TypeReportRegistry::new();
        registry.register_type(parent()).unwrap();
        registry
            .register_type(
                TypeMetadata::of::<Child>()
                    .extends_id(core::any::TypeId::of::<Parent>())
                    .attribute("a", [("name", "aaa")])
                    .hint("b", TypeHint::Int)
                    .hint("c", TypeHint::Bool),
            )
            .unwrap();

        let child_ty = core::any::TypeId::of::<Child>();
        assert_eq!(
            names(&registry, child_ty),
            [("a", "aaa"), ("b", "b"), ("c", "c")]
        );

        let child = registry.get(child_ty).unwrap();
        // declared type inherited when only options are given
        assert_eq!(child.get("a").unwrap().declared_type(), Some(&TypeHint::Int));
        // a bare hint keeps the inherited groups
        let b = child.get("b").unwrap();
        assert!(b.groups().unwrap().contains("admin"));
        assert_eq!(b.declared_type(), Some(&TypeHint::Int));

        let parent = registry.get_type::<Parent>().unwrap();
        assert_eq!(parent.get("a").unwrap().wire_name(), "aa");
    }

    #[test]
    fn earlier_bases_win() {
        let mut registry = TypeReportRegistry::new();
        registry.register_type(parent()).unwrap();
        registry
            .register_type(TypeMetadata::of::<Other>().attribute("a", [("name", "other")]))
            .unwrap();
        registry
            .register_type(
                TypeMetadata::of::<Child>()
                    .extends_id(core::any::TypeId::of::<Other>())
                    .extends_id(core::any::TypeId::of::<Parent>()),
            )
            .unwrap();
        assert_eq!(
            names(&registry, core::any::TypeId::of::<Child>()),
            [("a", "other"), ("b", "b")]
        );
    }

    #[test]
    fn duplicate_policy() {
        let mut registry = TypeReportRegistry::new();
        registry.register_type(parent()).unwrap();
        registry
            .register_type(TypeMetadata::of::<Parent>().attribute("z", [("required", "1")]))
            .unwrap();
        assert_eq!(registry.get_type::<Parent>().unwrap().len(), 1);

        registry.set_policy(DuplicatePolicy::Reject);
        let err = registry.register_type(parent()).unwrap_err();
        assert!(matches!(
            err,
            RegisterError::DuplicateTypeRegistration(DuplicateTypeRegistrationError::Type { .. })
        ));
        assert_eq!(registry.get_type::<Parent>().unwrap().len(), 1);
    }

    #[test]
    fn shared_reports_outlive_the_lock() {
        let registry = TypeReportRegistryArc::default();
        registry.write().register_type(parent()).unwrap();

        let held = registry.report(core::any::TypeId::of::<Parent>()).unwrap();
        // the read lock is released, so writers are not blocked
        registry.write().register_type(TypeMetadata::of::<Parent>()).unwrap();
        assert_eq!(held.len(), 2);
        assert_eq!(registry.read().get_type::<Parent>().unwrap().len(), 0);

        registry.write().clear();
        assert!(registry.report(core::any::TypeId::of::<Parent>()).is_none());
        assert_eq!(held.get("a").unwrap().wire_name(), "aa");
    }

    #[test]
    fn aliases_are_unique() {
        let mut registry = TypeReportRegistry::new();
        registry
            .register_type(TypeMetadata::of::<Parent>().alias("thing"))
            .unwrap();
        let err = registry
            .register_type(TypeMetadata::of::<Child>().alias("thing"))
            .unwrap_err();
        assert!(matches!(
            err,
            RegisterError::DuplicateTypeRegistration(DuplicateTypeRegistrationError::Alias { .. })
        ));
        assert!(!registry.contains_type::<Child>());

        // re-registering under a new alias frees the old one
        registry
            .register_type(TypeMetadata::of::<Parent>().alias("renamed"))
            .unwrap();
        assert!(registry.get_with_alias("thing").is_none());
        assert!(registry.get_with_alias("renamed").is_some());
    }

    #[test]
    fn failed_registration_stores_nothing() {
        let mut registry = TypeReportRegistry::new();
        let err = registry
            .register_type(TypeMetadata::of::<Parent>().attribute("a", [("groups", "oops")]))
            .unwrap_err();
        assert!(matches!(err, RegisterError::AnnotationParse(_)));
        assert!(registry.is_empty());
    }

    #[derive(Record, Default)]
    struct Leaf {
        value: i32,
    }

    #[derive(Record, Default)]
    struct Branch {
        leaves: Vec<Leaf>,
        next: Option<Box<Branch>>,
    }

    #[test]
    fn register_follows_dependencies() {
        let mut registry = TypeReportRegistry::new();
        registry.register::<Branch>().unwrap();
        assert!(registry.contains_type::<Leaf>());
        assert_eq!(registry.len(), 2);

        // skipped without error
        registry.set_policy(DuplicatePolicy::Reject);
        registry.register::<Branch>().unwrap();

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.policy(), DuplicatePolicy::Reject);
    }
}

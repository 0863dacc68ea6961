use alloc::string::String;
use alloc::sync::Arc;
use core::any::type_name;
use std::sync::{PoisonError, RwLock};

use aj_reflect::dynamic::Dynamic;
use aj_reflect::info::{TypeHint, Typed};
use aj_reflect::registry::{AttributeReport, GetTypeMetadata, Groups, RegisterError};
use aj_reflect::registry::{TypeMetadata, TypeReportRegistry, TypeReportRegistryArc};
use aj_reflect::{FromDynamic, Reflect};
use serde_json::Value;

use crate::config::CodecConfig;
use crate::de::DeserializeDriver;
use crate::error::{DeserializeError, TypeMismatchError};
use crate::handler::HandlerTable;
use crate::ser::SerializeDriver;

// -----------------------------------------------------------------------------
// Codec

/// Converts reflected values to and from JSON trees.
///
/// The codec owns (or shares) a [`TypeReportRegistryArc`] and a table of
/// serialize handlers. Serialization locks the registry only to look up
/// each report, so handlers may register types. Deserialization holds the
/// read lock for the whole call, constructors must not register types.
///
/// # Examples
///
/// ```rust
/// use aj_codec::Codec;
/// use aj_reflect::derive::Record;
/// use aj_reflect::registry::Groups;
///
/// #[derive(Record, Default, Debug, PartialEq)]
/// struct Car {
///     #[aj(groups("basic", "detailed"))]
///     max_speed: u32,
///     #[aj(groups("detailed"))]
///     brand: String,
/// }
///
/// let codec = Codec::new();
/// codec.register::<Car>().unwrap();
///
/// let car = Car { max_speed: 140, brand: "ford".into() };
/// let basic = Groups::from_iter(["basic"]);
/// assert_eq!(codec.serialize(&car, Some(&basic)), r#"{"max_speed":140}"#);
///
/// let text = codec.serialize(&car, None);
/// assert_eq!(codec.deserialize::<Car>(&text).unwrap(), car);
/// ```
#[derive(Default)]
pub struct Codec {
    registry: TypeReportRegistryArc,
    handlers: RwLock<Arc<HandlerTable>>,
    config: CodecConfig,
}

impl Codec {
    /// A codec with the default config and its own registry.
    #[inline]
    pub fn new() -> Self {
        Self::with_config(CodecConfig::new())
    }

    pub fn with_config(config: CodecConfig) -> Self {
        let registry = TypeReportRegistry::with_policy(config.duplicate_policy);
        Self::with_registry(TypeReportRegistryArc::new(registry), config)
    }

    /// A codec sharing `registry`, whose policy is left untouched.
    pub fn with_registry(registry: TypeReportRegistryArc, config: CodecConfig) -> Self {
        Self {
            registry,
            handlers: RwLock::default(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    #[inline]
    pub fn registry(&self) -> &TypeReportRegistryArc {
        &self.registry
    }

    // -------------------------------------------------------------------------
    // Registration

    /// See [`TypeReportRegistry::register`].
    pub fn register<T: GetTypeMetadata>(&self) -> Result<(), RegisterError> {
        self.registry.write().register::<T>()
    }

    /// See [`TypeReportRegistry::register_type`].
    pub fn register_type(&self, metadata: TypeMetadata) -> Result<(), RegisterError> {
        self.registry.write().register_type(metadata)
    }

    pub fn clear_registry(&self) {
        self.registry.write().clear();
    }

    /// Serializes every `T` through `handler`, wherever it appears.
    ///
    /// ```rust
    /// # use aj_codec::Codec;
    /// # use aj_reflect::dynamic::Dynamic;
    /// let codec = Codec::new();
    /// codec.add_serialize_handler(|v: &u8, _, _| Dynamic::from(format!("0x{v:02x}")));
    /// assert_eq!(codec.serialize(&vec![10_u8, 255], None), r#"["0x0a","0xff"]"#);
    /// ```
    pub fn add_serialize_handler<T, F>(&self, handler: F)
    where
        T: Reflect,
        F: Fn(&T, Option<&Groups>, Option<&AttributeReport>) -> Dynamic + Send + Sync + 'static,
    {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        Arc::make_mut(&mut *handlers).insert::<T, F>(handler);
    }

    /// Returns `true` if a handler was removed.
    pub fn remove_serialize_handler<T: Reflect>(&self) -> bool {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        Arc::make_mut(&mut *handlers).remove::<T>()
    }

    // -------------------------------------------------------------------------
    // Serialization

    /// Builds the JSON tree of `value`.
    ///
    /// With `groups`, only attributes that are untagged or share a tag with
    /// it are emitted.
    pub fn to_tree(&self, value: &dyn Reflect, groups: Option<&Groups>) -> Value {
        // Handlers may add or remove handlers, so the table is not kept locked.
        let handlers = Arc::clone(&*self.handlers.read().unwrap_or_else(PoisonError::into_inner));
        SerializeDriver::new(&self.registry, &handlers, groups, &self.config).to_tree(value)
    }

    /// [`to_tree`](Self::to_tree) rendered as compact JSON text.
    pub fn serialize(&self, value: &dyn Reflect, groups: Option<&Groups>) -> String {
        self.to_tree(value, groups).to_string()
    }

    // -------------------------------------------------------------------------
    // Deserialization

    pub fn from_tree<T: FromDynamic + Typed>(&self, tree: Value) -> Result<T, DeserializeError> {
        self.from_tree_with(tree, &[])
    }

    /// Like [`from_tree`](Self::from_tree), passing `args` to the
    /// constructor of the top-level record.
    pub fn from_tree_with<T: FromDynamic + Typed>(
        &self,
        tree: Value,
        args: &[Dynamic],
    ) -> Result<T, DeserializeError> {
        let value = {
            let registry = self.registry.read();
            DeserializeDriver::new(&registry, &self.config).decode_root(tree, &T::type_hint(), args)?
        };
        T::from_dynamic(value).map_err(|err| {
            TypeMismatchError {
                type_path: type_name::<T>(),
                attribute: None,
                reason: err.to_string(),
            }
            .into()
        })
    }

    /// Decodes without a target type.
    pub fn from_tree_dynamic(&self, tree: Value) -> Result<Dynamic, DeserializeError> {
        let registry = self.registry.read();
        DeserializeDriver::new(&registry, &self.config).decode_root(tree, &TypeHint::Any, &[])
    }

    /// Decodes the record registered under `alias`.
    ///
    /// An array yields a list of records, each built with `args`.
    pub fn from_tree_as(
        &self,
        tree: Value,
        alias: &str,
        args: &[Dynamic],
    ) -> Result<Dynamic, DeserializeError> {
        let registry = self.registry.read();
        DeserializeDriver::new(&registry, &self.config).decode_alias(tree, alias, args)
    }

    pub fn deserialize<T: FromDynamic + Typed>(&self, text: &str) -> Result<T, DeserializeError> {
        self.from_tree(serde_json::from_str(text)?)
    }

    pub fn deserialize_with<T: FromDynamic + Typed>(
        &self,
        text: &str,
        args: &[Dynamic],
    ) -> Result<T, DeserializeError> {
        self.from_tree_with(serde_json::from_str(text)?, args)
    }

    pub fn deserialize_dynamic(&self, text: &str) -> Result<Dynamic, DeserializeError> {
        self.from_tree_dynamic(serde_json::from_str(text)?)
    }

    pub fn deserialize_as(
        &self,
        text: &str,
        alias: &str,
        args: &[Dynamic],
    ) -> Result<Dynamic, DeserializeError> {
        self.from_tree_as(serde_json::from_str(text)?, alias, args)
    }
}

impl core::fmt::Debug for Codec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Codec")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

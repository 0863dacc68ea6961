use alloc::string::String;

use aj_reflect::registry::ConstructError;
use thiserror::Error;

/// A required attribute is missing or null.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{type_path}.{attribute}` is required")]
pub struct EmptyRequiredAttributeError {
    pub type_path: &'static str,
    pub attribute: String,
}

/// A value does not fit the declared type of its attribute.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("type mismatch on `{type_path}{}`: {reason}", attribute_suffix(.attribute))]
pub struct TypeMismatchError {
    pub type_path: &'static str,
    pub attribute: Option<String>,
    pub reason: String,
}

fn attribute_suffix(attribute: &Option<String>) -> String {
    attribute
        .as_deref()
        .map(|name| alloc::format!(".{name}"))
        .unwrap_or_default()
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error(transparent)]
    EmptyRequiredAttribute(#[from] EmptyRequiredAttributeError),
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatchError),
}

/// A JSON key names an attribute that is serialized under another key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{key}` on `{type_path}` is the attribute `{attribute}`, whose wire name differs")]
pub struct AmbiguousAttributeNameError {
    pub type_path: &'static str,
    pub key: String,
    pub attribute: String,
}

/// Failure of a `from_tree*` or `deserialize*` call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeserializeError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    AmbiguousAttributeName(#[from] AmbiguousAttributeNameError),
    #[error("`{type_path}` is not registered")]
    UnregisteredType { type_path: &'static str },
    #[error("no type is registered under the alias `{0}`")]
    UnknownAlias(String),
    #[error(transparent)]
    Construct(#[from] ConstructError),
}

impl From<EmptyRequiredAttributeError> for DeserializeError {
    #[inline]
    fn from(value: EmptyRequiredAttributeError) -> Self {
        Self::Validation(value.into())
    }
}

impl From<TypeMismatchError> for DeserializeError {
    #[inline]
    fn from(value: TypeMismatchError) -> Self {
        Self::Validation(value.into())
    }
}

use alloc::string::String;

use thiserror::Error;

/// Malformed attribute metadata.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid `{option}` on `{type_path}.{attribute}`: {reason}")]
pub struct AnnotationParseError {
    pub type_path: &'static str,
    pub attribute: String,
    pub option: String,
    pub reason: String,
}

/// A type or alias is already taken.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DuplicateTypeRegistrationError {
    #[error("type `{type_path}` is already registered")]
    Type { type_path: &'static str },
    #[error("alias `{alias}` is already used by `{owner}`")]
    Alias { alias: String, owner: &'static str },
}

/// Registration of a type failed, the registry is unchanged for that type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegisterError {
    #[error(transparent)]
    AnnotationParse(#[from] AnnotationParseError),
    #[error(transparent)]
    DuplicateTypeRegistration(#[from] DuplicateTypeRegistrationError),
    #[error("`{type_path}` maps both `{first}` and `{second}` to the wire name `{wire_name}`")]
    DuplicateWireName {
        type_path: &'static str,
        wire_name: String,
        first: String,
        second: String,
    },
}

/// No attribute uses the requested wire name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{type_path}` has no attribute with the wire name `{wire_name}`")]
pub struct AttributeNotFound {
    pub type_path: &'static str,
    pub wire_name: String,
}

/// A registered constructor could not build an instance.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConstructError {
    #[error("`{type_path}` has no constructor")]
    Missing { type_path: &'static str },
    #[error("`{type_path}` takes no constructor arguments, {count} given")]
    UnexpectedArguments { type_path: &'static str, count: usize },
    #[error("constructing `{type_path}` failed: {reason}")]
    Failed {
        type_path: &'static str,
        reason: String,
    },
}

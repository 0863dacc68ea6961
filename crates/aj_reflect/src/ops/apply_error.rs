use alloc::borrow::Cow;
use alloc::string::String;

use thiserror::Error;

/// A [`Dynamic`](crate::dynamic::Dynamic) could not be converted into the
/// requested type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApplyError {
    #[error("expected {expected}, found {found}")]
    MismatchedTypes {
        expected: Cow<'static, str>,
        found: Cow<'static, str>,
    },
    #[error("expected {expected} elements, found {found}")]
    DifferentSize { expected: usize, found: usize },
    #[error("`{value}` is out of range for `{target}`")]
    OutOfRange {
        value: String,
        target: &'static str,
    },
    #[error("map key `{key}` cannot be converted: {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: alloc::boxed::Box<ApplyError>,
    },
}

impl ApplyError {
    #[inline]
    pub fn mismatched(
        expected: impl Into<Cow<'static, str>>,
        found: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::MismatchedTypes {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

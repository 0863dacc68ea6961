use aj_reflect::registry::DuplicatePolicy;

/// How timestamps appear on the wire.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeEncoding {
    /// A string in the attribute's `d_format`.
    #[default]
    Formatted,
    /// The legacy object `{"__date_time__": <epoch millis>}`.
    EpochMillis,
}

/// Settings of a [`Codec`](crate::Codec).
///
/// ```rust
/// # use aj_codec::{CodecConfig, DateTimeEncoding};
/// let config = CodecConfig::default()
///     .with_max_depth(4)
///     .with_datetime_encoding(DateTimeEncoding::EpochMillis);
/// assert_eq!(config.max_depth, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Nesting level after which values are replaced by `"..."`.
    pub max_depth: usize,
    pub datetime_encoding: DateTimeEncoding,
    /// Applied to the registry when the codec creates it.
    pub duplicate_policy: DuplicatePolicy,
}

impl CodecConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 15;

    #[inline]
    pub const fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            datetime_encoding: DateTimeEncoding::Formatted,
            duplicate_policy: DuplicatePolicy::Replace,
        }
    }

    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub const fn with_datetime_encoding(mut self, encoding: DateTimeEncoding) -> Self {
        self.datetime_encoding = encoding;
        self
    }

    #[inline]
    pub const fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}

impl Default for CodecConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

//! Error types for qurl.

use thiserror::Error;

/// The main error type for compile operations.
///
/// None of these are retried internally; a failed compile yields no usable
/// query string.
#[derive(Debug, Error)]
pub enum QurlError {
    /// The remote API has no way to express this clause.
    #[error("Unsupported predicate kind '{kind}'")]
    UnsupportedPredicate { kind: String },

    /// Inline sub-builders cannot be rendered into a field list.
    #[error("Sub-queries in select statements are currently not supported")]
    UnsupportedSelectExpression,

    /// A feature is switched off for this connection profile.
    #[error("{0} is not enabled for this connection")]
    FeatureDisabled(&'static str),

    /// A non-scalar slipped through normalization.
    #[error("Value for param '{key}' should be a string or an integer, got {value}")]
    InvalidParamValue { key: String, value: String },

    /// The compiled url exceeds the configured length cap.
    #[error("Compiled url is {length} bytes, over the {max} byte limit")]
    UrlTooLong { length: usize, max: usize },

    /// A limit at or above the page size cannot be expressed as `per_page`.
    #[error("Limit {limit} exceeds the configured page size {page_size}")]
    LimitExceedsPageSize { limit: u64, page_size: u64 },
}

impl QurlError {
    /// Create an invalid-param error for the given key.
    pub fn invalid_param(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidParamValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Result type alias for compile operations.
pub type QurlResult<T> = Result<T, QurlError>;

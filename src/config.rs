//! Per-connection compiler configuration.

use std::collections::HashSet;

use chrono_tz::Tz;
use serde::Deserialize;

/// Default cap on compiled url length.
pub const MAX_URL_LENGTH: usize = 2048;

/// Default chunk size when splitting an over-long url.
pub const SPLIT_BATCH_SIZE: usize = 200;

/// Params emitted bare instead of wrapped as `filter[...]`.
pub const RESERVED_PARAMS: &[&str] = &[
    "sort",
    "page",
    "per_page",
    "nested",
    "queryType",
    "fields",
    "selectRaw",
    "limit",
    "offset",
    "groupBy",
];

/// Source/target zone pair for datetime normalization.
///
/// Naive query values are interpreted in `source` and rewritten to the
/// equivalent wall clock in `target`, the zone the remote API stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimezonePair {
    pub source: Tz,
    pub target: Tz,
}

/// What to do when a compiled url exceeds `max_url_length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LongUrlPolicy {
    /// Abort the compile with `UrlTooLong`.
    #[default]
    Fail,
    /// Chunk the list filter with the most elements into batches and emit
    /// one url per chunk.
    Split { batch: usize },
}

impl LongUrlPolicy {
    /// Splitting policy with the default batch size.
    pub fn split() -> Self {
        Self::Split {
            batch: SPLIT_BATCH_SIZE,
        }
    }
}

/// Connection-scoped settings consumed by the compiler.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Separator used when joining array values into one param.
    pub array_value_separator: char,
    /// Columns whose values get timezone normalization.
    pub datetime_columns: HashSet<String>,
    pub timezone: Option<TimezonePair>,
    /// Nullable timestamp column marking logical deletion.
    pub soft_delete_column: Option<String>,
    /// Params never wrapped as `filter[...]`.
    pub reserved_params: HashSet<String>,
    /// Length cap for compiled urls; `None` disables the check.
    pub max_url_length: Option<usize>,
    pub long_url: LongUrlPolicy,
    /// When set, limits compile to `per_page` and must stay below this.
    pub page_size: Option<u64>,
    /// Whether the remote API accepts full-text predicates.
    pub fulltext: bool,
    /// Params seeded into every compiled query.
    pub default_params: Vec<(String, String)>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            array_value_separator: ',',
            datetime_columns: HashSet::new(),
            timezone: None,
            soft_delete_column: None,
            reserved_params: RESERVED_PARAMS.iter().map(|s| s.to_string()).collect(),
            max_url_length: Some(MAX_URL_LENGTH),
            long_url: LongUrlPolicy::Fail,
            page_size: None,
            fulltext: false,
            default_params: Vec::new(),
        }
    }
}

impl CompilerConfig {
    /// Whether `key` is emitted bare rather than filter-wrapped.
    pub fn is_reserved(&self, key: &str) -> bool {
        self.reserved_params.contains(key)
    }

    /// Whether values for `column` get timezone normalization.
    pub fn is_datetime_column(&self, column: &str) -> bool {
        self.timezone.is_some() && self.datetime_columns.contains(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompilerConfig::default();
        assert_eq!(config.array_value_separator, ',');
        assert_eq!(config.max_url_length, Some(MAX_URL_LENGTH));
        assert!(config.is_reserved("queryType"));
        assert!(config.is_reserved("per_page"));
        assert!(!config.is_reserved("trashed"));
        assert!(!config.is_datetime_column("created_at"));
    }

    #[test]
    fn test_deserializes_timezones_from_names() {
        let config: CompilerConfig = serde_json::from_value(serde_json::json!({
            "timezone": { "source": "UTC", "target": "America/New_York" },
            "datetime_columns": ["created_at"],
            "long_url": { "split": { "batch": 100 } },
        }))
        .unwrap();

        assert!(config.is_datetime_column("created_at"));
        assert_eq!(config.long_url, LongUrlPolicy::Split { batch: 100 });
    }
}

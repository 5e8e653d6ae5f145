//! Per-value normalization applied before serialization.

use chrono::NaiveDateTime;

use crate::ast::Value;
use crate::compiler::params::ParamValue;
use crate::config::{CompilerConfig, TimezonePair};

/// Wire format for wall-clock timestamps.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamps in the wire format are exactly this long; anything else is
/// not treated as a datetime.
const DATETIME_LEN: usize = 19;

/// Applies the per-value transforms: timezone conversion for configured
/// datetime columns and array flattening into a joinable list.
pub(crate) struct ValueNormalizer<'a> {
    config: &'a CompilerConfig,
}

impl<'a> ValueNormalizer<'a> {
    pub fn new(config: &'a CompilerConfig) -> Self {
        Self { config }
    }

    /// Normalize one predicate value for the given column key.
    pub fn normalize(&self, column: &str, value: Value) -> ParamValue {
        let value = match self.config.timezone {
            Some(zones) if self.config.is_datetime_column(column) => {
                convert_timezone(value, &zones)
            }
            _ => value,
        };

        match value {
            Value::Array(items) => ParamValue::List(items),
            scalar => ParamValue::Scalar(scalar),
        }
    }
}

fn convert_timezone(value: Value, zones: &TimezonePair) -> Value {
    match value {
        Value::String(s) if s.len() == DATETIME_LEN => match shift_wall_clock(&s, zones) {
            Some(shifted) => Value::String(shifted),
            None => Value::String(s),
        },
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| convert_timezone(item, zones))
                .collect(),
        ),
        other => other,
    }
}

/// Reinterpret a naive `YYYY-MM-DD HH:MM:SS` string in the source zone and
/// reformat it in the target zone. `None` when the string does not parse
/// or the local time is ambiguous/skipped across a DST transition.
fn shift_wall_clock(value: &str, zones: &TimezonePair) -> Option<String> {
    let naive = NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).ok()?;
    let sourced = naive.and_local_timezone(zones.source).single()?;

    Some(
        sourced
            .with_timezone(&zones.target)
            .format(DATETIME_FORMAT)
            .to_string(),
    )
}

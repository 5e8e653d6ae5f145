//! URL query-string wire codec.
//!
//! Encoding walks the ordered param map: values are validated down to
//! string/integer scalars (booleans coerce to `0`/`1`), lists are joined
//! with the configured separator, keys outside the reserved set are wrapped
//! as `filter[key]` and values are percent-encoded. Decoding is the
//! inverse, with `filter[...]` keys accumulated multi-valued so repeated
//! inner names survive the round trip.

use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::ast::Value;
use crate::compiler::params::{ParamValue, UrlParams};
use crate::config::CompilerConfig;
use crate::error::{QurlError, QurlResult};

/// Everything except `[0-9A-Za-z]`, `-`, `_` and `.` is percent-encoded.
const QUERY_ENCODE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Serialize the param map into the wire query string.
pub fn encode_params(params: &UrlParams, config: &CompilerConfig) -> QurlResult<String> {
    let mut query = String::new();

    for (index, (key, value)) in params.iter().enumerate() {
        if index > 0 {
            query.push('&');
        }

        if config.is_reserved(key) {
            query.push_str(key);
        } else {
            // Keys are emitted raw; their `:`/`[`/`]` segments are part of
            // the wire contract the receiving service splits on.
            let _ = write!(query, "filter[{}]", key);
        }
        query.push('=');

        let rendered = render_value(key, value, config)?;
        let _ = write!(query, "{}", utf8_percent_encode(&rendered, QUERY_ENCODE));
    }

    Ok(query)
}

fn render_value(key: &str, value: &ParamValue, config: &CompilerConfig) -> QurlResult<String> {
    match value {
        ParamValue::Scalar(scalar) => render_scalar(key, scalar),
        ParamValue::List(items) => {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| render_scalar(key, item))
                .collect::<QurlResult<_>>()?;

            Ok(rendered.join(&config.array_value_separator.to_string()))
        }
    }
}

fn render_scalar(key: &str, value: &Value) -> QurlResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Int(n) => Ok(n.to_string()),
        // Everything is a string in a url; booleans travel as integers.
        Value::Bool(b) => Ok((*b as i64).to_string()),
        Value::Uuid(u) => Ok(u.to_string()),
        other => Err(QurlError::invalid_param(key, other.to_string())),
    }
}

/// Parameters recovered from a wire query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedParams {
    /// Inner names of `filter[...]` keys, multi-valued, in first-seen order.
    pub filters: Vec<(String, Vec<String>)>,
    /// Bare (reserved) params.
    pub params: Vec<(String, String)>,
}

impl DecodedParams {
    pub fn filter(&self, name: &str) -> Option<&[String]> {
        self.filters
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Parse a wire query string back into parameters.
pub fn parse_query(query: &str) -> DecodedParams {
    let mut decoded = DecodedParams::default();

    for part in query.split('&') {
        let Some((key, raw_value)) = part.split_once('=') else {
            continue;
        };
        let value = percent_decode_str(raw_value)
            .decode_utf8_lossy()
            .into_owned();

        let inner = key
            .strip_prefix("filter[")
            .and_then(|rest| rest.strip_suffix(']'));

        match inner {
            Some(name) => match decoded.filters.iter_mut().find(|(key, _)| key == name) {
                Some((_, values)) => values.push(value),
                None => decoded.filters.push((name.to_string(), vec![value])),
            },
            None => decoded.params.push((key.to_string(), value)),
        }
    }

    decoded
}

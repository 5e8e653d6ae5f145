//! Insertion-ordered url parameter accumulation.

use serde::{Deserialize, Serialize};

use crate::ast::Value;

/// A single url parameter value.
///
/// Lists stay unjoined until the codec renders them, so the url-splitting
/// policy can still chunk the largest one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Scalar(Value),
    List(Vec<Value>),
}

impl ParamValue {
    /// Number of list elements; zero for scalars.
    pub fn list_len(&self) -> usize {
        match self {
            ParamValue::Scalar(_) => 0,
            ParamValue::List(items) => items.len(),
        }
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            // A scalar wrapping an array would be rejected by the codec;
            // flatten it into a list up front.
            Value::Array(items) => ParamValue::List(items),
            scalar => ParamValue::Scalar(scalar),
        }
    }
}

impl From<Vec<Value>> for ParamValue {
    fn from(values: Vec<Value>) -> Self {
        ParamValue::List(values)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Scalar(Value::String(s.to_string()))
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Scalar(Value::Int(n))
    }
}

/// Ordered key/value parameter map. Insertion order is preserved into the
/// final url; setting an existing key overwrites in place.
///
/// Key uniqueness is guaranteed by construction (nest prefix + connective +
/// identifier + operator suffix), so overwrites only happen for deliberate
/// re-sets like the `trashed` default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlParams {
    entries: Vec<(String, ParamValue)>,
}

impl UrlParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, ParamValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn value_at_mut(&mut self, index: usize) -> &mut ParamValue {
        &mut self.entries[index].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut params = UrlParams::new();
        params.set("b", 2i64);
        params.set("a", 1i64);
        params.set("c", 3i64);

        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut params = UrlParams::new();
        params.set("trashed", "with");
        params.set("limit", 10i64);
        params.set("trashed", "only");

        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["trashed", "limit"]);
        assert_eq!(
            params.get("trashed"),
            Some(&ParamValue::Scalar(Value::String("only".into())))
        );
    }
}

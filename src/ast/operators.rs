use serde::{Deserialize, Serialize};

/// Logical connective between predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Connective {
    #[default]
    And,
    Or,
}

impl std::fmt::Display for Connective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Connective::And => write!(f, "and"),
            Connective::Or => write!(f, "or"),
        }
    }
}

/// Sort direction for order entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// Canonical comparison/bitwise operator symbols mapped to short URL-safe
/// aliases. Both `<>` and `!=` resolve to `ne`.
pub const OPERATOR_ALIASES: &[(&str, &str)] = &[
    ("=", "e"),
    ("<", "lt"),
    (">", "gt"),
    ("<=", "lte"),
    (">=", "gte"),
    ("<>", "ne"),
    ("!=", "ne"),
    ("|", "bo"),
    ("^", "beo"),
    ("<<", "ls"),
    (">>", "rs"),
    ("&", "ba"),
    ("&~", "bai"),
    ("~", "bi"),
    ("~*", "bim"),
    ("!~", "nbi"),
    ("!~*", "nbim"),
    ("~~*", "bibim"),
    ("!~~*", "nbibim"),
];

/// Resolve an operator symbol to its URL-safe alias.
///
/// Operators absent from the table pass through unchanged; spaces in the
/// result are replaced with `_` so multi-word operators stay a single key
/// segment.
pub fn url_safe_operator(operator: &str) -> String {
    let alias = OPERATOR_ALIASES
        .iter()
        .find(|(symbol, _)| *symbol == operator)
        .map(|(_, alias)| *alias)
        .unwrap_or(operator);

    alias.replace(' ', "_")
}

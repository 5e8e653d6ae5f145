use serde::{Deserialize, Serialize};

use crate::ast::{Connective, Value};

/// One node of a query's where tree.
///
/// Leaf kinds carry a column (or raw fragment) and operator/value(s); group
/// kinds own an ordered sub-tree combined by one boolean connective. The
/// enum is closed on purpose: the compiler matches exhaustively, so a query
/// the remote API cannot express fails at compile time of this crate, not
/// at runtime of the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// `column OP value`
    Comparison {
        connective: Connective,
        column: String,
        operator: String,
        value: Value,
    },
    /// `first OP second`, comparing two columns
    ColumnComparison {
        connective: Connective,
        first: String,
        operator: String,
        second: String,
    },
    /// `column IN (values)`
    In {
        connective: Connective,
        column: String,
        values: Vec<Value>,
    },
    /// `column IN (values)` with pre-rendered values
    InRaw {
        connective: Connective,
        column: String,
        values: Vec<Value>,
    },
    /// `column NOT IN (values)`
    NotIn {
        connective: Connective,
        column: String,
        values: Vec<Value>,
    },
    /// `column NOT IN (values)` with pre-rendered values
    NotInRaw {
        connective: Connective,
        column: String,
        values: Vec<Value>,
    },
    /// `column BETWEEN low AND high`
    Between {
        connective: Connective,
        column: String,
        low: Value,
        high: Value,
    },
    /// `column NOT BETWEEN low AND high`
    NotBetween {
        connective: Connective,
        column: String,
        low: Value,
        high: Value,
    },
    /// `column IS NULL`
    IsNull {
        connective: Connective,
        column: String,
    },
    /// `column IS NOT NULL`
    IsNotNull {
        connective: Connective,
        column: String,
    },
    /// Full-text match; compiles only when the connection profile enables it
    FullText {
        connective: Connective,
        column: String,
        value: Value,
    },
    /// Date-part comparison on the full date
    Date {
        connective: Connective,
        column: String,
        operator: String,
        value: Value,
    },
    /// Date-part comparison on the day of month
    Day {
        connective: Connective,
        column: String,
        operator: String,
        value: Value,
    },
    /// Date-part comparison on the year
    Year {
        connective: Connective,
        column: String,
        operator: String,
        value: Value,
    },
    /// Time-of-day comparison
    Time {
        connective: Connective,
        column: String,
        operator: String,
        value: Value,
    },
    /// Raw fragment forwarded verbatim, keyed by a synthetic id
    Raw { connective: Connective, sql: String },
    /// Parenthesized sub-tree
    Nested {
        connective: Connective,
        predicates: Vec<Predicate>,
    },
    /// EXISTS sub-tree
    Exists {
        connective: Connective,
        predicates: Vec<Predicate>,
    },
    /// NOT EXISTS sub-tree
    NotExists {
        connective: Connective,
        predicates: Vec<Predicate>,
    },
}

impl Predicate {
    /// The boolean connective joining this node to its predecessor.
    pub fn connective(&self) -> Connective {
        match self {
            Predicate::Comparison { connective, .. }
            | Predicate::ColumnComparison { connective, .. }
            | Predicate::In { connective, .. }
            | Predicate::InRaw { connective, .. }
            | Predicate::NotIn { connective, .. }
            | Predicate::NotInRaw { connective, .. }
            | Predicate::Between { connective, .. }
            | Predicate::NotBetween { connective, .. }
            | Predicate::IsNull { connective, .. }
            | Predicate::IsNotNull { connective, .. }
            | Predicate::FullText { connective, .. }
            | Predicate::Date { connective, .. }
            | Predicate::Day { connective, .. }
            | Predicate::Year { connective, .. }
            | Predicate::Time { connective, .. }
            | Predicate::Raw { connective, .. }
            | Predicate::Nested { connective, .. }
            | Predicate::Exists { connective, .. }
            | Predicate::NotExists { connective, .. } => *connective,
        }
    }

    /// Lowercased kind name, as embedded in synthetic param keys.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Predicate::Comparison { .. } => "basic",
            Predicate::ColumnComparison { .. } => "column",
            Predicate::In { .. } => "in",
            Predicate::InRaw { .. } => "in_raw",
            Predicate::NotIn { .. } => "not_in",
            Predicate::NotInRaw { .. } => "not_in_raw",
            Predicate::Between { .. } => "between",
            Predicate::NotBetween { .. } => "not_between",
            Predicate::IsNull { .. } => "is_null",
            Predicate::IsNotNull { .. } => "is_not_null",
            Predicate::FullText { .. } => "fulltext",
            Predicate::Date { .. } => "date",
            Predicate::Day { .. } => "day",
            Predicate::Year { .. } => "year",
            Predicate::Time { .. } => "time",
            Predicate::Raw { .. } => "raw",
            Predicate::Nested { .. } => "nested",
            Predicate::Exists { .. } => "exists",
            Predicate::NotExists { .. } => "not_exists",
        }
    }

    /// Rewrite this node's connective to `or`, for use after the builder
    /// helpers which default to `and`.
    pub fn or(mut self) -> Self {
        match &mut self {
            Predicate::Comparison { connective, .. }
            | Predicate::ColumnComparison { connective, .. }
            | Predicate::In { connective, .. }
            | Predicate::InRaw { connective, .. }
            | Predicate::NotIn { connective, .. }
            | Predicate::NotInRaw { connective, .. }
            | Predicate::Between { connective, .. }
            | Predicate::NotBetween { connective, .. }
            | Predicate::IsNull { connective, .. }
            | Predicate::IsNotNull { connective, .. }
            | Predicate::FullText { connective, .. }
            | Predicate::Date { connective, .. }
            | Predicate::Day { connective, .. }
            | Predicate::Year { connective, .. }
            | Predicate::Time { connective, .. }
            | Predicate::Raw { connective, .. }
            | Predicate::Nested { connective, .. }
            | Predicate::Exists { connective, .. }
            | Predicate::NotExists { connective, .. } => *connective = Connective::Or,
        }
        self
    }
}

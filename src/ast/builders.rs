//! Predicate constructors for building where trees.
//!
//! Every helper defaults the connective to `and`; chain
//! [`Predicate::or`](crate::ast::Predicate::or) to flip it.

use crate::ast::{Connective, Predicate, Value};

/// Create a comparison with an arbitrary operator (`column OP value`).
pub fn cmp(column: &str, operator: &str, value: impl Into<Value>) -> Predicate {
    Predicate::Comparison {
        connective: Connective::And,
        column: column.to_string(),
        operator: operator.to_string(),
        value: value.into(),
    }
}

/// Create an equality comparison (column = value)
pub fn eq(column: &str, value: impl Into<Value>) -> Predicate {
    cmp(column, "=", value)
}

/// Create a not-equal comparison (column != value)
pub fn ne(column: &str, value: impl Into<Value>) -> Predicate {
    cmp(column, "!=", value)
}

/// Create a greater-than comparison (column > value)
pub fn gt(column: &str, value: impl Into<Value>) -> Predicate {
    cmp(column, ">", value)
}

/// Create a greater-than-or-equal comparison (column >= value)
pub fn gte(column: &str, value: impl Into<Value>) -> Predicate {
    cmp(column, ">=", value)
}

/// Create a less-than comparison (column < value)
pub fn lt(column: &str, value: impl Into<Value>) -> Predicate {
    cmp(column, "<", value)
}

/// Create a less-than-or-equal comparison (column <= value)
pub fn lte(column: &str, value: impl Into<Value>) -> Predicate {
    cmp(column, "<=", value)
}

/// Create a column-to-column comparison (first OP second)
pub fn col_cmp(first: &str, operator: &str, second: &str) -> Predicate {
    Predicate::ColumnComparison {
        connective: Connective::And,
        first: first.to_string(),
        operator: operator.to_string(),
        second: second.to_string(),
    }
}

fn collect<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Vec<Value> {
    values.into_iter().map(|v| v.into()).collect()
}

/// Create an IN predicate (column IN (values))
pub fn is_in<V: Into<Value>>(column: &str, values: impl IntoIterator<Item = V>) -> Predicate {
    Predicate::In {
        connective: Connective::And,
        column: column.to_string(),
        values: collect(values),
    }
}

/// Create an IN predicate over pre-rendered values
pub fn in_raw<V: Into<Value>>(column: &str, values: impl IntoIterator<Item = V>) -> Predicate {
    Predicate::InRaw {
        connective: Connective::And,
        column: column.to_string(),
        values: collect(values),
    }
}

/// Create a NOT IN predicate (column NOT IN (values))
pub fn not_in<V: Into<Value>>(column: &str, values: impl IntoIterator<Item = V>) -> Predicate {
    Predicate::NotIn {
        connective: Connective::And,
        column: column.to_string(),
        values: collect(values),
    }
}

/// Create a NOT IN predicate over pre-rendered values
pub fn not_in_raw<V: Into<Value>>(column: &str, values: impl IntoIterator<Item = V>) -> Predicate {
    Predicate::NotInRaw {
        connective: Connective::And,
        column: column.to_string(),
        values: collect(values),
    }
}

/// Create a BETWEEN predicate (column BETWEEN low AND high)
pub fn between(column: &str, low: impl Into<Value>, high: impl Into<Value>) -> Predicate {
    Predicate::Between {
        connective: Connective::And,
        column: column.to_string(),
        low: low.into(),
        high: high.into(),
    }
}

/// Create a NOT BETWEEN predicate
pub fn not_between(column: &str, low: impl Into<Value>, high: impl Into<Value>) -> Predicate {
    Predicate::NotBetween {
        connective: Connective::And,
        column: column.to_string(),
        low: low.into(),
        high: high.into(),
    }
}

/// Create an IS NULL predicate
pub fn is_null(column: &str) -> Predicate {
    Predicate::IsNull {
        connective: Connective::And,
        column: column.to_string(),
    }
}

/// Create an IS NOT NULL predicate
pub fn is_not_null(column: &str) -> Predicate {
    Predicate::IsNotNull {
        connective: Connective::And,
        column: column.to_string(),
    }
}

/// Create a full-text match predicate
pub fn fulltext(column: &str, value: impl Into<Value>) -> Predicate {
    Predicate::FullText {
        connective: Connective::And,
        column: column.to_string(),
        value: value.into(),
    }
}

/// Create a date comparison (DATE(column) OP value)
pub fn on_date(column: &str, operator: &str, value: impl Into<Value>) -> Predicate {
    Predicate::Date {
        connective: Connective::And,
        column: column.to_string(),
        operator: operator.to_string(),
        value: value.into(),
    }
}

/// Create a day-of-month comparison (DAY(column) OP value)
pub fn on_day(column: &str, operator: &str, value: impl Into<Value>) -> Predicate {
    Predicate::Day {
        connective: Connective::And,
        column: column.to_string(),
        operator: operator.to_string(),
        value: value.into(),
    }
}

/// Create a year comparison (YEAR(column) OP value)
pub fn on_year(column: &str, operator: &str, value: impl Into<Value>) -> Predicate {
    Predicate::Year {
        connective: Connective::And,
        column: column.to_string(),
        operator: operator.to_string(),
        value: value.into(),
    }
}

/// Create a time-of-day comparison (TIME(column) OP value)
pub fn on_time(column: &str, operator: &str, value: impl Into<Value>) -> Predicate {
    Predicate::Time {
        connective: Connective::And,
        column: column.to_string(),
        operator: operator.to_string(),
        value: value.into(),
    }
}

/// Create a raw where fragment, keyed by a synthetic id
pub fn raw(sql: &str) -> Predicate {
    Predicate::Raw {
        connective: Connective::And,
        sql: sql.to_string(),
    }
}

/// Create a parenthesized sub-group
pub fn nested(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
    Predicate::Nested {
        connective: Connective::And,
        predicates: predicates.into_iter().collect(),
    }
}

/// Create an EXISTS sub-group
pub fn exists(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
    Predicate::Exists {
        connective: Connective::And,
        predicates: predicates.into_iter().collect(),
    }
}

/// Create a NOT EXISTS sub-group
pub fn not_exists(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
    Predicate::NotExists {
        connective: Connective::And,
        predicates: predicates.into_iter().collect(),
    }
}

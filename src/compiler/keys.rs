//! Parameter key construction.
//!
//! A key is built from an optional nest prefix, the boolean connective, the
//! column (or a synthetic identifier) and, per emission rule, an operator
//! or type suffix: `1:and:price:gte`. Uniqueness within one compiled map
//! holds by construction, not by post-hoc checks.

use std::borrow::Cow;

use crate::ast::{Connective, Predicate};

/// Strip a `table.` qualifier, keeping everything after the last dot.
pub(crate) fn unqualify(column: &str) -> &str {
    match column.rfind('.') {
        Some(index) => &column[index + 1..],
        None => column,
    }
}

/// Rewrite predicates whose column carries a qualifier.
///
/// Qualified columns originate from eager-loaded associations, so a
/// single-value comparison on one becomes a one-element set-membership
/// filter on the unqualified name. The input node is never mutated; callers
/// keep ownership of their tree.
pub(crate) fn normalize_qualified(predicate: &Predicate) -> Cow<'_, Predicate> {
    match predicate {
        Predicate::Comparison {
            connective,
            column,
            value,
            ..
        } if column.contains('.') => Cow::Owned(Predicate::In {
            connective: *connective,
            column: unqualify(column).to_string(),
            values: vec![value.clone()],
        }),
        _ => Cow::Borrowed(predicate),
    }
}

/// Assemble the key for an identifier in the current nesting context.
///
/// Nested keys are `{cursor}:{connective}:{ident}`; top-level keys omit the
/// connective since it is implicit there.
pub(crate) fn encode_key(ident: &str, connective: Connective, cursor: Option<usize>) -> String {
    match cursor {
        Some(nest) => format!("{}:{}:{}", nest, connective, ident),
        None => ident.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::{eq, gt};
    use crate::ast::Value;

    #[test]
    fn test_unqualify() {
        assert_eq!(unqualify("price"), "price");
        assert_eq!(unqualify("items.price"), "price");
        assert_eq!(unqualify("db.items.price"), "price");
    }

    #[test]
    fn test_qualified_comparison_becomes_set_membership() {
        let predicate = eq("items.color", "blue");
        let normalized = normalize_qualified(&predicate);

        match normalized.as_ref() {
            Predicate::In { column, values, .. } => {
                assert_eq!(column, "color");
                assert_eq!(values, &[Value::String("blue".into())]);
            }
            other => panic!("expected In predicate, got {:?}", other),
        }
        // Caller's node is untouched.
        assert!(matches!(predicate, Predicate::Comparison { .. }));
    }

    #[test]
    fn test_unqualified_predicate_is_borrowed() {
        let predicate = gt("price", 100);
        assert!(matches!(
            normalize_qualified(&predicate),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_encode_key() {
        assert_eq!(encode_key("price", Connective::And, None), "price");
        assert_eq!(
            encode_key("price", Connective::Or, Some(2)),
            "2:or:price"
        );
    }
}

//! Soft-delete tests: the `trashed` default and null-check overrides.

use pretty_assertions::assert_eq;

use super::{compile, compile_with};
use crate::ast::Query;
use crate::ast::builders::*;
use crate::config::CompilerConfig;

fn config() -> CompilerConfig {
    CompilerConfig {
        soft_delete_column: Some("deleted_at".to_string()),
        ..CompilerConfig::default()
    }
}

#[test]
fn test_default_includes_trashed_rows() {
    let query = Query::from("users").filter(eq("active", true));
    assert_eq!(
        compile_with(config(), &query),
        "/users?filter[active:e]=1&filter[trashed]=with"
    );
}

#[test]
fn test_null_check_requests_live_rows() {
    let query = Query::from("users").filter(is_null("deleted_at"));
    assert_eq!(compile_with(config(), &query), "/users?filter[trashed]=0");
}

#[test]
fn test_not_null_check_requests_only_trashed() {
    let query = Query::from("users").filter(is_not_null("deleted_at"));
    assert_eq!(compile_with(config(), &query), "/users?filter[trashed]=only");
}

#[test]
fn test_nested_null_check_does_not_override() {
    // Inside a group the encoded key is no longer the bare column, so the
    // null check compiles normally and the default still applies.
    let query = Query::from("users").filter(nested([is_null("deleted_at")]));
    assert_eq!(
        compile_with(config(), &query),
        "/users?filter[0:and:deleted_at:is_null]=1&filter[trashed]=with&nested=and"
    );
}

#[test]
fn test_other_null_checks_unaffected() {
    let query = Query::from("users").filter(is_null("bio"));
    assert_eq!(
        compile_with(config(), &query),
        "/users?filter[bio:is_null]=1&filter[trashed]=with"
    );
}

#[test]
fn test_no_soft_delete_column_no_trashed_param() {
    let query = Query::from("users").filter(is_null("deleted_at"));
    assert_eq!(compile(&query), "/users?filter[deleted_at:is_null]=1");
}

//! Grouped-predicate tests: nested keys and the legend param.
//!
//! Expected legend strings are pinned exactly; the receiving service
//! rebuilds grouping from them, so any drift is a wire break.

use pretty_assertions::assert_eq;

use super::compile;
use crate::ast::Query;
use crate::ast::builders::*;

#[test]
fn test_or_group_at_root() {
    let query =
        Query::from("products").filter(nested([eq("color", "blue"), eq("size", "L")]).or());

    assert_eq!(
        compile(&query),
        "/products?filter[0:and:color:e]=blue&filter[0:and:size:e]=L&nested=or"
    );
}

#[test]
fn test_or_members_inside_group() {
    let query =
        Query::from("products").filter(nested([eq("color", "blue"), eq("color", "red").or()]));

    assert_eq!(
        compile(&query),
        "/products?filter[0:and:color:e]=blue&filter[0:or:color:e]=red&nested=and"
    );
}

#[test]
fn test_group_inside_group() {
    let query = Query::from("products").filter(nested([
        eq("a", 1),
        nested([eq("b", 2), eq("c", 3)]).or(),
    ]));

    assert_eq!(
        compile(&query),
        "/products?filter[0:and:a:e]=1\
         &filter[1:and:b:e]=2\
         &filter[1:and:c:e]=3\
         &nested=and%2C0%3Aor"
    );
}

#[test]
fn test_exists_group_suffix() {
    let query = Query::from("users").filter(exists([eq("orders.total", 0)]));

    // Qualified columns inside groups still reduce to membership filters.
    assert_eq!(
        compile(&query),
        "/users?filter[0:and:total:in]=0&nested=and%3Ae"
    );
}

#[test]
fn test_not_exists_group_suffix() {
    let query = Query::from("users").filter(not_exists([eq("banned", true)]));

    assert_eq!(
        compile(&query),
        "/users?filter[0:and:banned:e]=1&nested=and%3Ane"
    );
}

#[test]
fn test_sibling_root_groups_share_index_zero() {
    // The second root group is recorded as a child of legend index 0; the
    // cursor never returns to the root scope once a group has closed.
    let query = Query::from("products")
        .filter(nested([eq("a", 1)]))
        .filter(nested([eq("b", 2)]).or());

    assert_eq!(
        compile(&query),
        "/products?filter[0:and:a:e]=1&filter[1:and:b:e]=2&nested=and%2C0%3Aor"
    );
}

#[test]
fn test_predicate_after_group_adopts_index_zero() {
    let query = Query::from("products")
        .filter(gt("price", 5))
        .filter(nested([eq("a", 1)]))
        .filter(eq("b", 2));

    // Once a root group has closed the cursor stays at 0, so trailing
    // predicates are keyed into the first legend entry. Predicates before
    // the group keep bare keys.
    assert_eq!(
        compile(&query),
        "/products?filter[price:gt]=5&filter[0:and:a:e]=1&filter[0:and:b:e]=2&nested=and"
    );
}

#[test]
fn test_synthetic_keys_inside_groups() {
    let query = Query::from("products").filter(nested([raw("stock > 0")]).or());

    assert_eq!(
        compile(&query),
        "/products?filter[0:and:0-raw]=stock%20%3E%200&nested=or"
    );
}

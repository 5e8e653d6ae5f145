//! Timezone normalization tests for configured datetime columns.

use std::collections::HashSet;

use pretty_assertions::assert_eq;

use super::compile_with;
use crate::ast::Query;
use crate::ast::builders::*;
use crate::config::{CompilerConfig, TimezonePair};

fn config() -> CompilerConfig {
    CompilerConfig {
        datetime_columns: HashSet::from(["created_at".to_string()]),
        timezone: Some(TimezonePair {
            source: chrono_tz::UTC,
            target: chrono_tz::America::New_York,
        }),
        ..CompilerConfig::default()
    }
}

#[test]
fn test_summer_timestamp_shifts_four_hours() {
    let query = Query::from("orders").filter(eq("created_at", "2021-06-15 12:00:00"));
    assert_eq!(
        compile_with(config(), &query),
        "/orders?filter[created_at:e]=2021-06-15%2008%3A00%3A00"
    );
}

#[test]
fn test_winter_timestamp_shifts_five_hours() {
    let query = Query::from("orders").filter(eq("created_at", "2021-01-15 12:00:00"));
    assert_eq!(
        compile_with(config(), &query),
        "/orders?filter[created_at:e]=2021-01-15%2007%3A00%3A00"
    );
}

#[test]
fn test_array_values_convert_element_wise() {
    let query = Query::from("orders").filter(between(
        "created_at",
        "2021-06-01 00:00:00",
        "2021-06-30 00:00:00",
    ));
    assert_eq!(
        compile_with(config(), &query),
        "/orders?filter[created_at:gt]=2021-05-31%2020%3A00%3A00\
         &filter[created_at:lt]=2021-06-29%2020%3A00%3A00"
    );
}

#[test]
fn test_other_columns_untouched() {
    let query = Query::from("orders").filter(eq("updated_at", "2021-06-15 12:00:00"));
    assert_eq!(
        compile_with(config(), &query),
        "/orders?filter[updated_at:e]=2021-06-15%2012%3A00%3A00"
    );
}

#[test]
fn test_short_date_string_untouched() {
    // Only 19-char wall-clock strings are treated as datetimes.
    let query = Query::from("orders").filter(eq("created_at", "2021-06-15"));
    assert_eq!(
        compile_with(config(), &query),
        "/orders?filter[created_at:e]=2021-06-15"
    );
}

#[test]
fn test_unparseable_string_untouched() {
    let query = Query::from("orders").filter(eq("created_at", "not a real datetime"));
    assert_eq!(
        compile_with(config(), &query),
        "/orders?filter[created_at:e]=not%20a%20real%20datetime"
    );
}

#[test]
fn test_no_zone_pair_means_no_conversion() {
    let config = CompilerConfig {
        datetime_columns: HashSet::from(["created_at".to_string()]),
        ..CompilerConfig::default()
    };
    let query = Query::from("orders").filter(eq("created_at", "2021-06-15 12:00:00"));
    assert_eq!(
        compile_with(config, &query),
        "/orders?filter[created_at:e]=2021-06-15%2012%3A00%3A00"
    );
}

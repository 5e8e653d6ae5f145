//! Compiler test modules.
//!
//! Tests are organized by category:
//! - `core`: predicate emission, select, sort, pagination, aggregates
//! - `nesting`: grouped predicates and the nesting legend
//! - `normalize`: timezone normalization of datetime columns
//! - `softdelete`: `trashed` defaulting and null-check overrides

mod nesting;
mod normalize;
mod softdelete;

use crate::ast::Query;
use crate::compiler::QueryCompiler;
use crate::config::CompilerConfig;

/// Compile a read with the default profile, expecting a single url.
pub(crate) fn compile(query: &Query) -> String {
    compile_with(CompilerConfig::default(), query)
}

pub(crate) fn compile_with(config: CompilerConfig, query: &Query) -> String {
    QueryCompiler::new(config)
        .compile_select(query)
        .unwrap()
        .url()
        .expect("expected a single url")
        .to_string()
}

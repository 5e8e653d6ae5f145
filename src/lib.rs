//! Compile relational query trees into URL query strings.
//!
//! A remote HTTP API speaking the flat `filter[...]` wire format can be
//! queried as if it were a SQL backend: predicates, nested boolean groups,
//! ordering, pagination, aggregates, field selection and eager-load hints
//! all compile into a single query string for reads, or a structured JSON
//! body for writes. The transport that sends the result is someone else's
//! job; this crate only guarantees the compiled output is unambiguous and
//! reconstructible on the receiving side.

pub mod ast;
pub mod codec;
pub mod compiler;
pub mod config;
pub mod error;

pub use compiler::QueryCompiler;

pub mod prelude {
    pub use crate::ast::builders::*;
    pub use crate::ast::{
        Aggregate, Connective, Order, Predicate, Query, SelectItem, SortDir, Value,
    };
    pub use crate::compiler::{Compiled, MutationBody, QueryCompiler, UrlParams};
    pub use crate::config::{CompilerConfig, LongUrlPolicy, TimezonePair};
    pub use crate::error::{QurlError, QurlResult};
}

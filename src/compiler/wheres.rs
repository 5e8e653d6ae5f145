//! Predicate tree expansion into url params.

use crate::ast::{Predicate, Value, url_safe_operator};
use crate::compiler::keys::{encode_key, normalize_qualified, unqualify};
use crate::compiler::nesting::NestingTracker;
use crate::compiler::normalize::ValueNormalizer;
use crate::compiler::params::{ParamValue, UrlParams};
use crate::config::CompilerConfig;
use crate::error::{QurlError, QurlResult};

/// Walks one query's where tree and expands every node into key/value
/// pairs. Owns the per-compile state (synthetic id counter, nesting
/// legend); construct a fresh one for every top-level compile.
pub(crate) struct PredicateCompiler<'a> {
    config: &'a CompilerConfig,
    normalizer: ValueNormalizer<'a>,
    nesting: NestingTracker,
    unique_id: u64,
}

impl<'a> PredicateCompiler<'a> {
    pub fn new(config: &'a CompilerConfig) -> Self {
        Self {
            config,
            normalizer: ValueNormalizer::new(config),
            nesting: NestingTracker::new(),
            unique_id: 0,
        }
    }

    /// Compile a full where tree into `params`, consuming the compiler so
    /// its counters cannot leak into another statement.
    pub fn compile(mut self, predicates: &[Predicate], params: &mut UrlParams) -> QurlResult<()> {
        self.walk(predicates, 0, params)?;

        if self.config.soft_delete_column.is_some() && !params.contains("trashed") {
            params.set("trashed", "with");
        }

        if !self.nesting.legend().is_empty() {
            let legend: Vec<Value> = self
                .nesting
                .legend()
                .iter()
                .map(|entry| Value::String(entry.clone()))
                .collect();
            params.set("nested", legend);
        }

        Ok(())
    }

    fn walk(
        &mut self,
        predicates: &[Predicate],
        depth: u32,
        params: &mut UrlParams,
    ) -> QurlResult<()> {
        for node in predicates {
            let node = normalize_qualified(node);
            self.emit(node.as_ref(), depth, params)?;
        }
        Ok(())
    }

    fn emit(&mut self, node: &Predicate, depth: u32, params: &mut UrlParams) -> QurlResult<()> {
        match node {
            Predicate::Comparison {
                column,
                operator,
                value,
                ..
            } => {
                let key = self.column_key(node, column);
                params.set(
                    format!("{}:{}", key, url_safe_operator(operator)),
                    self.normalizer.normalize(column, value.clone()),
                );
            }

            Predicate::ColumnComparison {
                first,
                operator,
                second,
                ..
            } => {
                let key = self.synthetic_key(node);
                params.set(
                    key,
                    ParamValue::List(vec![
                        Value::String(first.clone()),
                        Value::String(url_safe_operator(operator)),
                        Value::String(second.clone()),
                    ]),
                );
            }

            Predicate::In { column, values, .. } => {
                self.emit_set(node, column, values, "in", params);
            }
            Predicate::InRaw { column, values, .. } => {
                self.emit_set(node, column, values, "in_raw", params);
            }
            Predicate::NotIn { column, values, .. } => {
                self.emit_set(node, column, values, "not_in", params);
            }
            Predicate::NotInRaw { column, values, .. } => {
                self.emit_set(node, column, values, "not_in_raw", params);
            }

            Predicate::Between {
                column, low, high, ..
            } => {
                let key = self.column_key(node, column);
                params.set(
                    format!("{}:gt", key),
                    self.normalizer.normalize(column, low.clone()),
                );
                params.set(
                    format!("{}:lt", key),
                    self.normalizer.normalize(column, high.clone()),
                );
            }

            Predicate::NotBetween {
                column, low, high, ..
            } => {
                let key = self.column_key(node, column);
                let bounds = Value::Array(vec![low.clone(), high.clone()]);
                params.set(
                    format!("{}:not_between", key),
                    self.normalizer.normalize(column, bounds),
                );
            }

            Predicate::IsNull { column, .. } => {
                let key = self.column_key(node, column);
                if self.is_soft_delete_key(&key) {
                    params.set("trashed", 0i64);
                } else {
                    params.set(format!("{}:is_null", key), 1i64);
                }
            }

            Predicate::IsNotNull { column, .. } => {
                let key = self.column_key(node, column);
                if self.is_soft_delete_key(&key) {
                    params.set("trashed", "only");
                } else {
                    params.set(format!("{}:is_not_null", key), 1i64);
                }
            }

            Predicate::FullText { column, value, .. } => {
                if !self.config.fulltext {
                    return Err(QurlError::FeatureDisabled("Full-text search"));
                }
                let key = self.column_key(node, column);
                params.set(
                    format!("{}:fulltext", key),
                    self.normalizer.normalize(column, value.clone()),
                );
            }

            Predicate::Date {
                column,
                operator,
                value,
                ..
            } => self.emit_date_part(node, column, operator, value, "date", params),
            Predicate::Day {
                column,
                operator,
                value,
                ..
            } => self.emit_date_part(node, column, operator, value, "day", params),
            Predicate::Year {
                column,
                operator,
                value,
                ..
            } => self.emit_date_part(node, column, operator, value, "year", params),
            Predicate::Time {
                column,
                operator,
                value,
                ..
            } => self.emit_date_part(node, column, operator, value, "time", params),

            Predicate::Raw { sql, .. } => {
                let key = self.synthetic_key(node);
                params.set(key, Value::String(sql.clone()));
            }

            Predicate::Nested { predicates, .. } => {
                self.group(node, "", predicates, depth, params)?;
            }
            Predicate::Exists { predicates, .. } => {
                self.group(node, ":e", predicates, depth, params)?;
            }
            Predicate::NotExists { predicates, .. } => {
                self.group(node, ":ne", predicates, depth, params)?;
            }
        }

        Ok(())
    }

    fn emit_set(
        &mut self,
        node: &Predicate,
        column: &str,
        values: &[Value],
        suffix: &str,
        params: &mut UrlParams,
    ) {
        let key = self.column_key(node, column);
        params.set(
            format!("{}:{}", key, suffix),
            self.normalizer.normalize(column, Value::Array(values.to_vec())),
        );
    }

    fn emit_date_part(
        &mut self,
        node: &Predicate,
        column: &str,
        operator: &str,
        value: &Value,
        part: &str,
        params: &mut UrlParams,
    ) {
        let key = self.column_key(node, column);
        params.set(
            format!("{}:{}:{}", key, url_safe_operator(operator), part),
            self.normalizer.normalize(column, value.clone()),
        );
    }

    fn group(
        &mut self,
        node: &Predicate,
        suffix: &str,
        inner: &[Predicate],
        depth: u32,
        params: &mut UrlParams,
    ) -> QurlResult<()> {
        let previous = self.nesting.enter(node.connective(), suffix);
        self.walk(inner, depth + 1, params)?;
        self.nesting.exit(previous, depth == 0);
        Ok(())
    }

    fn column_key(&self, node: &Predicate, column: &str) -> String {
        encode_key(unqualify(column), node.connective(), self.nesting.cursor())
    }

    /// Key for predicate kinds without a natural single-column identity.
    fn synthetic_key(&mut self, node: &Predicate) -> String {
        let ident = format!("{}-{}", self.next_id(), node.kind_name());
        encode_key(&ident, node.connective(), self.nesting.cursor())
    }

    fn next_id(&mut self) -> u64 {
        let id = self.unique_id;
        self.unique_id += 1;
        id
    }

    /// The soft-delete override only fires when the encoded key is exactly
    /// the configured column, i.e. an unnested, unqualified null check.
    fn is_soft_delete_key(&self, key: &str) -> bool {
        self.config
            .soft_delete_column
            .as_deref()
            .is_some_and(|column| column == key)
    }
}

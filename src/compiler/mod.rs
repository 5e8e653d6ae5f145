//! Query tree to url compilation.
//!
//! [`QueryCompiler`] is the entry point: reads compile into a url (or a set
//! of urls when splitting kicks in), mutations compile into a json request
//! body. All per-compile state lives in locals, so one compiler instance
//! can be shared and reused freely.

pub(crate) mod keys;
pub(crate) mod nesting;
pub(crate) mod normalize;
pub mod params;
pub(crate) mod wheres;

#[cfg(test)]
mod tests;

pub use params::{ParamValue, UrlParams};

use serde::Serialize;

use crate::ast::{Aggregate, Query, SelectItem, SortDir, Value};
use crate::codec;
use crate::compiler::wheres::PredicateCompiler;
use crate::config::{CompilerConfig, LongUrlPolicy};
use crate::error::{QurlError, QurlResult};

/// Output of a compile.
#[derive(Debug, Clone, PartialEq)]
pub enum Compiled {
    /// A single request url, path plus query string.
    Url(String),
    /// One url per value batch, produced by the split policy.
    UrlChunks(Vec<String>),
    /// A mutation request body.
    Body(MutationBody),
}

impl Compiled {
    /// The single url, when the compile produced one.
    pub fn url(&self) -> Option<&str> {
        match self {
            Compiled::Url(url) => Some(url),
            _ => None,
        }
    }
}

/// Json body sent for insert/update/delete requests, which carry their
/// constraints and row data out of band instead of in the url.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationBody {
    pub table: String,
    /// Compiled query string scoping the mutation; absent for inserts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
    /// Row data; absent for deletes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<serde_json::Value>,
}

/// Compiles [`Query`] trees into wire requests for one connection profile.
#[derive(Debug, Clone, Default)]
pub struct QueryCompiler {
    config: CompilerConfig,
}

impl QueryCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile a read into a request url.
    pub fn compile_select(&self, query: &Query) -> QurlResult<Compiled> {
        let mut params = self.seed_params();

        match &query.aggregate {
            Some(aggregate) => self.handle_query_type(aggregate, &mut params),
            None => self.handle_select(query, &mut params)?,
        }

        self.finish_read(query, params)
    }

    /// Compile an existence check; row constraints apply as in a select.
    pub fn compile_exists(&self, query: &Query) -> QurlResult<Compiled> {
        let mut params = self.seed_params();
        params.set("queryType", "exists");
        self.handle_select(query, &mut params)?;
        self.finish_read(query, params)
    }

    /// Compile an insert body. A single row object is wrapped into a
    /// one-element batch.
    pub fn compile_insert(&self, query: &Query, rows: serde_json::Value) -> QurlResult<Compiled> {
        Ok(Compiled::Body(MutationBody {
            table: query.table.clone(),
            params: None,
            rows: Some(normalize_rows(rows)),
        }))
    }

    /// Compile an update body; the query's predicates scope the affected
    /// rows.
    pub fn compile_update(&self, query: &Query, rows: serde_json::Value) -> QurlResult<Compiled> {
        let mut params = self.seed_params();
        params.set("queryType", "update");
        self.handle_wheres(query, &mut params)?;

        Ok(Compiled::Body(MutationBody {
            table: query.table.clone(),
            params: Some(codec::encode_params(&params, &self.config)?),
            rows: Some(normalize_rows(rows)),
        }))
    }

    /// Compile a delete body; the query's predicates scope the affected
    /// rows.
    pub fn compile_delete(&self, query: &Query) -> QurlResult<Compiled> {
        let mut params = self.seed_params();
        params.set("queryType", "delete");
        self.handle_wheres(query, &mut params)?;

        Ok(Compiled::Body(MutationBody {
            table: query.table.clone(),
            params: Some(codec::encode_params(&params, &self.config)?),
            rows: None,
        }))
    }

    fn finish_read(&self, query: &Query, mut params: UrlParams) -> QurlResult<Compiled> {
        self.handle_wheres(query, &mut params)?;
        handle_orders(query, &mut params);
        self.handle_limit_offset(query, &mut params)?;
        handle_group_by(query, &mut params);
        self.handle_includes(query, &mut params);

        self.to_url(query, &params)
    }

    fn seed_params(&self) -> UrlParams {
        let mut params = UrlParams::new();
        for (key, value) in &self.config.default_params {
            params.set(key.clone(), value.as_str());
        }
        params
    }

    fn handle_select(&self, query: &Query, params: &mut UrlParams) -> QurlResult<()> {
        if query.columns.is_empty() {
            return Ok(());
        }
        // `SELECT *` means no field constraint.
        if matches!(query.columns.as_slice(), [SelectItem::Column(c)] if c == "*") {
            return Ok(());
        }

        let mut fields = Vec::new();
        let mut raw_statements = Vec::new();

        for item in &query.columns {
            match item {
                SelectItem::Column(name) => fields.push(Value::String(name.clone())),
                SelectItem::Raw(expr) => raw_statements.push(Value::String(expr.clone())),
                SelectItem::SubQuery(_) => return Err(QurlError::UnsupportedSelectExpression),
            }
        }

        if !raw_statements.is_empty() {
            params.set("selectRaw", raw_statements);
        }
        // An empty field list still travels, so the remote end knows the
        // select was constrained.
        params.set("fields", fields);

        Ok(())
    }

    /// Aggregates ride the `queryType` param: bare function name for `*`
    /// targets, `function,column...` otherwise.
    fn handle_query_type(&self, aggregate: &Aggregate, params: &mut UrlParams) {
        let targeted = match aggregate.columns.as_slice() {
            [] => false,
            [only] => only != "*",
            _ => true,
        };

        if targeted {
            let mut items = vec![Value::String(aggregate.function.clone())];
            items.extend(aggregate.columns.iter().cloned().map(Value::String));
            params.set("queryType", items);
        } else {
            params.set("queryType", Value::String(aggregate.function.clone()));
        }
    }

    fn handle_wheres(&self, query: &Query, params: &mut UrlParams) -> QurlResult<()> {
        PredicateCompiler::new(&self.config).compile(&query.predicates, params)
    }

    fn handle_limit_offset(&self, query: &Query, params: &mut UrlParams) -> QurlResult<()> {
        if let Some(limit) = query.limit.filter(|limit| *limit > 0) {
            match self.config.page_size {
                Some(page_size) if limit >= page_size => {
                    return Err(QurlError::LimitExceedsPageSize { limit, page_size });
                }
                Some(_) => params.set("per_page", limit as i64),
                None => params.set("limit", limit as i64),
            }
        }

        if let Some(offset) = query.offset.filter(|offset| *offset > 0) {
            params.set("offset", offset as i64);
        }

        Ok(())
    }

    fn handle_includes(&self, query: &Query, params: &mut UrlParams) {
        if query.includes.is_empty() {
            return;
        }

        // Relation constraints may themselves contain the array separator,
        // so each entry swaps it for `:` before the list is joined.
        let separator = self.config.array_value_separator;
        let relations: Vec<Value> = query
            .includes
            .iter()
            .map(|relation| Value::String(relation.replace(separator, ":")))
            .collect();

        params.set("include", relations);
    }

    fn to_url(&self, query: &Query, params: &UrlParams) -> QurlResult<Compiled> {
        let url = self.render_url(&query.table, params)?;

        match self.config.max_url_length {
            Some(max) if url.len() > max => match self.config.long_url {
                LongUrlPolicy::Fail => Err(QurlError::UrlTooLong {
                    length: url.len(),
                    max,
                }),
                LongUrlPolicy::Split { batch } => {
                    self.split_url(&query.table, params, batch.max(1), max)
                }
            },
            _ => Ok(Compiled::Url(url)),
        }
    }

    fn render_url(&self, table: &str, params: &UrlParams) -> QurlResult<String> {
        if params.is_empty() {
            Ok(format!("/{}", table))
        } else {
            Ok(format!(
                "/{}?{}",
                table,
                codec::encode_params(params, &self.config)?
            ))
        }
    }

    /// Split an over-long url by batching the filter list with the most
    /// elements. Every chunked url is re-checked against the cap; when no
    /// splittable list exists the compile fails outright.
    fn split_url(
        &self,
        table: &str,
        params: &UrlParams,
        batch: usize,
        max: usize,
    ) -> QurlResult<Compiled> {
        let mut target: Option<(usize, &[Value])> = None;
        for (index, (key, value)) in params.iter().enumerate() {
            if self.config.is_reserved(key) {
                continue;
            }
            if let ParamValue::List(items) = value {
                if items.len() > 1 && target.is_none_or(|(_, best)| items.len() > best.len()) {
                    target = Some((index, items));
                }
            }
        }

        let Some((index, items)) = target else {
            let url = self.render_url(table, params)?;
            return Err(QurlError::UrlTooLong {
                length: url.len(),
                max,
            });
        };
        let items = items.to_vec();

        let mut urls = Vec::with_capacity(items.len().div_ceil(batch));
        let mut template = params.clone();

        for chunk in items.chunks(batch) {
            *template.value_at_mut(index) = ParamValue::List(chunk.to_vec());
            let url = self.render_url(table, &template)?;
            if url.len() > max {
                return Err(QurlError::UrlTooLong {
                    length: url.len(),
                    max,
                });
            }
            urls.push(url);
        }

        Ok(Compiled::UrlChunks(urls))
    }
}

fn handle_orders(query: &Query, params: &mut UrlParams) {
    if query.orders.is_empty() {
        return;
    }

    let sort: Vec<Value> = query
        .orders
        .iter()
        .map(|order| {
            let rendered = match order.dir {
                SortDir::Asc => order.column.clone(),
                SortDir::Desc => format!("-{}", order.column),
            };
            Value::String(rendered)
        })
        .collect();

    params.set("sort", sort);
}

fn handle_group_by(query: &Query, params: &mut UrlParams) {
    if query.groups.is_empty() {
        return;
    }

    let groups: Vec<Value> = query.groups.iter().cloned().map(Value::String).collect();
    params.set("groupBy", groups);
}

fn normalize_rows(rows: serde_json::Value) -> serde_json::Value {
    match rows {
        serde_json::Value::Array(_) => rows,
        row @ serde_json::Value::Object(_) => serde_json::Value::Array(vec![row]),
        other => other,
    }
}

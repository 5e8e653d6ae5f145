use serde::{Deserialize, Serialize};

use crate::ast::{Predicate, SortDir};

/// One requested select column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectItem {
    /// Plain field name, emitted through the `fields` param.
    Column(String),
    /// Raw select expression forwarded verbatim through `selectRaw`.
    Raw(String),
    /// Inline sub-builder; has no wire representation and fails the compile.
    SubQuery(Box<Query>),
}

/// A single order-by entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub column: String,
    pub dir: SortDir,
}

/// Aggregate function request (`count`, `avg`, `sum`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub function: String,
    /// Target columns; `["*"]` collapses to the bare function name.
    pub columns: Vec<String>,
}

/// The statement-level input to the compiler: a where tree plus the
/// order/limit/select/aggregate metadata around it.
///
/// Predicate order is significant — it decides key order in the compiled
/// url. The tree is normally produced by a query-builder front end; the
/// fluent methods here cover tests and direct construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Query {
    pub table: String,
    #[serde(default)]
    pub columns: Vec<SelectItem>,
    #[serde(default)]
    pub predicates: Vec<Predicate>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub aggregate: Option<Aggregate>,
    /// Eager-load hints for relations served by the same origin.
    #[serde(default)]
    pub includes: Vec<String>,
}

impl Query {
    /// Start a query against the given table.
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Request a plain field.
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.columns.push(SelectItem::Column(name.into()));
        self
    }

    /// Request a raw select expression.
    pub fn select_raw(mut self, expr: impl Into<String>) -> Self {
        self.columns.push(SelectItem::Raw(expr.into()));
        self
    }

    /// Append a predicate to the where tree.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Order ascending by a column.
    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.orders.push(Order {
            column: column.into(),
            dir: SortDir::Asc,
        });
        self
    }

    /// Order descending by a column.
    pub fn order_by_desc(mut self, column: impl Into<String>) -> Self {
        self.orders.push(Order {
            column: column.into(),
            dir: SortDir::Desc,
        });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.groups.push(column.into());
        self
    }

    /// Request an aggregate instead of row data.
    pub fn aggregate(mut self, function: impl Into<String>, columns: &[&str]) -> Self {
        self.aggregate = Some(Aggregate {
            function: function.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        });
        self
    }

    /// Hint an eager load of a relation served by the same origin.
    pub fn include(mut self, relation: impl Into<String>) -> Self {
        self.includes.push(relation.into());
        self
    }
}

//! SQL execution trait shared by the real PostgreSQL executor and test doubles.

use serde_json::Value;

use super::DbError;

/// Kind of view found in the catalog under a given name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// `CREATE VIEW`
    Plain,
    /// `CREATE MATERIALIZED VIEW`
    Materialized,
}

/// A bound query parameter.
///
/// Filter values, JSON keys and paths, limits and offsets all travel as
/// parameters; only validated identifiers are ever spliced into SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    TextArray(Vec<String>),
    Int(i64),
}

/// Trait for the SQL execution surface.
pub trait SqlExecutor {
    /// Execute one or more statements without parameters (DDL, `REFRESH`, ...).
    fn execute(&self, sql: &str) -> Result<(), DbError>;

    /// Run a query whose first column is `json`/`jsonb`, returning that column per row.
    fn query_json(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Value>, DbError>;

    /// Look up a view by name in the current schema.
    ///
    /// Returns `None` if nothing by that name exists or it is not a view.
    fn view_kind(&self, name: &str) -> Result<Option<ViewKind>, DbError>;

    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

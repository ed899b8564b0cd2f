//! Read path against compiled views.
//!
//! Queries only ever touch `<collection>_view` and its `data` column. The view
//! name is spliced into SQL after checking it is a plain identifier; filter
//! keys, JSON paths, values, limit and offset are all bound parameters.
//!
//! - `builder.rs` - `SELECT data FROM ... WHERE ... ORDER BY ... LIMIT ... OFFSET ...`
//! - `service.rs` - `QueryService`: `list`, `all`, `find_one`

mod builder;
mod service;

pub use builder::{build_select, BoundQuery};
pub use service::QueryService;

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DbError;

/// Rows returned by `find` when no limit is given.
pub const DEFAULT_LIMIT: u32 = 10;

/// Rows returned by `all`.
pub const ALL_LIMIT: u32 = 100;

/// Field (or dotted path) to exact string value, combined with AND.
/// Keys are split on every `.`; a document key containing a dot is unreachable.
pub type Filters = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("View {view} not found; create it first")]
    ViewNotFound { view: String },

    #[error("Invalid collection name '{name}'")]
    InvalidIdentifier { name: String },

    #[error(transparent)]
    Db(DbError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Paging and ordering for `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: u32,
    pub offset: u32,
    pub sort_field: Option<String>,
    pub sort_order: SortOrder,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            sort_field: None,
            sort_order: SortOrder::Asc,
        }
    }
}

impl ListOptions {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

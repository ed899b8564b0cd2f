//! Database access for the view compiler.
//!
//! This module provides the SQL execution surface the rest of the crate talks to:
//! - Connection management (`PostgresExecutor`, built from `PostgresConfig`)
//! - Raw statement execution and JSON row queries with bound parameters
//! - Catalog lookups (does a view exist, is it materialized)
//! - Identifier and literal quoting for generated SQL
//!
//! # Architecture
//!
//! All heavy lifting (joins, aggregation, polymorphic lookups) happens inside
//! PostgreSQL. The Rust side only ships SQL text and reads back `json` cells, so
//! the executor trait is intentionally narrow: `execute`, `query_json` and
//! `view_kind`. Tests swap in a recording implementation.
//!
//! # Error classification
//!
//! Driver errors are mapped onto `DbError` by SQLSTATE so callers can tell a
//! missing relation (`42P01`) or a wrong object type (`42809`, e.g. `DROP VIEW`
//! on a materialized view) apart from everything else.

mod backend;
mod config;
mod connection;
mod escape;

pub use backend::{SqlExecutor, SqlParam, ViewKind};
pub use config::PostgresConfig;
pub use connection::{PostgresExecutor, open_db};
pub use escape::{is_plain_identifier, quote_ident, quote_literal};

use thiserror::Error;

/// Database error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DbError {
    #[error("Failed to connect to PostgreSQL: {message}")]
    ConnectionFailed { message: String },

    #[error("Relation does not exist: {message}")]
    UndefinedRelation { message: String },

    #[error("Wrong object type: {message}")]
    WrongObjectType { message: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },
}

impl DbError {
    /// True when the error means the target object is simply not there.
    pub fn is_missing_object(&self) -> bool {
        matches!(self, DbError::UndefinedRelation { .. } | DbError::WrongObjectType { .. })
    }
}

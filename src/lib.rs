//! pg_json_views library - JSON document views over relational PostgreSQL data
//!
//! Resolves a collection's relations from a schema snapshot into a bounded
//! field tree, compiles that tree into one SELECT producing a nested JSON
//! document per row, installs it as a (materialized) view and queries the
//! view with parameterized filters.

pub mod auth;
pub mod cli;
pub mod commands;
pub mod compiler;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod output;
pub mod queries;
pub mod resolver;
pub mod schema;
pub mod views;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod fixtures;

#[cfg(test)]
pub mod test_utils;

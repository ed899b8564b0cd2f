//! Shared test utilities for execute and view tests.
//!
//! `RecordingExecutor` stands in for PostgreSQL: it records every statement,
//! tracks which views exist (so drop/create/refresh behave like the real
//! catalog), and answers row queries with canned JSON.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Write;
use std::rc::Rc;

use serde_json::Value;
use tempfile::NamedTempFile;

use crate::auth::{AccessConfig, Action, Permission};
use crate::context::AppContext;
use crate::db::{DbError, SqlExecutor, SqlParam, ViewKind};
use crate::fixtures;
use crate::schema::{SchemaSnapshot, StaticSchemaProvider};

/// Create a temporary file containing the given content.
pub fn create_temp_json_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[derive(Default)]
struct Recorded {
    statements: Vec<String>,
    queries: Vec<(String, Vec<SqlParam>)>,
    views: BTreeMap<String, ViewKind>,
    rows: Vec<Value>,
    failures: Vec<(String, DbError)>,
}

/// In-memory executor recording everything it is asked to run.
///
/// Clones share state, so a test can hand one clone to a context and inspect
/// the other afterwards.
#[derive(Clone, Default)]
pub struct RecordingExecutor {
    state: Rc<RefCell<Recorded>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend a view already exists.
    pub fn add_view(&self, name: &str, kind: ViewKind) {
        self.state.borrow_mut().views.insert(name.to_string(), kind);
    }

    pub fn view(&self, name: &str) -> Option<ViewKind> {
        self.state.borrow().views.get(name).copied()
    }

    /// Rows returned by every successful `query_json`.
    pub fn set_rows(&self, rows: Vec<Value>) {
        self.state.borrow_mut().rows = rows;
    }

    /// Fail any statement or query containing `fragment` with `error`.
    pub fn fail_on(&self, fragment: &str, error: DbError) {
        self.state
            .borrow_mut()
            .failures
            .push((fragment.to_string(), error));
    }

    /// Statements passed to `execute`, in order.
    pub fn statements(&self) -> Vec<String> {
        self.state.borrow().statements.clone()
    }

    /// Queries passed to `query_json`, with their parameters.
    pub fn queries(&self) -> Vec<(String, Vec<SqlParam>)> {
        self.state.borrow().queries.clone()
    }

    fn injected_failure(&self, sql: &str) -> Option<DbError> {
        self.state
            .borrow()
            .failures
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map(|(_, error)| error.clone())
    }

    /// Apply a DDL statement to the simulated catalog.
    fn apply(&self, sql: &str) -> Result<(), DbError> {
        let mut state = self.state.borrow_mut();
        let views = &mut state.views;

        if let Some(rest) = sql.strip_prefix("DROP VIEW IF EXISTS ") {
            return drop_kind(views, &first_ident(rest), ViewKind::Plain);
        }
        if let Some(rest) = sql.strip_prefix("DROP MATERIALIZED VIEW IF EXISTS ") {
            return drop_kind(views, &first_ident(rest), ViewKind::Materialized);
        }
        if let Some(rest) = sql.strip_prefix("CREATE MATERIALIZED VIEW ") {
            return create_kind(views, first_ident(rest), ViewKind::Materialized);
        }
        if let Some(rest) = sql.strip_prefix("CREATE VIEW ") {
            return create_kind(views, first_ident(rest), ViewKind::Plain);
        }
        if let Some(rest) = sql.strip_prefix("REFRESH MATERIALIZED VIEW ") {
            let name = first_ident(rest);
            return match views.get(&name) {
                Some(ViewKind::Materialized) => Ok(()),
                Some(ViewKind::Plain) => Err(DbError::WrongObjectType {
                    message: format!("\"{}\" is not a materialized view", name),
                }),
                None => Err(undefined(&name)),
            };
        }
        Ok(())
    }
}

fn undefined(name: &str) -> DbError {
    DbError::UndefinedRelation {
        message: format!("relation \"{}\" does not exist", name),
    }
}

fn drop_kind(views: &mut BTreeMap<String, ViewKind>, name: &str, kind: ViewKind) -> Result<(), DbError> {
    match views.get(name) {
        None => Ok(()),
        Some(existing) if *existing == kind => {
            views.remove(name);
            Ok(())
        }
        Some(_) => Err(DbError::WrongObjectType {
            message: format!("\"{}\" is not a {:?} view", name, kind),
        }),
    }
}

fn create_kind(views: &mut BTreeMap<String, ViewKind>, name: String, kind: ViewKind) -> Result<(), DbError> {
    if views.contains_key(&name) {
        return Err(DbError::QueryFailed {
            message: format!("relation \"{}\" already exists", name),
        });
    }
    views.insert(name, kind);
    Ok(())
}

/// The first double-quoted identifier in `sql`.
fn first_ident(sql: &str) -> String {
    sql.split('"').nth(1).unwrap_or_default().to_string()
}

impl SqlExecutor for RecordingExecutor {
    fn execute(&self, sql: &str) -> Result<(), DbError> {
        self.state.borrow_mut().statements.push(sql.to_string());
        if let Some(error) = self.injected_failure(sql) {
            return Err(error);
        }
        self.apply(sql)
    }

    fn query_json(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Value>, DbError> {
        self.state
            .borrow_mut()
            .queries
            .push((sql.to_string(), params.to_vec()));
        if let Some(error) = self.injected_failure(sql) {
            return Err(error);
        }
        let view = sql
            .split(" FROM ")
            .nth(1)
            .map(first_ident)
            .unwrap_or_default();
        let state = self.state.borrow();
        if !state.views.contains_key(&view) {
            return Err(undefined(&view));
        }
        Ok(state.rows.clone())
    }

    fn view_kind(&self, name: &str) -> Result<Option<ViewKind>, DbError> {
        Ok(self.view(name))
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

// =============================================================================
// Context helpers
// =============================================================================

/// Context over the blog fixture with full access.
pub fn blog_context(db: RecordingExecutor) -> AppContext {
    context_for(fixtures::blog(), db)
}

/// Context over the page builder fixture with full access.
pub fn pages_context(db: RecordingExecutor) -> AppContext {
    context_for(fixtures::pages(), db)
}

pub fn context_for(snapshot: SchemaSnapshot, db: RecordingExecutor) -> AppContext {
    AppContext::new(Box::new(StaticSchemaProvider::new(snapshot))).with_executor(Box::new(db))
}

/// Access config granting only `action` on `collection`.
pub fn grant(collection: &str, action: Action) -> AccessConfig {
    AccessConfig {
        admin: false,
        permissions: vec![Permission {
            collection: collection.to_string(),
            action,
        }],
    }
}


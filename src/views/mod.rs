//! View lifecycle: create/replace, refresh and drop `<collection>_view`.
//!
//! Every view exposes exactly one `json` column, `data`, holding
//! `row_to_json` of one root row with its nested relations. Replacement is
//! drop-then-create and is not atomic for concurrent readers.

use serde::Serialize;
use thiserror::Error;

use crate::compiler::{CompiledQuery, HELPER_ROUTINES};
use crate::db::{quote_ident, DbError, SqlExecutor, ViewKind};

/// Name of the only column of every compiled view.
pub const DATA_COLUMN: &str = "data";

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("{name} is not a materialized view")]
    NotMaterialized { name: String },

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Deterministic view name for a collection.
pub fn view_name(collection: &str) -> String {
    format!("{}_view", collection)
}

/// A view as created in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewDefinition {
    pub name: String,
    pub collection: String,
    pub materialized: bool,
    pub query: String,
}

/// Manages compiled views through an executor.
pub struct ViewManager<'a> {
    db: &'a dyn SqlExecutor,
}

impl<'a> ViewManager<'a> {
    pub fn new(db: &'a dyn SqlExecutor) -> Self {
        Self { db }
    }

    /// (Re)declare the polymorphic lookup routines. Safe to repeat.
    pub fn install_helpers(&self) -> Result<(), ViewError> {
        for routine in HELPER_ROUTINES {
            self.db.execute(routine)?;
        }
        Ok(())
    }

    /// Replace whatever view or materialized view is called `name` with one over `compiled`.
    pub fn create_or_replace(
        &self,
        name: &str,
        compiled: &CompiledQuery,
        materialized: bool,
    ) -> Result<ViewDefinition, ViewError> {
        self.install_helpers()?;
        let existed = self.drop_existing(name)?;

        let query = format!(
            "SELECT row_to_json(\"root\") FROM ({}) AS \"root\"",
            compiled.sql
        );
        let statement = format!(
            "CREATE {}VIEW {} ({}) AS {}",
            if materialized { "MATERIALIZED " } else { "" },
            quote_ident(name),
            quote_ident(DATA_COLUMN),
            query
        );
        self.db.execute(&statement)?;

        log::info!(
            "{} {}view {} for {}",
            if existed { "Replaced" } else { "Created" },
            if materialized { "materialized " } else { "" },
            name,
            compiled.root
        );

        Ok(ViewDefinition {
            name: name.to_string(),
            collection: compiled.root.clone(),
            materialized,
            query,
        })
    }

    /// Refresh a materialized view. Plain or missing views are an error.
    pub fn refresh(&self, name: &str) -> Result<(), ViewError> {
        match self.db.view_kind(name)? {
            Some(ViewKind::Materialized) => {
                self.db
                    .execute(&format!("REFRESH MATERIALIZED VIEW {}", quote_ident(name)))?;
                log::info!("Refreshed materialized view {}", name);
                Ok(())
            }
            _ => Err(ViewError::NotMaterialized {
                name: name.to_string(),
            }),
        }
    }

    /// Drop the view of either kind. Returns false if there was none.
    pub fn drop(&self, name: &str) -> Result<bool, ViewError> {
        let dropped = self.drop_existing(name)?;
        if dropped {
            log::info!("Dropped view {}", name);
        } else {
            log::debug!("No view named {}", name);
        }
        Ok(dropped)
    }

    fn drop_existing(&self, name: &str) -> Result<bool, ViewError> {
        let existed = self.db.view_kind(name)?.is_some();
        for statement in [
            format!("DROP VIEW IF EXISTS {}", quote_ident(name)),
            format!("DROP MATERIALIZED VIEW IF EXISTS {}", quote_ident(name)),
        ] {
            match self.db.execute(&statement) {
                Ok(()) => {}
                // DROP VIEW on a materialized view (and vice versa) reports the wrong type
                Err(e) if e.is_missing_object() => log::debug!("{}: {}", statement, e),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RecordingExecutor;
    use rstest::rstest;

    fn compiled() -> CompiledQuery {
        CompiledQuery {
            root: "articles".to_string(),
            sql: r#"SELECT "articles".* FROM "articles""#.to_string(),
        }
    }

    #[rstest]
    fn test_view_name() {
        assert_eq!(view_name("articles"), "articles_view");
    }

    #[rstest]
    fn test_create_plain_view() {
        let db = RecordingExecutor::new();
        let view = ViewManager::new(&db)
            .create_or_replace("articles_view", &compiled(), false)
            .unwrap();

        assert_eq!(view.name, "articles_view");
        assert_eq!(view.collection, "articles");
        assert!(!view.materialized);
        assert_eq!(db.view("articles_view"), Some(ViewKind::Plain));

        let statements = db.statements();
        assert_eq!(statements.len(), 5);
        assert!(statements[0].contains("resolve_row_with_nested"));
        assert!(statements[1].contains("FUNCTION resolve_row("));
        assert_eq!(statements[2], r#"DROP VIEW IF EXISTS "articles_view""#);
        assert_eq!(statements[3], r#"DROP MATERIALIZED VIEW IF EXISTS "articles_view""#);
        assert_eq!(
            statements[4],
            r#"CREATE VIEW "articles_view" ("data") AS SELECT row_to_json("root") FROM (SELECT "articles".* FROM "articles") AS "root""#
        );
    }

    #[rstest]
    fn test_replace_materialized_with_plain() {
        let db = RecordingExecutor::new();
        db.add_view("articles_view", ViewKind::Materialized);

        ViewManager::new(&db)
            .create_or_replace("articles_view", &compiled(), false)
            .unwrap();
        assert_eq!(db.view("articles_view"), Some(ViewKind::Plain));
    }

    #[rstest]
    fn test_create_materialized_view() {
        let db = RecordingExecutor::new();
        let view = ViewManager::new(&db)
            .create_or_replace("articles_view", &compiled(), true)
            .unwrap();
        assert!(view.materialized);
        assert!(db.statements().last().unwrap().starts_with(r#"CREATE MATERIALIZED VIEW "articles_view""#));
    }

    #[rstest]
    fn test_create_fails_on_ddl_error() {
        let db = RecordingExecutor::new();
        db.fail_on("CREATE VIEW", DbError::QueryFailed { message: "syntax error".into() });
        let err = ViewManager::new(&db)
            .create_or_replace("articles_view", &compiled(), false)
            .unwrap_err();
        assert!(matches!(err, ViewError::Db(DbError::QueryFailed { .. })));
    }

    #[rstest]
    fn test_refresh_materialized() {
        let db = RecordingExecutor::new();
        db.add_view("articles_view", ViewKind::Materialized);
        ViewManager::new(&db).refresh("articles_view").unwrap();
        assert_eq!(
            db.statements(),
            vec![r#"REFRESH MATERIALIZED VIEW "articles_view""#.to_string()]
        );
    }

    #[rstest]
    #[case(Some(ViewKind::Plain))]
    #[case(None)]
    fn test_refresh_requires_materialized(#[case] existing: Option<ViewKind>) {
        let db = RecordingExecutor::new();
        if let Some(kind) = existing {
            db.add_view("articles_view", kind);
        }
        let err = ViewManager::new(&db).refresh("articles_view").unwrap_err();
        assert!(matches!(err, ViewError::NotMaterialized { ref name } if name == "articles_view"));
        assert!(db.statements().is_empty());
    }

    #[rstest]
    fn test_drop_existing_and_missing() {
        let db = RecordingExecutor::new();
        db.add_view("articles_view", ViewKind::Plain);
        let manager = ViewManager::new(&db);

        assert!(manager.drop("articles_view").unwrap());
        assert_eq!(db.view("articles_view"), None);
        assert!(!manager.drop("articles_view").unwrap());
    }
}

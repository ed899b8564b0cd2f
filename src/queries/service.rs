//! List / all / find-one over `<collection>_view`.

use serde_json::Value;

use crate::db::{is_plain_identifier, DbError, SqlExecutor};
use crate::views::view_name;

use super::{build_select, Filters, ListOptions, QueryError, ALL_LIMIT};

pub struct QueryService<'a> {
    db: &'a dyn SqlExecutor,
}

impl<'a> QueryService<'a> {
    pub fn new(db: &'a dyn SqlExecutor) -> Self {
        Self { db }
    }

    /// Rows of the collection's view matching every filter exactly.
    pub fn list(&self, collection: &str, filters: &Filters, options: &ListOptions) -> Result<Vec<Value>, QueryError> {
        let view = self.view_for(collection)?;
        let query = build_select(&view, filters, options);
        log::debug!("{} params={:?}", query.sql, query.params);

        self.db
            .query_json(&query.sql, &query.params)
            .map_err(|e| match e {
                DbError::UndefinedRelation { .. } => QueryError::ViewNotFound { view },
                other => QueryError::Db(other),
            })
    }

    /// Up to `ALL_LIMIT` unfiltered rows.
    pub fn all(&self, collection: &str) -> Result<Vec<Value>, QueryError> {
        self.list(collection, &Filters::new(), &ListOptions::with_limit(ALL_LIMIT))
    }

    /// The first matching row, if any.
    pub fn find_one(&self, collection: &str, filters: &Filters) -> Result<Option<Value>, QueryError> {
        let rows = self.list(collection, filters, &ListOptions::with_limit(1))?;
        Ok(rows.into_iter().next())
    }

    fn view_for(&self, collection: &str) -> Result<String, QueryError> {
        if !is_plain_identifier(collection) {
            return Err(QueryError::InvalidIdentifier {
                name: collection.to_string(),
            });
        }
        Ok(view_name(collection))
    }
}

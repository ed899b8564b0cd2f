//! SELECT construction over a view's `data` column.

use crate::db::{quote_ident, SqlParam};
use crate::views::DATA_COLUMN;

use super::{Filters, ListOptions};

/// SQL text plus its positional parameters (`$1`, `$2`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct BoundQuery {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl BoundQuery {
    fn bind(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        format!("${}", self.params.len())
    }

    /// `data ->> $n` for a flat key, `data #>> $n` for a dotted path.
    ///
    /// Every `.` separates path segments, so a top-level key that itself
    /// contains a dot cannot be addressed.
    fn accessor(&mut self, key: &str) -> String {
        let column = quote_ident(DATA_COLUMN);
        if key.contains('.') {
            let path = key.split('.').map(str::to_string).collect();
            format!("{} #>> {}", column, self.bind(SqlParam::TextArray(path)))
        } else {
            format!("{} ->> {}", column, self.bind(SqlParam::Text(key.to_string())))
        }
    }
}

/// Build the select for `view`. `view` must already be a validated identifier.
pub fn build_select(view: &str, filters: &Filters, options: &ListOptions) -> BoundQuery {
    let mut query = BoundQuery {
        sql: format!("SELECT {} FROM {}", quote_ident(DATA_COLUMN), quote_ident(view)),
        params: Vec::new(),
    };

    let mut predicates = Vec::with_capacity(filters.len());
    for (key, value) in filters {
        let accessor = query.accessor(key);
        let value = query.bind(SqlParam::Text(value.clone()));
        predicates.push(format!("{} = {}", accessor, value));
    }
    if !predicates.is_empty() {
        query.sql.push_str(" WHERE ");
        query.sql.push_str(&predicates.join(" AND "));
    }

    if let Some(sort) = &options.sort_field {
        let accessor = query.accessor(sort);
        query.sql.push_str(&format!(" ORDER BY {} {}", accessor, options.sort_order.as_sql()));
    }

    let limit = query.bind(SqlParam::Int(i64::from(options.limit)));
    let offset = query.bind(SqlParam::Int(i64::from(options.offset)));
    query.sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));

    query
}

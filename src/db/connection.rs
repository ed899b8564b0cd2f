//! PostgreSQL connection management.

use std::sync::Mutex;

use postgres::error::SqlState;
use postgres::types::ToSql;
use postgres::{Client, NoTls};
use serde_json::Value;

use super::backend::{SqlExecutor, SqlParam, ViewKind};
use super::config::PostgresConfig;
use super::escape::quote_ident;
use super::DbError;

/// Catalog lookup for a relation, resolved through `search_path` like DDL is.
/// Takes the quoted identifier.
const VIEW_KIND_QUERY: &str = "SELECT c.relkind::text \
     FROM pg_catalog.pg_class c \
     WHERE c.oid = to_regclass($1)";

/// Open a connection using the given settings.
pub fn open_db(config: &PostgresConfig) -> Result<PostgresExecutor, DbError> {
    PostgresExecutor::connect(config)
}

/// Synchronous PostgreSQL executor.
///
/// The client is wrapped in a `Mutex` because `postgres::Client` needs `&mut`
/// for every call while the executor trait hands out `&self`.
pub struct PostgresExecutor {
    client: Mutex<Client>,
}

impl PostgresExecutor {
    /// Connect to PostgreSQL.
    ///
    /// # Errors
    /// Returns `DbError::ConnectionFailed` if the settings are incomplete, TLS
    /// is requested, or the server refuses the connection.
    pub fn connect(config: &PostgresConfig) -> Result<Self, DbError> {
        if config.ssl {
            return Err(DbError::ConnectionFailed {
                message: "TLS connections are not supported; set \"ssl\": false".to_string(),
            });
        }
        let conn = config.to_connection_string()?;
        let client = Client::connect(&conn, NoTls).map_err(|e| DbError::ConnectionFailed {
            message: e.to_string(),
        })?;
        log::debug!("Connected to PostgreSQL");
        Ok(Self {
            client: Mutex::new(client),
        })
    }

    fn with_client<T>(
        &self,
        f: impl FnOnce(&mut Client) -> Result<T, postgres::Error>,
    ) -> Result<T, DbError> {
        let mut client = self.client.lock().map_err(|e| DbError::QueryFailed {
            message: format!("Failed to acquire connection lock: {}", e),
        })?;
        f(&mut client).map_err(classify_error)
    }
}

/// Map a driver error onto `DbError` by SQLSTATE.
fn classify_error(e: postgres::Error) -> DbError {
    let message = match e.as_db_error() {
        Some(db_err) => db_err.message().to_string(),
        None => e.to_string(),
    };
    match e.code() {
        Some(code) if *code == SqlState::UNDEFINED_TABLE => DbError::UndefinedRelation { message },
        Some(code) if *code == SqlState::WRONG_OBJECT_TYPE => DbError::WrongObjectType { message },
        _ => DbError::QueryFailed { message },
    }
}

fn to_sql_values(params: &[SqlParam]) -> Vec<Box<dyn ToSql + Sync>> {
    params
        .iter()
        .map(|p| match p {
            SqlParam::Text(s) => Box::new(s.clone()) as Box<dyn ToSql + Sync>,
            SqlParam::TextArray(items) => Box::new(items.clone()) as Box<dyn ToSql + Sync>,
            SqlParam::Int(n) => Box::new(*n) as Box<dyn ToSql + Sync>,
        })
        .collect()
}

impl SqlExecutor for PostgresExecutor {
    fn execute(&self, sql: &str) -> Result<(), DbError> {
        log::debug!("Executing SQL:\n{}", sql);
        self.with_client(|client| client.batch_execute(sql))
    }

    fn query_json(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Value>, DbError> {
        log::debug!("Querying SQL: {} ({} params)", sql, params.len());
        let values = to_sql_values(params);
        let refs: Vec<&(dyn ToSql + Sync)> = values.iter().map(|v| v.as_ref()).collect();

        let rows = self.with_client(|client| client.query(sql, &refs))?;
        rows.iter()
            .map(|row| {
                row.try_get::<_, Option<Value>>(0)
                    .map(|v| v.unwrap_or(Value::Null))
                    .map_err(classify_error)
            })
            .collect()
    }

    fn view_kind(&self, name: &str) -> Result<Option<ViewKind>, DbError> {
        let quoted = quote_ident(name);
        let rows = self.with_client(|client| client.query(VIEW_KIND_QUERY, &[&quoted]))?;
        let Some(row) = rows.first() else {
            return Ok(None);
        };
        let kind: String = row.try_get(0).map_err(classify_error)?;
        Ok(match kind.as_str() {
            "v" => Some(ViewKind::Plain),
            "m" => Some(ViewKind::Materialized),
            _ => None,
        })
    }

    fn backend_name(&self) -> &'static str {
        "Postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_rejects_tls() {
        let config = PostgresConfig {
            connection_string: Some("host=localhost".to_string()),
            ssl: true,
            ..PostgresConfig::default()
        };
        let err = PostgresExecutor::connect(&config).err().unwrap();
        assert!(matches!(err, DbError::ConnectionFailed { .. }));
    }

    #[test]
    fn test_to_sql_values_len() {
        let params = vec![
            SqlParam::Text("a".into()),
            SqlParam::TextArray(vec!["x".into(), "y".into()]),
            SqlParam::Int(10),
        ];
        assert_eq!(to_sql_values(&params).len(), 3);
    }
}

//! Per-invocation collaborators handed to every command.
//!
//! The database connection is opened lazily on first use, so commands that
//! never touch PostgreSQL (`routes`, `compile`) run without one.

use std::cell::OnceCell;
use std::error::Error;

use crate::auth::{AccessDenied, Action, AllowAll, CapabilityCheck, PermissionTable};
use crate::config::ConfigFile;
use crate::db::{open_db, DbError, PostgresConfig, SqlExecutor};
use crate::resolver::{resolve, FieldTree, ResolvePolicy};
use crate::schema::{
    DirectusClassifier, FileSchemaProvider, RelationTypeClassifier, SchemaError, SchemaProvider, SchemaSnapshot,
};

pub struct AppContext {
    db: OnceCell<Box<dyn SqlExecutor>>,
    database: Option<PostgresConfig>,
    schema: Option<Box<dyn SchemaProvider>>,
    classifier: Box<dyn RelationTypeClassifier>,
    policy: ResolvePolicy,
    access: Box<dyn CapabilityCheck>,
}

impl AppContext {
    /// Context over `schema` with default policy, Directus rules and no access control.
    pub fn new(schema: Box<dyn SchemaProvider>) -> Self {
        Self {
            db: OnceCell::new(),
            database: None,
            schema: Some(schema),
            classifier: Box::new(DirectusClassifier),
            policy: ResolvePolicy::default(),
            access: Box::new(AllowAll),
        }
    }

    pub fn from_config(config: ConfigFile) -> Self {
        let access: Box<dyn CapabilityCheck> = match config.access {
            Some(access) => Box::new(PermissionTable::new(access)),
            None => Box::new(AllowAll),
        };
        Self {
            db: OnceCell::new(),
            database: config.database,
            schema: config
                .schema
                .path
                .map(|path| Box::new(FileSchemaProvider::new(path)) as Box<dyn SchemaProvider>),
            classifier: Box::new(DirectusClassifier),
            policy: config.resolver,
            access,
        }
    }

    /// Use `db` instead of connecting.
    pub fn with_executor(mut self, db: Box<dyn SqlExecutor>) -> Self {
        self.db = OnceCell::from(db);
        self
    }

    pub fn with_policy(mut self, policy: ResolvePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_access(mut self, access: Box<dyn CapabilityCheck>) -> Self {
        self.access = access;
        self
    }

    pub fn with_classifier(mut self, classifier: Box<dyn RelationTypeClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn policy(&self) -> &ResolvePolicy {
        &self.policy
    }

    /// The executor, connecting on first call.
    pub fn db(&self) -> Result<&dyn SqlExecutor, DbError> {
        if self.db.get().is_none() {
            let config = self.database.as_ref().ok_or_else(|| DbError::ConnectionFailed {
                message: format!(
                    "no database configured\n\n{}",
                    ConfigFile::help()
                ),
            })?;
            let executor = open_db(config)?;
            log::debug!("Using {} executor", executor.backend_name());
            let _ = self.db.set(Box::new(executor));
        }
        self.db
            .get()
            .map(|db| &**db)
            .ok_or_else(|| DbError::ConnectionFailed {
                message: "connection was not initialised".to_string(),
            })
    }

    /// Capability check, run once per command before anything else.
    pub fn authorize(&self, collection: &str, action: Action) -> Result<(), AccessDenied> {
        self.access.authorize(collection, action)
    }

    /// A fresh snapshot from the configured provider.
    pub fn snapshot(&self) -> Result<SchemaSnapshot, SchemaError> {
        match &self.schema {
            Some(provider) => provider.snapshot(),
            None => Err(SchemaError::NotConfigured),
        }
    }

    /// Resolve the field tree for `collection` against a fresh snapshot.
    pub fn resolve(&self, collection: &str) -> Result<FieldTree, Box<dyn Error>> {
        let snapshot = self.snapshot()?;
        let tree = resolve(collection, &snapshot, self.classifier.as_ref(), &self.policy)?;
        Ok(tree)
    }
}

//! Schema snapshot providers.

use std::fs;
use std::path::{Path, PathBuf};

use super::definition::SchemaSnapshot;
use super::SchemaError;

/// Source of the current schema snapshot.
///
/// Called once per create/compile request; implementations must not cache
/// across calls unless they can tell when the schema changed.
pub trait SchemaProvider {
    fn snapshot(&self) -> Result<SchemaSnapshot, SchemaError>;
}

/// Reads the snapshot from a JSON file on every call.
#[derive(Debug, Clone)]
pub struct FileSchemaProvider {
    path: PathBuf,
}

impl FileSchemaProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchemaProvider for FileSchemaProvider {
    fn snapshot(&self) -> Result<SchemaSnapshot, SchemaError> {
        let content = fs::read_to_string(&self.path).map_err(|e| SchemaError::ReadFailed {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        SchemaSnapshot::from_json(&content)
    }
}

/// Serves a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticSchemaProvider {
    snapshot: SchemaSnapshot,
}

impl StaticSchemaProvider {
    pub fn new(snapshot: SchemaSnapshot) -> Self {
        Self { snapshot }
    }
}

impl SchemaProvider for StaticSchemaProvider {
    fn snapshot(&self) -> Result<SchemaSnapshot, SchemaError> {
        Ok(self.snapshot.clone())
    }
}

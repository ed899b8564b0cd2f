//! Schema graph consumed by the resolver.
//!
//! # Overview
//!
//! 1. **Snapshot types** (`definition.rs`):
//!    - `SchemaSnapshot` - collections plus the flat relation list
//!    - `CollectionSchema` / `FieldDef` - fields flagged alias or special
//!    - `RelationSchema` / `JoinSchema` / `RelationMeta` - join columns and polymorphic targets
//!
//! 2. **Classification** (`classifier.rs`):
//!    - `RelationKind` - m2o, o2m, m2a
//!    - `RelationTypeClassifier` - trait; `DirectusClassifier` is the default rule set
//!
//! 3. **Providers** (`provider.rs`):
//!    - `SchemaProvider` - trait returning a fresh snapshot per request
//!    - `FileSchemaProvider`, `StaticSchemaProvider`

mod classifier;
mod definition;
mod provider;

pub use classifier::{DirectusClassifier, RelationKind, RelationTypeClassifier};
pub use definition::{
    CollectionSchema, FieldDef, JoinColumns, JoinSchema, RelationMeta, RelationSchema, SchemaSnapshot,
};
pub use provider::{FileSchemaProvider, SchemaProvider, StaticSchemaProvider};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to read schema snapshot '{path}': {message}")]
    ReadFailed { path: String, message: String },

    #[error("Invalid schema snapshot: {message}")]
    InvalidSnapshot { message: String },

    #[error("No schema snapshot configured: set schema.path in the config file or PG_JSON_VIEWS_SCHEMA")]
    NotConfigured,
}

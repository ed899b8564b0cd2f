//! Schema snapshot types.
//!
//! The snapshot mirrors what a headless CMS reports about its tables: a map of
//! collections (each with named fields, some of which are alias/virtual) and a
//! flat list of relations carrying join columns and polymorphic metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::SchemaError;

/// A single field of a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Virtual field with no backing column (o2m / m2a sides)
    #[serde(default)]
    pub alias: bool,

    /// Special tags such as `"o2m"`, `"m2a"`, `"m2o"`
    #[serde(default)]
    pub special: Vec<String>,
}

impl FieldDef {
    pub fn has_special(&self, tag: &str) -> bool {
        self.special.iter().any(|s| s == tag)
    }
}

/// A collection (table) and its fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    /// Filled in from the snapshot map key
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub fields: BTreeMap<String, FieldDef>,
}

impl CollectionSchema {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    /// Names of alias (virtual) fields, in name order.
    pub fn alias_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, def)| def.alias)
            .map(|(name, _)| name.as_str())
    }
}

/// Join columns of a relation as reported by the database.
///
/// For a relation stored on `table.column` pointing at
/// `foreign_key_table.foreign_key_column`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinSchema {
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub foreign_key_table: Option<String>,
    #[serde(default)]
    pub foreign_key_column: Option<String>,
}

/// Join columns with every required part present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinColumns {
    pub table: String,
    pub column: String,
    pub foreign_key_column: String,
}

impl JoinSchema {
    /// Returns the join columns if `table`, `column` and `foreign_key_column` are all set.
    pub fn complete(&self) -> Option<JoinColumns> {
        Some(JoinColumns {
            table: self.table.clone()?,
            column: self.column.clone()?,
            foreign_key_column: self.foreign_key_column.clone()?,
        })
    }
}

/// Relation metadata (sorting, reverse field, polymorphic targets).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationMeta {
    /// Alias field on the related collection (o2m side)
    #[serde(default)]
    pub one_field: Option<String>,

    /// Discriminant column naming the target collection (m2a only)
    #[serde(default)]
    pub one_collection_field: Option<String>,

    /// Allowed target collections (m2a only)
    #[serde(default)]
    pub one_allowed_collections: Option<Vec<String>>,

    #[serde(default)]
    pub sort_field: Option<String>,

    #[serde(default)]
    pub junction_field: Option<String>,
}

/// A relation between two collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationSchema {
    /// Collection holding the foreign key column
    pub collection: String,

    /// Foreign key field on `collection`
    pub field: String,

    /// Referenced collection; `None` for polymorphic (m2a) relations
    #[serde(default)]
    pub related_collection: Option<String>,

    #[serde(default)]
    pub schema: Option<JoinSchema>,

    #[serde(default)]
    pub meta: Option<RelationMeta>,
}

impl RelationSchema {
    pub fn join_columns(&self) -> Option<JoinColumns> {
        self.schema.as_ref().and_then(JoinSchema::complete)
    }

    pub fn one_field(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.one_field.as_deref())
    }

    pub fn sort_field(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.sort_field.as_deref())
    }

    pub fn allowed_collections(&self) -> Option<&[String]> {
        self.meta
            .as_ref()
            .and_then(|m| m.one_allowed_collections.as_deref())
    }

    pub fn discriminant_field(&self) -> Option<&str> {
        self.meta
            .as_ref()
            .and_then(|m| m.one_collection_field.as_deref())
    }
}

/// The full schema graph at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    #[serde(default)]
    pub collections: BTreeMap<String, CollectionSchema>,

    #[serde(default)]
    pub relations: Vec<RelationSchema>,
}

impl SchemaSnapshot {
    /// Parse a snapshot from JSON, filling in collection names from map keys.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let mut snapshot: SchemaSnapshot =
            serde_json::from_str(json).map_err(|e| SchemaError::InvalidSnapshot {
                message: e.to_string(),
            })?;
        for (name, collection) in snapshot.collections.iter_mut() {
            collection.name = name.clone();
        }
        Ok(snapshot)
    }

    pub fn collection(&self, name: &str) -> Option<&CollectionSchema> {
        self.collections.get(name)
    }

    pub fn has_field(&self, collection: &str, field: &str) -> bool {
        self.collection(collection)
            .is_some_and(|c| c.fields.contains_key(field))
    }
}

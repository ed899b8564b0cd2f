//! Relation resolution: schema graph to depth-bounded field tree.
//!
//! A depth-first walk from the root collection. Each step carries the chain of
//! collections visited so far; the walk never detects cycles at runtime, it
//! simply cannot produce an infinite tree:
//!
//! - a `(parent, child)` hop may occur at most `max_depth` times along a path;
//!   the hop that reaches the bound becomes a leaf (scalar fields only)
//! - an m2o relation never points back at the direct parent collection
//! - coming back to the root collection produces a leaf
//! - excluded collections are never nested
//!
//! Relations without complete join columns are dropped with a warning. A nested
//! collection missing from the snapshot aborts the whole pass.

mod tree;

pub use tree::{FieldNode, FieldTree, PolymorphicNode, RelationNode, TargetNode};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::{
    CollectionSchema, FieldDef, RelationKind, RelationSchema, RelationTypeClassifier, SchemaSnapshot,
};

/// Discriminant column used when an m2a relation does not name one.
pub const DEFAULT_DISCRIMINANT: &str = "collection";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("{name} not found")]
    CollectionNotFound { name: String },
}

fn default_max_depth() -> usize {
    2
}

fn default_excluded_collections() -> BTreeSet<String> {
    ["directus_users", "directus_files"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_excluded_prefixes() -> Vec<String> {
    vec!["directus_".to_string()]
}

/// Resolution policy: depth bound, exclusions and root handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvePolicy {
    /// Maximum times a `(parent, child)` hop may appear along one path
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_excluded_collections")]
    pub excluded_collections: BTreeSet<String>,

    /// Collections whose name starts with any of these are excluded too
    #[serde(default = "default_excluded_prefixes")]
    pub excluded_prefixes: Vec<String>,

    /// Expand the root collection again when a path leads back to it
    #[serde(default)]
    pub revisit_root: bool,
}

impl Default for ResolvePolicy {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            excluded_collections: default_excluded_collections(),
            excluded_prefixes: default_excluded_prefixes(),
            revisit_root: false,
        }
    }
}

impl ResolvePolicy {
    pub fn is_excluded(&self, collection: &str) -> bool {
        self.excluded_collections.contains(collection)
            || self
                .excluded_prefixes
                .iter()
                .any(|prefix| collection.starts_with(prefix.as_str()))
    }
}

/// Resolve the field tree rooted at `root`.
pub fn resolve(
    root: &str,
    snapshot: &SchemaSnapshot,
    classifier: &dyn RelationTypeClassifier,
    policy: &ResolvePolicy,
) -> Result<FieldTree, ResolveError> {
    let collection = lookup(snapshot, root)?;
    let resolver = Resolver {
        root,
        snapshot,
        classifier,
        policy,
    };

    let path = vec![root.to_string()];
    let fields = if policy.is_excluded(root) {
        scalar_fields(collection)
    } else {
        resolver.expand(collection, &path)?
    };

    Ok(FieldTree {
        root: root.to_string(),
        fields,
    })
}

fn lookup<'s>(snapshot: &'s SchemaSnapshot, name: &str) -> Result<&'s CollectionSchema, ResolveError> {
    snapshot
        .collection(name)
        .ok_or_else(|| ResolveError::CollectionNotFound {
            name: name.to_string(),
        })
}

fn scalar_fields(collection: &CollectionSchema) -> Vec<FieldNode> {
    collection
        .fields
        .iter()
        .filter(|(_, def)| !def.alias)
        .map(|(name, _)| FieldNode::Scalar { name: name.clone() })
        .collect()
}

/// Times the last hop of `path` occurs along it.
fn hop_repetitions(path: &[String]) -> usize {
    let [.., parent, child] = path else {
        return 0;
    };
    path.windows(2)
        .filter(|w| &w[0] == parent && &w[1] == child)
        .count()
}

struct Resolver<'a> {
    root: &'a str,
    snapshot: &'a SchemaSnapshot,
    classifier: &'a dyn RelationTypeClassifier,
    policy: &'a ResolvePolicy,
}

impl<'a> Resolver<'a> {
    /// Resolve every field of `collection`, the last element of `path`.
    fn expand(&self, collection: &CollectionSchema, path: &[String]) -> Result<Vec<FieldNode>, ResolveError> {
        let mut fields = Vec::with_capacity(collection.fields.len());

        for (name, def) in &collection.fields {
            let resolved = match self.relation_for(collection, name) {
                Some((relation, kind)) => self.resolve_field(collection, path, name, def, relation, kind)?,
                None => None,
            };

            match resolved {
                Some(node) => fields.push(node),
                // The column still comes through `.*`; alias fields have no column.
                None if !def.alias => fields.push(FieldNode::Scalar { name: name.clone() }),
                None => {}
            }
        }

        Ok(fields)
    }

    /// First relation applying to `collection.field`, with its kind.
    fn relation_for(&self, collection: &CollectionSchema, field: &str) -> Option<(&'a RelationSchema, RelationKind)> {
        self.snapshot
            .relations
            .iter()
            .filter(|r| self.is_owned_by(r, collection))
            .find_map(|r| {
                self.classifier
                    .classify(r, &collection.name, field)
                    .map(|kind| (r, kind))
            })
    }

    /// A relation belongs to a collection directly, through its reverse side,
    /// or through a `<collection>_<alias field>` junction.
    fn is_owned_by(&self, relation: &RelationSchema, collection: &CollectionSchema) -> bool {
        relation.collection == collection.name
            || relation.related_collection.as_deref() == Some(collection.name.as_str())
            || collection
                .alias_fields()
                .any(|alias| relation.collection == format!("{}_{}", collection.name, alias))
    }

    fn resolve_field(
        &self,
        collection: &CollectionSchema,
        path: &[String],
        name: &str,
        def: &FieldDef,
        relation: &RelationSchema,
        kind: RelationKind,
    ) -> Result<Option<FieldNode>, ResolveError> {
        if kind == RelationKind::M2a && relation.collection == collection.name && relation.field == name {
            return self.resolve_polymorphic(collection, path, name, relation);
        }

        // An o2m alias tagged m2a aggregates junction rows that resolve per row.
        let kind = if kind == RelationKind::O2m && def.has_special("m2a") {
            RelationKind::M2a
        } else {
            kind
        };

        let target_name = match kind {
            RelationKind::M2o => relation.related_collection.as_deref(),
            RelationKind::O2m | RelationKind::M2a => Some(relation.collection.as_str()),
        };
        let Some(target_name) = target_name else {
            log::debug!("{}.{}: m2o relation without related collection", collection.name, name);
            return Ok(None);
        };

        if self.policy.is_excluded(target_name) {
            log::debug!("{}.{}: target {} is excluded", collection.name, name, target_name);
            return Ok(None);
        }
        if target_name == collection.name {
            log::debug!("{}.{}: skipping self-relation", collection.name, name);
            return Ok(None);
        }
        let parent = path.len().checked_sub(2).map(|i| path[i].as_str());
        if kind == RelationKind::M2o && parent == Some(target_name) {
            log::debug!("{}.{}: skipping back-reference to parent {}", collection.name, name, target_name);
            return Ok(None);
        }

        let Some(join) = relation.join_columns() else {
            log::warn!(
                "{}.{}: relation has no join schema (table/column/foreign_key_column), field dropped",
                collection.name,
                name
            );
            return Ok(None);
        };

        let target = lookup(self.snapshot, target_name)?;

        let (fk_holder, pk_holder) = match kind {
            RelationKind::M2o => (collection.name.as_str(), target_name),
            RelationKind::O2m | RelationKind::M2a => (target_name, collection.name.as_str()),
        };
        if !self.snapshot.has_field(fk_holder, &join.column)
            || !self.snapshot.has_field(pk_holder, &join.foreign_key_column)
        {
            log::warn!(
                "{}.{}: join columns {}.{} / {}.{} not in schema, field dropped",
                collection.name,
                name,
                fk_holder,
                join.column,
                pk_holder,
                join.foreign_key_column
            );
            return Ok(None);
        }

        let sort_field = match (kind, relation.sort_field()) {
            (RelationKind::M2o, _) | (_, None) => None,
            (_, Some(sort)) if target.fields.contains_key(sort) => Some(sort.to_string()),
            (_, Some(sort)) => {
                log::warn!("{}.{}: sort field {} not in {}, ignored", collection.name, name, sort, target_name);
                None
            }
        };

        let target = self.target(target, path)?;
        Ok(Some(FieldNode::Relation {
            name: name.to_string(),
            relation: RelationNode {
                kind,
                join,
                sort_field,
                target,
            },
        }))
    }

    fn resolve_polymorphic(
        &self,
        collection: &CollectionSchema,
        path: &[String],
        name: &str,
        relation: &RelationSchema,
    ) -> Result<Option<FieldNode>, ResolveError> {
        let discriminant = relation.discriminant_field().unwrap_or(DEFAULT_DISCRIMINANT);
        if !collection.fields.contains_key(discriminant) {
            log::warn!(
                "{}.{}: discriminant column {} not in schema, field dropped",
                collection.name,
                name,
                discriminant
            );
            return Ok(None);
        }

        let parent = path.len().checked_sub(2).map(|i| path[i].as_str());
        let mut targets = Vec::new();
        for allowed in relation.allowed_collections().unwrap_or_default() {
            if self.policy.is_excluded(allowed)
                || (allowed == self.root && !self.policy.revisit_root)
                || allowed == &collection.name
                || parent == Some(allowed.as_str())
            {
                log::debug!("{}.{}: polymorphic target {} filtered", collection.name, name, allowed);
                continue;
            }
            let target = lookup(self.snapshot, allowed)?;
            targets.push(self.target(target, path)?);
        }

        if targets.is_empty() {
            log::debug!("{}.{}: no polymorphic targets left", collection.name, name);
            return Ok(None);
        }

        Ok(Some(FieldNode::Polymorphic {
            name: name.to_string(),
            node: PolymorphicNode {
                discriminant: discriminant.to_string(),
                targets,
            },
        }))
    }

    /// Build the node for `target` reached from the end of `path`.
    fn target(&self, target: &CollectionSchema, path: &[String]) -> Result<TargetNode, ResolveError> {
        let mut next = path.to_vec();
        next.push(target.name.clone());

        let back_at_root = target.name == self.root && !self.policy.revisit_root;
        let fields = if back_at_root || hop_repetitions(&next) >= self.policy.max_depth {
            scalar_fields(target)
        } else {
            self.expand(target, &next)?
        };

        Ok(TargetNode {
            collection: target.name.clone(),
            fields,
        })
    }
}

//! Resolved field tree.
//!
//! Built fresh per resolution pass. Cycles in the schema graph are already cut,
//! so the tree is finite and can be walked recursively without guards.

use serde::Serialize;

use crate::schema::{JoinColumns, RelationKind};

/// The resolved tree for one root collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldTree {
    pub root: String,
    pub fields: Vec<FieldNode>,
}

/// A field of a collection, either a plain column or a nested relation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldNode {
    /// Plain column, carried through by `"<collection>".*`
    Scalar { name: String },

    /// m2o / o2m (and o2m-shaped m2a junction) relation
    Relation { name: String, relation: RelationNode },

    /// Per-row polymorphic reference: the target collection is read from a
    /// discriminant column and the row id from this field
    Polymorphic { name: String, node: PolymorphicNode },
}

impl FieldNode {
    pub fn name(&self) -> &str {
        match self {
            FieldNode::Scalar { name } => name,
            FieldNode::Relation { name, .. } => name,
            FieldNode::Polymorphic { name, .. } => name,
        }
    }

    pub fn is_nested(&self) -> bool {
        !matches!(self, FieldNode::Scalar { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationNode {
    pub kind: RelationKind,
    #[serde(skip)]
    pub join: JoinColumns,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    pub target: TargetNode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolymorphicNode {
    /// Column naming the target collection of each row
    pub discriminant: String,
    pub targets: Vec<TargetNode>,
}

/// A collection reached through a relation, with its own resolved fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetNode {
    pub collection: String,
    pub fields: Vec<FieldNode>,
}

impl TargetNode {
    /// True if any field nests further (relation or polymorphic).
    pub fn has_nested_fields(&self) -> bool {
        self.fields.iter().any(FieldNode::is_nested)
    }
}

impl FieldTree {
    /// Names of the relation (non-scalar) fields at the root.
    pub fn relation_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.is_nested())
            .map(FieldNode::name)
            .collect()
    }

    /// Every root-to-leaf chain of collections.
    pub fn collection_paths(&self) -> Vec<Vec<String>> {
        let mut paths = Vec::new();
        collect_paths(&self.fields, vec![self.root.clone()], &mut paths);
        paths
    }
}

fn collect_paths(fields: &[FieldNode], path: Vec<String>, out: &mut Vec<Vec<String>>) {
    let mut leaf = true;
    for field in fields {
        let targets: Vec<&TargetNode> = match field {
            FieldNode::Scalar { .. } => continue,
            FieldNode::Relation { relation, .. } => vec![&relation.target],
            FieldNode::Polymorphic { node, .. } => node.targets.iter().collect(),
        };
        for target in targets {
            leaf = false;
            let mut next = path.clone();
            next.push(target.collection.clone());
            collect_paths(&target.fields, next, out);
        }
    }
    if leaf {
        out.push(path);
    }
}

//! Query compilation: resolved field tree to one nested SQL SELECT.
//!
//! Every relation field becomes a correlated subquery embedded in its parent's
//! select list:
//!
//! ```text
//! (SELECT <agg>("nested_<parent>_<field>")
//!    FROM (SELECT "<target>".* [, <nested columns>]
//!            FROM "<target>"
//!           WHERE <join predicate> [ORDER BY "<target>"."<sort>"]) AS "nested_<parent>_<field>") AS "<field>"
//! ```
//!
//! `<agg>` is `row_to_json` for m2o and `json_agg` for o2m/m2a. Polymorphic
//! columns are compiled in [`polymorphic`] and resolved per row by the helper
//! routines installed with [`HELPER_ROUTINES`].
//!
//! Compilation is a pure function of the tree: identifiers were validated
//! against the snapshot during resolution, so nothing here can fail and the
//! same tree always yields the same text.

mod polymorphic;

pub use polymorphic::{HELPER_ROUTINES, RESOLVE_ROW, RESOLVE_ROW_WITH_NESTED};

use serde::Serialize;

use crate::db::quote_ident;
use crate::resolver::{FieldNode, FieldTree, RelationNode};
use crate::schema::RelationKind;

/// Compiled SELECT for one root collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    pub root: String,
    pub sql: String,
}

/// Compile a resolved tree into a single SELECT over its root collection.
pub fn compile(tree: &FieldTree) -> CompiledQuery {
    let sql = format!(
        "{} FROM {}",
        select_list(&tree.root, &tree.fields),
        quote_ident(&tree.root)
    );
    log::debug!("Compiled {}: {}", tree.root, sql);
    CompiledQuery {
        root: tree.root.clone(),
        sql,
    }
}

/// Aggregate function producing a relation column.
pub fn aggregate(kind: RelationKind) -> &'static str {
    match kind {
        RelationKind::M2o => "row_to_json",
        RelationKind::O2m | RelationKind::M2a => "json_agg",
    }
}

/// `SELECT "<collection>".*` followed by one column per nested field.
pub(crate) fn select_list(collection: &str, fields: &[FieldNode]) -> String {
    let mut sql = format!("SELECT {}.*", quote_ident(collection));
    for field in fields {
        let column = match field {
            FieldNode::Scalar { .. } => continue,
            FieldNode::Relation { name, relation } => relation_column(collection, name, relation),
            FieldNode::Polymorphic { name, node } => polymorphic::column(collection, name, node),
        };
        sql.push_str(", ");
        sql.push_str(&column);
    }
    sql
}

fn relation_column(parent: &str, name: &str, relation: &RelationNode) -> String {
    let target = &relation.target.collection;
    let alias = quote_ident(&format!("nested_{}_{}", parent, name));

    let order = match &relation.sort_field {
        Some(sort) => format!(" ORDER BY {}.{}", quote_ident(target), quote_ident(sort)),
        None => String::new(),
    };

    format!(
        "(SELECT {agg}({alias}) FROM ({select} FROM {table} WHERE {predicate}{order}) AS {alias}) AS {field}",
        agg = aggregate(relation.kind),
        alias = alias,
        select = select_list(target, &relation.target.fields),
        table = quote_ident(target),
        predicate = join_predicate(parent, relation),
        order = order,
        field = quote_ident(name),
    )
}

/// m2o: the parent holds the key. o2m and m2a junctions: the child does.
fn join_predicate(parent: &str, relation: &RelationNode) -> String {
    let target = &relation.target.collection;
    let join = &relation.join;
    match relation.kind {
        RelationKind::M2o => format!(
            "{}.{} = {}.{}",
            quote_ident(parent),
            quote_ident(&join.column),
            quote_ident(target),
            quote_ident(&join.foreign_key_column)
        ),
        RelationKind::O2m | RelationKind::M2a => format!(
            "{}.{} = {}.{}",
            quote_ident(target),
            quote_ident(&join.column),
            quote_ident(parent),
            quote_ident(&join.foreign_key_column)
        ),
    }
}

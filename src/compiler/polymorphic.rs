//! Polymorphic (m2a) columns and the database routines that resolve them.
//!
//! The target table of an m2a row is named by data, so the compiled column is a
//! `CASE` on the discriminant that hands `(collection, item id)` to a helper:
//!
//! - targets with nested fields go through `resolve_row_with_nested`, which
//!   receives a JSON map `{collection: sub-select}` and runs the matching
//!   sub-select filtered to the item id
//! - the other targets go through `resolve_row`, a plain `row_to_json` by id
//! - any other discriminant value yields `{}`
//!
//! The map travels as a string literal. When it is itself part of a sub-select
//! inside another map, its quotes are escaped again by the outer literal, so a
//! map at nesting depth N carries 2^(N-1) quote characters per quote. Building
//! the inner text first and quoting it once per level gives that for free.

use serde_json::{Map, Value};

use crate::db::{quote_ident, quote_literal};
use crate::resolver::{PolymorphicNode, TargetNode};

use super::select_list;

/// Per-row lookup through a map of nested sub-selects.
pub const RESOLVE_ROW_WITH_NESTED: &str = r#"CREATE OR REPLACE FUNCTION resolve_row_with_nested(_collection text, _item_id text, _subqueries json)
RETURNS SETOF json
LANGUAGE plpgsql STABLE
AS $$
DECLARE
    _subquery text := _subqueries ->> _collection;
BEGIN
    IF _subquery IS NULL THEN
        RETURN NEXT '{}'::json;
        RETURN;
    END IF;
    RETURN QUERY EXECUTE format('SELECT row_to_json(t) FROM (%s WHERE %I.id::text = %L) t', _subquery, _collection, _item_id);
END
$$;"#;

/// Per-row lookup of a flat row by id.
pub const RESOLVE_ROW: &str = r#"CREATE OR REPLACE FUNCTION resolve_row(_collection text, _item_id text)
RETURNS SETOF json
LANGUAGE plpgsql STABLE
AS $$
BEGIN
    RETURN QUERY EXECUTE format('SELECT row_to_json(t) FROM %I t WHERE t.id::text = %L', _collection, _item_id);
END
$$;"#;

/// Both routines, in installation order.
pub const HELPER_ROUTINES: [&str; 2] = [RESOLVE_ROW_WITH_NESTED, RESOLVE_ROW];

/// Compile the `CASE` column for a polymorphic field of `parent`.
pub(super) fn column(parent: &str, name: &str, node: &PolymorphicNode) -> String {
    let discriminant = format!("{}.{}", quote_ident(parent), quote_ident(&node.discriminant));
    let item = format!("{}.{}::text", quote_ident(parent), quote_ident(name));

    let (nested, plain): (Vec<&TargetNode>, Vec<&TargetNode>) =
        node.targets.iter().partition(|t| t.has_nested_fields());

    let mut sql = String::from("CASE");
    if !nested.is_empty() {
        let map = Value::Object(subquery_map(&nested)).to_string();
        sql.push_str(&format!(
            " WHEN {disc} IN ({targets}) THEN (SELECT \"resolved\" FROM resolve_row_with_nested({disc}, {item}, {map}::json) AS \"resolved\")",
            disc = discriminant,
            targets = in_list(&nested),
            item = item,
            map = quote_literal(&map),
        ));
    }
    if !plain.is_empty() {
        sql.push_str(&format!(
            " WHEN {disc} IN ({targets}) THEN (SELECT \"resolved\" FROM resolve_row({disc}, {item}) AS \"resolved\")",
            disc = discriminant,
            targets = in_list(&plain),
            item = item,
        ));
    }
    sql.push_str(&format!(" ELSE '{{}}'::json END AS {}", quote_ident(name)));
    sql
}

/// `{collection: "SELECT ... FROM \"collection\""}` for every target given.
fn subquery_map(targets: &[&TargetNode]) -> Map<String, Value> {
    targets
        .iter()
        .map(|t| {
            let sub_select = format!(
                "{} FROM {}",
                select_list(&t.collection, &t.fields),
                quote_ident(&t.collection)
            );
            (t.collection.clone(), Value::String(sub_select))
        })
        .collect()
}

fn in_list(targets: &[&TargetNode]) -> String {
    targets
        .iter()
        .map(|t| quote_literal(&t.collection))
        .collect::<Vec<_>>()
        .join(", ")
}

//! Relation type classification.

use std::fmt;

use serde::Serialize;

use super::definition::RelationSchema;

/// Relation cardinality as seen from one collection's field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    /// many-to-one: the field holds a foreign key to one row
    M2o,
    /// one-to-many: rows of another collection point back here
    O2m,
    /// many-to-any: the target collection is chosen per row by a discriminant
    M2a,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::M2o => "m2o",
            RelationKind::O2m => "o2m",
            RelationKind::M2a => "m2a",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assigns a relation kind to a (relation, collection, field) triple.
pub trait RelationTypeClassifier {
    /// Returns `None` when the relation does not apply to `collection.field`.
    fn classify(&self, relation: &RelationSchema, collection: &str, field: &str) -> Option<RelationKind>;
}

/// Directus-style classification rules.
///
/// - m2a: the relation lives on `collection.field` and lists allowed targets
/// - m2o: the relation lives on `collection.field`
/// - o2m: the relation points at `collection` and its `one_field` is `field`;
///   without `one_field`, a relation stored on `<collection>_<field>` (junction
///   naming) also counts
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectusClassifier;

impl RelationTypeClassifier for DirectusClassifier {
    fn classify(&self, relation: &RelationSchema, collection: &str, field: &str) -> Option<RelationKind> {
        if relation.collection == collection && relation.field == field {
            if relation.allowed_collections().is_some() {
                return Some(RelationKind::M2a);
            }
            return Some(RelationKind::M2o);
        }

        if relation.related_collection.as_deref() == Some(collection) {
            match relation.one_field() {
                Some(one_field) if one_field == field => return Some(RelationKind::O2m),
                Some(_) => return None,
                None if relation.collection == format!("{}_{}", collection, field) => {
                    return Some(RelationKind::O2m);
                }
                None => return None,
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::definition::RelationMeta;
    use rstest::rstest;

    fn relation(collection: &str, field: &str, related: Option<&str>, meta: RelationMeta) -> RelationSchema {
        RelationSchema {
            collection: collection.to_string(),
            field: field.to_string(),
            related_collection: related.map(str::to_string),
            schema: None,
            meta: Some(meta),
        }
    }

    #[rstest]
    fn test_m2o() {
        let rel = relation("comments", "author", Some("users"), RelationMeta::default());
        assert_eq!(DirectusClassifier.classify(&rel, "comments", "author"), Some(RelationKind::M2o));
    }

    #[rstest]
    fn test_o2m_by_one_field() {
        let meta = RelationMeta {
            one_field: Some("comments".into()),
            ..RelationMeta::default()
        };
        let rel = relation("comments", "article_id", Some("articles"), meta);
        assert_eq!(DirectusClassifier.classify(&rel, "articles", "comments"), Some(RelationKind::O2m));
        assert_eq!(DirectusClassifier.classify(&rel, "articles", "title"), None);
    }

    #[rstest]
    fn test_o2m_by_junction_name() {
        let rel = relation("pages_blocks", "pages_id", Some("pages"), RelationMeta::default());
        assert_eq!(DirectusClassifier.classify(&rel, "pages", "blocks"), Some(RelationKind::O2m));
        assert_eq!(DirectusClassifier.classify(&rel, "pages", "sections"), None);
    }

    #[rstest]
    fn test_m2a() {
        let meta = RelationMeta {
            one_collection_field: Some("collection".into()),
            one_allowed_collections: Some(vec!["text".into(), "hero".into()]),
            ..RelationMeta::default()
        };
        let rel = relation("pages_blocks", "item", None, meta);
        assert_eq!(DirectusClassifier.classify(&rel, "pages_blocks", "item"), Some(RelationKind::M2a));
    }

    #[rstest]
    fn test_unrelated() {
        let rel = relation("comments", "author", Some("users"), RelationMeta::default());
        assert_eq!(DirectusClassifier.classify(&rel, "articles", "author"), None);
    }

    #[rstest]
    #[case(RelationKind::M2o, "m2o")]
    #[case(RelationKind::O2m, "o2m")]
    #[case(RelationKind::M2a, "m2a")]
    fn test_display(#[case] kind: RelationKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }
}

//! Execute tests for create command.

#[cfg(test)]
mod tests {
    use super::super::CreateCmd;
    use crate::auth::{AccessDenied, Action, PermissionTable};
    use crate::commands::Execute;
    use crate::db::ViewKind;
    use crate::resolver::ResolveError;
    use crate::test_utils::{blog_context, grant, pages_context, RecordingExecutor};
    use rstest::rstest;

    fn create(collection: &str, materialized: bool) -> CreateCmd {
        CreateCmd {
            collection: collection.to_string(),
            materialized,
        }
    }

    crate::execute_test! {
        test_name: test_create_articles,
        context: blog_context(RecordingExecutor::new()),
        cmd: create("articles", false),
        assertions: |result| {
            assert_eq!(result.data, "Success");
            assert_eq!(result.view, "articles_view");
            assert_eq!(result.collection, "articles");
            assert!(!result.materialized);
            assert_eq!(result.relations, vec!["category", "comments"]);
        },
    }

    crate::execute_test! {
        test_name: test_create_pages_materialized,
        context: pages_context(RecordingExecutor::new()),
        cmd: create("pages", true),
        assertions: |result| {
            assert!(result.materialized);
            assert_eq!(result.relations, vec!["blocks"]);
        },
    }

    crate::execute_error_test! {
        test_name: test_create_unknown_collection,
        context: blog_context(RecordingExecutor::new()),
        cmd: create("nope", false),
        error: ResolveError,
    }

    crate::execute_error_test! {
        test_name: test_create_requires_create_permission,
        context: blog_context(RecordingExecutor::new())
            .with_access(Box::new(PermissionTable::new(grant("articles", Action::Read)))),
        cmd: create("articles", false),
        error: AccessDenied,
    }

    #[rstest]
    fn test_create_issues_ddl_in_order() {
        let db = RecordingExecutor::new();
        let ctx = blog_context(db.clone());
        create("articles", false).execute(&ctx).unwrap();

        let statements = db.statements();
        assert_eq!(statements.len(), 5);
        assert!(statements[0].starts_with("CREATE OR REPLACE FUNCTION resolve_row_with_nested"));
        assert!(statements[1].starts_with("CREATE OR REPLACE FUNCTION resolve_row("));
        assert_eq!(statements[2], r#"DROP VIEW IF EXISTS "articles_view""#);
        assert_eq!(statements[3], r#"DROP MATERIALIZED VIEW IF EXISTS "articles_view""#);
        assert!(statements[4].starts_with(
            r#"CREATE VIEW "articles_view" ("data") AS SELECT row_to_json("root") FROM (SELECT "articles".*, "#
        ));
        assert_eq!(db.view("articles_view"), Some(ViewKind::Plain));
    }

    #[rstest]
    fn test_recreate_replaces_view() {
        let db = RecordingExecutor::new();
        let ctx = blog_context(db.clone());
        create("articles", true).execute(&ctx).unwrap();
        create("articles", false).execute(&ctx).unwrap();
        assert_eq!(db.view("articles_view"), Some(ViewKind::Plain));
    }

    #[rstest]
    fn test_denied_create_runs_nothing() {
        let db = RecordingExecutor::new();
        let ctx = blog_context(db.clone())
            .with_access(Box::new(PermissionTable::new(grant("comments", Action::Create))));
        assert!(create("articles", false).execute(&ctx).is_err());
        assert!(db.statements().is_empty());
    }
}

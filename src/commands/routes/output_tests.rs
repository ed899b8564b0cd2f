//! Output formatting tests for routes command.

#[cfg(test)]
mod tests {
    use super::super::execute::RoutesResult;
    use super::super::RoutesCmd;
    use crate::commands::Execute;
    use crate::test_utils::{blog_context, RecordingExecutor};
    use rstest::{fixture, rstest};

    #[fixture]
    fn routes_result() -> RoutesResult {
        RoutesCmd {}
            .execute(&blog_context(RecordingExecutor::new()))
            .expect("routes never fails")
    }

    #[rstest]
    fn test_every_operation_listed(routes_result: RoutesResult) {
        let commands: Vec<_> = routes_result
            .routes
            .iter()
            .map(|r| r.command.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(
            commands,
            vec!["routes", "create", "refresh", "drop", "compile", "all", "find", "find-one"]
        );
    }

    crate::output_table_contains_test! {
        test_name: test_to_table,
        fixture: routes_result,
        fixture_type: RoutesResult,
        contains: [
            "Routes (8):",
            "GET /create/:collection[?materialized=true]",
            "GET /get/:collection/findOne?field=value...",
        ],
    }

    #[rstest]
    fn test_format_json(routes_result: RoutesResult) {
        use crate::output::{OutputFormat, Outputable};
        let parsed: serde_json::Value =
            serde_json::from_str(&routes_result.format(OutputFormat::Json)).unwrap();
        assert_eq!(parsed["routes"][0]["method"], "GET");
        assert_eq!(parsed["routes"][0]["path"], "/");
        assert_eq!(parsed["routes"][5]["path"], "/get/:collection/all");
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: routes_result,
        fixture_type: RoutesResult,
        contains: ["routes[8]"],
    }
}

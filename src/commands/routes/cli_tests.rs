//! CLI parsing tests for routes command.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;

    #[rstest]
    fn test_routes_parses() {
        let args = Args::try_parse_from(["pg_json_views", "routes"]).unwrap();
        assert!(matches!(args.command, crate::commands::Command::Routes(_)));
    }

    crate::cli_error_test! {
        command: "routes",
        test_name: test_routes_takes_no_arguments,
        args: ["articles"],
    }
}

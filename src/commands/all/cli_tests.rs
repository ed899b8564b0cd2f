//! CLI parsing tests for all command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;

    crate::cli_required_arg_test! {
        command: "all",
        test_name: test_all_requires_collection,
        required_arg: "<COLLECTION>",
    }

    crate::cli_option_test! {
        command: "all",
        variant: All,
        test_name: test_all_collection,
        args: ["articles"],
        field: collection,
        expected: "articles",
    }

    crate::cli_error_test! {
        command: "all",
        test_name: test_all_rejects_limit,
        args: ["articles", "--limit", "5"],
    }
}

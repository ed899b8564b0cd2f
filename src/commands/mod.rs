//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - `execute.rs`: the `Execute` impl and its result type
//! - `output.rs`: the `Outputable` impl for the result
//! - `*_tests.rs`: CLI parsing, execution and output tests

mod all;
mod compile;
mod create;
mod drop;
mod find;
mod find_one;
mod refresh;
mod routes;

pub use all::AllCmd;
pub use compile::CompileCmd;
pub use create::CreateCmd;
pub use drop::DropCmd;
pub use find::FindCmd;
pub use find_one::FindOneCmd;
pub use refresh::RefreshCmd;
pub use routes::RoutesCmd;

use clap::Subcommand;
use std::error::Error;

use crate::context::AppContext;
use crate::output::{OutputFormat, Outputable};
use crate::queries::Filters;

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, ctx: &AppContext) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the available operations
    Routes(RoutesCmd),

    /// Compile a collection and (re)create its view
    Create(CreateCmd),

    /// Refresh a materialized view
    Refresh(RefreshCmd),

    /// Drop a collection's view
    Drop(DropCmd),

    /// Print the compiled SQL for a collection without touching the database
    Compile(CompileCmd),

    /// Fetch up to 100 documents from a collection's view
    All(AllCmd),

    /// Fetch documents matching exact field values
    Find(FindCmd),

    /// Fetch the first document matching exact field values
    FindOne(FindOneCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, ctx: &AppContext, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Routes(cmd) => run_cmd(cmd, ctx, format),
            Command::Create(cmd) => run_cmd(cmd, ctx, format),
            Command::Refresh(cmd) => run_cmd(cmd, ctx, format),
            Command::Drop(cmd) => run_cmd(cmd, ctx, format),
            Command::Compile(cmd) => run_cmd(cmd, ctx, format),
            Command::All(cmd) => run_cmd(cmd, ctx, format),
            Command::Find(cmd) => run_cmd(cmd, ctx, format),
            Command::FindOne(cmd) => run_cmd(cmd, ctx, format),
        }
    }
}

fn run_cmd<C: Execute>(cmd: C, ctx: &AppContext, format: OutputFormat) -> Result<String, Box<dyn Error>> {
    let result = cmd.execute(ctx)?;
    Ok(result.format(format))
}

/// Parse a `field=value` filter argument.
pub fn parse_filter(s: &str) -> Result<(String, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got '{}'", s))?;
    if field.is_empty() {
        return Err(format!("empty field name in '{}'", s));
    }
    Ok((field.to_string(), value.to_string()))
}

/// Collect parsed filter pairs; a repeated field keeps its last value.
pub fn to_filters(pairs: &[(String, String)]) -> Filters {
    pairs.iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("title=Hello", ("title", "Hello"))]
    #[case("title=", ("title", ""))]
    #[case("note=a=b", ("note", "a=b"))]
    #[case("category.name=News", ("category.name", "News"))]
    fn test_parse_filter(#[case] input: &str, #[case] expected: (&str, &str)) {
        assert_eq!(
            parse_filter(input).unwrap(),
            (expected.0.to_string(), expected.1.to_string())
        );
    }

    #[rstest]
    #[case("title")]
    #[case("=Hello")]
    fn test_parse_filter_rejects(#[case] input: &str) {
        assert!(parse_filter(input).is_err());
    }

    #[rstest]
    fn test_to_filters_last_wins() {
        let filters = to_filters(&[
            ("title".to_string(), "a".to_string()),
            ("title".to_string(), "b".to_string()),
        ]);
        assert_eq!(filters.len(), 1);
        assert_eq!(filters["title"], "b");
    }
}

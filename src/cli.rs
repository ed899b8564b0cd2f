//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Command;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Path to the config file (default: ./.pg_json_views.json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_global_options() {
        let args = Args::try_parse_from([
            "pg_json_views",
            "routes",
            "--format",
            "json",
            "--config",
            "/tmp/c.json",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.json")));
    }

    #[rstest]
    fn test_defaults() {
        let args = Args::try_parse_from(["pg_json_views", "routes"]).unwrap();
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.config, None);
    }

    #[rstest]
    fn test_unknown_command_rejected() {
        assert!(Args::try_parse_from(["pg_json_views", "explode"]).is_err());
    }
}

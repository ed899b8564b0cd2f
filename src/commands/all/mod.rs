mod cli_tests;
mod execute;
mod output;

pub use execute::RowsResult;

use clap::Args;

/// Fetch up to 100 documents from a collection's view
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  pg_json_views all articles           # First 100 documents
  pg_json_views all articles -f json   # As a JSON array")]
pub struct AllCmd {
    /// Collection whose view to read
    pub collection: String,
}

mod execute;
mod output;

use clap::Args;

/// Resolve and compile a collection, printing the SQL without touching the database
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  pg_json_views compile articles                 # Compiled SELECT
  pg_json_views compile articles --tree -f json  # Include the resolved field tree")]
pub struct CompileCmd {
    /// Root collection
    pub collection: String,

    /// Include the resolved field tree in the output
    #[arg(long)]
    pub tree: bool,
}

mod execute;
mod execute_tests;
mod output;

use clap::Args;

/// Compile a collection's relations and (re)create `<collection>_view`
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  pg_json_views create articles                  # Plain view
  pg_json_views create articles --materialized   # Materialized view (see `refresh`)")]
pub struct CreateCmd {
    /// Root collection
    pub collection: String,

    /// Create a materialized view instead of a plain one
    #[arg(short, long)]
    pub materialized: bool,
}

mod execute;
mod output;

use clap::Args;

use super::parse_filter;

/// Fetch the first document matching exact field values
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  pg_json_views find-one articles -w id=1            # Single document by id
  pg_json_views find-one articles -w slug=hello -f json")]
pub struct FindOneCmd {
    /// Collection whose view to read
    pub collection: String,

    /// Filter as field=value; repeat to AND several filters.
    /// A dotted field (a.b) is a nested path, never a key containing a dot
    #[arg(short = 'w', long = "where", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,
}

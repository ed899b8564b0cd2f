mod execute;

use clap::Args;

use super::parse_filter;
use crate::queries::SortOrder;

/// Fetch documents matching exact field values
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  pg_json_views find articles -w title=Hello           # Exact match on a top-level key
  pg_json_views find articles -w category.name=News    # Dotted keys follow nested objects
  pg_json_views find articles -s title --order desc    # Sort by a document key
  pg_json_views find articles --limit 20 --offset 40   # Paginate")]
pub struct FindCmd {
    /// Collection whose view to read
    pub collection: String,

    /// Filter as field=value; repeat to AND several filters.
    /// A dotted field (a.b) is a nested path, never a key containing a dot
    #[arg(short = 'w', long = "where", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Maximum number of documents to return (1-1000)
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub limit: u32,

    /// Number of documents to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Document key to sort by
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Sort direction
    #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
    pub order: SortOrder,
}

mod execute;
mod output;

use clap::Args;

/// Refresh `<collection>_view`; fails unless it is a materialized view
#[derive(Args, Debug)]
pub struct RefreshCmd {
    /// Root collection
    pub collection: String,
}

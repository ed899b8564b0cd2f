mod execute;
mod output;

use clap::Args;

/// Drop `<collection>_view`, plain or materialized
#[derive(Args, Debug)]
pub struct DropCmd {
    /// Root collection
    pub collection: String,
}

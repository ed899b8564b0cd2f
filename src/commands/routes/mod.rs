mod cli_tests;
mod execute;
mod output;
mod output_tests;

use clap::Args;

/// Print the directory of operations and the routes they correspond to
#[derive(Args, Debug)]
pub struct RoutesCmd {}

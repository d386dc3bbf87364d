//! Argument definitions.

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "casona",
    about = "Residence-management engine: inspect the store connection and the loaded dataset",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Remote store URL (overrides config file and environment).
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Anonymous-access key (overrides config file and environment).
    #[arg(long, global = true)]
    pub anon_key: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Probe the remote store and report the operating mode.
    Status,
    /// Row counts for the headline tables.
    Stats,
    /// Run the bootstrap sequence and summarize the loaded dataset.
    Summary,
}

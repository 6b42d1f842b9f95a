//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the ordering demo
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Menu fixture set to load from `fixtures/menu`
    #[clap(short, long, default_value = "nonna-rosa")]
    pub menu: String,

    /// Pricing policy YAML file; the house policy is used when omitted
    #[clap(short, long)]
    pub policy: Option<PathBuf>,

    /// Number of guests for the demo reservation
    #[clap(short = 'g', long, default_value_t = 4)]
    pub guests: i64,
}

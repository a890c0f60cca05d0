//! Main entry point for the trendplot CLI

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
  let cli = Cli::parse();

  // RUST_LOG, when set, takes precedence over the flags.
  let level = match (cli.quiet, cli.verbose) {
    (true, _) => "error",
    (false, 0) => "warn",
    (false, 1) => "info",
    (false, 2) => "debug",
    (false, _) => "trace",
  };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

  match cli.command {
    Commands::BoxWhisker(args) => commands::box_whisker::execute(args),
    Commands::SearchTrends(args) => commands::search_trends::execute(args),
    Commands::Trend(args) => commands::trend::execute(args),
  }
}

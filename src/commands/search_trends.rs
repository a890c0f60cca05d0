//! Search-trend volumes over time

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use trendplot::{charts::SearchTrendsChart, data::read_table};

use crate::cli::{FigureArgs, SeparatorArg};

#[derive(Args)]
pub struct SearchTrendsArgs {
  /// Table with a date column followed by one column per search term
  pub input: PathBuf,

  /// Where to write the PNG
  #[arg(short, long, default_value = "search_trends.png")]
  pub output: PathBuf,

  /// Column separator of the input
  #[arg(long, value_enum, default_value = "comma")]
  pub separator: SeparatorArg,

  /// Figure title
  #[arg(long, default_value = "search interest over time")]
  pub title: String,

  /// Y axis label
  #[arg(long, default_value = "search volume")]
  pub y_label: String,

  #[command(flatten)]
  pub figure: FigureArgs,
}

pub fn execute(args: SearchTrendsArgs) -> Result<()> {
  let table = read_table(&args.input, args.separator.into())
    .with_context(|| format!("failed to load {}", args.input.display()))?;

  let defaults = SearchTrendsChart::default();
  let chart = SearchTrendsChart {
    title: args.title,
    y_label: args.y_label,
    size: args.figure.size(defaults.size),
    ..defaults
  };

  chart.run(&table, &args.output).context("failed to render search trends")?;
  log::info!("saved {}", args.output.display());
  Ok(())
}

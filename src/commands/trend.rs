//! Seasonal trend analysis of a daily series

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use trendplot::{charts::TrendChart, data::read_table};

use crate::cli::{FigureArgs, ModelArg, SeparatorArg};

#[derive(Args)]
pub struct TrendArgs {
  /// Table whose first column is a date index
  pub input: PathBuf,

  /// Column to decompose
  #[arg(short, long, default_value = "Death")]
  pub column: String,

  /// Seasonal period in observations (inferred from the date index if omitted)
  #[arg(short, long)]
  pub period: Option<usize>,

  /// How the seasonal component combines with the trend
  #[arg(long, value_enum, default_value = "additive")]
  pub model: ModelArg,

  /// Where to write the PNG
  #[arg(short, long, default_value = "trend_analysis_plot_COVID19.png")]
  pub output: PathBuf,

  /// Also write the decomposition components to this CSV file
  #[arg(long)]
  pub components: Option<PathBuf>,

  /// Column separator of the input
  #[arg(long, value_enum, default_value = "whitespace")]
  pub separator: SeparatorArg,

  /// Figure title
  #[arg(long, default_value = "Trend Analysis of COVID-19 death in UK")]
  pub title: String,

  /// Y axis label of the raw counts
  #[arg(long, default_value = "number of death per day")]
  pub y_label: String,

  #[command(flatten)]
  pub figure: FigureArgs,
}

pub fn execute(args: TrendArgs) -> Result<()> {
  let table = read_table(&args.input, args.separator.into())
    .with_context(|| format!("failed to load {}", args.input.display()))?;

  let defaults = TrendChart::default();
  let chart = TrendChart {
    column: args.column,
    period: args.period,
    model: args.model.into(),
    title: args.title,
    y_label: args.y_label,
    size: args.figure.size(defaults.size),
    ..defaults
  };

  // Components are written before rendering so they survive a missing GPU.
  let data = chart.estimate_trend(&table).context("failed to decompose series")?;
  if let Some(path) = &args.components {
    data.write_components(path)?;
  }

  chart.figure(&data).save(&args.output).context("failed to render trend analysis")?;
  log::info!("saved {}", args.output.display());
  Ok(())
}

//! Root CLI structure for trendplot

use clap::{Args, Parser, Subcommand, ValueEnum};
use trendplot::{FigureSize, data::Separator, stats::Model};

use crate::commands::{
  box_whisker::BoxWhiskerArgs, search_trends::SearchTrendsArgs, trend::TrendArgs,
};

#[derive(Parser)]
#[command(name = "trendplot")]
#[command(about = "Render box-whisker, line and trend decomposition charts from CSV time series")]
#[command(version)]
pub struct Cli {
  /// Chart to render
  #[command(subcommand)]
  pub command: Commands,

  /// Verbosity level (can be repeated for more detail)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, global = true)]
  pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
  /// Box-and-whisker panels with every observation scattered beside its box
  BoxWhisker(BoxWhiskerArgs),

  /// Search volume per term over time, next to each term's distribution
  SearchTrends(SearchTrendsArgs),

  /// Seasonal decomposition of a daily series: trend over the raw counts, and residuals
  Trend(TrendArgs),
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SeparatorArg {
  Comma,
  Tab,
  /// Any run of spaces or tabs
  Whitespace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModelArg {
  Additive,
  Multiplicative,
}

/// Figure size options shared by every chart.
#[derive(Args)]
pub struct FigureArgs {
  /// Figure width in inches
  #[arg(long)]
  pub width: Option<f64>,

  /// Figure height in inches
  #[arg(long)]
  pub height: Option<f64>,

  /// Pixels per inch
  #[arg(long, env = "TRENDPLOT_DPI", default_value_t = 100.0)]
  pub dpi: f64,
}

impl From<SeparatorArg> for Separator {
  fn from(arg: SeparatorArg) -> Self {
    match arg {
      SeparatorArg::Comma => Separator::Comma,
      SeparatorArg::Tab => Separator::Tab,
      SeparatorArg::Whitespace => Separator::Whitespace,
    }
  }
}

impl From<ModelArg> for Model {
  fn from(arg: ModelArg) -> Self {
    match arg {
      ModelArg::Additive => Model::Additive,
      ModelArg::Multiplicative => Model::Multiplicative,
    }
  }
}

impl FigureArgs {
  /// The requested size, falling back to `default` for unset dimensions.
  pub fn size(&self, default: FigureSize) -> FigureSize {
    FigureSize::new(self.width.unwrap_or(default.width), self.height.unwrap_or(default.height))
      .with_dpi(self.dpi)
  }
}

//! Box-and-whisker panels of per-length counts

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use trendplot::{
  charts::{BoxWhiskerChart, Panel},
  data::read_table,
};

use crate::cli::{FigureArgs, SeparatorArg};

#[derive(Args)]
pub struct BoxWhiskerArgs {
  /// Tables to plot, one panel each; every column becomes a box
  #[arg(required = true)]
  pub inputs: Vec<PathBuf>,

  /// Panel titles in input order, such as `--title "ground-level ozone"
  /// --title "atmospheric temperature"` (defaults to the file names)
  #[arg(long = "title")]
  pub titles: Vec<String>,

  /// Where to write the PNG
  #[arg(short, long, default_value = "timeseries_boxwhisker_temp_ozone_cve.png")]
  pub output: PathBuf,

  /// Column separator of the inputs
  #[arg(long, value_enum, default_value = "tab")]
  pub separator: SeparatorArg,

  /// Lower y limit
  #[arg(long, default_value_t = -50.0, allow_negative_numbers = true)]
  pub y_min: f64,

  /// Upper y limit
  #[arg(long, default_value_t = 2100.0, allow_negative_numbers = true)]
  pub y_max: f64,

  /// Fit the y axis to the data instead of the fixed limits
  #[arg(long)]
  pub auto_limits: bool,

  /// X axis label
  #[arg(long, default_value = "CVE length (t)")]
  pub x_label: String,

  /// Y axis label
  #[arg(long, default_value = "number of CVE occurrences")]
  pub y_label: String,

  #[command(flatten)]
  pub figure: FigureArgs,
}

pub fn execute(args: BoxWhiskerArgs) -> Result<()> {
  if args.titles.len() > args.inputs.len() {
    bail!("got {} titles for {} inputs", args.titles.len(), args.inputs.len());
  }

  let panels = args
    .inputs
    .iter()
    .enumerate()
    .map(|(i, input)| {
      let table = read_table(input, args.separator.into())
        .with_context(|| format!("failed to load {}", input.display()))?;
      let title = args.titles.get(i).cloned().unwrap_or_else(|| file_title(input));
      Ok(Panel { title, table })
    })
    .collect::<Result<Vec<_>>>()?;

  let defaults = BoxWhiskerChart::default();
  let chart = BoxWhiskerChart {
    size: args.figure.size(defaults.size),
    y_limits: (!args.auto_limits).then_some((args.y_min, args.y_max)),
    x_label: args.x_label,
    y_label: args.y_label,
    ..defaults
  };

  chart.run(&panels, &args.output).context("failed to render box-whisker chart")?;
  log::info!("saved {}", args.output.display());
  Ok(())
}

fn file_title(path: &std::path::Path) -> String {
  path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default()
}

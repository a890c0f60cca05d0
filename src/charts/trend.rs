use std::{fs::File, path::Path};

use peniko::color::palette::css;
use polars::prelude::*;

use crate::{
  Error, Figure, FigureSize, Result,
  data::{date_index, numeric_values},
  legend::LegendLocation,
  stats::{Decomposition, Model, decompose, infer_period},
  theme::Theme,
};

/// Trend and residual of a daily series, drawn over the raw counts.
pub struct TrendChart {
  /// Column holding the series.
  pub column:  String,
  /// Seasonal period; inferred from the date index when `None`.
  pub period:  Option<usize>,
  pub model:   Model,
  pub title:   String,
  pub y_label: String,
  pub size:    FigureSize,
  pub theme:   Theme,
}

/// A decomposed series, kept as columns so figures can borrow them.
pub struct TrendData {
  pub decomposition: Decomposition,
  dates:             Column,
  positions:         Column,
  observed:          Column,
  trend:             Column,
  seasonal:          Column,
  resid:             Column,
}

impl Default for TrendChart {
  fn default() -> Self {
    TrendChart {
      column:  "Death".to_string(),
      period:  None,
      model:   Model::Additive,
      title:   "Trend Analysis of COVID-19 death in UK".to_string(),
      y_label: "number of death per day".to_string(),
      size:    FigureSize::new(25.0, 5.0),
      theme:   Theme::default().with_font_size(10.0).with_title_size(14.0),
    }
  }
}

impl TrendChart {
  /// Decomposes the configured column of a table indexed by date.
  pub fn estimate_trend(&self, table: &DataFrame) -> Result<TrendData> {
    let days = date_index(table)?;
    let values = numeric_values(table.column(&self.column)?)?;

    let period = match self.period {
      Some(period) => period,
      None => infer_period(&days).ok_or(Error::UnknownPeriod)?,
    };
    log::info!("estimating {:?} trend of `{}` with period {period}", self.model, self.column);

    let decomposition = decompose(&values, period, self.model)?;
    TrendData::new(&self.column, days, decomposition)
  }

  pub fn figure<'a>(&self, data: &'a TrendData) -> Figure<'a> {
    let mut figure = Figure::subplots(self.size, 1, 2);
    figure.set_theme(self.theme.clone()).title(&self.title);

    let plot = figure.plot_mut(0, 0);
    plot.bar_chart(&data.dates, &data.observed);
    plot.line(&data.positions, &data.trend).color(css::RED).width(2.0);
    plot.x.hide_ticks();
    plot.y.title(&self.y_label);

    let plot = figure.plot_mut(0, 1);
    plot.line(&data.dates, &data.trend).color(css::RED).width(2.0).label("trend");
    plot.line(&data.dates, &data.resid).color(css::GREEN).width(2.0).label("residual");
    plot.legend(LegendLocation::UpperRight);

    figure
  }

  pub fn run(&self, table: &DataFrame, output: impl AsRef<Path>) -> Result<TrendData> {
    let data = self.estimate_trend(table)?;
    self.figure(&data).save(output)?;
    Ok(data)
  }
}

impl TrendData {
  fn new(name: &str, days: Vec<i32>, decomposition: Decomposition) -> Result<TrendData> {
    let positions: Vec<f64> = (0..days.len()).map(|i| i as f64).collect();

    Ok(TrendData {
      dates: Column::new("date".into(), days).cast(&DataType::Date)?,
      positions: Column::new("position".into(), positions),
      observed: Column::new(name.into(), &decomposition.observed),
      trend: Column::new("trend".into(), &decomposition.trend),
      seasonal: Column::new("seasonal".into(), &decomposition.seasonal),
      resid: Column::new("resid".into(), &decomposition.resid),
      decomposition,
    })
  }

  /// The date index alongside every component.
  pub fn components(&self) -> Result<DataFrame> {
    Ok(DataFrame::new(vec![
      self.dates.clone(),
      self.observed.clone(),
      self.trend.clone(),
      self.seasonal.clone(),
      self.resid.clone(),
    ])?)
  }

  pub fn write_components(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut file =
      File::create(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;

    let mut components = self.components()?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut components)?;
    log::info!("wrote decomposition components to {}", path.display());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use pretty_assertions::assert_eq;

  use super::*;
  use crate::{
    axes::Axes,
    data::{Separator, parse_table},
    render::Render,
  };

  /// Three weeks of daily counts with a weekly pattern on a rising level.
  fn daily_table() -> DataFrame {
    let pattern: [usize; 7] = [0, 5, 3, 1, 2, 4, 6];
    let mut text = String::from("Date Death\n");
    for day in 0..21 {
      text.push_str(&format!("2020-03-{:02} {}\n", day + 1, 10 + day + pattern[day % 7]));
    }
    parse_table(text.into_bytes(), Separator::Whitespace).unwrap()
  }

  #[test]
  fn infers_weekly_period_from_daily_index() {
    let data = TrendChart::default().estimate_trend(&daily_table()).unwrap();

    assert_eq!(data.decomposition.period, 7);
    assert!(data.decomposition.trend[..3].iter().all(|t| t.is_nan()));
    assert!((data.decomposition.trend[10] - 23.0).abs() < 1e-9);
  }

  #[test]
  fn yearly_index_decomposes_without_season() {
    let table = parse_table(
      b"Date Death\n2019-01-01 40\n2020-01-01 55\n2021-01-01 61\n2022-01-01 48\n".to_vec(),
      Separator::Whitespace,
    )
    .unwrap();

    let data = TrendChart::default().estimate_trend(&table).unwrap();
    assert_eq!(data.decomposition.period, 1);
    assert_eq!(data.decomposition.trend, vec![40.0, 55.0, 61.0, 48.0]);
    assert!(data.decomposition.seasonal.iter().all(|&s| s == 0.0));
  }

  #[test]
  fn explicit_period_wins() {
    let chart = TrendChart { period: Some(3), ..Default::default() };
    let data = chart.estimate_trend(&daily_table()).unwrap();
    assert_eq!(data.decomposition.period, 3);
  }

  #[test]
  fn unknown_column_is_an_error() {
    let chart = TrendChart { column: "Cases".to_string(), ..Default::default() };
    assert!(matches!(chart.estimate_trend(&daily_table()), Err(Error::Polars(_))));
  }

  #[test]
  fn figure_has_bars_and_two_components() {
    let chart = TrendChart::default();
    let data = chart.estimate_trend(&daily_table()).unwrap();
    let figure = chart.figure(&data);

    let left = figure.plots()[0].axes();
    assert!(matches!(left[0], Axes::Bar(_)));
    assert!(matches!(left[1], Axes::Line(_)));

    let labels: Vec<String> =
      figure.plots()[1].legend_items().into_iter().map(|item| item.label).collect();
    assert_eq!(labels, vec!["trend", "residual"]);
    assert_eq!(figure.title_text(), Some("Trend Analysis of COVID-19 death in UK"));

    let mut render = Render::new(figure.theme().background);
    figure.draw(&mut render).unwrap();
  }

  #[test]
  fn components_are_written_as_csv() {
    let data = TrendChart::default().estimate_trend(&daily_table()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("components.csv");

    data.write_components(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    let header = written.lines().next().unwrap();
    assert_eq!(header, "date,Death,trend,seasonal,resid");
    assert_eq!(written.lines().count(), 22);
  }
}

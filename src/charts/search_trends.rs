use std::path::Path;

use polars::prelude::*;

use crate::{
  Figure, FigureSize, Result,
  charts::box_panel,
  data::{date_index, value_columns},
  legend::LegendLocation,
  theme::{self, ROCKET, Theme},
};

/// Search volume of several terms over time, next to the distribution of
/// each term's volume.
pub struct SearchTrendsChart {
  pub title:   String,
  pub y_label: String,
  pub size:    FigureSize,
  pub theme:   Theme,
}

impl Default for SearchTrendsChart {
  fn default() -> Self {
    SearchTrendsChart {
      title:   "search interest over time".to_string(),
      y_label: "search volume".to_string(),
      size:    FigureSize::new(16.0, 8.0),
      theme:   Theme::default(),
    }
  }
}

impl SearchTrendsChart {
  /// Builds the figure from a table whose first column is a date index and
  /// whose remaining columns are search terms.
  pub fn figure<'a>(&self, table: &'a DataFrame) -> Result<Figure<'a>> {
    date_index(table)?;
    let dates = &table.get_columns()[0];
    let terms = value_columns(table);
    log::debug!("plotting {} search terms over {} dates", terms.len(), dates.len());

    let mut figure = Figure::subplots(self.size, 1, 2);
    figure.set_theme(self.theme.clone()).title(&self.title);

    let plot = figure.plot_mut(0, 0);
    for (i, &term) in terms.iter().enumerate() {
      plot.line(dates, term).color(ROCKET.nth(i, terms.len())).label(term.name());
    }
    plot.legend(LegendLocation::UpperLeft);
    plot.x.title(dates.name());
    plot.y.title(&self.y_label);

    let plot = figure.plot_mut(0, 1);
    box_panel(plot, &terms, &theme::BOX_FACES, &theme::BOX_EDGES);
    plot.x.title("search term");
    plot.y.title(&self.y_label);

    Ok(figure)
  }

  pub fn run(&self, table: &DataFrame, output: impl AsRef<Path>) -> Result<()> {
    log::info!("plotting search trends");
    self.figure(table)?.save(output)
  }
}

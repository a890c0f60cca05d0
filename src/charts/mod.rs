//! Ready-made figures for the three kinds of input table: per-length CVE
//! counts, search-trend volumes and daily death counts.

mod box_whisker;
mod search_trends;
mod trend;

pub use box_whisker::{BoxWhiskerChart, Panel};
pub use search_trends::SearchTrendsChart;
pub use trend::{TrendChart, TrendData};

use peniko::Color;
use polars::prelude::Column;

use crate::{Plot, ResultExt, axes::BoxWhiskerAxes, data::numeric_values, theme::cycled};

/// Distance from each box to the strip of its raw observations.
const STRIP_OFFSET: f64 = 0.3;

/// Draws one box per column with the raw observations scattered just left
/// of it.
pub(crate) fn box_panel<'a>(
  plot: &mut Plot<'a>,
  columns: &[&'a Column],
  faces: &[Color],
  edges: &[Color],
) {
  plot.box_whisker(columns.to_vec()).faces(faces).edges(edges);

  for (i, &column) in columns.iter().enumerate() {
    plot
      .strip(BoxWhiskerAxes::position(i) - STRIP_OFFSET, column)
      .color(cycled(faces, i))
      .edge(cycled(edges, i))
      .size(4.0);
  }
}

/// Number of present values across `columns`.
pub(crate) fn count_points(columns: &[&Column]) -> usize {
  columns
    .iter()
    .filter_map(|column| numeric_values(column).log_err())
    .map(|values| values.iter().flatten().count())
    .sum()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{axes::Axes, theme};

  #[test]
  fn box_panel_adds_a_strip_per_column() {
    let a = Column::new("a".into(), [1.0, 2.0]);
    let b = Column::new("b".into(), [3.0, 4.0]);
    let mut plot = Plot::new();

    box_panel(&mut plot, &[&a, &b], &theme::BOX_FACES, &theme::BOX_EDGES);

    assert_eq!(plot.axes().len(), 3);
    assert!(matches!(plot.axes()[0], Axes::BoxWhisker(_)));
    assert!(plot.axes()[1..].iter().all(|axes| matches!(axes, Axes::Scatter(_))));
  }

  #[test]
  fn counts_present_values_only() {
    let a = Column::new("a".into(), [Some(1.0), None, Some(3.0)]);
    let b = Column::new("b".into(), [5.0]);
    assert_eq!(count_points(&[&a, &b]), 3);
  }
}

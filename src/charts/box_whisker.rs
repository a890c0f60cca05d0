use std::path::Path;

use peniko::Color;
use polars::prelude::*;

use crate::{
  Figure, FigureSize, Result,
  charts::{box_panel, count_points},
  data::value_columns,
  theme::{self, Theme},
};

/// One subplot's worth of input: a table whose columns each become a box.
pub struct Panel {
  pub title: String,
  pub table: DataFrame,
}

/// Side-by-side box-and-whisker panels with every observation scattered
/// next to its box.
pub struct BoxWhiskerChart {
  pub faces:    Vec<Color>,
  pub edges:    Vec<Color>,
  pub size:     FigureSize,
  pub y_limits: Option<(f64, f64)>,
  pub x_label:  String,
  pub y_label:  String,
  pub theme:    Theme,
}

impl Default for BoxWhiskerChart {
  fn default() -> Self {
    BoxWhiskerChart {
      faces:    theme::BOX_FACES.to_vec(),
      edges:    theme::BOX_EDGES.to_vec(),
      size:     FigureSize::new(15.0, 8.0),
      y_limits: Some((-50.0, 2100.0)),
      x_label:  "CVE length (t)".to_string(),
      y_label:  "number of CVE occurrences".to_string(),
      theme:    Theme::default(),
    }
  }
}

impl BoxWhiskerChart {
  pub fn figure<'a>(&self, panels: &'a [Panel]) -> Figure<'a> {
    let mut figure = Figure::subplots(self.size, 1, panels.len());
    figure.set_theme(self.theme.clone());

    let mut points = 0;
    for (i, panel) in panels.iter().enumerate() {
      let columns = value_columns(&panel.table);
      if columns.is_empty() {
        log::warn!("panel `{}` has no numeric columns", panel.title);
      }
      points += count_points(&columns);

      let plot = figure.plot_mut(0, i);
      plot.title(&panel.title);
      box_panel(plot, &columns, &self.faces, &self.edges);

      plot.x.title(&self.x_label);
      plot.y.title(&self.y_label);
      if let Some((min, max)) = self.y_limits {
        plot.y.min(min).max(max);
      }
    }

    figure.title(&format!("an experiment using {points} measured data points"));
    figure
  }

  pub fn run(&self, panels: &[Panel], output: impl AsRef<Path>) -> Result<()> {
    log::info!("plotting {} box-whisker panels", panels.len());
    self.figure(panels).save(output)
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::{
    data::{Separator, parse_table},
    render::Render,
  };

  fn panel(title: &str, text: &str) -> Panel {
    Panel { title: title.to_string(), table: parse_table(text.into(), Separator::Tab).unwrap() }
  }

  #[test]
  fn one_subplot_per_panel() {
    let panels = [
      panel("ground-level ozone", "5\t10\n1\t2\n3\t4\n"),
      panel("atmospheric temperature", "5\t10\t15\n1\t2\t3\n"),
    ];

    let chart = BoxWhiskerChart::default();
    let figure = chart.figure(&panels);

    assert_eq!(figure.plots().len(), 2);
    assert_eq!(figure.plots()[0].title_text(), Some("ground-level ozone"));
    // A box plot plus one strip per column.
    assert_eq!(figure.plots()[0].axes().len(), 3);
    assert_eq!(figure.plots()[1].axes().len(), 4);
    assert_eq!(figure.plots()[1].y.limits(), (Some(-50.0), Some(2100.0)));
    assert_eq!(figure.title_text(), Some("an experiment using 7 measured data points"));
  }

  #[test]
  fn limits_are_optional() {
    let panels = [panel("only", "a\n1\n")];
    let chart = BoxWhiskerChart { y_limits: None, ..Default::default() };

    let figure = chart.figure(&panels);
    assert_eq!(figure.plots()[0].y.limits(), (None, None));
  }

  #[test]
  fn draws_around_a_column_without_values() {
    let table = DataFrame::new(vec![
      Column::new("5".into(), [3.0, 8.0, 4.0]),
      Column::new("10".into(), [None::<f64>, None, None]),
    ])
    .unwrap();
    let panels = [panel("ground-level ozone", "5\t10\n1\t2\n3\t4\n"), Panel {
      title: "atmospheric temperature".to_string(),
      table,
    }];

    let figure = BoxWhiskerChart::default().figure(&panels);
    assert_eq!(figure.title_text(), Some("an experiment using 7 measured data points"));

    let mut render = Render::new(figure.theme().background);
    figure.draw(&mut render).unwrap();
  }
}

//! Static charts for tabular time series: box-and-whisker plots with
//! scattered observations, line plots and seasonal decompositions, rendered
//! to PNG with vello.

use kurbo::{Affine, Line, Point, Rect, Stroke};
use parley::FontWeight;
use peniko::Brush;

use crate::{
  axes::Axes,
  bounds::{DataBounds, DataRange, RangeUnit, format_date},
  legend::LegendLocation,
  render::{Align, DrawText, Render},
  theme::Theme,
};

pub mod axes;
pub mod bounds;
pub mod charts;
pub mod data;
mod error;
pub mod legend;
pub mod marker;
mod render;
pub mod stats;
pub mod theme;

pub use bounds::{Bounds, Range};
pub use error::{Error, Result};
pub(crate) use error::ResultExt;

/// Figure dimensions in inches, rendered at `dpi` pixels per inch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FigureSize {
  pub width:  f64,
  pub height: f64,
  pub dpi:    f64,
}

impl FigureSize {
  pub const fn new(width: f64, height: f64) -> Self { FigureSize { width, height, dpi: 100.0 } }

  pub const fn with_dpi(mut self, dpi: f64) -> Self {
    self.dpi = dpi;
    self
  }

  pub fn pixels(&self) -> (u32, u32) {
    let px = |inches: f64| (inches * self.dpi).round().max(1.0) as u32;
    (px(self.width), px(self.height))
  }
}

/// A canvas holding a grid of plots under an optional super-title.
pub struct Figure<'a> {
  title: Option<String>,
  size:  FigureSize,
  rows:  usize,
  cols:  usize,
  plots: Vec<Plot<'a>>,
  theme: Theme,
}

/// One cell of a figure: a pair of axes and everything drawn on them.
#[derive(Default)]
pub struct Plot<'a> {
  title:  Option<String>,
  pub x:  Axis,
  pub y:  Axis,
  legend: Option<LegendLocation>,

  axes: Vec<Axes<'a>>,
}

#[derive(Clone, Debug, Default)]
pub struct Axis {
  title:        Option<String>,
  min:          Option<f64>,
  max:          Option<f64>,
  ticks_hidden: bool,
}

/// Height reserved above the grid for the super-title.
const SUPTITLE_HEIGHT: f64 = 60.0;

const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 70.0;
const MARGIN_TOP: f64 = 50.0;

const TICKS: u32 = 10;

impl<'a> Figure<'a> {
  pub fn subplots(size: FigureSize, rows: usize, cols: usize) -> Figure<'a> {
    let (rows, cols) = (rows.max(1), cols.max(1));
    Figure {
      title: None,
      size,
      rows,
      cols,
      plots: (0..rows * cols).map(|_| Plot::new()).collect(),
      theme: Theme::default(),
    }
  }

  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn set_theme(&mut self, theme: Theme) -> &mut Self {
    self.theme = theme;
    self
  }

  pub fn theme(&self) -> &Theme { &self.theme }
  pub fn title_text(&self) -> Option<&str> { self.title.as_deref() }
  pub fn plots(&self) -> &[Plot<'a>] { &self.plots }

  /// The plot in `row`, `col`.
  ///
  /// # Panics
  ///
  /// Panics when the cell lies outside the grid.
  pub fn plot_mut(&mut self, row: usize, col: usize) -> &mut Plot<'a> {
    assert!(row < self.rows && col < self.cols, "no subplot at ({row}, {col})");
    &mut self.plots[row * self.cols + col]
  }

  pub fn width(&self) -> u32 { self.size.pixels().0 }
  pub fn height(&self) -> u32 { self.size.pixels().1 }

  /// Pixel area of a grid cell. The y range runs from the bottom row of
  /// pixels up to the top one.
  pub fn cell(&self, row: usize, col: usize) -> Bounds {
    let top = if self.title.is_some() { SUPTITLE_HEIGHT } else { 0.0 };
    let cell_width = f64::from(self.width()) / self.cols as f64;
    let cell_height = (f64::from(self.height()) - top) / self.rows as f64;

    let x0 = col as f64 * cell_width;
    let y0 = top + row as f64 * cell_height;
    Bounds::new(Range::new(x0, x0 + cell_width), Range::new(y0 + cell_height, y0))
  }

  pub(crate) fn draw(&self, render: &mut Render) -> Result<()> {
    if let Some(title) = &self.title {
      render.draw_text(DrawText {
        text: title,
        family: &self.theme.font_family,
        size: self.theme.title_size,
        weight: FontWeight::BOLD,
        brush: Brush::Solid(self.theme.text),
        position: Point::new(f64::from(self.width()) / 2.0, SUPTITLE_HEIGHT / 2.0),
        horizontal_align: Align::Center,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    for (i, plot) in self.plots.iter().enumerate() {
      let cell = self.cell(i / self.cols, i % self.cols);
      log::debug!("drawing subplot {i} into {cell:?}");
      plot.draw(render, cell, &self.theme)?;
    }
    Ok(())
  }
}

impl Axis {
  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn min(&mut self, min: f64) -> &mut Self {
    self.min = Some(min);
    self
  }

  pub fn max(&mut self, max: f64) -> &mut Self {
    self.max = Some(max);
    self
  }

  pub fn hide_ticks(&mut self) -> &mut Self {
    self.ticks_hidden = true;
    self
  }

  pub fn title_text(&self) -> Option<&str> { self.title.as_deref() }
  pub fn limits(&self) -> (Option<f64>, Option<f64>) { (self.min, self.max) }

  fn apply(&self, range: Range) -> Range {
    Range::new(self.min.unwrap_or(range.min), self.max.unwrap_or(range.max)).non_degenerate()
  }
}

impl<'a> Plot<'a> {
  pub fn new() -> Plot<'a> { Plot::default() }

  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn legend(&mut self, location: LegendLocation) -> &mut Self {
    self.legend = Some(location);
    self
  }

  pub fn title_text(&self) -> Option<&str> { self.title.as_deref() }
  pub fn axes(&self) -> &[Axes<'a>] { &self.axes }

  /// Combined data extent of everything on the plot.
  pub fn data_bounds(&self) -> Result<DataBounds> {
    let bounds = self.axes.iter().map(Axes::data_bounds).collect::<Result<Vec<_>>>()?;
    Ok(bounds.into_iter().reduce(DataBounds::union).unwrap_or(DataBounds {
      x: Range::new(0.0, 1.0).into(),
      y: Range::new(0.0, 1.0).into(),
    }))
  }

  fn draw(&self, render: &mut Render, cell: Bounds, theme: &Theme) -> Result<()> {
    let text_color = Brush::Solid(theme.text);
    let viewport = Bounds::new(
      Range::new(cell.x.min + MARGIN_LEFT, cell.x.max - MARGIN_RIGHT),
      Range::new(cell.y.min - MARGIN_BOTTOM, cell.y.max + MARGIN_TOP),
    );
    let center = Point::new(
      (viewport.x.min + viewport.x.max) / 2.0,
      (viewport.y.min + viewport.y.max) / 2.0,
    );

    if let Some(title) = &self.title {
      render.draw_text(DrawText {
        text: title,
        family: &theme.font_family,
        size: theme.font_size * 1.2,
        weight: FontWeight::BOLD,
        brush: text_color.clone(),
        position: Point::new(center.x, viewport.y.max - 12.0),
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    if let Some(x_label) = self.x.title_text() {
      render.draw_text(DrawText {
        text: x_label,
        family: &theme.font_family,
        size: theme.font_size,
        brush: text_color.clone(),
        position: Point::new(center.x, viewport.y.min + 35.0),
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }

    if let Some(y_label) = self.y.title_text() {
      render.draw_text(DrawText {
        text: y_label,
        family: &theme.font_family,
        size: theme.font_size,
        brush: text_color.clone(),
        position: Point::new(viewport.x.min - 60.0, center.y),
        transform: Affine::rotate(-std::f64::consts::FRAC_PI_2),
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    let frame = Rect::from_points(
      Point::new(viewport.x.min, viewport.y.min),
      Point::new(viewport.x.max, viewport.y.max),
    );
    let border_stroke = Stroke::new(1.5);
    render.stroke(&frame, Affine::IDENTITY, theme.line, &border_stroke);

    let data = self.data_bounds()?;
    let data_bounds =
      Bounds::new(self.x.apply(data.x.resolve()), self.y.apply(data.y.resolve()));
    let transform = data_bounds.transform_to(viewport);

    let tick_stroke = border_stroke.clone().with_start_cap(kurbo::Cap::Butt);
    if !self.y.ticks_hidden {
      let ticks = tick_labels(&data.y, data_bounds.y);
      for (vy, label) in visible_ticks(ticks, viewport.y, |y| (transform * Point::new(0.0, y)).y) {
        render.stroke(
          &Line::new(Point::new(viewport.x.min, vy), Point::new(viewport.x.min - 6.0, vy)),
          Affine::IDENTITY,
          theme.line,
          &tick_stroke,
        );
        render.draw_text(DrawText {
          text: &label,
          family: &theme.font_family,
          size: theme.tick_size(),
          brush: text_color.clone(),
          position: Point::new(viewport.x.min - 10.0, vy),
          horizontal_align: Align::End,
          vertical_align: Align::Center,
          ..Default::default()
        });
      }
    }

    if !self.x.ticks_hidden {
      let ticks = tick_labels(&data.x, data_bounds.x);
      for (vx, label) in visible_ticks(ticks, viewport.x, |x| (transform * Point::new(x, 0.0)).x) {
        render.stroke(
          &Line::new(Point::new(vx, viewport.y.min), Point::new(vx, viewport.y.min + 6.0)),
          Affine::IDENTITY,
          theme.line,
          &tick_stroke,
        );
        render.draw_text(DrawText {
          text: &label,
          family: &theme.font_family,
          size: theme.tick_size(),
          brush: text_color.clone(),
          position: Point::new(vx, viewport.y.min + 10.0),
          horizontal_align: Align::Center,
          vertical_align: Align::Start,
          ..Default::default()
        });
      }
    }

    render.push_clip(&frame);
    for axes in &self.axes {
      axes.draw(render, transform)?;
    }
    render.pop_clip();

    if let Some(location) = self.legend {
      self.draw_legend(render, viewport, location, theme);
    }

    Ok(())
  }
}

/// Tick positions and their labels for an axis showing `visible`.
fn tick_labels(data: &DataRange, visible: Range) -> Vec<(f64, String)> {
  match data {
    DataRange::Categorical { labels, first } => {
      labels.iter().enumerate().map(|(i, label)| (first + i as f64, label.clone())).collect()
    }
    DataRange::Continuous { .. } if data.unit() == RangeUnit::Date => {
      visible.date_ticks(TICKS / 2).map(|day| (day, format_date(day))).collect()
    }
    DataRange::Continuous { .. } | DataRange::Empty => {
      let ticks = visible.nice_ticks(TICKS);
      let decimals = ticks.decimals();
      ticks.map(|v| (v, format!("{v:.decimals$}"))).collect()
    }
  }
}

/// Maps ticks to pixels with `to_pixel`, keeping those inside `viewport`.
fn visible_ticks(
  ticks: Vec<(f64, String)>,
  viewport: Range,
  to_pixel: impl Fn(f64) -> f64,
) -> Vec<(f64, String)> {
  ticks
    .into_iter()
    .map(|(value, label)| (to_pixel(value), label))
    .filter(|(pixel, _)| viewport.contains(pixel))
    .collect()
}

mod bar_chart;
mod box_whisker;
mod line;
mod scatter;

pub use bar_chart::BarChartAxes;
pub use box_whisker::{BoxOptions, BoxWhiskerAxes};
pub use line::{LineAxes, LineOptions};
pub use scatter::{ScatterAxes, XValues};

use kurbo::Affine;
use polars::prelude::*;

use crate::{Plot, Result, bounds::DataBounds, legend::LegendItem, render::Render};

pub enum Axes<'a> {
  BoxWhisker(BoxWhiskerAxes<'a>),
  Scatter(ScatterAxes<'a>),
  Line(LineAxes<'a>),
  Bar(BarChartAxes<'a>),
}

impl<'a> Plot<'a> {
  /// One box per column, at x positions `1..=columns.len()`.
  pub fn box_whisker(&mut self, columns: Vec<&'a Column>) -> &mut BoxWhiskerAxes<'a> {
    self.axes.push(Axes::BoxWhisker(BoxWhiskerAxes::new(columns)));
    match self.axes.last_mut() {
      Some(Axes::BoxWhisker(ba)) => ba,
      _ => unreachable!(),
    }
  }

  pub fn scatter(&mut self, x: &'a Column, y: &'a Column) -> &mut ScatterAxes<'a> {
    self.push_scatter(ScatterAxes::new(XValues::Column(x), y))
  }

  /// Scatters every value of `y` on the vertical line at `x`.
  pub fn strip(&mut self, x: f64, y: &'a Column) -> &mut ScatterAxes<'a> {
    self.push_scatter(ScatterAxes::new(XValues::Constant(x), y))
  }

  fn push_scatter(&mut self, axes: ScatterAxes<'a>) -> &mut ScatterAxes<'a> {
    self.axes.push(Axes::Scatter(axes));
    match self.axes.last_mut() {
      Some(Axes::Scatter(sa)) => sa,
      _ => unreachable!(),
    }
  }

  pub fn line(&mut self, x: &'a Column, y: &'a Column) -> &mut LineAxes<'a> {
    self.axes.push(Axes::Line(LineAxes::new(x, y)));
    match self.axes.last_mut() {
      Some(Axes::Line(la)) => la,
      _ => unreachable!(),
    }
  }

  /// One bar per row of `values`, at x positions `0..values.len()`.
  pub fn bar_chart(&mut self, labels: &'a Column, values: &'a Column) -> &mut BarChartAxes<'a> {
    self.axes.push(Axes::Bar(BarChartAxes::new(labels, values)));
    match self.axes.last_mut() {
      Some(Axes::Bar(ba)) => ba,
      _ => unreachable!(),
    }
  }
}

impl Axes<'_> {
  pub(crate) fn data_bounds(&self) -> Result<DataBounds> {
    match self {
      Axes::BoxWhisker(ba) => ba.data_bounds(),
      Axes::Scatter(sa) => sa.data_bounds(),
      Axes::Line(la) => la.data_bounds(),
      Axes::Bar(ba) => ba.data_bounds(),
    }
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) -> Result<()> {
    match self {
      Axes::BoxWhisker(ba) => ba.draw(render, transform),
      Axes::Scatter(sa) => sa.draw(render, transform),
      Axes::Line(la) => la.draw(render, transform),
      Axes::Bar(ba) => ba.draw(render, transform),
    }
  }

  pub(crate) fn legend_item(&self) -> Option<LegendItem> {
    match self {
      Axes::Scatter(sa) => sa.legend_item(),
      Axes::Line(la) => la.legend_item(),
      Axes::BoxWhisker(_) | Axes::Bar(_) => None,
    }
  }
}

use kurbo::{Affine, BezPath, Point};
use peniko::Brush;
use polars::prelude::*;

use crate::{
  Range, Result,
  bounds::{DataBounds, DataRange, RangeUnit},
  data::{column_labels, numeric_values},
  render::Render,
  theme,
};

pub struct BarChartAxes<'a> {
  labels: &'a Column,
  values: &'a Column,
  color:  Brush,
  width:  f64,
}

impl<'a> BarChartAxes<'a> {
  pub(crate) fn new(labels: &'a Column, values: &'a Column) -> Self {
    BarChartAxes { labels, values, color: Brush::Solid(theme::BAR), width: 0.8 }
  }

  pub fn color(&mut self, color: impl Into<Brush>) -> &mut Self {
    self.color = color.into();
    self
  }

  pub fn width(&mut self, width: f64) -> &mut Self {
    self.width = width;
    self
  }

  pub(crate) fn data_bounds(&self) -> Result<DataBounds> {
    let values = numeric_values(self.values)?;
    let range = Range::covering(values.iter().flatten().copied()).unwrap_or_default();

    Ok(DataBounds {
      x: DataRange::Categorical { labels: column_labels(self.labels)?, first: 0.0 },
      y: DataRange::Continuous {
        range:      Range::new(range.min.min(0.0), range.max.max(0.0)),
        unit:       RangeUnit::Absolute,
        margin_min: range.min < 0.0,
        margin_max: true,
      },
    })
  }

  fn shape(&self) -> Result<BezPath> {
    let half = self.width / 2.0;
    let mut fill = BezPath::new();

    for (x, value) in numeric_values(self.values)?.into_iter().enumerate() {
      let Some(value) = value else { continue };
      let x = x as f64;

      fill.move_to(Point::new(x - half, 0.0));
      fill.line_to(Point::new(x - half, value));
      fill.line_to(Point::new(x + half, value));
      fill.line_to(Point::new(x + half, 0.0));
      fill.close_path();
    }

    Ok(fill)
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) -> Result<()> {
    render.fill(&self.shape()?, transform, &self.color);
    Ok(())
  }
}

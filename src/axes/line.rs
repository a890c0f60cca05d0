use kurbo::{Affine, BezPath, Point, Stroke};
use peniko::{Brush, Color};
use polars::prelude::*;

use crate::{
  Result,
  bounds::{DataBounds, DataRange},
  data::{numeric_values, unit_of},
  legend::{LegendItem, LegendSymbol},
  render::Render,
};

pub struct LineAxes<'a> {
  x:           &'a Column,
  y:           &'a Column,
  pub options: LineOptions,
}

#[derive(Clone, Debug)]
pub struct LineOptions {
  pub width: f64,
  pub color: Brush,
  pub dash:  Option<Vec<f64>>,
  pub label: Option<String>,
}

impl Default for LineOptions {
  fn default() -> Self {
    LineOptions {
      width: 2.0,
      color: Brush::Solid(Color::from_rgb8(117, 158, 208)),
      dash:  None,
      label: None,
    }
  }
}

impl LineOptions {
  pub(crate) fn stroke(&self) -> Stroke {
    let mut stroke = Stroke::new(self.width);
    if let Some(dash) = &self.dash {
      stroke = stroke.with_dashes(0.0, dash.clone());
    }
    stroke
  }
}

impl<'a> LineAxes<'a> {
  pub(crate) fn new(x: &'a Column, y: &'a Column) -> Self {
    LineAxes { x, y, options: LineOptions::default() }
  }

  pub fn color(&mut self, color: impl Into<Brush>) -> &mut Self {
    self.options.color = color.into();
    self
  }

  pub fn width(&mut self, width: f64) -> &mut Self {
    self.options.width = width;
    self
  }

  pub fn dash(&mut self, dash: &[f64]) -> &mut Self {
    self.options.dash = Some(dash.to_vec());
    self
  }

  pub fn label(&mut self, label: &str) -> &mut Self {
    self.options.label = Some(label.to_string());
    self
  }

  pub(crate) fn data_bounds(&self) -> Result<DataBounds> {
    Ok(DataBounds {
      x: DataRange::from_values(&numeric_values(self.x)?, unit_of(self.x)),
      y: DataRange::from_values(&numeric_values(self.y)?, unit_of(self.y)),
    })
  }

  /// The polyline through every point, broken wherever a value is missing.
  fn path(&self) -> Result<BezPath> {
    let xs = numeric_values(self.x)?;
    let ys = numeric_values(self.y)?;

    let mut shape = BezPath::new();
    let mut pen_down = false;
    for (x, y) in xs.into_iter().zip(ys) {
      match (x, y) {
        (Some(x), Some(y)) if pen_down => shape.line_to(Point::new(x, y)),
        (Some(x), Some(y)) => {
          shape.move_to(Point::new(x, y));
          pen_down = true;
        }
        _ => pen_down = false,
      }
    }
    Ok(shape)
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) -> Result<()> {
    let shape = transform * self.path()?;
    render.stroke(&shape, Affine::IDENTITY, &self.options.color, &self.options.stroke());
    Ok(())
  }

  pub(crate) fn legend_item(&self) -> Option<LegendItem> {
    let label = self.options.label.clone()?;
    Some(LegendItem { label, symbol: LegendSymbol::Line(self.options.clone()) })
  }
}

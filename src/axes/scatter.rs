use kurbo::{Affine, Point};
use peniko::{Brush, Color};
use polars::prelude::*;

use crate::{
  Range, Result,
  bounds::{DataBounds, DataRange},
  data::{numeric_values, unit_of},
  legend::{LegendItem, LegendSymbol},
  marker::{Marker, MarkerStyle},
  render::Render,
};

pub enum XValues<'a> {
  Column(&'a Column),
  Constant(f64),
}

pub struct ScatterAxes<'a> {
  x:           XValues<'a>,
  y:           &'a Column,
  pub options: MarkerStyle,
  label:       Option<String>,
}

impl<'a> ScatterAxes<'a> {
  pub(crate) fn new(x: XValues<'a>, y: &'a Column) -> Self {
    ScatterAxes {
      x,
      y,
      options: MarkerStyle::filled(Marker::Circle, 5.0, Color::from_rgb8(117, 158, 208)),
      label: None,
    }
  }

  pub fn color(&mut self, color: impl Into<Brush>) -> &mut Self {
    self.options.fill = Some(color.into());
    self
  }

  pub fn edge(&mut self, color: impl Into<Brush>) -> &mut Self {
    self.options.edge = Some(color.into());
    self
  }

  pub fn size(&mut self, size: f64) -> &mut Self {
    self.options.size = size;
    self
  }

  pub fn marker(&mut self, marker: Marker) -> &mut Self {
    self.options.marker = marker;
    self
  }

  pub fn label(&mut self, label: &str) -> &mut Self {
    self.label = Some(label.to_string());
    self
  }

  fn points(&self) -> Result<Vec<Point>> {
    let ys = numeric_values(self.y)?;
    let xs = match &self.x {
      XValues::Column(x) => numeric_values(x)?,
      XValues::Constant(x) => vec![Some(*x); ys.len()],
    };

    Ok(xs.into_iter().zip(ys).filter_map(|(x, y)| Some(Point::new(x?, y?))).collect())
  }

  pub(crate) fn data_bounds(&self) -> Result<DataBounds> {
    let x = match &self.x {
      XValues::Column(x) => DataRange::from_values(&numeric_values(x)?, unit_of(x)),
      XValues::Constant(x) => Range::new(*x, *x).into(),
    };

    Ok(DataBounds { x, y: DataRange::from_values(&numeric_values(self.y)?, unit_of(self.y)) })
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) -> Result<()> {
    for point in self.points()? {
      self.options.draw(render, transform * point);
    }
    Ok(())
  }

  pub(crate) fn legend_item(&self) -> Option<LegendItem> {
    let label = self.label.clone()?;
    Some(LegendItem { label, symbol: LegendSymbol::Marker(self.options.clone()) })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strip_repeats_constant_x() {
    let y = Column::new("y".into(), [Some(1.0), None, Some(3.0)]);
    let axes = ScatterAxes::new(XValues::Constant(0.7), &y);

    let points = axes.points().unwrap();
    assert_eq!(points, vec![Point::new(0.7, 1.0), Point::new(0.7, 3.0)]);
  }

  #[test]
  fn unlabeled_scatter_has_no_legend_entry() {
    let y = Column::new("y".into(), [1.0]);
    let mut axes = ScatterAxes::new(XValues::Constant(0.0), &y);
    assert!(axes.legend_item().is_none());

    axes.label("values");
    assert_eq!(axes.legend_item().map(|item| item.label), Some("values".to_string()));
  }
}

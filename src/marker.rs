use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape, Stroke};
use peniko::Brush;

use crate::render::Render;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Marker {
  #[default]
  Circle,
  Plus,
  Square,
  Triangle,
  Diamond,
}

/// How a marker is painted. A marker with neither fill nor edge is invisible.
#[derive(Clone, Debug)]
pub struct MarkerStyle {
  pub marker:     Marker,
  /// Diameter in pixels.
  pub size:       f64,
  pub fill:       Option<Brush>,
  pub edge:       Option<Brush>,
  pub edge_width: f64,
}

impl Marker {
  /// Outline of the marker, centered on the origin and one unit across.
  pub(crate) fn to_path(self, tolerance: f64) -> BezPath {
    match self {
      Marker::Circle => Circle::new(Point::new(0.0, 0.0), 0.5).to_path(tolerance),
      Marker::Plus => {
        const INSET: f64 = 0.15;

        let mut path = BezPath::new();
        path.move_to(Point::new(-INSET, -0.5));
        path.line_to(Point::new(INSET, -0.5));
        path.line_to(Point::new(INSET, -INSET));
        path.line_to(Point::new(0.5, -INSET));
        path.line_to(Point::new(0.5, INSET));
        path.line_to(Point::new(INSET, INSET));
        path.line_to(Point::new(INSET, 0.5));
        path.line_to(Point::new(-INSET, 0.5));
        path.line_to(Point::new(-INSET, INSET));
        path.line_to(Point::new(-0.5, INSET));
        path.line_to(Point::new(-0.5, -INSET));
        path.line_to(Point::new(-INSET, -INSET));
        path.close_path();
        path
      }
      Marker::Square => Rect::new(-0.5, -0.5, 0.5, 0.5).to_path(tolerance),
      Marker::Triangle => {
        // sqrt(3) / 4
        const Y: f64 = 0.433_012_701_892_219_3;

        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, -Y));
        path.line_to(Point::new(0.5, Y));
        path.line_to(Point::new(-0.5, Y));
        path.close_path();
        path
      }
      Marker::Diamond => {
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, -0.5));
        path.line_to(Point::new(0.5, 0.0));
        path.line_to(Point::new(0.0, 0.5));
        path.line_to(Point::new(-0.5, 0.0));
        path.close_path();
        path
      }
    }
  }
}

impl MarkerStyle {
  pub fn filled(marker: Marker, size: f64, fill: impl Into<Brush>) -> Self {
    MarkerStyle { marker, size, fill: Some(fill.into()), edge: None, edge_width: 1.0 }
  }

  pub fn with_edge(mut self, edge: impl Into<Brush>, width: f64) -> Self {
    self.edge = Some(edge.into());
    self.edge_width = width;
    self
  }

  /// Draws the marker centered on `center`, which is in pixel space.
  pub(crate) fn draw(&self, render: &mut Render, center: Point) {
    let path = Affine::translate(center.to_vec2()) * Affine::scale(self.size)
      * self.marker.to_path(0.1);

    if let Some(fill) = &self.fill {
      render.fill(&path, Affine::IDENTITY, fill);
    }
    if let Some(edge) = &self.edge {
      render.stroke(&path, Affine::IDENTITY, edge, &Stroke::new(self.edge_width));
    }
  }
}

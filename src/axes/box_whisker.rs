use kurbo::{Affine, Line, Point, Rect, Stroke};
use peniko::{Color, color::palette::css};
use polars::prelude::*;

use crate::{
  Range, Result, ResultExt,
  bounds::{DataBounds, DataRange},
  data::numeric_values,
  marker::{Marker, MarkerStyle},
  render::Render,
  stats::BoxStats,
  theme::{self, cycled},
};

pub struct BoxWhiskerAxes<'a> {
  columns:     Vec<&'a Column>,
  pub options: BoxOptions,
}

pub struct BoxOptions {
  /// Box width in data units.
  pub width:        f64,
  pub faces:        Vec<Color>,
  pub edges:        Vec<Color>,
  pub edge_width:   f64,
  pub median_color: Color,
  pub median_width: f64,
  pub whisker:      Color,
  pub mean:         Option<MarkerStyle>,
  pub flier:        MarkerStyle,
}

impl Default for BoxOptions {
  fn default() -> Self {
    BoxOptions {
      width:        0.5,
      faces:        theme::BOX_FACES.to_vec(),
      edges:        theme::BOX_EDGES.to_vec(),
      edge_width:   2.0,
      median_color: css::ORANGE,
      median_width: 1.5,
      whisker:      Color::BLACK,
      mean:         Some(
        MarkerStyle::filled(Marker::Diamond, 8.0, css::FIREBRICK).with_edge(Color::BLACK, 1.0),
      ),
      flier:        MarkerStyle {
        marker:     Marker::Circle,
        size:       2.0,
        fill:       None,
        edge:       Some(Color::BLACK.into()),
        edge_width: 1.0,
      },
    }
  }
}

impl<'a> BoxWhiskerAxes<'a> {
  pub(crate) fn new(columns: Vec<&'a Column>) -> Self {
    BoxWhiskerAxes { columns, options: BoxOptions::default() }
  }

  pub fn faces(&mut self, faces: &[Color]) -> &mut Self {
    self.options.faces = faces.to_vec();
    self
  }

  pub fn edges(&mut self, edges: &[Color]) -> &mut Self {
    self.options.edges = edges.to_vec();
    self
  }

  pub fn show_means(&mut self, show: bool) -> &mut Self {
    if !show {
      self.options.mean = None;
    } else if self.options.mean.is_none() {
      self.options.mean = BoxOptions::default().mean;
    }
    self
  }

  /// X position of the box drawn for column `index`.
  pub fn position(index: usize) -> f64 { index as f64 + 1.0 }

  /// Statistics per column. A column without values gets no box, but keeps
  /// its position.
  pub fn stats(&self) -> Result<Vec<Option<BoxStats>>> {
    self
      .columns
      .iter()
      .map(|column| Ok(BoxStats::from_values(column.name(), &numeric_values(column)?).log_err()))
      .collect()
  }

  pub(crate) fn data_bounds(&self) -> Result<DataBounds> {
    let stats = self.stats()?;
    let y = Range::covering(stats.iter().flatten().flat_map(|s| {
      let (min, max) = s.extent();
      [min, max]
    }));

    Ok(DataBounds {
      x: DataRange::Categorical {
        labels: self.columns.iter().map(|c| c.name().to_string()).collect(),
        first:  Self::position(0),
      },
      y: y.map_or(DataRange::Empty, DataRange::from),
    })
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) -> Result<()> {
    let options = &self.options;
    let half = options.width / 2.0;
    let whisker_stroke = Stroke::new(1.0);

    for (i, stats) in self.stats()?.iter().enumerate() {
      let Some(stats) = stats else { continue };
      let x = Self::position(i);

      for (from, to) in [(stats.q1, stats.whisker_low), (stats.q3, stats.whisker_high)] {
        render.stroke(
          &(transform * Line::new(Point::new(x, from), Point::new(x, to))),
          Affine::IDENTITY,
          options.whisker,
          &whisker_stroke,
        );
        render.stroke(
          &(transform * Line::new(Point::new(x - half / 2.0, to), Point::new(x + half / 2.0, to))),
          Affine::IDENTITY,
          options.whisker,
          &whisker_stroke,
        );
      }

      let body = transform.transform_rect_bbox(Rect::new(x - half, stats.q1, x + half, stats.q3));
      render.fill(&body, Affine::IDENTITY, cycled(&options.faces, i));
      render.stroke(
        &body,
        Affine::IDENTITY,
        cycled(&options.edges, i),
        &Stroke::new(options.edge_width),
      );

      render.stroke(
        &(transform
          * Line::new(Point::new(x - half, stats.median), Point::new(x + half, stats.median))),
        Affine::IDENTITY,
        options.median_color,
        &Stroke::new(options.median_width),
      );

      for &flier in &stats.fliers {
        options.flier.draw(render, transform * Point::new(x, flier));
      }

      if let Some(mean) = &options.mean {
        mean.draw(render, transform * Point::new(x, stats.mean));
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn bounds_cover_fliers_and_label_columns() {
    let a = Column::new("5".into(), [1.0, 2.0, 3.0, 4.0, 100.0]);
    let b = Column::new("10".into(), [-3.0, 0.0, 3.0]);
    let axes = BoxWhiskerAxes::new(vec![&a, &b]);

    let bounds = axes.data_bounds().unwrap();
    assert_eq!(
      bounds.x,
      DataRange::Categorical { labels: vec!["5".into(), "10".into()], first: 1.0 }
    );
    assert_eq!(bounds.y, Range::new(-3.0, 100.0).into());
  }

  #[test]
  fn stats_follow_column_order() {
    let a = Column::new("a".into(), [1.0, 2.0, 3.0]);
    let b = Column::new("b".into(), [10.0, 20.0, 30.0]);
    let axes = BoxWhiskerAxes::new(vec![&a, &b]);

    let medians: Vec<f64> = axes.stats().unwrap().iter().flatten().map(|s| s.median).collect();
    assert_eq!(medians, vec![2.0, 20.0]);
  }

  #[test]
  fn empty_column_is_skipped_but_keeps_its_slot() {
    let a = Column::new("a".into(), [Some(1.0), Some(5.0)]);
    let empty = Column::new("empty".into(), [None::<f64>, None]);
    let c = Column::new("c".into(), [2.0, 9.0]);
    let axes = BoxWhiskerAxes::new(vec![&a, &empty, &c]);

    let stats = axes.stats().unwrap();
    assert!(stats[0].is_some());
    assert!(stats[1].is_none());
    assert!(stats[2].is_some());

    let bounds = axes.data_bounds().unwrap();
    assert_eq!(bounds.y, Range::new(1.0, 9.0).into());
    match bounds.x {
      DataRange::Categorical { labels, .. } => assert_eq!(labels, vec!["a", "empty", "c"]),
      other => panic!("expected categorical labels, got {other:?}"),
    }
  }

  #[test]
  fn all_empty_columns_have_no_y_range() {
    let empty = Column::new("empty".into(), [None::<f64>]);
    let axes = BoxWhiskerAxes::new(vec![&empty]);
    assert_eq!(axes.data_bounds().unwrap().y, DataRange::Empty);
  }

  #[test]
  fn means_can_be_hidden() {
    let a = Column::new("a".into(), [1.0]);
    let mut axes = BoxWhiskerAxes::new(vec![&a]);
    axes.show_means(false);
    assert!(axes.options.mean.is_none());
    axes.show_means(true);
    assert!(axes.options.mean.is_some());
  }
}

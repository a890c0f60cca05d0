use kurbo::{Affine, Line, Point, Rect, RoundedRect, Stroke, Vec2};
use peniko::{Brush, Color};

use crate::{
  Bounds, Plot,
  axes::LineOptions,
  marker::MarkerStyle,
  render::{Align, DrawText, Render},
  theme::Theme,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LegendLocation {
  #[default]
  UpperRight,
  UpperLeft,
  LowerRight,
  LowerLeft,
}

pub struct LegendItem {
  pub label:  String,
  pub symbol: LegendSymbol,
}

pub enum LegendSymbol {
  Line(LineOptions),
  Marker(MarkerStyle),
}

const MARGIN: f64 = 20.0;
const PADDING: f64 = 10.0;
const LINE_HEIGHT: f64 = 20.0;
const MARKER_WIDTH: f64 = 40.0;

impl LegendLocation {
  /// Places a `width` by `height` box inside `viewport`, whose y range runs from the
  /// bottom pixel row up to the top one.
  fn place(self, viewport: Bounds, width: f64, height: f64) -> Rect {
    let left = viewport.x.min + MARGIN;
    let right = viewport.x.max - MARGIN - width;
    let top = viewport.y.max + MARGIN;
    let bottom = viewport.y.min - MARGIN - height;

    let (x, y) = match self {
      LegendLocation::UpperRight => (right, top),
      LegendLocation::UpperLeft => (left, top),
      LegendLocation::LowerRight => (right, bottom),
      LegendLocation::LowerLeft => (left, bottom),
    };
    Rect::new(x, y, x + width, y + height)
  }
}

impl Plot<'_> {
  pub(crate) fn legend_items(&self) -> Vec<LegendItem> {
    self.axes.iter().filter_map(|ax| ax.legend_item()).collect()
  }

  pub(crate) fn draw_legend(
    &self,
    render: &mut Render,
    viewport: Bounds,
    location: LegendLocation,
    theme: &Theme,
  ) {
    let items = self.legend_items();
    if items.is_empty() {
      return;
    }

    let mut inner_width = 0.0_f64;
    let mut layouts = vec![];
    for item in &items {
      let text = DrawText {
        text: &item.label,
        family: &theme.font_family,
        size: theme.font_size,
        brush: Brush::Solid(theme.text),
        vertical_align: Align::Center,
        ..Default::default()
      };
      let layout = render.layout_text(&text);
      inner_width = inner_width.max(f64::from(layout.width()));
      layouts.push((layout, text));
    }

    inner_width += MARKER_WIDTH;
    let inner_height = items.len() as f64 * LINE_HEIGHT;

    let rect = location.place(viewport, inner_width + PADDING * 2.0, inner_height + PADDING * 2.0);
    let background = RoundedRect::from_rect(rect, 5.0);
    render.fill(&background, Affine::IDENTITY, Color::from_rgba8(255, 255, 255, 200));
    render.stroke(&background, Affine::IDENTITY, theme.line, &Stroke::new(1.0));

    for (i, (item, (layout, mut text))) in items.iter().zip(layouts).enumerate() {
      let pos = Point::new(
        rect.x0 + PADDING,
        rect.y0 + i as f64 * LINE_HEIGHT + PADDING + LINE_HEIGHT / 2.0,
      );

      match &item.symbol {
        LegendSymbol::Line(line) => {
          let sample = Line::new(pos, pos + Vec2::new(MARKER_WIDTH - 5.0, 0.0));
          render.stroke(&sample, Affine::IDENTITY, &line.color, &line.stroke());
        }
        LegendSymbol::Marker(marker) => {
          marker.draw(render, pos + Vec2::new((MARKER_WIDTH - 5.0) / 2.0, 0.0));
        }
      }

      text.position = pos + Vec2::new(MARKER_WIDTH, 0.0);
      render.draw_text_layout(layout, text);
    }
  }
}

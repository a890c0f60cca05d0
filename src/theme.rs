use color::{HueDirection, Oklch, OpaqueColor, Srgb};
use peniko::{Color, color::palette::css};

pub struct LinearPalette {
  start: OpaqueColor<Oklch>,
  end:   OpaqueColor<Oklch>,
}

pub const ROCKET: LinearPalette =
  LinearPalette::new(OpaqueColor::new([0.7, 0.13, 50.0]), OpaqueColor::new([0.7, 0.13, 290.0]));

/// Edge colors of successive boxes.
pub const BOX_EDGES: [Color; 5] =
  [css::ROYAL_BLUE, css::LIME, css::TOMATO, css::MAGENTA, css::RED];

/// Face colors of successive boxes.
pub const BOX_FACES: [Color; 5] = [css::WHITE; 5];

/// Default fill for bars, the first color of the classic tab10 cycle.
pub const BAR: Color = Color::from_rgb8(31, 119, 180);

impl LinearPalette {
  pub const fn new(start: OpaqueColor<Oklch>, end: OpaqueColor<Oklch>) -> Self {
    Self { start, end }
  }

  pub fn sample(&self, t: f32) -> OpaqueColor<Oklch> {
    let t = t.clamp(0.0, 1.0);
    self.start.lerp(self.end, t, HueDirection::Shorter)
  }

  /// Picks `index` out of `count` evenly spread colors.
  pub fn nth(&self, index: usize, count: usize) -> Color {
    let t = if count <= 1 { 0.0 } else { index as f32 / (count - 1) as f32 };
    self.sample(t).convert::<Srgb>().with_alpha(1.0)
  }
}

/// Fonts and colors shared by everything drawn on a figure.
#[derive(Clone, Debug)]
pub struct Theme {
  pub font_family: String,
  pub font_size:   f32,
  pub title_size:  f32,
  pub text:        Color,
  pub line:        Color,
  pub background:  Color,
}

impl Default for Theme {
  fn default() -> Self {
    Theme {
      font_family: "serif".to_string(),
      font_size:   12.0,
      title_size:  16.0,
      text:        Color::from_rgb8(32, 32, 32),
      line:        Color::from_rgb8(128, 128, 128),
      background:  css::WHITE,
    }
  }
}

impl Theme {
  pub fn with_font_size(mut self, size: f32) -> Self {
    self.font_size = size;
    self
  }

  pub fn with_title_size(mut self, size: f32) -> Self {
    self.title_size = size;
    self
  }

  pub(crate) fn tick_size(&self) -> f32 { self.font_size * 0.9 }
}

/// Cycles through `colors` so that any number of series get one.
pub fn cycled(colors: &[Color], index: usize) -> Color { colors[index % colors.len()] }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn palette_ends_match_endpoints() {
    let first = ROCKET.nth(0, 3);
    let expected = OpaqueColor::<Oklch>::new([0.7, 0.13, 50.0]).convert::<Srgb>().with_alpha(1.0);
    assert_eq!(first, expected);
  }

  #[test]
  fn cycled_wraps_around() {
    assert_eq!(cycled(&BOX_EDGES, 0), css::ROYAL_BLUE);
    assert_eq!(cycled(&BOX_EDGES, 6), css::LIME);
  }
}

use chrono::{Duration, NaiveDate};
use kurbo::Affine;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
  pub x: Range,
  pub y: Range,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DataBounds {
  pub x: DataRange,
  pub y: DataRange,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DataRange {
  Continuous { range: Range, unit: RangeUnit, margin_min: bool, margin_max: bool },
  /// Labels sit at `first`, `first + 1`, and so on.
  Categorical { labels: Vec<String>, first: f64 },
  /// No values at all. Yields to anything it is combined with.
  Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeUnit {
  Absolute,
  /// Days since the Unix epoch.
  Date,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Range {
  pub min: f64,
  pub max: f64,
}

/// Fraction of the data span added on each side of a continuous range.
const MARGIN: f64 = 0.05;

impl From<Range> for DataRange {
  fn from(range: Range) -> Self {
    DataRange::Continuous { range, unit: RangeUnit::Absolute, margin_min: true, margin_max: true }
  }
}

impl Bounds {
  pub const fn new(x: Range, y: Range) -> Self { Bounds { x, y } }

  pub(crate) fn transform_to(&self, viewport: Bounds) -> Affine {
    let scale_x = viewport.x.size() / self.x.size();
    let scale_y = viewport.y.size() / self.y.size();
    let translate_x = viewport.x.min - self.x.min * scale_x;
    let translate_y = viewport.y.min - self.y.min * scale_y;

    Affine::new([scale_x, 0.0, 0.0, scale_y, translate_x, translate_y])
  }
}

impl Range {
  pub const fn new(min: f64, max: f64) -> Self { Range { min, max } }
  pub const fn size(&self) -> f64 { self.max - self.min }

  pub const fn contains(&self, value: &f64) -> bool {
    (*value >= self.min && *value <= self.max) || (*value <= self.min && *value >= self.max)
  }

  pub fn union(&self, other: Range) -> Range {
    Range { min: self.min.min(other.min), max: self.max.max(other.max) }
  }

  /// Builds the range covering every value, or `None` when there are none.
  pub fn covering(values: impl IntoIterator<Item = f64>) -> Option<Range> {
    values.into_iter().filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
      None => Some(Range::new(v, v)),
      Some(r) => Some(Range::new(r.min.min(v), r.max.max(v))),
    })
  }

  /// Widens a degenerate range so it can be mapped onto a viewport.
  pub(crate) fn non_degenerate(self) -> Range {
    if self.size() != 0.0 {
      self
    } else if self.min == 0.0 {
      Range::new(-1.0, 1.0)
    } else {
      let pad = self.min.abs() * 0.05;
      Range::new(self.min - pad, self.max + pad)
    }
  }

  pub fn nice_ticks(&self, count: u32) -> NiceTicksIter {
    let size = self.size().abs();
    if !size.is_finite() || size == 0.0 {
      return NiceTicksIter::new(self.min, self.min, 1.0, 0, 0);
    }

    let step = size / f64::from(count);
    let k = step.log10().floor();
    let base = step / 10f64.powf(k);

    let nice_base = match base {
      b if b <= 1.0 => 1.0,
      b if b <= 2.0 => 2.0,
      b if b <= 2.5 => 2.5,
      b if b <= 5.0 => 5.0,
      _ => 10.0,
    };

    let step = nice_base * 10f64.powf(k);
    let (min, max) = (self.min.min(self.max), self.min.max(self.max));
    let lo = (min / step).floor() * step;
    let hi = (max / step).ceil() * step;

    let precision = (-k as i32 + 4).max(0) as usize;
    let decimals = (-k as i32 + i32::from(nice_base == 2.5)).max(0) as usize;
    NiceTicksIter::new(lo, hi, step, precision, decimals)
  }

  /// Ticks on whole days, spaced so that at most `count` fit in the range.
  pub fn date_ticks(&self, count: u32) -> NiceTicksIter {
    const STEPS: [f64; 11] =
      [1.0, 2.0, 7.0, 14.0, 30.0, 61.0, 91.0, 182.0, 365.0, 730.0, 1826.0];

    let (min, max) = (self.min.min(self.max), self.min.max(self.max));
    let span = max - min;
    let step = STEPS
      .iter()
      .copied()
      .find(|step| span / step <= f64::from(count))
      .unwrap_or_else(|| (span / f64::from(count) / 365.0).ceil() * 365.0);

    let lo = (min / step).ceil() * step;
    let hi = (max / step).floor() * step;
    NiceTicksIter::new(lo, hi, step, 0, 0)
  }
}

impl DataRange {
  pub(crate) fn from_values(values: &[Option<f64>], unit: RangeUnit) -> DataRange {
    match Range::covering(values.iter().flatten().copied()) {
      Some(range) => DataRange::Continuous { range, unit, margin_min: true, margin_max: true },
      None => DataRange::Empty,
    }
  }

  pub(crate) fn unit(&self) -> RangeUnit {
    match self {
      DataRange::Continuous { unit, .. } => *unit,
      DataRange::Categorical { .. } | DataRange::Empty => RangeUnit::Absolute,
    }
  }

  /// The range spanned, margins included.
  pub fn resolve(&self) -> Range {
    match self {
      DataRange::Continuous { range, margin_min, margin_max, .. } => {
        let range = range.non_degenerate();
        let pad = range.size() * MARGIN;
        Range::new(
          if *margin_min { range.min - pad } else { range.min },
          if *margin_max { range.max + pad } else { range.max },
        )
      }
      DataRange::Categorical { labels, first } => {
        Range::new(first - 0.5, first + labels.len().max(1) as f64 - 0.5)
      }
      DataRange::Empty => DataRange::from(Range::new(0.0, 1.0)).resolve(),
    }
  }

  /// Combines two ranges. A categorical side wins the labels, and the
  /// covered span grows to include both.
  pub fn union(self, other: DataRange) -> DataRange {
    match (self, other) {
      (DataRange::Empty, other) => other,
      (range, DataRange::Empty) => range,
      (
        DataRange::Continuous { range: a, unit, margin_min: a_min, margin_max: a_max },
        DataRange::Continuous { range: b, margin_min: b_min, margin_max: b_max, .. },
      ) => DataRange::Continuous {
        range: a.union(b),
        unit,
        margin_min: margin_for(a.min, a_min, b.min, b_min, f64::lt),
        margin_max: margin_for(a.max, a_max, b.max, b_max, f64::gt),
      },
      (categorical @ DataRange::Categorical { .. }, _) => categorical,
      (_, categorical @ DataRange::Categorical { .. }) => categorical,
    }
  }
}

/// The margin flag of whichever side reaches further.
fn margin_for(
  a: f64,
  a_margin: bool,
  b: f64,
  b_margin: bool,
  further: fn(&f64, &f64) -> bool,
) -> bool {
  if further(&a, &b) {
    a_margin
  } else if further(&b, &a) {
    b_margin
  } else {
    a_margin && b_margin
  }
}

impl DataBounds {
  pub fn union(self, other: DataBounds) -> DataBounds {
    DataBounds { x: self.x.union(other.x), y: self.y.union(other.y) }
  }
}

/// Formats a day count since the Unix epoch as `YYYY-MM-DD`.
pub fn format_date(days: f64) -> String {
  let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
  match epoch.checked_add_signed(Duration::days(days.round() as i64)) {
    Some(date) => date.format("%Y-%m-%d").to_string(),
    None => format!("{days}"),
  }
}

pub struct NiceTicksIter {
  current:   f64,
  step:      f64,
  hi:        f64,
  precision: usize,
  decimals:  usize,
}

impl NiceTicksIter {
  fn new(lo: f64, hi: f64, step: f64, precision: usize, decimals: usize) -> Self {
    NiceTicksIter { current: lo, step, hi, precision, decimals }
  }

  /// Digits after the decimal point needed to tell ticks apart.
  pub fn decimals(&self) -> usize { self.decimals }
}

impl Iterator for NiceTicksIter {
  type Item = f64;
  fn next(&mut self) -> Option<Self::Item> {
    if self.current < self.hi + self.step * 0.5 {
      let p = 10f64.powi(self.precision as i32);
      let result = (self.current * p).round() / p;
      self.current += self.step;
      Some(result)
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use kurbo::Point;
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn nice_ticks_round_steps() {
    let ticks: Vec<f64> = Range::new(0.0, 100.0).nice_ticks(10).collect();
    assert_eq!(ticks, (0..=10).map(|i| f64::from(i) * 10.0).collect::<Vec<_>>());

    let iter = Range::new(-50.0, 2100.0).nice_ticks(10);
    assert_eq!(iter.decimals(), 0);
    let ticks: Vec<f64> = iter.collect();
    assert_eq!(ticks.first(), Some(&-250.0));
    assert_eq!(ticks.last(), Some(&2250.0));
  }

  #[test]
  fn fractional_ticks_need_decimals() {
    let iter = Range::new(0.0, 1.0).nice_ticks(4);
    assert_eq!(iter.decimals(), 2);
    assert_eq!(iter.collect::<Vec<_>>(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
  }

  #[test]
  fn degenerate_range_yields_one_tick() {
    let ticks: Vec<f64> = Range::new(3.0, 3.0).nice_ticks(10).collect();
    assert_eq!(ticks, vec![3.0]);
  }

  #[test]
  fn date_ticks_pick_weekly_steps() {
    let ticks: Vec<f64> = Range::new(0.0, 60.0).date_ticks(10).collect();
    assert_eq!(ticks, vec![0.0, 7.0, 14.0, 21.0, 28.0, 35.0, 42.0, 49.0, 56.0]);
    assert_eq!(format_date(ticks[1]), "1970-01-08");
  }

  #[test]
  fn continuous_resolve_adds_margins() {
    let range: DataRange = Range::new(0.0, 100.0).into();
    assert_eq!(range.resolve(), Range::new(-5.0, 105.0));

    let bars = DataRange::Continuous {
      range:      Range::new(0.0, 100.0),
      unit:       RangeUnit::Absolute,
      margin_min: false,
      margin_max: true,
    };
    assert_eq!(bars.resolve(), Range::new(0.0, 105.0));
  }

  #[test]
  fn categorical_wins_union() {
    let boxes = DataRange::Categorical { labels: vec!["a".into(), "b".into()], first: 1.0 };
    let points: DataRange = Range::new(0.7, 1.7).into();

    let union = points.union(boxes.clone());
    assert_eq!(union, boxes);
    assert_eq!(union.resolve(), Range::new(0.5, 2.5));
  }

  #[test]
  fn union_keeps_margin_of_outer_side() {
    let bars = DataRange::Continuous {
      range:      Range::new(0.0, 10.0),
      unit:       RangeUnit::Absolute,
      margin_min: false,
      margin_max: true,
    };
    let line: DataRange = Range::new(2.0, 8.0).into();

    match bars.union(line) {
      DataRange::Continuous { range, margin_min, margin_max, .. } => {
        assert_eq!(range, Range::new(0.0, 10.0));
        assert!(!margin_min);
        assert!(margin_max);
      }
      _ => panic!("expected a continuous range"),
    }
  }

  #[test]
  fn transform_maps_corners() {
    let data = Bounds::new(Range::new(0.0, 10.0), Range::new(0.0, 100.0));
    // Pixel space grows downwards, so the viewport's y range is flipped.
    let viewport = Bounds::new(Range::new(100.0, 300.0), Range::new(500.0, 100.0));
    let transform = data.transform_to(viewport);

    assert_eq!(transform * Point::new(0.0, 0.0), Point::new(100.0, 500.0));
    assert_eq!(transform * Point::new(10.0, 100.0), Point::new(300.0, 100.0));
  }

  #[test]
  fn contains_ignores_direction() {
    assert!(Range::new(920.0, 80.0).contains(&500.0));
    assert!(Range::new(80.0, 920.0).contains(&80.0));
    assert!(!Range::new(920.0, 80.0).contains(&921.0));
  }

  #[test]
  fn all_zero_values_still_count() {
    let busy = DataRange::from_values(&[Some(20.0), Some(60.0), Some(100.0)], RangeUnit::Absolute);
    let zeros = DataRange::from_values(&[Some(0.0), Some(0.0)], RangeUnit::Absolute);

    assert_eq!(busy.clone().union(zeros.clone()).resolve(), Range::new(-5.0, 105.0));
    assert_eq!(zeros.union(busy).resolve(), Range::new(-5.0, 105.0));
  }

  #[test]
  fn empty_ranges_yield_to_data() {
    let missing = DataRange::from_values(&[None, Some(f64::NAN)], RangeUnit::Date);
    assert_eq!(missing, DataRange::Empty);

    let data: DataRange = Range::new(2.0, 4.0).into();
    assert_eq!(missing.clone().union(data.clone()), data);
    assert_eq!(data.clone().union(missing), data);
    assert_eq!(DataRange::Empty.resolve(), Range::new(-0.05, 1.05));
  }
}

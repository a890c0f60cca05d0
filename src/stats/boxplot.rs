use crate::{Error, Result};

/// Whisker reach as a multiple of the interquartile range.
const WHISKER_REACH: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
  pub q1:           f64,
  pub median:       f64,
  pub q3:           f64,
  pub mean:         f64,
  pub whisker_low:  f64,
  pub whisker_high: f64,
  pub fliers:       Vec<f64>,
  pub count:        usize,
}

impl BoxStats {
  /// Computes box statistics over the present values. `name` only appears in
  /// the error when nothing is left after dropping missing values.
  pub fn from_values(name: &str, values: &[Option<f64>]) -> Result<BoxStats> {
    let mut sorted: Vec<f64> = values.iter().flatten().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
      return Err(Error::EmptyColumn(name.to_string()));
    }
    sorted.sort_by(f64::total_cmp);

    let q1 = percentile(&sorted, 25.0);
    let median = percentile(&sorted, 50.0);
    let q3 = percentile(&sorted, 75.0);
    let iqr = q3 - q1;
    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

    let low_limit = q1 - WHISKER_REACH * iqr;
    let high_limit = q3 + WHISKER_REACH * iqr;

    // Whiskers end on real data points, never beyond the box.
    let whisker_low =
      sorted.iter().copied().find(|&v| v >= low_limit).map_or(q1, |v| v.min(q1));
    let whisker_high =
      sorted.iter().rev().copied().find(|&v| v <= high_limit).map_or(q3, |v| v.max(q3));

    let fliers =
      sorted.iter().copied().filter(|&v| v < whisker_low || v > whisker_high).collect();

    Ok(BoxStats {
      q1,
      median,
      q3,
      mean,
      whisker_low,
      whisker_high,
      fliers,
      count: sorted.len(),
    })
  }

  pub fn iqr(&self) -> f64 { self.q3 - self.q1 }

  /// Smallest and largest value drawn for this box, fliers included.
  pub fn extent(&self) -> (f64, f64) {
    let min = self.fliers.iter().copied().fold(self.whisker_low, f64::min);
    let max = self.fliers.iter().copied().fold(self.whisker_high, f64::max);
    (min, max)
  }
}

/// Percentile `p` (0 to 100) of already sorted values, interpolating
/// linearly between the two closest ranks.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
  match sorted.len() {
    0 => f64::NAN,
    1 => sorted[0],
    n => {
      let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
      let lo = rank.floor() as usize;
      let hi = rank.ceil() as usize;
      sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
    }
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  fn present(values: &[f64]) -> Vec<Option<f64>> { values.iter().copied().map(Some).collect() }

  #[test]
  fn quartiles_interpolate_between_ranks() {
    let stats = BoxStats::from_values("x", &present(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]))
      .unwrap();

    assert_eq!(stats.q1, 2.75);
    assert_eq!(stats.median, 4.5);
    assert_eq!(stats.q3, 6.25);
    assert_eq!(stats.mean, 4.5);
    assert_eq!(stats.iqr(), 3.5);
    assert_eq!((stats.whisker_low, stats.whisker_high), (1.0, 8.0));
    assert!(stats.fliers.is_empty());
  }

  #[test]
  fn outliers_become_fliers() {
    let stats = BoxStats::from_values("x", &present(&[4.0, 1.0, 100.0, 3.0, 2.0])).unwrap();

    assert_eq!((stats.q1, stats.median, stats.q3), (2.0, 3.0, 4.0));
    assert_eq!(stats.whisker_low, 1.0);
    assert_eq!(stats.whisker_high, 4.0);
    assert_eq!(stats.fliers, vec![100.0]);
    assert_eq!(stats.mean, 22.0);
    assert_eq!(stats.extent(), (1.0, 100.0));
  }

  #[test]
  fn missing_values_are_ignored() {
    let stats =
      BoxStats::from_values("x", &[Some(1.0), None, Some(f64::NAN), Some(3.0)]).unwrap();

    assert_eq!(stats.count, 2);
    assert_eq!(stats.median, 2.0);
  }

  #[test]
  fn empty_column_is_an_error() {
    let err = BoxStats::from_values("ozone", &[None, None]).unwrap_err();
    assert!(matches!(err, Error::EmptyColumn(name) if name == "ozone"));
  }

  #[test]
  fn single_value_collapses_the_box() {
    let stats = BoxStats::from_values("x", &present(&[7.0])).unwrap();
    assert_eq!((stats.q1, stats.median, stats.q3), (7.0, 7.0, 7.0));
    assert_eq!((stats.whisker_low, stats.whisker_high), (7.0, 7.0));
  }

  #[test]
  fn percentile_edges() {
    assert!(percentile(&[], 50.0).is_nan());
    assert_eq!(percentile(&[1.0, 3.0], 0.0), 1.0);
    assert_eq!(percentile(&[1.0, 3.0], 100.0), 3.0);
    assert_eq!(percentile(&[1.0, 3.0], 50.0), 2.0);
  }
}

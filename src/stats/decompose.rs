use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Model {
  #[default]
  Additive,
  Multiplicative,
}

/// Components of a seasonal decomposition. `trend` and `resid` are NaN for
/// the first and last `period / 2` observations, where the centered moving
/// average is undefined.
#[derive(Debug, Clone)]
pub struct Decomposition {
  pub observed: Vec<f64>,
  pub trend:    Vec<f64>,
  pub seasonal: Vec<f64>,
  pub resid:    Vec<f64>,
  pub period:   usize,
  pub model:    Model,
}

/// Splits `values` into trend, seasonal and residual components using a
/// centered moving average for the trend and per-phase means for the season.
pub fn decompose(values: &[Option<f64>], period: usize, model: Model) -> Result<Decomposition> {
  if period == 0 {
    return Err(Error::InvalidPeriod(period));
  }
  if values.len() < 2 * period {
    return Err(Error::TooShort { required: 2 * period, actual: values.len() });
  }

  let observed = values
    .iter()
    .enumerate()
    .map(|(i, v)| v.filter(|v| v.is_finite()).ok_or(Error::MissingValues(i)))
    .collect::<Result<Vec<f64>>>()?;

  if model == Model::Multiplicative && observed.iter().any(|&v| v <= 0.0) {
    return Err(Error::NonPositive);
  }

  let trend = centered_moving_average(&observed, period);

  let detrended: Vec<f64> = observed
    .iter()
    .zip(&trend)
    .map(|(&x, &t)| match model {
      Model::Additive => x - t,
      Model::Multiplicative => x / t,
    })
    .collect();

  let mut phase_means: Vec<f64> = (0..period)
    .map(|phase| {
      let (sum, count) = detrended
        .iter()
        .skip(phase)
        .step_by(period)
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
      sum / count as f64
    })
    .collect();

  let center = phase_means.iter().sum::<f64>() / period as f64;
  for mean in &mut phase_means {
    match model {
      Model::Additive => *mean -= center,
      Model::Multiplicative => *mean /= center,
    }
  }

  let seasonal: Vec<f64> = (0..observed.len()).map(|i| phase_means[i % period]).collect();

  let resid = detrended
    .iter()
    .zip(&seasonal)
    .map(|(&d, &s)| match model {
      Model::Additive => d - s,
      Model::Multiplicative => d / s,
    })
    .collect();

  log::debug!("decomposed {} observations with period {period} ({model:?})", observed.len());

  Ok(Decomposition { observed, trend, seasonal, resid, period, model })
}

/// Two-sided moving average. Even periods use `period + 1` weights with the
/// two end weights halved so the window stays centered.
fn centered_moving_average(values: &[f64], period: usize) -> Vec<f64> {
  let weights: Vec<f64> = if period % 2 == 0 {
    let mut w = vec![1.0 / period as f64; period + 1];
    w[0] /= 2.0;
    w[period] /= 2.0;
    w
  } else {
    vec![1.0 / period as f64; period]
  };
  let half = weights.len() / 2;

  (0..values.len())
    .map(|i| {
      if i < half || i + half >= values.len() {
        return f64::NAN;
      }
      values[i - half..=i + half].iter().zip(&weights).map(|(v, w)| v * w).sum()
    })
    .collect()
}

/// Infers the seasonal period from a date index given as days since the
/// Unix epoch. Returns `None` unless the spacing is regular.
pub fn infer_period(days: &[i32]) -> Option<usize> {
  let steps: Vec<i32> = days.windows(2).map(|w| w[1] - w[0]).collect();
  let (&first, rest) = steps.split_first()?;

  let all_within = |lo: i32, hi: i32| steps.iter().all(|s| (lo..=hi).contains(s));

  if rest.iter().all(|&s| s == first) {
    match first {
      1 => return Some(7),
      7 => return Some(52),
      _ => {}
    }
  }

  if all_within(28, 31) {
    Some(12)
  } else if all_within(89, 92) {
    Some(4)
  } else if all_within(365, 366) {
    Some(1)
  } else {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const PATTERN: [f64; 4] = [1.0, -1.0, 2.0, -2.0];

  fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

  #[test]
  fn additive_recovers_linear_trend_and_pattern() {
    let values: Vec<Option<f64>> =
      (0..12).map(|t| Some(t as f64 + PATTERN[t % 4])).collect();

    let d = decompose(&values, 4, Model::Additive).unwrap();

    for t in 0..12 {
      if t < 2 || t >= 10 {
        assert!(d.trend[t].is_nan(), "trend at {t} should be undefined");
        assert!(d.resid[t].is_nan());
      } else {
        assert!(close(d.trend[t], t as f64), "trend at {t} was {}", d.trend[t]);
        assert!(close(d.resid[t], 0.0));
      }
      assert!(close(d.seasonal[t], PATTERN[t % 4]));
    }
  }

  #[test]
  fn odd_period_uses_plain_window() {
    let values: Vec<Option<f64>> = [3.0, 6.0, 9.0, 3.0, 6.0, 9.0].into_iter().map(Some).collect();

    let d = decompose(&values, 3, Model::Additive).unwrap();

    assert!(d.trend[0].is_nan());
    assert!(d.trend[5].is_nan());
    assert!(d.trend[1..5].iter().all(|&t| close(t, 6.0)));
    assert!(close(d.seasonal[0], -3.0));
    assert!(close(d.seasonal[2], 3.0));
  }

  #[test]
  fn multiplicative_normalizes_season_to_one() {
    let factors = [0.5, 1.5];
    let values: Vec<Option<f64>> = (0..8).map(|t| Some(10.0 * factors[t % 2])).collect();

    let d = decompose(&values, 2, Model::Multiplicative).unwrap();

    assert!(d.trend[1..7].iter().all(|&t| close(t, 10.0)));
    assert!(close(d.seasonal[0], 0.5));
    assert!(close(d.seasonal[1], 1.5));
    assert!(d.resid[1..7].iter().all(|&r| close(r, 1.0)));
  }

  #[test]
  fn rejects_bad_input() {
    let short: Vec<Option<f64>> = vec![Some(1.0); 5];
    assert!(matches!(
      decompose(&short, 3, Model::Additive),
      Err(Error::TooShort { required: 6, actual: 5 })
    ));
    assert!(matches!(decompose(&short, 0, Model::Additive), Err(Error::InvalidPeriod(0))));

    let gap = vec![Some(1.0), Some(2.0), None, Some(4.0)];
    assert!(matches!(decompose(&gap, 2, Model::Additive), Err(Error::MissingValues(2))));

    let negative = vec![Some(1.0), Some(-2.0), Some(3.0), Some(4.0)];
    assert!(matches!(decompose(&negative, 2, Model::Multiplicative), Err(Error::NonPositive)));
  }

  #[test]
  fn unit_period_has_no_season() {
    let values: Vec<Option<f64>> = [3.0, 8.0, 5.0, 6.0].into_iter().map(Some).collect();

    let d = decompose(&values, 1, Model::Additive).unwrap();
    assert_eq!(d.trend, d.observed);
    assert!(d.seasonal.iter().all(|&s| s == 0.0));
    assert!(d.resid.iter().all(|&r| r == 0.0));

    let d = decompose(&values, 1, Model::Multiplicative).unwrap();
    assert!(d.seasonal.iter().all(|&s| s == 1.0));
    assert!(d.resid.iter().all(|&r| r == 1.0));
  }

  #[test]
  fn period_from_regular_index() {
    assert_eq!(infer_period(&[0, 1, 2, 3]), Some(7));
    assert_eq!(infer_period(&[0, 7, 14]), Some(52));
    // 2021-01-01, 2021-02-01, 2021-03-01, 2021-04-01
    assert_eq!(infer_period(&[18628, 18659, 18687, 18718]), Some(12));
    assert_eq!(infer_period(&[0, 90, 181, 273]), Some(4));
    assert_eq!(infer_period(&[0, 365, 730, 1096]), Some(1));
  }

  #[test]
  fn irregular_index_has_no_period() {
    assert_eq!(infer_period(&[0, 1, 3, 4]), None);
    assert_eq!(infer_period(&[0]), None);
  }
}

//! Summary statistics behind the charts: box-plot statistics and seasonal
//! decomposition of evenly spaced series.

mod boxplot;
mod decompose;

pub use boxplot::{BoxStats, percentile};
pub use decompose::{Decomposition, Model, decompose, infer_period};

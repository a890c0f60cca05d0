use std::{fmt::Display, io, path::PathBuf};

use polars::error::PolarsError;
use thiserror::Error;
use vello::wgpu;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error(transparent)]
  Polars(#[from] PolarsError),

  #[error("column `{0}` contains no values")]
  EmptyColumn(String),

  #[error("the first column `{0}` is not a date index")]
  NotADateIndex(String),

  #[error("seasonal period must be at least 1, got {0}")]
  InvalidPeriod(usize),

  #[error("decomposition needs two complete cycles ({required} observations), got {actual}")]
  TooShort { required: usize, actual: usize },

  #[error("decomposition input has a missing value at row {0}")]
  MissingValues(usize),

  #[error("multiplicative decomposition requires strictly positive values")]
  NonPositive,

  #[error("could not infer a seasonal period from an irregular date index; pass one explicitly")]
  UnknownPeriod,

  #[error("no GPU adapter available: {0}")]
  Adapter(String),

  #[error(transparent)]
  Device(#[from] wgpu::RequestDeviceError),

  #[error("failed to render figure: {0}")]
  Render(#[from] vello::Error),

  #[error("failed to read back rendered frame: {0}")]
  Readback(String),

  #[error(transparent)]
  Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) trait ResultExt<T> {
  /// Logs the error and discards it.
  fn log_err(self) -> Option<T>;
}

impl<T, E: Display> ResultExt<T> for std::result::Result<T, E> {
  fn log_err(self) -> Option<T> {
    match self {
      Ok(value) => Some(value),
      Err(e) => {
        log::warn!("{e}");
        None
      }
    }
  }
}

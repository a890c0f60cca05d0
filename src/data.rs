//! Loading delimited tables and pulling plottable values out of their columns.

use std::{fs, io::Cursor, path::Path};

use polars::prelude::*;

use crate::{Error, Result, bounds::RangeUnit};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Separator {
  #[default]
  Comma,
  Tab,
  /// Any run of spaces and tabs.
  Whitespace,
}

/// Reads a table whose first row is a header. Columns holding ISO dates are
/// parsed as dates.
pub fn read_table(path: impl AsRef<Path>, separator: Separator) -> Result<DataFrame> {
  let path = path.as_ref();
  let bytes = fs::read(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;

  let df = parse_table(bytes, separator)?;
  log::debug!(
    "read {} ({} rows, columns {:?})",
    path.display(),
    df.height(),
    df.get_column_names()
  );
  Ok(df)
}

pub fn parse_table(bytes: Vec<u8>, separator: Separator) -> Result<DataFrame> {
  let (bytes, delimiter) = match separator {
    Separator::Comma => (bytes, b','),
    Separator::Tab => (bytes, b'\t'),
    Separator::Whitespace => (collapse_whitespace(&bytes), b'\t'),
  };

  Ok(
    CsvReadOptions::default()
      .with_has_header(true)
      .map_parse_options(|options| options.with_separator(delimiter).with_try_parse_dates(true))
      .into_reader_with_file_handle(Cursor::new(bytes))
      .finish()?,
  )
}

/// Rewrites whitespace separated lines as tab separated ones, dropping blank
/// lines.
fn collapse_whitespace(bytes: &[u8]) -> Vec<u8> {
  String::from_utf8_lossy(bytes)
    .lines()
    .map(|line| line.split_whitespace().collect::<Vec<_>>().join("\t"))
    .filter(|line| !line.is_empty())
    .collect::<Vec<_>>()
    .join("\n")
    .into_bytes()
}

pub(crate) fn unit_of(column: &Column) -> RangeUnit {
  match column.dtype() {
    DataType::Date | DataType::Datetime(..) => RangeUnit::Date,
    _ => RangeUnit::Absolute,
  }
}

/// The column as floats. Dates become days since the Unix epoch; nulls and
/// NaN become `None`.
pub fn numeric_values(column: &Column) -> PolarsResult<Vec<Option<f64>>> {
  let column = match column.dtype() {
    DataType::Date => column.cast(&DataType::Int32)?,
    DataType::Datetime(..) => column.cast(&DataType::Date)?.cast(&DataType::Int32)?,
    _ => column.clone(),
  };

  let floats = column.cast(&DataType::Float64)?;
  Ok(floats.f64()?.into_iter().map(|v| v.filter(|v| !v.is_nan())).collect())
}

/// The column rendered as text, one label per row.
pub fn column_labels(column: &Column) -> PolarsResult<Vec<String>> {
  let labels = column.cast(&DataType::String)?;
  Ok(labels.str()?.into_iter().map(|v| v.unwrap_or_default().to_string()).collect())
}

/// The first column as days since the Unix epoch.
pub fn date_index(df: &DataFrame) -> Result<Vec<i32>> {
  let Some(column) = df.get_columns().first() else {
    return Err(Error::NotADateIndex(String::new()));
  };
  if unit_of(column) != RangeUnit::Date {
    return Err(Error::NotADateIndex(column.name().to_string()));
  }

  numeric_values(column)?
    .into_iter()
    .map(|day| day.map(|d| d as i32).ok_or_else(|| Error::NotADateIndex(column.name().to_string())))
    .collect()
}

/// Every numeric column except a leading date index.
pub fn value_columns(df: &DataFrame) -> Vec<&Column> {
  df.get_columns()
    .iter()
    .enumerate()
    .filter(|(i, column)| !(*i == 0 && unit_of(column) == RangeUnit::Date))
    .map(|(_, column)| column)
    .filter(|column| {
      let numeric = column.dtype().is_numeric();
      if !numeric {
        log::warn!("skipping non-numeric column `{}` ({})", column.name(), column.dtype());
      }
      numeric
    })
    .collect()
}

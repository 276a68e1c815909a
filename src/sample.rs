//! Samples the Rosenbrock function along the section `x1 = 1`, producing the
//! dataset the plot reads.

use std::{fs::File, path::Path};

use polars::prelude::*;

use crate::{Error, Result};

/// `100 (x1 - x0²)² + (1 - x0)²`, minimal at `(1, 1)`.
pub fn rosenbrock(p: &[f64; 2]) -> f64 {
  100.0 * (p[1] - p[0].powi(2)).powi(2) + (1.0 - p[0]).powi(2)
}

/// The `x0` interval the section is sampled over.
pub const SECTION: (f64, f64) = (-2.0, 2.0);

/// `samples + 1` evenly spaced rows of `(x0, F(x0, 1))` covering [`SECTION`].
/// At least one sample is needed to span the interval.
pub fn section(samples: usize) -> Result<DataFrame> {
  if samples == 0 {
    return Err(Error::NoSamples);
  }
  let (lo, hi) = SECTION;
  let step = (hi - lo) / samples as f64;

  let x0: Vec<f64> = (0..=samples).map(|i| lo + step * i as f64).collect();
  let f: Vec<f64> = x0.iter().map(|&x0| rosenbrock(&[x0, 1.0])).collect();

  Ok(df! {
    "x0" => x0,
    "f" => f,
  }?)
}

/// Writes [`section`] to `path` as headerless CSV with six decimals.
pub fn write_section(path: impl AsRef<Path>, samples: usize) -> Result<usize> {
  let path = path.as_ref();
  let mut frame = section(samples)?;
  let mut file =
    File::create(path).map_err(|source| Error::FileOpen { path: path.to_path_buf(), source })?;

  CsvWriter::new(&mut file).include_header(false).with_float_precision(Some(6)).finish(&mut frame)?;

  tracing::debug!(path = %path.display(), rows = frame.height(), "wrote section");
  Ok(frame.height())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn minimum_at_one_one() {
    assert_eq!(rosenbrock(&[1.0, 1.0]), 0.0);
    assert_eq!(rosenbrock(&[0.0, 0.0]), 1.0);
  }

  #[test]
  fn section_ends_match_plot_window() {
    let frame = section(100).unwrap();
    assert_eq!(frame.height(), 101);

    let f = frame.column("f").unwrap().as_materialized_series().f64().unwrap().clone();
    assert_eq!(f.get(0), Some(909.0));
    assert_eq!(f.get(100), Some(901.0));
    assert!(f.get(75).unwrap().abs() < 1e-9);
  }

  #[test]
  fn one_sample_spans_section() {
    let frame = section(1).unwrap();
    let x0 = frame.column("x0").unwrap().as_materialized_series().f64().unwrap().clone();
    assert_eq!(frame.height(), 2);
    assert_eq!(x0.get(0), Some(-2.0));
    assert_eq!(x0.get(1), Some(2.0));
  }

  #[test]
  fn zero_samples_is_an_error() {
    assert!(matches!(section(0), Err(Error::NoSamples)));
  }

  #[test]
  fn zero_samples_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.txt");

    assert!(matches!(write_section(&path, 0), Err(Error::NoSamples)));
    assert!(!path.exists());
  }
}

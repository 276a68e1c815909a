use std::{io::Cursor, path::Path, sync::Arc};

use polars::prelude::*;

use crate::{Error, Result};

/// A headerless table of `f64` columns with no nulls.
pub struct Dataset {
  frame: DataFrame,
}

/// The first two columns of a [`Dataset`], plotted as x and y.
#[derive(Clone, Copy)]
pub struct XySeries<'a> {
  pub x: &'a Column,
  pub y: &'a Column,
}

impl Dataset {
  /// Reads comma-separated rows from `path`. Blank lines are skipped; every
  /// other line must hold the same number of fields, each a decimal number.
  /// The first bad line aborts the whole load. Reported rows are line numbers
  /// in the file.
  pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
      .map_err(|source| Error::FileOpen { path: path.to_path_buf(), source })?;

    let table = Table::scan(&text)?;
    if table.lines.is_empty() {
      return Err(Error::Empty { path: path.to_path_buf() });
    }

    // Every field is read as text so numbers are only accepted through the
    // cast below; inferred booleans would otherwise pass as 0 and 1.
    let schema = Schema::from_iter(
      (1..=table.width).map(|i| (PlSmallStr::from(format!("column_{i}")), DataType::String)),
    );
    let options = CsvReadOptions::default()
      .with_has_header(false)
      .with_schema(Some(Arc::new(schema)));
    let frame = CsvReader::new(Cursor::new(table.body.into_bytes()))
      .with_options(options)
      .finish()
      .map_err(|source| Error::Csv { path: path.to_path_buf(), source })?;

    let dataset = Dataset::validate(frame, |i| table.lines.get(i).copied().unwrap_or(i + 1))?;
    tracing::debug!(
      path = %path.display(),
      rows = dataset.rows(),
      columns = dataset.columns(),
      skipped = table.blank,
      "loaded dataset"
    );
    Ok(dataset)
  }

  /// Casts every column of `frame` to `f64`, rejecting anything that doesn't
  /// survive the cast.
  pub fn from_frame(frame: DataFrame) -> Result<Dataset> { Dataset::validate(frame, |i| i + 1) }

  /// `line` maps a frame row index to the 1-based row reported in errors.
  fn validate(frame: DataFrame, line: impl Fn(usize) -> usize) -> Result<Dataset> {
    let mut columns = Vec::with_capacity(frame.width());

    for (i, column) in frame.get_columns().iter().enumerate() {
      if column.dtype() == &DataType::Boolean {
        let row = column.as_materialized_series().bool()?.iter().position(|v| v.is_some());
        return Err(Error::MalformedRow { row: line(row.unwrap_or(0)), column: i + 1 });
      }

      let cast = column.cast(&DataType::Float64)?;
      if cast.null_count() > 0 {
        let row = cast.as_materialized_series().f64()?.iter().position(|v| v.is_none());
        return Err(Error::MalformedRow { row: line(row.unwrap_or(0)), column: i + 1 });
      }
      columns.push(cast);
    }

    Ok(Dataset { frame: DataFrame::new(columns)? })
  }

  pub fn rows(&self) -> usize { self.frame.height() }
  pub fn columns(&self) -> usize { self.frame.width() }

  pub fn extract_columns(&self) -> Result<XySeries<'_>> {
    match self.frame.get_columns() {
      [x, y, ..] => Ok(XySeries { x, y }),
      columns => Err(Error::InsufficientColumns { found: columns.len() }),
    }
  }
}

impl XySeries<'_> {
  pub fn len(&self) -> usize { self.x.len() }
  pub fn is_empty(&self) -> bool { self.x.len() == 0 }

  pub fn x_values(&self) -> Result<Vec<f64>> { values(self.x) }
  pub fn y_values(&self) -> Result<Vec<f64>> { values(self.y) }
}

fn values(column: &Column) -> Result<Vec<f64>> {
  Ok(column.as_materialized_series().f64()?.into_no_null_iter().collect())
}

/// The non-blank lines of a file, checked for a consistent field count.
struct Table {
  body:  String,
  /// 1-based file line of each kept row.
  lines: Vec<usize>,
  width: usize,
  blank: usize,
}

impl Table {
  fn scan(text: &str) -> Result<Table> {
    let mut table = Table { body: String::new(), lines: vec![], width: 0, blank: 0 };

    for (i, line) in text.lines().enumerate() {
      if line.trim().is_empty() {
        table.blank += 1;
        continue;
      }

      let fields: Vec<&str> = line.split(',').map(str::trim).collect();
      let found = fields.len();
      if table.lines.is_empty() {
        table.width = found;
      } else if found != table.width {
        return Err(Error::RaggedRow { row: i + 1, expected: table.width, found });
      }

      table.body.push_str(&fields.join(","));
      table.body.push('\n');
      table.lines.push(i + 1);
    }

    Ok(table)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn casts_integer_columns() {
    let frame = df! {
      "a" => &[-1i64, 0, 1],
      "b" => &[4i64, 9, 16],
    }
    .unwrap();

    let dataset = Dataset::from_frame(frame).unwrap();
    let series = dataset.extract_columns().unwrap();

    assert_eq!(series.x_values().unwrap(), vec![-1.0, 0.0, 1.0]);
    assert_eq!(series.y_values().unwrap(), vec![4.0, 9.0, 16.0]);
  }

  #[test]
  fn reports_first_non_numeric_field() {
    let frame = df! {
      "a" => &["1", "2", "3"],
      "b" => &["4", "x", "y"],
    }
    .unwrap();

    match Dataset::from_frame(frame) {
      Err(Error::MalformedRow { row, column }) => {
        assert_eq!(row, 2);
        assert_eq!(column, 2);
      }
      Err(e) => panic!("unexpected error: {e}"),
      Ok(_) => panic!("expected a malformed row"),
    }
  }

  #[test]
  fn rejects_boolean_columns() {
    let frame = df! {
      "a" => &[1.0, 2.0],
      "b" => &[true, false],
    }
    .unwrap();

    assert!(matches!(
      Dataset::from_frame(frame),
      Err(Error::MalformedRow { row: 1, column: 2 })
    ));
  }

  #[test]
  fn scan_skips_blank_lines() {
    let table = Table::scan("1,2\n\n  \n5, 6\n\n").unwrap();

    assert_eq!(table.body, "1,2\n5,6\n");
    assert_eq!(table.lines, vec![1, 4]);
    assert_eq!(table.width, 2);
    assert_eq!(table.blank, 3);
  }

  #[test]
  fn scan_reports_ragged_line() {
    assert!(matches!(
      Table::scan("1,2\n\n3,4,5\n"),
      Err(Error::RaggedRow { row: 3, expected: 2, found: 3 })
    ));
  }

  #[test]
  fn single_column_has_no_y() {
    let frame = df! { "a" => &[5.0] }.unwrap();
    let dataset = Dataset::from_frame(frame).unwrap();

    assert!(matches!(dataset.extract_columns(), Err(Error::InsufficientColumns { found: 1 })));
  }

  #[test]
  fn extra_columns_are_ignored() {
    let frame = df! {
      "a" => &[1.0, 2.0],
      "b" => &[3.0, 4.0],
      "c" => &[5.0, 6.0],
    }
    .unwrap();
    let dataset = Dataset::from_frame(frame).unwrap();
    let series = dataset.extract_columns().unwrap();

    assert_eq!(dataset.columns(), 3);
    assert_eq!(series.len(), 2);
    assert!(!series.is_empty());
    assert_eq!(series.y_values().unwrap(), vec![3.0, 4.0]);
  }
}

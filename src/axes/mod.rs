mod line;

pub use line::LineAxes;

use polars::prelude::*;

use crate::{Label, Plot, Range};

/// Title and optional fixed limits for one axis. Limits left unset are
/// derived from the data.
#[derive(Default)]
pub struct Axis {
  title: Option<Label>,
  min:   Option<f64>,
  max:   Option<f64>,
}

impl Axis {
  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(Label::new(title));
    self
  }

  pub fn min(&mut self, min: f64) -> &mut Self {
    self.min = Some(min);
    self
  }

  pub fn max(&mut self, max: f64) -> &mut Self {
    self.max = Some(max);
    self
  }

  pub fn range(&mut self, min: f64, max: f64) -> &mut Self { self.min(min).max(max) }

  pub fn label(&self) -> Option<&Label> { self.title.as_ref() }

  /// Applies the fixed limits on top of `data`. A data range of zero width is
  /// widened so the transform stays finite.
  pub(crate) fn resolve(&self, data: Range) -> Range {
    let data = if data.size() == 0.0 { data.expand(0.5) } else { data.expand_by(0.1) };
    Range::new(self.min.unwrap_or(data.min), self.max.unwrap_or(data.max))
  }

  pub(crate) fn is_fixed(&self) -> bool { self.min.is_some() && self.max.is_some() }
}

impl<'a> Plot<'a> {
  pub fn line(&mut self, x: &'a Column, y: &'a Column) -> &mut LineAxes<'a> {
    self.lines.push(LineAxes::new(x, y));
    let index = self.lines.len() - 1;
    &mut self.lines[index]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fixed_limits_win() {
    let mut axis = Axis::default();
    axis.range(-2.0, 2.0);
    assert_eq!(axis.resolve(Range::new(-10.0, 10.0)), Range::new(-2.0, 2.0));
    assert!(axis.is_fixed());
  }

  #[test]
  fn open_end_gets_margin() {
    let mut axis = Axis::default();
    axis.min(0.0);
    assert_eq!(axis.resolve(Range::new(0.0, 10.0)), Range::new(0.0, 11.0));
    assert!(!axis.is_fixed());
  }

  #[test]
  fn flat_data_is_widened() {
    let axis = Axis::default();
    assert_eq!(axis.resolve(Range::new(3.0, 3.0)), Range::new(2.5, 3.5));
  }
}

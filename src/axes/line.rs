use kurbo::{Affine, BezPath, Point, Stroke};
use polars::prelude::*;

use crate::{Bounds, Range, render::Render, theme};

pub struct LineAxes<'a> {
  x: &'a Column,
  y: &'a Column,
}

impl<'a> LineAxes<'a> {
  pub(crate) fn new(x: &'a Column, y: &'a Column) -> Self { LineAxes { x, y } }

  pub(crate) fn data_bounds(&self) -> PolarsResult<Bounds> {
    Ok(Bounds::new(Range::from_column(self.x)?, Range::from_column(self.y)?))
  }

  /// Data points in row order. Rows where either value is null are skipped.
  pub(crate) fn points(&self) -> PolarsResult<Vec<Point>> {
    let x = self.x.cast(&DataType::Float64)?;
    let y = self.y.cast(&DataType::Float64)?;

    Ok(
      x.as_materialized_series()
        .f64()?
        .iter()
        .zip(y.as_materialized_series().f64()?.iter())
        .filter_map(|(x, y)| Some(Point::new(x?, y?)))
        .collect(),
    )
  }

  /// Strokes the series as one connected path. `index` and `count` pick the
  /// palette color.
  pub(crate) fn draw(
    &self,
    render: &mut Render,
    transform: Affine,
    index: usize,
    count: usize,
  ) -> PolarsResult<()> {
    let mut shape = BezPath::new();

    for (i, point) in self.points()?.into_iter().map(|p| transform * p).enumerate() {
      if i == 0 {
        shape.move_to(point);
      } else {
        shape.line_to(point);
      }
    }

    let color = theme::SERIES.brush(index, count);
    render.stroke(&shape, Affine::IDENTITY, &color, &Stroke::new(2.0));
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn points_follow_row_order() {
    let x = Column::new("x".into(), &[1.0, -1.0, 0.0]);
    let y = Column::new("y".into(), &[1.0, 1.0, 0.0]);
    let line = LineAxes::new(&x, &y);

    assert_eq!(
      line.points().unwrap(),
      vec![Point::new(1.0, 1.0), Point::new(-1.0, 1.0), Point::new(0.0, 0.0)]
    );
  }

  #[test]
  fn draw_strokes_into_scene() {
    let x = Column::new("x".into(), &[-2.0, 0.0, 2.0]);
    let y = Column::new("y".into(), &[909.0, 101.0, 901.0]);
    let line = LineAxes::new(&x, &y);

    let mut render = Render::new();
    assert!(render.scene.encoding().is_empty());
    line.draw(&mut render, Affine::IDENTITY, 0, 1).unwrap();
    assert!(!render.scene.encoding().is_empty());
  }

  #[test]
  fn bounds_span_the_data() {
    let x = Column::new("x".into(), &[-1.0, 0.0, 1.0]);
    let y = Column::new("y".into(), &[4.0, 9.0, 16.0]);
    let line = LineAxes::new(&x, &y);

    let bounds = line.data_bounds().unwrap();
    assert_eq!(bounds.x, Range::new(-1.0, 1.0));
    assert_eq!(bounds.y, Range::new(4.0, 16.0));
  }
}

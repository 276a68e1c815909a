use kurbo::{Affine, Cap, Line, Point, Rect, Stroke};
use parley::FontWeight;

pub use crate::{
  axes::{Axis, LineAxes},
  bounds::{Bounds, NiceTicksIter, Range},
  data::{Dataset, XySeries},
  error::{Error, Result, ResultExt},
  label::Label,
};
use crate::render::{Align, DrawText, Render};

mod axes;
mod bounds;
mod data;
mod error;
mod label;
mod render;
pub mod sample;
pub mod simplex;
mod theme;

/// Where the dataset is read from. The `sample` command writes here too.
pub const DEFAULT_DATA_PATH: &str = "output.txt";

#[derive(Default)]
pub struct Plot<'a> {
  title: Option<Label>,
  pub x: Axis,
  pub y: Axis,

  lines: Vec<LineAxes<'a>>,
}

impl<'a> Plot<'a> {
  pub fn new() -> Plot<'a> { Plot::default() }

  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(Label::new(title));
    self
  }

  /// The data window the plot is drawn in. Fixed axis limits are returned as
  /// given; open ends are fitted to the data.
  pub fn view_bounds(&self) -> Result<Bounds> {
    let mut data = Bounds::empty();
    if !(self.x.is_fixed() && self.y.is_fixed()) {
      for line in &self.lines {
        data = data.union(line.data_bounds()?);
      }
    }

    Ok(Bounds::new(self.x.resolve(data.x), self.y.resolve(data.y)))
  }
}

impl Plot<'_> {
  fn draw(&self, render: &mut Render, width: f64, height: f64) -> Result<()> {
    const TICKS: u32 = 10;

    let viewport = Bounds::new(Range::new(0.0, width), Range::new(height, 0.0)).shrink(80.0);
    let center = Point::new(width / 2.0, height / 2.0);

    if let Some(title) = &self.title {
      render.draw_text(DrawText {
        text: title.display(),
        size: 32.0,
        weight: FontWeight::BOLD,
        position: Point { x: center.x, y: viewport.y.max - 30.0 },
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    if let Some(x_label) = self.x.label() {
      render.draw_text(DrawText {
        text: x_label.display(),
        size: 24.0,
        position: Point { x: center.x, y: viewport.y.min + 40.0 },
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }

    if let Some(y_label) = self.y.label() {
      render.draw_text(DrawText {
        text: y_label.display(),
        size: 24.0,
        position: Point { x: viewport.x.min - 50.0, y: center.y },
        transform: Affine::rotate(-std::f64::consts::FRAC_PI_2),
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    let border_stroke = Stroke::new(2.0);
    let tick_stroke = border_stroke.clone().with_start_cap(Cap::Butt);
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.max, viewport.y.min),
      ),
      Affine::IDENTITY,
      theme::AXIS,
      &border_stroke,
    );
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.min, viewport.y.max),
      ),
      Affine::IDENTITY,
      theme::AXIS,
      &border_stroke,
    );

    let data_bounds = self.view_bounds()?;
    let transform = data_bounds.transform_to(viewport);

    let iter = data_bounds.y.nice_ticks(TICKS);
    let decimals = iter.precision().saturating_sub(3);
    for (y, vy) in iter
      .map(|v| (v, (transform * Point::new(0.0, v)).y))
      .filter(|(_, vy)| viewport.y.contains(vy))
    {
      render.stroke(
        &Line::new(Point::new(viewport.x.min, vy), Point::new(viewport.x.min - 10.0, vy)),
        Affine::IDENTITY,
        theme::AXIS,
        &tick_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{y:.decimals$}"),
        size: 12.0,
        position: Point { x: viewport.x.min - 15.0, y: vy },
        horizontal_align: Align::End,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    let iter = data_bounds.x.nice_ticks(TICKS);
    let decimals = iter.precision().saturating_sub(3);
    for (x, vx) in iter
      .map(|v| (v, (transform * Point::new(v, 0.0)).x))
      .filter(|(_, vx)| viewport.x.contains(vx))
    {
      render.stroke(
        &Line::new(Point::new(vx, viewport.y.min), Point::new(vx, viewport.y.min + 10.0)),
        Affine::IDENTITY,
        theme::AXIS,
        &tick_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{x:.decimals$}"),
        size: 12.0,
        position: Point { x: vx, y: viewport.y.min + 15.0 },
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }

    // Points outside the window stay in the path; the layer hides them.
    let clip = Rect::new(viewport.x.min, viewport.y.max, viewport.x.max, viewport.y.min);
    render.clipped(clip, |render| {
      for (i, line) in self.lines.iter().enumerate() {
        line.draw(render, transform, i, self.lines.len())?;
      }
      Ok(())
    })
  }
}

#[cfg(test)]
mod tests {
  use polars::prelude::Column;

  use super::*;

  fn configure<'a>(plot: &mut Plot<'a>, x: &'a Column, y: &'a Column) {
    plot.x.title("$x_{0}$").range(-2.0, 2.0);
    plot.y.title("y").range(0.0, 909.0);
    plot.line(x, y);
  }

  #[test]
  fn fixed_window_ignores_data() {
    let x = Column::new("x".into(), &[-10.0, 0.0, 10.0]);
    let y = Column::new("y".into(), &[-5.0, 2000.0, 3.0]);

    let mut plot = Plot::new();
    configure(&mut plot, &x, &y);

    let expected = Bounds::new(Range::new(-2.0, 2.0), Range::new(0.0, 909.0));
    assert_eq!(plot.view_bounds().unwrap(), expected);
    assert_eq!(plot.view_bounds().unwrap(), expected);
  }

  #[test]
  fn open_window_fits_data() {
    let x = Column::new("x".into(), &[0.0, 10.0]);
    let y = Column::new("y".into(), &[0.0, 100.0]);

    let mut plot = Plot::new();
    plot.line(&x, &y);

    let bounds = plot.view_bounds().unwrap();
    assert_eq!(bounds.x, Range::new(-1.0, 11.0));
    assert_eq!(bounds.y, Range::new(-10.0, 110.0));
  }

  #[test]
  fn labels_are_rendered_as_text() {
    let x = Column::new("x".into(), &[0.0]);
    let y = Column::new("y".into(), &[0.0]);

    let mut plot = Plot::new();
    configure(&mut plot, &x, &y);

    assert_eq!(plot.x.label().map(Label::display), Some("x₀"));
    assert_eq!(plot.y.label().map(Label::display), Some("y"));
  }
}

use color::{HueDirection, Oklch, OpaqueColor, Srgb};
use peniko::{Brush, Color};

pub struct LinearPalette {
  start: OpaqueColor<Oklch>,
  end:   OpaqueColor<Oklch>,
}

/// Line colors, sampled from the start for the first series.
pub const SERIES: LinearPalette =
  LinearPalette::new(OpaqueColor::new([0.66, 0.09, 255.0]), OpaqueColor::new([0.66, 0.13, 30.0]));

pub const TEXT: Color = Color::from_rgb8(32, 32, 32);
pub const AXIS: Color = Color::from_rgb8(128, 128, 128);
pub const BACKGROUND: Color = Color::WHITE;

impl LinearPalette {
  pub const fn new(start: OpaqueColor<Oklch>, end: OpaqueColor<Oklch>) -> Self {
    Self { start, end }
  }

  pub fn sample(&self, t: f32) -> OpaqueColor<Oklch> {
    let t = t.clamp(0.0, 1.0);
    self.start.lerp(self.end, t, HueDirection::Shorter)
  }

  /// Color for series `index` out of `count`.
  pub fn brush(&self, index: usize, count: usize) -> Brush {
    let t = if count > 1 { index as f32 / (count - 1) as f32 } else { 0.0 };
    Brush::Solid(self.sample(t).convert::<Srgb>().with_alpha(1.0))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sample_is_clamped() {
    assert_eq!(SERIES.sample(-1.0).components, SERIES.sample(0.0).components);
    assert_eq!(SERIES.sample(2.0).components, SERIES.sample(1.0).components);
  }

  #[test]
  fn single_series_uses_palette_start() {
    let Brush::Solid(color) = SERIES.brush(0, 1) else { panic!("expected a solid brush") };
    let start = SERIES.sample(0.0).convert::<Srgb>().with_alpha(1.0);
    assert_eq!(color.components, start.components);
  }
}

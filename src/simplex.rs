//! Nelder-Mead downhill simplex minimisation.
//!
//! An `N`-dimensional simplex has `N + 1` vertices. Each iteration moves the
//! highest vertex by reflecting it through the centroid of the others, then
//! expanding, contracting, or shrinking the whole simplex toward the lowest
//! vertex depending on how the reflected point compares.

use crate::{Error, Result};

#[derive(Clone, Copy, Debug)]
pub struct Options {
  /// Stop once the deviation of the vertex values drops below this.
  pub tolerance:      f64,
  pub max_iterations: usize,
}

impl Default for Options {
  fn default() -> Self { Options { tolerance: 1e-8, max_iterations: 1000 } }
}

pub struct Simplex<const N: usize, F> {
  f:        F,
  vertices: Vec<[f64; N]>,
  values:   Vec<f64>,
}

#[derive(Clone, Debug)]
pub struct Minimum<const N: usize> {
  pub vertices:   Vec<[f64; N]>,
  pub values:     Vec<f64>,
  pub deviation:  f64,
  pub iterations: usize,
  /// False when the iteration cap was hit first.
  pub converged:  bool,
}

impl<const N: usize, F: Fn(&[f64; N]) -> f64> Simplex<N, F> {
  pub fn new(f: F, vertices: impl IntoIterator<Item = [f64; N]>) -> Result<Self> {
    let vertices: Vec<_> = vertices.into_iter().collect();
    if vertices.len() != N + 1 {
      return Err(Error::VertexCount { expected: N + 1, found: vertices.len() });
    }

    let values = vertices.iter().map(&f).collect();
    Ok(Simplex { f, vertices, values })
  }

  pub fn vertices(&self) -> &[[f64; N]] { &self.vertices }
  pub fn values(&self) -> &[f64] { &self.values }

  pub fn minimize(mut self, options: Options) -> Minimum<N> {
    let mut iterations = 0;

    loop {
      let centroid = self.step();
      let deviation = self.deviation(&centroid);
      iterations += 1;

      let converged = deviation < options.tolerance;
      if converged || iterations >= options.max_iterations {
        tracing::debug!(iterations, deviation, converged, "simplex finished");
        return Minimum {
          vertices: self.vertices,
          values: self.values,
          deviation,
          iterations,
          converged,
        };
      }
    }
  }

  /// Runs one iteration and returns the centroid it reflected through.
  pub fn step(&mut self) -> [f64; N] {
    let (h, l) = self.extremes();
    let centroid = self.centroid(h);

    let reflected = combine(&centroid, 2.0, &self.vertices[h], -1.0);
    let y_reflected = (self.f)(&reflected);

    if y_reflected < self.values[l] {
      let expanded = combine(&reflected, 2.0, &centroid, -1.0);
      let y_expanded = (self.f)(&expanded);

      if y_expanded < self.values[l] {
        self.replace(h, expanded, y_expanded);
      } else {
        self.replace(h, reflected, y_reflected);
      }
    } else if (0..=N).all(|i| i == h || y_reflected > self.values[i]) {
      if y_reflected <= self.values[h] {
        self.replace(h, reflected, y_reflected);
      }

      let contracted = combine(&self.vertices[h], 0.5, &centroid, 0.5);
      let y_contracted = (self.f)(&contracted);

      if y_contracted > self.values[h] {
        self.shrink(l);
      } else {
        self.replace(h, contracted, y_contracted);
      }
    } else {
      self.replace(h, reflected, y_reflected);
    }

    centroid
  }

  /// Indices of the highest and lowest vertices. Ties go to the first.
  fn extremes(&self) -> (usize, usize) {
    let mut h = 0;
    let mut l = 0;
    for (i, &y) in self.values.iter().enumerate() {
      if y > self.values[h] {
        h = i;
      }
      if y < self.values[l] {
        l = i;
      }
    }
    (h, l)
  }

  /// Centroid of every vertex except `skip`.
  fn centroid(&self, skip: usize) -> [f64; N] {
    let mut centroid = [0.0; N];
    for (_, vertex) in self.vertices.iter().enumerate().filter(|(i, _)| *i != skip) {
      for (c, v) in centroid.iter_mut().zip(vertex) {
        *c += v / N as f64;
      }
    }
    centroid
  }

  fn replace(&mut self, i: usize, vertex: [f64; N], value: f64) {
    self.vertices[i] = vertex;
    self.values[i] = value;
  }

  /// Moves every vertex halfway toward vertex `l`.
  fn shrink(&mut self, l: usize) {
    let lowest = self.vertices[l];
    for i in (0..=N).filter(|&i| i != l) {
      let vertex = combine(&self.vertices[i], 0.5, &lowest, 0.5);
      let value = (self.f)(&vertex);
      self.replace(i, vertex, value);
    }
  }

  /// Root mean square distance of the vertex values from the value at
  /// `centroid`.
  fn deviation(&self, centroid: &[f64; N]) -> f64 {
    let mean = (self.f)(centroid);
    (self.values.iter().map(|y| (y - mean).powi(2)).sum::<f64>() / N as f64).sqrt()
  }
}

impl<const N: usize> Minimum<N> {
  /// The lowest vertex and its value.
  pub fn best(&self) -> ([f64; N], f64) {
    let mut best = 0;
    for (i, &y) in self.values.iter().enumerate() {
      if y < self.values[best] {
        best = i;
      }
    }
    (self.vertices[best], self.values[best])
  }
}

/// `a * wa + b * wb`, component-wise.
fn combine<const N: usize>(a: &[f64; N], wa: f64, b: &[f64; N], wb: f64) -> [f64; N] {
  std::array::from_fn(|i| a[i] * wa + b[i] * wb)
}

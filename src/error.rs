use std::path::PathBuf;

use polars::error::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  /// The dataset file could not be opened.
  #[error("failed to open {}", path.display())]
  FileOpen {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The CSV reader rejected the file as a whole.
  #[error("failed to parse {}", path.display())]
  Csv {
    path:   PathBuf,
    #[source]
    source: PolarsError,
  },

  /// A field is missing or is not a decimal number. Both indices are 1-based.
  #[error("row {row}: field {column} is not a number")]
  MalformedRow { row: usize, column: usize },

  /// A row has a different number of fields than the first row. 1-based.
  #[error("row {row}: expected {expected} fields, found {found}")]
  RaggedRow { row: usize, expected: usize, found: usize },

  #[error("{} has no data rows", path.display())]
  Empty { path: PathBuf },

  #[error("expected at least 2 columns, found {found}")]
  InsufficientColumns { found: usize },

  #[error("a section needs at least one sample")]
  NoSamples,

  #[error("a simplex needs {expected} vertices, got {found}")]
  VertexCount { expected: usize, found: usize },

  #[error(transparent)]
  Polars(#[from] PolarsError),

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error("window error: {0}")]
  Window(String),

  #[error("gpu error: {0}")]
  Gpu(String),
}

impl From<winit::error::EventLoopError> for Error {
  fn from(err: winit::error::EventLoopError) -> Self { Error::Window(err.to_string()) }
}

impl From<winit::error::OsError> for Error {
  fn from(err: winit::error::OsError) -> Self { Error::Window(err.to_string()) }
}

impl From<vello::Error> for Error {
  fn from(err: vello::Error) -> Self { Error::Gpu(err.to_string()) }
}

impl From<vello::wgpu::CreateSurfaceError> for Error {
  fn from(err: vello::wgpu::CreateSurfaceError) -> Self { Error::Gpu(err.to_string()) }
}

impl From<vello::wgpu::RequestAdapterError> for Error {
  fn from(err: vello::wgpu::RequestAdapterError) -> Self { Error::Gpu(err.to_string()) }
}

impl From<vello::wgpu::RequestDeviceError> for Error {
  fn from(err: vello::wgpu::RequestDeviceError) -> Self { Error::Gpu(err.to_string()) }
}

/// Logs and discards errors where there is no caller to hand them to.
pub trait ResultExt<T> {
  fn log_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
  fn log_err(self) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::warn!("{e}");
        None
      }
    }
  }
}

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rosenplot::{
  DEFAULT_DATA_PATH, Dataset, Plot,
  sample::{self, rosenbrock},
  simplex::{Options, Simplex},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rosenplot")]
#[command(about = "Plots a section of the Rosenbrock function", long_about = None)]
struct Args {
  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show the dataset in a window (the default)
  Plot,

  /// Sample F(x0, 1) over x0 in [-2, 2] and write it as CSV
  Sample {
    /// Number of intervals; one more row than this is written
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    samples: u32,

    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    output: PathBuf,
  },

  /// Minimise F with the downhill simplex method from (0,0), (2,0), (0,2)
  Minimize {
    #[arg(long, default_value_t = 1e-8)]
    tolerance: f64,

    #[arg(long, default_value_t = 1000)]
    max_iterations: usize,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  match Args::parse().command.unwrap_or(Command::Plot) {
    Command::Plot => plot(),
    Command::Sample { samples, output } => {
      let rows = sample::write_section(&output, samples as usize)?;
      println!("Wrote {rows} rows to {}", output.display());
      Ok(())
    }
    Command::Minimize { tolerance, max_iterations } => {
      minimize(Options { tolerance, max_iterations })
    }
  }
}

fn plot() -> Result<()> {
  let dataset = Dataset::load(DEFAULT_DATA_PATH)?;
  let series = dataset.extract_columns()?;

  let mut plot = Plot::new();
  plot.x.title("$x_{0}$").range(-2.0, 2.0);
  plot.y.title("y").range(0.0, 909.0);
  plot.line(series.x, series.y);

  plot.show()?;
  Ok(())
}

fn minimize(options: Options) -> Result<()> {
  let start = [[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]];
  let minimum = Simplex::new(rosenbrock, start)?.minimize(options);

  if minimum.converged {
    println!("Minimum reached.");
  } else {
    println!("Max iterations ({}) reached.", options.max_iterations);
  }
  for (i, (p, y)) in minimum.vertices.iter().zip(&minimum.values).enumerate() {
    println!("p{i} F({:.6}, {:.6}) = {y:e}", p[0], p[1]);
  }
  println!("Standard deviation: {:e}", minimum.deviation);
  println!("Iterations taken: {}", minimum.iterations);

  Ok(())
}

//! khull CLI - concave hull reconstruction for 2D point files.
//!
//! Reads point clouds from plain `x y` text or JSON arrays, reconstructs
//! the enclosing concave hull, and writes the polygon back out.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use khull::{concave_hull, HullSettings};
use khull_cloud::{purify, PointCloud};
use khull_math::{Point2, Tolerance};

mod io;

#[derive(Parser)]
#[command(name = "khull")]
#[command(about = "K-nearest-neighbors concave hull reconstruction", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct the concave hull of a point file
    Hull {
        /// Input point file (`x y` lines or a JSON array of [x, y] pairs)
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Number of nearest neighbors to consult at each step
        #[arg(short = 'k', long, default_value_t = 5)]
        neighbors: usize,
        /// Linear tolerance for collapsing coincident points
        #[arg(long, default_value_t = Tolerance::DEFAULT.linear)]
        tolerance: f64,
        /// Iteration ceiling (0 = unlimited)
        #[arg(long, default_value_t = 0)]
        max_iterations: usize,
        /// Emit a JSON array instead of plain `x y` lines
        #[arg(long)]
        json: bool,
    },
    /// Remove near-duplicate points from a point file
    Purify {
        /// Input point file
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Linear tolerance below which points coincide
        #[arg(long, default_value_t = Tolerance::DEFAULT.linear)]
        tolerance: f64,
        /// Emit a JSON array instead of plain `x y` lines
        #[arg(long)]
        json: bool,
    },
    /// Display information about a point file
    Info {
        /// Input point file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "khull=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hull {
            input,
            output,
            neighbors,
            tolerance,
            max_iterations,
            json,
        } => {
            let points = read_points(&input)?;
            let cloud = PointCloud::from_points(&points);
            let settings = HullSettings {
                neighbors,
                tolerance,
                max_iterations,
            };
            let hull = concave_hull(&cloud, &settings)
                .with_context(|| format!("hull reconstruction failed for {}", input.display()))?;
            let text = if json {
                io::format_json(&hull.points)?
            } else {
                io::format_xy(&hull.points)
            };
            write_output(output.as_deref(), &text)?;
        }
        Commands::Purify {
            input,
            output,
            tolerance,
            json,
        } => {
            let points = read_points(&input)?;
            let cloud = PointCloud::from_points(&points);
            let purified = purify(&cloud, tolerance);
            let coords: Vec<Point2> = purified.coords().copied().collect();
            let text = if json {
                io::format_json(&coords)?
            } else {
                io::format_xy(&coords)
            };
            write_output(output.as_deref(), &text)?;
        }
        Commands::Info { input } => {
            let points = read_points(&input)?;
            let cloud = PointCloud::from_points(&points);
            println!("points: {}", cloud.len());
            match cloud.bounds() {
                Some(b) => {
                    println!("bounds: [{}, {}] x [{}, {}]", b.min.x, b.max.x, b.min.y, b.max.y);
                    println!("extent: {} x {}", b.width(), b.height());
                }
                None => println!("bounds: none"),
            }
        }
    }

    Ok(())
}

fn read_points(path: &Path) -> Result<Vec<Point2>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    io::parse_points(&text)
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, text).with_context(|| format!("writing {}", p.display()))?
        }
        None => print!("{text}"),
    }
    Ok(())
}

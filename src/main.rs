use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use std::ffi::OsString;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use radius_check::{classify_file, Coordinate, ReferencePoint};

const USAGE_HINT: &str = "Please provide valid initial latitude, initial longitude, and radius.";

// Flags that may also be spelled with a single dash, e.g. `-lat 40.7`.
const LONG_FLAGS: &[&str] = &["lat", "lon", "radius", "file", "help"];

#[derive(Parser, Debug)]
#[command(name = "radius-check")]
#[command(about = "Report which coordinates in a file lie within a radius of a reference point.", long_about = None)]
struct Cli {
    /// Reference latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Reference longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Radius in kilometers
    #[arg(long, allow_negative_numbers = true)]
    radius: Option<f64>,

    /// Path to a file with one "<latitude> <longitude>" pair per line
    #[arg(long, default_value = "coordinates.txt")]
    file: PathBuf,
}

impl Cli {
    fn reference(&self) -> Option<ReferencePoint> {
        let (lat, lon, radius) = (self.lat?, self.lon?, self.radius?);
        Some(ReferencePoint::new(Coordinate::new(lat, lon), radius))
    }
}

/// Rewrites `-lat`, `-radius=5` and friends into their `--` form so clap
/// accepts the single-dash spelling too. Stops at a bare `--`.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    let mut rewriting = true;
    args.into_iter()
        .map(|arg| {
            if !rewriting {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                rewriting = false;
                return arg;
            }
            match s.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split('=').next().unwrap_or(rest);
                    if LONG_FLAGS.contains(&name) {
                        OsString::from(format!("-{}", s))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let Some(reference) = cli.reference() else {
        writeln!(out, "{}", USAGE_HINT)?;
        return Ok(());
    };

    if reference.radius_km < 0.0 {
        warn!(
            "radius {} km is negative; every coordinate will be outside",
            reference.radius_km
        );
    }

    classify_file(&cli.file, &reference, out)
        .with_context(|| format!("writing results for {}", cli.file.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(&cli, &mut out)?;
    out.flush().context("flushing stdout")?;

    Ok(())
}

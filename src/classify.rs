use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use crate::geo::Coordinate;

/// Why a single input line was skipped.
#[derive(Debug, Error, PartialEq)]
pub enum LineError {
    #[error("Invalid format: {0}")]
    Format(String),
    #[error("Invalid latitude: {0}")]
    Latitude(String),
    #[error("Invalid longitude: {0}")]
    Longitude(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Within,
    Outside,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Within => f.write_str("within"),
            Verdict::Outside => f.write_str("outside"),
        }
    }
}

/// Center of the search circle and its radius in kilometers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReferencePoint {
    pub center: Coordinate,
    pub radius_km: f64,
}

impl ReferencePoint {
    pub fn new(center: Coordinate, radius_km: f64) -> Self {
        Self { center, radius_km }
    }

    /// Distance from the center, and whether that is inside the (closed) circle.
    pub fn classify(&self, point: &Coordinate) -> (Verdict, f64) {
        let distance = self.center.distance_km(point);
        let verdict = if distance <= self.radius_km {
            Verdict::Within
        } else {
            Verdict::Outside
        };
        (verdict, distance)
    }
}

/// Parses one field as `f64`. Out-of-range literals such as `1e400` are
/// rejected; only an explicit `inf`/`infinity`/`nan` may yield a non-finite
/// value.
fn parse_degrees(field: &str) -> Option<f64> {
    let value = field.parse::<f64>().ok()?;
    if value.is_finite() {
        return Some(value);
    }
    let word = field.trim_start_matches(['+', '-']).to_ascii_lowercase();
    match word.as_str() {
        "inf" | "infinity" | "nan" => Some(value),
        _ => None,
    }
}

/// Parses a line of the form `<latitude> <longitude>`.
pub fn parse_line(line: &str) -> Result<Coordinate, LineError> {
    let mut fields = line.split_whitespace();
    let (lat, lon) = match (fields.next(), fields.next(), fields.next()) {
        (Some(lat), Some(lon), None) => (lat, lon),
        _ => return Err(LineError::Format(line.to_string())),
    };

    let latitude = parse_degrees(lat).ok_or_else(|| LineError::Latitude(lat.to_string()))?;
    let longitude = parse_degrees(lon).ok_or_else(|| LineError::Longitude(lon.to_string()))?;

    Ok(Coordinate::new(latitude, longitude))
}

/// Classifies every line of `reader` against `reference`, writing one line
/// of output per input line.
///
/// Lines are split on `\n` as raw bytes and decoded lossily, so bytes that
/// are not UTF-8 end up in an ordinary per-line diagnostic. A read error
/// ends the loop and is reported once afterwards. Only failures writing to
/// `out` are returned.
pub fn classify_stream<R: BufRead, W: Write>(
    reader: R,
    reference: &ReferencePoint,
    out: &mut W,
) -> io::Result<()> {
    let (mut within, mut outside, mut rejected) = (0usize, 0usize, 0usize);
    let mut read_error = None;

    for (line_no, raw) in reader.split(b'\n').enumerate() {
        let mut raw = match raw {
            Ok(raw) => raw,
            Err(err) => {
                read_error = Some(err);
                break;
            }
        };
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        let line = String::from_utf8_lossy(&raw);

        let point = match parse_line(&line) {
            Ok(point) => point,
            Err(err) => {
                debug!("line {}: {}", line_no + 1, err);
                rejected += 1;
                writeln!(out, "{}", err)?;
                continue;
            }
        };

        let (verdict, distance) = reference.classify(&point);
        debug!("line {}: {} is {:.3} km away", line_no + 1, point, distance);
        match verdict {
            Verdict::Within => within += 1,
            Verdict::Outside => outside += 1,
        }
        writeln!(out, "Coordinates {} are {} the radius.", point, verdict)?;
    }

    info!("{} within, {} outside, {} rejected", within, outside, rejected);

    if let Some(err) = read_error {
        writeln!(out, "Error reading file: {}", err)?;
    }

    Ok(())
}

/// Opens `path` and runs [`classify_stream`] over it.
///
/// A file that cannot be opened is reported on `out` and nothing is read.
pub fn classify_file<W: Write>(
    path: &Path,
    reference: &ReferencePoint,
    out: &mut W,
) -> io::Result<()> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            debug!("could not open {}: {}", path.display(), err);
            return writeln!(out, "Error opening file: {}: {}", path.display(), err);
        }
    };

    info!(
        "classifying {} against {} with radius {} km",
        path.display(),
        reference.center,
        reference.radius_km
    );
    classify_stream(BufReader::new(file), reference, out)
}

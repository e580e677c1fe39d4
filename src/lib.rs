//! Haversine distance and a line-oriented "is it inside the radius?" classifier.

pub mod classify;
pub mod geo;

pub use crate::classify::{classify_file, classify_stream, ReferencePoint, Verdict};
pub use crate::geo::{haversine_km, Coordinate};

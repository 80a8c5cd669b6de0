//! The coordinate/length recomputation boundary.
//!
//! Breaking an edge moves one of its endpoints; the modifier asks a
//! [`LengthService`] for the lengths of the two resulting edges instead of
//! assuming a particular coordinate reference system.

/// Recomputes an edge length from its endpoint positions.
pub trait LengthService {
    fn length(&self, from: [f64; 2], to: [f64; 2]) -> f64;
}

/// Planar straight-line length.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanLength;

impl LengthService for EuclideanLength {
    fn length(&self, from: [f64; 2], to: [f64; 2]) -> f64 {
        let dx = to[0] - from[0];
        let dy = to[1] - from[1];
        (dx * dx + dy * dy).sqrt()
    }
}

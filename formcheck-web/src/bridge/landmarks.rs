//! Landmark decoding for the JS bridge
//!
//! JavaScript hands over MediaPipe results as a flat Float32Array of
//! x, y, z triples (99 values for the 33 pose landmarks).

use crate::form::Landmark;

/// Floats per landmark in the flat array (x, y, z)
pub const LANDMARK_STRIDE: usize = 3;

/// Decode a flat `[x0, y0, z0, x1, ...]` array into landmarks
///
/// Returns `None` when the length is not a whole number of triples.
/// Fewer than 33 landmarks is allowed here; the adapter decides whether
/// the joints it needs are present.
pub fn parse_landmarks(data: &[f32]) -> Option<Vec<Landmark>> {
    if data.len() % LANDMARK_STRIDE != 0 {
        return None;
    }

    Some(
        data.chunks_exact(LANDMARK_STRIDE)
            .map(|xyz| Landmark::new(xyz[0], xyz[1], xyz[2]))
            .collect(),
    )
}

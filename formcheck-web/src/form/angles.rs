//! Joint angle calculation using atan2
//!
//! Calculates the angle at a vertex joint from the two rays
//! vertex→start and vertex→end (e.g. hip→shoulder and hip→knee).

use super::landmarks::PosePoint;

/// Direction vectors shorter than this are treated as undefined
const MIN_RAY_LENGTH: f32 = 1e-6;

/// Calculate the angle at `vertex` in degrees, folded into [0, 180]
///
/// Uses the difference of the two ray headings:
/// θ = |atan2(end - vertex) - atan2(start - vertex)|, reflected as
/// `360 - θ` when above 180°.
///
/// Returns `None` when either ray is degenerate (endpoint coincides with
/// the vertex) or a coordinate is not finite.
pub fn calculate_angle(start: PosePoint, vertex: PosePoint, end: PosePoint) -> Option<f32> {
    if !(start.is_finite() && vertex.is_finite() && end.is_finite()) {
        return None;
    }

    let v1 = (start.x - vertex.x, start.y - vertex.y);
    let v2 = (end.x - vertex.x, end.y - vertex.y);

    if v1.0.hypot(v1.1) < MIN_RAY_LENGTH || v2.0.hypot(v2.1) < MIN_RAY_LENGTH {
        return None;
    }

    let radians = v2.1.atan2(v2.0) - v1.1.atan2(v1.0);
    let mut angle = radians.to_degrees().abs();

    if angle > 180.0 {
        angle = 360.0 - angle;
    }

    Some(angle)
}

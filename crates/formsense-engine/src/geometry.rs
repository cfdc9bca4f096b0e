//! Joint angle calculation from 2D keypoint positions.
//!
//! The angle at a joint vertex is computed from the dot product of the two
//! displacement vectors along the adjacent body segments.

use formsense_core::GeometryError;

/// Calculates the angle at vertex `b` between ray `b→a` and ray `b→c`.
///
/// Uses the dot product formula `cos(θ) = (v1 · v2) / (|v1| × |v2|)` with the
/// quotient clamped into the valid acos domain, and returns the angle in
/// degrees in the range [0°, 180°]: 180° means the two segments are fully
/// extended in a straight line, small angles mean a tight bend.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateSegment`] when either displacement
/// vector has zero magnitude (coincident points); the angle is undefined in
/// that case.
pub fn joint_angle(
    a: (f32, f32),
    b: (f32, f32),
    c: (f32, f32),
) -> Result<f32, GeometryError> {
    // Displacement vectors from the vertex toward each adjacent point.
    let ba = (a.0 - b.0, a.1 - b.1);
    let bc = (c.0 - b.0, c.1 - b.1);

    let dot = ba.0 * bc.0 + ba.1 * bc.1;
    let mag_ba = (ba.0 * ba.0 + ba.1 * ba.1).sqrt();
    let mag_bc = (bc.0 * bc.0 + bc.1 * bc.1).sqrt();

    if mag_ba <= f32::EPSILON || mag_bc <= f32::EPSILON {
        return Err(GeometryError::DegenerateSegment);
    }

    let cos_angle = (dot / (mag_ba * mag_bc)).clamp(-1.0, 1.0);
    Ok(cos_angle.acos().to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_angle() {
        // Vertex above `a`, `c` off to the side: a right angle at the knee.
        let angle = joint_angle((0.0, 0.0), (0.0, 1.0), (1.0, 1.0)).unwrap();
        assert!((angle - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_straight_segments() {
        // Collinear points with the vertex in the middle: fully extended.
        let angle = joint_angle((0.0, 0.0), (1.0, 0.0), (2.0, 0.0)).unwrap();
        assert!((angle - 180.0).abs() < 0.001);
    }

    #[test]
    fn test_folded_back() {
        // Both rays point the same way: fully folded.
        let angle = joint_angle((2.0, 0.0), (0.0, 0.0), (4.0, 0.0)).unwrap();
        assert!(angle.abs() < 0.001);
    }

    #[test]
    fn test_degenerate_vertex() {
        assert_eq!(
            joint_angle((1.0, 1.0), (1.0, 1.0), (2.0, 2.0)),
            Err(GeometryError::DegenerateSegment)
        );
        assert_eq!(
            joint_angle((0.0, 0.0), (2.0, 2.0), (2.0, 2.0)),
            Err(GeometryError::DegenerateSegment)
        );
    }

    #[test]
    fn test_angle_is_symmetric() {
        let forward = joint_angle((3.0, 1.0), (2.0, 4.0), (7.0, 5.0)).unwrap();
        let reversed = joint_angle((7.0, 5.0), (2.0, 4.0), (3.0, 1.0)).unwrap();
        assert!((forward - reversed).abs() < 0.001);
    }
}

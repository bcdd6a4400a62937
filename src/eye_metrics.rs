//! Per-eye geometric metrics derived from facial landmark positions.
//!
//! All quantities are plain arithmetic over landmark pixel positions; the
//! extraction never fails on well-formed input. A side whose corner or
//! eyelid landmarks are missing yields no metrics for that side, and a side
//! without iris-ring landmarks yields an openness ratio but no iris
//! position.

use crate::constants::{
    GEOMETRY_EPSILON, LEFT_CORNER_IN, LEFT_CORNER_OUT, LEFT_IRIS_RING, LEFT_LID_BOTTOM,
    LEFT_LID_TOP, RIGHT_CORNER_IN, RIGHT_CORNER_OUT, RIGHT_IRIS_RING, RIGHT_LID_BOTTOM,
    RIGHT_LID_TOP,
};
use crate::landmarks::LandmarkSet;
use serde::Serialize;

/// Landmark indices describing one eye
#[derive(Debug, Clone, Copy)]
pub struct EyeTopology {
    /// Outer eye corner
    pub corner_out: usize,
    /// Inner eye corner
    pub corner_in: usize,
    /// Upper eyelid
    pub lid_top: usize,
    /// Lower eyelid
    pub lid_bottom: usize,
    /// Iris ring landmarks
    pub iris_ring: &'static [usize],
}

/// Topology of the left eye
pub const LEFT_EYE: EyeTopology = EyeTopology {
    corner_out: LEFT_CORNER_OUT,
    corner_in: LEFT_CORNER_IN,
    lid_top: LEFT_LID_TOP,
    lid_bottom: LEFT_LID_BOTTOM,
    iris_ring: &LEFT_IRIS_RING,
};

/// Topology of the right eye
pub const RIGHT_EYE: EyeTopology = EyeTopology {
    corner_out: RIGHT_CORNER_OUT,
    corner_in: RIGHT_CORNER_IN,
    lid_top: RIGHT_LID_TOP,
    lid_bottom: RIGHT_LID_BOTTOM,
    iris_ring: &RIGHT_IRIS_RING,
};

/// A point in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelPoint {
    /// Horizontal pixel position
    pub x: f64,
    /// Vertical pixel position
    pub y: f64,
}

/// Geometric metrics for one eye in one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EyeMetrics {
    /// Corner-to-corner distance in pixels, floored at a small epsilon
    pub eye_width: f64,
    /// Eyelid separation normalized by eye width; near 0 when closed
    pub eye_open: f64,
    /// Mean pixel position of the iris ring landmarks
    pub iris_center: Option<PixelPoint>,
    /// Signed vertical displacement of the iris from the eye center,
    /// normalized by eyelid separation; negative = iris above center
    pub vertical_offset: Option<f64>,
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Mean pixel position over the iris ring, `None` when no ring landmark
/// is present
fn iris_center(
    landmarks: &LandmarkSet,
    ring: &[usize],
    width: u32,
    height: u32,
) -> Option<PixelPoint> {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut n = 0usize;
    for &index in ring {
        if let Some((x, y)) = landmarks.pixel(index, width, height) {
            sum_x += x;
            sum_y += y;
            n += 1;
        }
    }
    if n == 0 {
        return None;
    }
    let n = n as f64;
    Some(PixelPoint {
        x: sum_x / n,
        y: sum_y / n,
    })
}

/// Extract per-eye metrics from one landmark set
///
/// Returns `None` when the corner or eyelid landmarks for this side are
/// absent from the set.
#[must_use]
pub fn extract_eye_metrics(
    landmarks: &LandmarkSet,
    width: u32,
    height: u32,
    topology: &EyeTopology,
) -> Option<EyeMetrics> {
    let corner_out = landmarks.pixel(topology.corner_out, width, height)?;
    let corner_in = landmarks.pixel(topology.corner_in, width, height)?;
    let lid_top = landmarks.pixel(topology.lid_top, width, height)?;
    let lid_bottom = landmarks.pixel(topology.lid_bottom, width, height)?;

    let eye_width = distance(corner_out, corner_in).max(GEOMETRY_EPSILON);
    let eyelid_distance = distance(lid_top, lid_bottom);
    let eye_open = eyelid_distance / eye_width;

    let iris = iris_center(landmarks, topology.iris_ring, width, height);
    let vertical_offset = iris.map(|center| {
        let eye_center_y = (corner_out.1 + corner_in.1) / 2.0;
        (center.y - eye_center_y) / eyelid_distance.max(GEOMETRY_EPSILON)
    });

    Some(EyeMetrics {
        eye_width,
        eye_open,
        iris_center: iris,
        vertical_offset,
    })
}

/// Mean over the defined values of the two sides, `None` when neither is
/// defined
#[must_use]
pub fn fused_mean(left: Option<f64>, right: Option<f64>) -> Option<f64> {
    match (left, right) {
        (Some(a), Some(b)) => Some((a + b) / 2.0),
        (Some(a), None) | (None, Some(a)) => Some(a),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Landmark;

    const W: u32 = 1000;
    const H: u32 = 1000;

    /// Left eye with the given openness ratio and normalized iris shift.
    /// Corners span 0.1 of the frame width, so eye_width = 100 px.
    fn left_eye_landmarks(openness: f64, iris_shift: f64) -> LandmarkSet {
        let lid_half = openness * 0.1 / 2.0;
        let iris_y = 0.5 + iris_shift * openness * 0.1;
        let mut set = LandmarkSet::new();
        set.insert(LEFT_CORNER_OUT, Landmark::new(0.3, 0.5));
        set.insert(LEFT_CORNER_IN, Landmark::new(0.4, 0.5));
        set.insert(LEFT_LID_TOP, Landmark::new(0.35, 0.5 - lid_half));
        set.insert(LEFT_LID_BOTTOM, Landmark::new(0.35, 0.5 + lid_half));
        for &index in &LEFT_IRIS_RING {
            set.insert(index, Landmark::new(0.35, iris_y));
        }
        set
    }

    #[test]
    fn test_openness_ratio() {
        let set = left_eye_landmarks(0.3, 0.0);
        let metrics = extract_eye_metrics(&set, W, H, &LEFT_EYE).expect("metrics");
        assert!((metrics.eye_width - 100.0).abs() < 1e-9);
        assert!((metrics.eye_open - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_vertical_offset_sign() {
        let below = left_eye_landmarks(0.3, 0.5);
        let metrics = extract_eye_metrics(&below, W, H, &LEFT_EYE).expect("metrics");
        let offset = metrics.vertical_offset.expect("offset");
        assert!((offset - 0.5).abs() < 1e-9);

        let above = left_eye_landmarks(0.3, -0.5);
        let metrics = extract_eye_metrics(&above, W, H, &LEFT_EYE).expect("metrics");
        let offset = metrics.vertical_offset.expect("offset");
        assert!((offset + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_corners_yield_no_metrics() {
        let mut set = left_eye_landmarks(0.3, 0.0);
        let metrics = extract_eye_metrics(&set, W, H, &RIGHT_EYE);
        assert!(metrics.is_none());

        set = LandmarkSet::new();
        assert!(extract_eye_metrics(&set, W, H, &LEFT_EYE).is_none());
    }

    #[test]
    fn test_missing_iris_ring_keeps_openness() {
        let mut set = LandmarkSet::new();
        set.insert(LEFT_CORNER_OUT, Landmark::new(0.3, 0.5));
        set.insert(LEFT_CORNER_IN, Landmark::new(0.4, 0.5));
        set.insert(LEFT_LID_TOP, Landmark::new(0.35, 0.49));
        set.insert(LEFT_LID_BOTTOM, Landmark::new(0.35, 0.51));

        let metrics = extract_eye_metrics(&set, W, H, &LEFT_EYE).expect("metrics");
        assert!(metrics.eye_open > 0.0);
        assert!(metrics.iris_center.is_none());
        assert!(metrics.vertical_offset.is_none());
    }

    #[test]
    fn test_degenerate_eye_width_is_floored() {
        let mut set = LandmarkSet::new();
        set.insert(LEFT_CORNER_OUT, Landmark::new(0.35, 0.5));
        set.insert(LEFT_CORNER_IN, Landmark::new(0.35, 0.5));
        set.insert(LEFT_LID_TOP, Landmark::new(0.35, 0.49));
        set.insert(LEFT_LID_BOTTOM, Landmark::new(0.35, 0.51));

        let metrics = extract_eye_metrics(&set, W, H, &LEFT_EYE).expect("metrics");
        assert!(metrics.eye_width >= GEOMETRY_EPSILON);
        assert!(metrics.eye_open.is_finite());
    }

    #[test]
    fn test_topology_indices_in_mesh_range() {
        use crate::constants::NUM_FACE_LANDMARKS;
        for topology in [LEFT_EYE, RIGHT_EYE] {
            assert!(topology.corner_out < NUM_FACE_LANDMARKS);
            assert!(topology.corner_in < NUM_FACE_LANDMARKS);
            assert!(topology.lid_top < NUM_FACE_LANDMARKS);
            assert!(topology.lid_bottom < NUM_FACE_LANDMARKS);
            for &index in topology.iris_ring {
                assert!(index < NUM_FACE_LANDMARKS);
            }
        }
    }

    #[test]
    fn test_fused_mean() {
        assert_eq!(fused_mean(Some(0.2), Some(0.4)), Some(0.3));
        assert_eq!(fused_mean(Some(0.2), None), Some(0.2));
        assert_eq!(fused_mean(None, Some(0.4)), Some(0.4));
        assert_eq!(fused_mean(None, None), None);
    }
}

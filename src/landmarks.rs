//! Normalized facial landmark positions as returned by an external provider.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One landmark position, normalized to [0, 1] in both axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, 0 = left edge of the frame
    pub x: f64,
    /// Vertical position, 0 = top edge of the frame
    pub y: f64,
}

impl Landmark {
    /// Create a landmark from normalized coordinates
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert to pixel coordinates for a frame of the given size
    #[must_use]
    pub fn to_pixels(self, width: u32, height: u32) -> (f64, f64) {
        (self.x * f64::from(width), self.y * f64::from(height))
    }
}

/// Ordered mapping from landmark index to normalized position for one
/// detected face in one frame. Read-only to the analysis core; indices a
/// provider did not report are observable as absent lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: BTreeMap<usize, Landmark>,
}

impl LandmarkSet {
    /// Create an empty landmark set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the landmark at `index`
    pub fn insert(&mut self, index: usize, landmark: Landmark) {
        self.points.insert(index, landmark);
    }

    /// Look up a landmark by index
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Landmark> {
        self.points.get(&index).copied()
    }

    /// Look up a landmark and convert it to pixel coordinates
    #[must_use]
    pub fn pixel(&self, index: usize, width: u32, height: u32) -> Option<(f64, f64)> {
        self.get(index).map(|lm| lm.to_pixels(width, height))
    }

    /// Number of landmarks in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set contains no landmarks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(usize, Landmark)> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = (usize, Landmark)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_conversion() {
        let lm = Landmark::new(0.5, 0.25);
        assert_eq!(lm.to_pixels(640, 480), (320.0, 120.0));
    }

    #[test]
    fn test_missing_index_is_absent() {
        let mut set = LandmarkSet::new();
        set.insert(33, Landmark::new(0.1, 0.2));
        assert!(set.get(33).is_some());
        assert!(set.get(133).is_none());
        assert!(set.pixel(133, 640, 480).is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let set: LandmarkSet = [(33, Landmark::new(0.4, 0.5)), (133, Landmark::new(0.5, 0.5))]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&set).expect("serialize");
        let back: LandmarkSet = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(set, back);
    }
}

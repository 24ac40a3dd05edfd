//! Lane geometry
//!
//! Lanes are horizontal center lines spread evenly over the middle band of
//! the viewport.

use crate::consts::{LANE_BAND_BOTTOM, LANE_BAND_TOP};

/// Drawing surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Compute lane center Y coordinates, top to bottom
///
/// A single lane sits in the middle of the band instead of dividing by zero.
pub fn compute_lanes(viewport_height: f32, lane_count: usize) -> Vec<f32> {
    let top = viewport_height * LANE_BAND_TOP;
    let bottom = viewport_height * LANE_BAND_BOTTOM;

    match lane_count {
        0 => Vec::new(),
        1 => vec![(top + bottom) / 2.0],
        n => {
            let gap = (bottom - top) / (n - 1) as f32;
            (0..n).map(|i| top + i as f32 * gap).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_three_lanes() {
        let lanes = compute_lanes(1000.0, 3);
        assert_eq!(lanes, vec![200.0, 500.0, 800.0]);
    }

    #[test]
    fn test_single_lane_is_centered() {
        let lanes = compute_lanes(600.0, 1);
        assert_eq!(lanes.len(), 1);
        assert!((lanes[0] - 300.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_lanes() {
        assert!(compute_lanes(600.0, 0).is_empty());
    }

    proptest! {
        #[test]
        fn lanes_are_sorted_distinct_and_in_band(height in 100.0f32..4000.0, count in 1usize..32) {
            let lanes = compute_lanes(height, count);
            prop_assert_eq!(lanes.len(), count);
            for y in &lanes {
                prop_assert!(*y >= height * LANE_BAND_TOP - 1e-3);
                prop_assert!(*y <= height * LANE_BAND_BOTTOM + 1e-3);
            }
            for pair in lanes.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }
}

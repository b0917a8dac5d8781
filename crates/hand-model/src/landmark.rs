//! Hand landmark types.
//!
//! A detected hand is 21 keypoints in a fixed anatomical order: the wrist,
//! then four joints per finger from the base outwards, thumb first.

use serde::{Deserialize, Serialize};

/// Number of keypoints per detected hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Fingertip indices, thumb to pinky.
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// A single tracked keypoint in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, `[0.0, 1.0]` across the image.
    pub x: f32,
    /// Vertical position, `[0.0, 1.0]` down the image.
    pub y: f32,
    /// Depth relative to the wrist; smaller is closer to the camera.
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Components widened to `f64` for geometry.
    pub fn to_f64(self) -> [f64; 3] {
        [self.x as f64, self.y as f64, self.z as f64]
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// The 21 landmarks of one detected hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandLandmarks(pub [Landmark; LANDMARK_COUNT]);

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self(points)
    }

    /// Build from a slice, which must hold exactly [`LANDMARK_COUNT`] points.
    pub fn from_slice(points: &[Landmark]) -> Option<Self> {
        let points: [Landmark; LANDMARK_COUNT] = points.try_into().ok()?;
        Some(Self(points))
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.0
    }
}

impl std::ops::Index<usize> for HandLandmarks {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Landmark {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_serializes_as_plain_array() {
        let hand = HandLandmarks::new([Landmark::new(0.5, 0.25, 0.0); LANDMARK_COUNT]);
        let json = serde_json::to_string(&hand).unwrap();
        assert!(json.starts_with("[{"));
        let parsed: HandLandmarks = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, hand);
    }

    #[test]
    fn hand_rejects_wrong_point_count() {
        let points = vec![Landmark::default(); 20];
        let json = serde_json::to_string(&points).unwrap();
        assert!(serde_json::from_str::<HandLandmarks>(&json).is_err());
        assert!(HandLandmarks::from_slice(&points).is_none());
    }

    #[test]
    fn fingertips_follow_four_joints_per_finger() {
        for (finger, tip) in FINGERTIPS.iter().enumerate() {
            assert_eq!(*tip, 4 * (finger + 1));
        }
        assert_eq!(PINKY_TIP, LANDMARK_COUNT - 1);
    }

    #[test]
    fn non_finite_landmark_is_detected() {
        assert!(Landmark::new(0.1, 0.2, 0.3).is_finite());
        assert!(!Landmark::new(f32::NAN, 0.2, 0.3).is_finite());
        assert!(!Landmark::new(0.1, f32::INFINITY, 0.3).is_finite());
    }
}

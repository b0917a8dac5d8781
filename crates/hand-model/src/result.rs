//! Classification output contract.

use serde::{Deserialize, Serialize};

use crate::frame::TimestampNs;

/// Number of angle features fed to the gesture model.
pub const FEATURE_COUNT: usize = 15;

/// Number of gesture classes the model scores.
pub const GESTURE_CLASS_COUNT: usize = 26;

/// The gesture chosen for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Timestamp of the frame that produced this result.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// Winning class, in `[0, GESTURE_CLASS_COUNT)`.
    pub index: usize,

    /// Raw model score of the winning class. Not a probability.
    pub score: f32,
}

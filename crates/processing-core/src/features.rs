//! Joint-angle feature extraction.
//!
//! Each feature is the angle between two consecutive unit bone vectors of
//! the same finger, in degrees. A finger held straight gives 0°; a bone
//! that doubles back on its predecessor gives 180°.

use handsign_common::config::ParentMapping;
use handsign_common::error::{HandsignError, HandsignResult};
use handsign_hand_model::{HandLandmarks, FEATURE_COUNT};
use serde::Serialize;

use crate::topology::{bone_child, bone_parent, ANGLE_PAIRS, BONE_COUNT};

/// Decimal places kept in each angle.
pub const ANGLE_DECIMALS: i32 = 5;

/// Unit direction vectors for every bone of one hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneVectors([[f64; 3]; BONE_COUNT]);

impl BoneVectors {
    /// Compute and normalize all bone vectors.
    ///
    /// Fails with [`HandsignError::DegenerateInput`] when a bone has zero
    /// length (its two landmarks coincide) or a non-finite length.
    pub fn from_landmarks(hand: &HandLandmarks, mapping: ParentMapping) -> HandsignResult<Self> {
        let mut bones = [[0.0; 3]; BONE_COUNT];
        for (bone, out) in bones.iter_mut().enumerate() {
            let from = hand[bone_parent(bone, mapping)].to_f64();
            let to = hand[bone_child(bone)].to_f64();
            let v = [to[0] - from[0], to[1] - from[1], to[2] - from[2]];

            let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            if norm == 0.0 || !norm.is_finite() {
                return Err(HandsignError::DegenerateInput { bone });
            }
            *out = [v[0] / norm, v[1] / norm, v[2] / norm];
        }
        Ok(Self(bones))
    }

    pub fn as_array(&self) -> &[[f64; 3]; BONE_COUNT] {
        &self.0
    }
}

/// The 15 joint angles of one hand, in degrees, in model input order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AngleFeatureVector([f64; FEATURE_COUNT]);

impl AngleFeatureVector {
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// The vector as the model consumes it: 15 `f32`s in feature order.
    pub fn to_model_input(&self) -> [f32; FEATURE_COUNT] {
        self.0.map(|angle| angle as f32)
    }
}

impl std::ops::Index<usize> for AngleFeatureVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// Converts hand landmarks into joint-angle features.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor {
    mapping: ParentMapping,
}

impl FeatureExtractor {
    pub fn new(mapping: ParentMapping) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> ParentMapping {
        self.mapping
    }

    /// Compute the angle features for one hand.
    pub fn extract(&self, hand: &HandLandmarks) -> HandsignResult<AngleFeatureVector> {
        let bones = BoneVectors::from_landmarks(hand, self.mapping)?;
        let bones = bones.as_array();

        let mut angles = [0.0; FEATURE_COUNT];
        for (pair, (first, second)) in ANGLE_PAIRS.iter().enumerate() {
            let a = &bones[*first];
            let b = &bones[*second];
            let cosine = a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
            if !cosine.is_finite() {
                return Err(HandsignError::NumericRange { pair, cosine });
            }
            // Unit vectors can overshoot ±1 by an ulp or two.
            let degrees = cosine.clamp(-1.0, 1.0).acos().to_degrees();
            angles[pair] = round_decimals(degrees, ANGLE_DECIMALS);
        }

        tracing::trace!(?angles, "extracted joint angles");
        Ok(AngleFeatureVector(angles))
    }
}

/// Round half to even at the given number of decimal places.
fn round_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

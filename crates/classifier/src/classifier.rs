//! The 15 → 26 classification contract.

use handsign_common::config::ModelConfig;
use handsign_common::error::{HandsignError, HandsignResult};
use handsign_hand_model::{FEATURE_COUNT, GESTURE_CLASS_COUNT};

use crate::codec::{decode_f32s, encode_f32s};
use crate::model::{load_model, GestureModel};

/// Owns a loaded gesture model and enforces its input/output shape.
pub struct GestureClassifier {
    model: Box<dyn GestureModel>,
    inferences: u64,
}

impl GestureClassifier {
    /// Wrap an already loaded model.
    ///
    /// The model must declare exactly 15 inputs and 26 outputs.
    pub fn new(model: Box<dyn GestureModel>) -> HandsignResult<Self> {
        if model.input_len() != FEATURE_COUNT {
            return Err(HandsignError::shape_mismatch(
                "model input",
                FEATURE_COUNT,
                model.input_len(),
            ));
        }
        if model.output_len() != GESTURE_CLASS_COUNT {
            return Err(HandsignError::shape_mismatch(
                "model output",
                GESTURE_CLASS_COUNT,
                model.output_len(),
            ));
        }
        tracing::info!(backend = model.name(), "Gesture model ready");
        Ok(Self {
            model,
            inferences: 0,
        })
    }

    /// Load the configured model and wrap it.
    pub fn load(config: &ModelConfig) -> HandsignResult<Self> {
        Self::new(load_model(config)?)
    }

    /// Score every gesture class for one feature vector.
    ///
    /// Scores are raw model outputs; they are not guaranteed to sum to 1.
    pub fn classify(&mut self, features: &[f32]) -> HandsignResult<[f32; GESTURE_CLASS_COUNT]> {
        if features.len() != FEATURE_COUNT {
            return Err(HandsignError::shape_mismatch(
                "classifier input",
                FEATURE_COUNT,
                features.len(),
            ));
        }

        let output = self.model.run(features)?;
        let scores: [f32; GESTURE_CLASS_COUNT] = output.as_slice().try_into().map_err(|_| {
            HandsignError::shape_mismatch("classifier output", GESTURE_CLASS_COUNT, output.len())
        })?;

        self.inferences += 1;
        Ok(scores)
    }

    /// Byte-level variant of [`GestureClassifier::classify`]: 15 packed
    /// native-endian `f32`s in, 26 out.
    pub fn classify_bytes(&mut self, input: &[u8]) -> HandsignResult<Vec<u8>> {
        let features = decode_f32s(input, FEATURE_COUNT, "classifier input buffer")?;
        let scores = self.classify(&features)?;
        Ok(encode_f32s(&scores))
    }

    /// Backend name of the wrapped model.
    pub fn backend(&self) -> &str {
        self.model.name()
    }

    /// Input length declared by the wrapped model.
    pub fn input_len(&self) -> usize {
        self.model.input_len()
    }

    /// Output length declared by the wrapped model.
    pub fn output_len(&self) -> usize {
        self.model.output_len()
    }

    /// Layer summary of the wrapped model.
    pub fn describe(&self) -> Vec<String> {
        self.model.describe()
    }

    /// Number of successful forward passes so far.
    pub fn inferences(&self) -> u64 {
        self.inferences
    }
}

impl Drop for GestureClassifier {
    fn drop(&mut self) {
        tracing::debug!(
            backend = self.model.name(),
            inferences = self.inferences,
            "Releasing gesture model"
        );
    }
}

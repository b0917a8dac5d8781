//! The gesture model seam.

use std::path::Path;

use handsign_common::config::{ModelBackend, ModelConfig};
use handsign_common::error::{HandsignError, HandsignResult};

use crate::dense::DenseModel;

/// A loaded inference model mapping a fixed-size input to a fixed-size
/// output. Implementations are read-only after loading; `run` takes
/// `&mut self` only because some runtimes keep per-call scratch state.
pub trait GestureModel: Send {
    /// Number of input floats.
    fn input_len(&self) -> usize;

    /// Number of output floats.
    fn output_len(&self) -> usize;

    /// Single forward pass. `input.len()` equals `input_len()`.
    fn run(&mut self, input: &[f32]) -> HandsignResult<Vec<f32>>;

    /// Backend name for logging.
    fn name(&self) -> &str;

    /// One line per layer or stage, for inspection.
    fn describe(&self) -> Vec<String> {
        vec![format!(
            "{}: {} -> {}",
            self.name(),
            self.input_len(),
            self.output_len()
        )]
    }
}

/// Load the model named by `config` with the configured backend.
pub fn load_model(config: &ModelConfig) -> HandsignResult<Box<dyn GestureModel>> {
    let path = config.path.as_path();
    if !path.is_file() {
        return Err(HandsignError::model_load(path, "model asset not found"));
    }

    tracing::info!(path = %path.display(), backend = ?config.backend, "Loading gesture model");
    match config.backend {
        ModelBackend::Dense => Ok(Box::new(DenseModel::load(path)?)),
        ModelBackend::Onnx => load_onnx(path),
    }
}

/// Elements per frame for a declared tensor shape.
///
/// Leading dimensions must describe a batch of one (`1`, or `-1` when the
/// batch is dynamic) and the last dimension must be fixed.
#[cfg_attr(not(feature = "onnx"), allow(dead_code))]
pub(crate) fn frame_len(dims: &[i64]) -> Option<usize> {
    let (last, leading) = dims.split_last()?;
    if leading.iter().any(|d| *d != 1 && *d != -1) {
        return None;
    }
    usize::try_from(*last).ok().filter(|n| *n > 0)
}

#[cfg(feature = "onnx")]
fn load_onnx(path: &Path) -> HandsignResult<Box<dyn GestureModel>> {
    Ok(Box::new(crate::onnx::OnnxModel::load(path)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(path: &Path) -> HandsignResult<Box<dyn GestureModel>> {
    Err(HandsignError::model_load(
        path,
        "ONNX backend not available; rebuild with `--features onnx`",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_asset_is_a_load_error() {
        let config = ModelConfig {
            path: PathBuf::from("/nonexistent/handsign/model.json"),
            backend: ModelBackend::Dense,
        };
        let err = load_model(&config).err().unwrap();
        assert!(matches!(err, HandsignError::ModelLoad { .. }));
    }

    #[test]
    fn frame_len_accepts_single_or_dynamic_batch() {
        assert_eq!(frame_len(&[1, 15]), Some(15));
        assert_eq!(frame_len(&[-1, 26]), Some(26));
        assert_eq!(frame_len(&[15]), Some(15));
    }

    #[test]
    fn frame_len_rejects_unknown_or_batched_shapes() {
        assert_eq!(frame_len(&[]), None);
        assert_eq!(frame_len(&[1, -1]), None);
        assert_eq!(frame_len(&[2, 15]), None);
        assert_eq!(frame_len(&[1, 0]), None);
    }
}

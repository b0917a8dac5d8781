//! ONNX Runtime backend.
//!
//! The graph takes one float tensor and returns one float tensor as its
//! first output. Both shapes are read from the graph at load time, so a
//! graph that does not map 15 values to 26 is rejected before any frame
//! reaches it.

use std::path::Path;

use handsign_common::error::{HandsignError, HandsignResult};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::{Tensor, ValueType};

use crate::model::{frame_len, GestureModel};

/// A gesture model executed by ONNX Runtime.
pub struct OnnxModel {
    session: Session,
    input_name: String,
    input_len: usize,
    output_len: usize,
}

impl OnnxModel {
    /// Build a single-threaded session for the graph at `path`.
    ///
    /// Fails with `ModelLoad` when the graph has no inputs or outputs, or
    /// when either shape is not a fixed per-frame length.
    pub fn load(path: &Path) -> HandsignResult<Self> {
        let session = build_session(path)
            .map_err(|e| HandsignError::model_load(path, format!("{e:#}")))?;

        let input = session
            .inputs
            .first()
            .ok_or_else(|| HandsignError::model_load(path, "graph declares no inputs"))?;
        let input_name = input.name.clone();
        let input_len = declared_len(path, "input", &input.input_type)?;

        let output = session
            .outputs
            .first()
            .ok_or_else(|| HandsignError::model_load(path, "graph declares no outputs"))?;
        let output_len = declared_len(path, "output", &output.output_type)?;

        tracing::debug!(
            path = %path.display(),
            input = %input_name,
            input_len,
            output_len,
            "ONNX session ready"
        );
        Ok(Self {
            session,
            input_name,
            input_len,
            output_len,
        })
    }
}

fn declared_len(path: &Path, which: &str, ty: &ValueType) -> HandsignResult<usize> {
    let dims: Vec<i64> = ty
        .tensor_shape()
        .ok_or_else(|| HandsignError::model_load(path, format!("graph {which} is not a tensor")))?
        .iter()
        .copied()
        .collect();
    frame_len(&dims).ok_or_else(|| {
        HandsignError::model_load(path, format!("graph {which} has unsupported shape {dims:?}"))
    })
}

fn build_session(path: &Path) -> anyhow::Result<Session> {
    use anyhow::Context;

    // One frame at a time: parallelism inside a 15→26 graph only adds overhead.
    let session = Session::builder()
        .context("failed to create ORT session builder")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("failed to set ORT optimization level")?
        .with_intra_threads(1)
        .context("failed to set ORT intra threads")?
        .with_inter_threads(1)
        .context("failed to set ORT inter threads")?
        .commit_from_file(path)
        .context("failed to load ONNX gesture model")?;
    Ok(session)
}

impl GestureModel for OnnxModel {
    fn input_len(&self) -> usize {
        self.input_len
    }

    fn output_len(&self) -> usize {
        self.output_len
    }

    fn run(&mut self, input: &[f32]) -> HandsignResult<Vec<f32>> {
        if input.len() != self.input_len {
            return Err(HandsignError::shape_mismatch(
                "onnx model input",
                self.input_len,
                input.len(),
            ));
        }

        let tensor = Tensor::from_array(([1usize, self.input_len], input.to_vec()))
            .map_err(|e| anyhow::anyhow!("failed to build input tensor: {e}"))?;
        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => tensor])
            .map_err(|e| anyhow::anyhow!("ONNX inference failed: {e}"))?;

        let (_, value) = outputs
            .iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("ONNX model produced no outputs"))?;
        let (_shape, data) = value
            .try_extract_tensor::<f32>()
            .map_err(|e| anyhow::anyhow!("failed to extract output tensor: {e}"))?;

        Ok(data.to_vec())
    }

    fn name(&self) -> &str {
        "onnx"
    }

    fn describe(&self) -> Vec<String> {
        vec![format!(
            "graph input {:?}: {} -> {}",
            self.input_name, self.input_len, self.output_len
        )]
    }
}

//! Feed-forward network stored as JSON.
//!
//! The asset is a stack of fully connected layers. Weights are row-major
//! (`outputs` rows of `inputs` columns) and either plain `f32` or int8 with
//! an affine scale: `w = scale * (q - zero_point)`. Quantized weights are
//! expanded once at load time; inference always runs in `f32`.

use std::path::Path;

use handsign_common::error::{HandsignError, HandsignResult};
use serde::{Deserialize, Serialize};

use crate::model::GestureModel;

/// Format tag expected in every dense model file.
pub const DENSE_FORMAT: &str = "handsign-dense";

/// Highest file version this build understands.
pub const DENSE_VERSION: u32 = 1;

/// On-disk model document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseModelFile {
    pub format: String,
    pub version: u32,
    pub layers: Vec<LayerSpec>,
}

/// One fully connected layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub inputs: usize,
    pub outputs: usize,
    #[serde(default)]
    pub activation: Activation,
    pub weights: WeightSpec,
    pub bias: Vec<f32>,
}

/// Layer activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Softmax,
}

/// Stored weight matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dtype", rename_all = "snake_case")]
pub enum WeightSpec {
    Float32 {
        values: Vec<f32>,
    },
    Int8 {
        scale: f32,
        #[serde(default)]
        zero_point: i32,
        values: Vec<i8>,
    },
}

impl WeightSpec {
    /// Symmetric int8 quantization (`zero_point = 0`).
    pub fn quantize(values: &[f32]) -> Self {
        let max_abs = values.iter().fold(0.0f32, |m, v| m.max(v.abs()));
        let scale = if max_abs > 0.0 { max_abs / 127.0 } else { 1.0 };
        let values = values
            .iter()
            .map(|v| (v / scale).round().clamp(-127.0, 127.0) as i8)
            .collect();
        Self::Int8 {
            scale,
            zero_point: 0,
            values,
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Float32 { values } => values.len(),
            Self::Int8 { values, .. } => values.len(),
        }
    }

    fn is_quantized(&self) -> bool {
        matches!(self, Self::Int8 { .. })
    }

    fn dequantize(&self) -> Vec<f32> {
        match self {
            Self::Float32 { values } => values.clone(),
            Self::Int8 {
                scale,
                zero_point,
                values,
            } => values
                .iter()
                .map(|q| scale * (*q as i32 - zero_point) as f32)
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
struct Layer {
    inputs: usize,
    outputs: usize,
    activation: Activation,
    quantized: bool,
    weights: Vec<f32>,
    bias: Vec<f32>,
}

impl Layer {
    fn forward(&self, input: &[f32], output: &mut Vec<f32>) {
        output.clear();
        for row in self.weights.chunks_exact(self.inputs) {
            let dot: f32 = row.iter().zip(input).map(|(w, x)| w * x).sum();
            output.push(dot);
        }
        for (value, bias) in output.iter_mut().zip(&self.bias) {
            *value += bias;
        }
        match self.activation {
            Activation::Linear => {}
            Activation::Relu => output.iter_mut().for_each(|v| *v = v.max(0.0)),
            Activation::Softmax => softmax(output),
        }
    }
}

fn softmax(values: &mut [f32]) {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    if sum > 0.0 {
        values.iter_mut().for_each(|v| *v /= sum);
    }
}

/// A loaded dense network.
#[derive(Debug, Clone)]
pub struct DenseModel {
    layers: Vec<Layer>,
    scratch: [Vec<f32>; 2],
}

impl DenseModel {
    /// Read and validate a model file.
    pub fn load(path: &Path) -> HandsignResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| HandsignError::model_load(path, format!("cannot read asset: {e}")))?;
        let file: DenseModelFile = serde_json::from_str(&content)
            .map_err(|e| HandsignError::model_load(path, format!("malformed model: {e}")))?;
        Self::from_file(file, path)
    }

    /// Validate an in-memory model document. `origin` is only used in
    /// error messages.
    pub fn from_file(file: DenseModelFile, origin: &Path) -> HandsignResult<Self> {
        let fail = |msg: String| HandsignError::model_load(origin, msg);

        if file.format != DENSE_FORMAT {
            return Err(fail(format!("unknown format {:?}", file.format)));
        }
        if file.version == 0 || file.version > DENSE_VERSION {
            return Err(fail(format!("unsupported version {}", file.version)));
        }
        if file.layers.is_empty() {
            return Err(fail("model has no layers".to_string()));
        }

        let mut layers = Vec::with_capacity(file.layers.len());
        let mut prev_outputs = None;
        for (i, spec) in file.layers.into_iter().enumerate() {
            if spec.inputs == 0 || spec.outputs == 0 {
                return Err(fail(format!("layer {i} has an empty dimension")));
            }
            if let Some(prev) = prev_outputs {
                if spec.inputs != prev {
                    return Err(fail(format!(
                        "layer {i} takes {} inputs but layer {} produces {prev}",
                        spec.inputs,
                        i - 1
                    )));
                }
            }
            if spec.weights.len() != spec.inputs * spec.outputs {
                return Err(fail(format!(
                    "layer {i} has {} weights, expected {}",
                    spec.weights.len(),
                    spec.inputs * spec.outputs
                )));
            }
            if spec.bias.len() != spec.outputs {
                return Err(fail(format!(
                    "layer {i} has {} biases, expected {}",
                    spec.bias.len(),
                    spec.outputs
                )));
            }
            if let WeightSpec::Int8 { scale, .. } = &spec.weights {
                if !scale.is_finite() || *scale <= 0.0 {
                    return Err(fail(format!("layer {i} has invalid scale {scale}")));
                }
            }

            prev_outputs = Some(spec.outputs);
            layers.push(Layer {
                inputs: spec.inputs,
                outputs: spec.outputs,
                activation: spec.activation,
                quantized: spec.weights.is_quantized(),
                weights: spec.weights.dequantize(),
                bias: spec.bias,
            });
        }

        let widest = layers.iter().map(|l| l.outputs).max().unwrap_or(0);
        Ok(Self {
            layers,
            scratch: [Vec::with_capacity(widest), Vec::with_capacity(widest)],
        })
    }
}

impl GestureModel for DenseModel {
    fn input_len(&self) -> usize {
        self.layers[0].inputs
    }

    fn output_len(&self) -> usize {
        self.layers[self.layers.len() - 1].outputs
    }

    fn run(&mut self, input: &[f32]) -> HandsignResult<Vec<f32>> {
        if input.len() != self.input_len() {
            return Err(HandsignError::shape_mismatch(
                "dense model input",
                self.input_len(),
                input.len(),
            ));
        }

        let [current, next] = &mut self.scratch;
        current.clear();
        current.extend_from_slice(input);
        for layer in &self.layers {
            layer.forward(current, next);
            std::mem::swap(current, next);
        }
        Ok(current.clone())
    }

    fn name(&self) -> &str {
        "dense"
    }

    fn describe(&self) -> Vec<String> {
        self.layers
            .iter()
            .enumerate()
            .map(|(i, l)| {
                format!(
                    "layer {i}: {} -> {} {:?} ({})",
                    l.inputs,
                    l.outputs,
                    l.activation,
                    if l.quantized { "int8" } else { "f32" }
                )
            })
            .collect()
    }
}

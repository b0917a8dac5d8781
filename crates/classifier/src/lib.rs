//! Handsign Gesture Classifier
//!
//! Wraps a pre-trained gesture model behind a fixed contract:
//! 15 angle features in, 26 raw class scores out.
//!
//! - **Dense:** pure-Rust feed-forward network with int8-quantized weights
//! - **ONNX:** graph executed by ONNX Runtime (`onnx` feature)
//! - **Codec:** native-endian packed `f32` buffers for byte-level callers
//!
//! The model is loaded once and owned by [`GestureClassifier`]; dropping
//! the classifier releases it.

pub mod classifier;
pub mod codec;
pub mod dense;
pub mod model;
#[cfg(feature = "onnx")]
pub mod onnx;

pub use classifier::GestureClassifier;
pub use dense::DenseModel;
pub use model::{load_model, GestureModel};

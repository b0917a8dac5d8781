//! Handsign Processing Core
//!
//! Turns one frame of hand landmarks into a gesture decision:
//! - **Topology:** which landmarks each bone vector connects
//! - **Features:** 15 joint angles between adjacent unit bone vectors
//! - **Selection:** arg-max over classifier scores with a fixed tie-break
//!
//! This crate is pure computation: no I/O, no model, no hidden state.
//! All inputs are data; all outputs are data.

pub mod features;
pub mod selector;
pub mod topology;

pub use features::{AngleFeatureVector, FeatureExtractor};
pub use selector::select;

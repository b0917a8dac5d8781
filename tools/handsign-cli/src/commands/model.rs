//! Inspect a gesture model.

use std::path::PathBuf;

use anyhow::Context;
use handsign_classifier::GestureClassifier;
use handsign_common::config::{ModelBackend, ModelConfig};
use handsign_hand_model::FEATURE_COUNT;
use handsign_processing_core::select;

pub fn run(path: PathBuf, backend: ModelBackend) -> anyhow::Result<()> {
    let config = ModelConfig {
        path: path.clone(),
        backend,
    };
    let mut classifier = GestureClassifier::load(&config)
        .with_context(|| format!("Failed to load model {}", path.display()))?;

    println!("Model: {}", path.display());
    println!("  Backend: {}", classifier.backend());
    println!("  Inputs: {}", classifier.input_len());
    println!("  Outputs: {}", classifier.output_len());

    let layers = classifier.describe();
    if !layers.is_empty() {
        println!();
        println!("Layers:");
        for layer in &layers {
            println!("  {layer}");
        }
    }

    // An open, flat hand produces all-zero angles.
    let scores = classifier.classify(&[0.0; FEATURE_COUNT])?;
    let best = select(&scores);
    println!();
    println!("Open hand (all angles 0): class {best} (score {:.4})", scores[best]);

    Ok(())
}

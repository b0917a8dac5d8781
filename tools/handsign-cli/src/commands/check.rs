//! Check config, model and labels.

use std::path::Path;

use handsign_classifier::{load_model, GestureClassifier, GestureModel};
use handsign_common::config::{config_file_path, AppConfig};
use handsign_common::error::HandsignResult;
use handsign_hand_model::LabelTable;

pub fn run(config: &AppConfig, explicit: Option<&Path>, init: bool) -> anyhow::Result<()> {
    println!("Handsign Setup Check");
    println!("{}", "=".repeat(50));

    // Config file
    let config_path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path);
    if config_path.exists() {
        println!("[OK] Config: {}", config_path.display());
    } else if init && explicit.is_none() {
        AppConfig::default().save()?;
        println!("[OK] Config: wrote defaults to {}", config_path.display());
    } else {
        println!("[WARN] Config: {} not found, using defaults", config_path.display());
    }

    // Model
    let model_path = &config.model.path;
    let model_ok = match model_status(load_model(&config.model)) {
        Ok(summary) => {
            println!("[OK] Model: {} ({summary})", model_path.display());
            true
        }
        Err(reason) => {
            println!("[FAIL] Model: {reason}");
            false
        }
    };

    // Labels
    match &config.labels {
        Some(path) => match LabelTable::load(path) {
            Ok(labels) => println!("[OK] Labels: {} ({} classes)", path.display(), labels.len()),
            Err(e) => println!("[WARN] Labels: {e}"),
        },
        None => println!("[OK] Labels: none configured, using class numbers"),
    }

    println!();
    if model_ok {
        println!("Handsign is ready.");
    } else {
        println!("No usable gesture model. Set model.path in the config or pass --model.");
    }

    Ok(())
}

/// Summarize a loaded model, or say why it cannot be used for tracking.
///
/// The shape reported is what the model declares, checked against the
/// 15 -> 26 contract.
fn model_status(loaded: HandsignResult<Box<dyn GestureModel>>) -> Result<String, String> {
    let classifier = loaded
        .and_then(GestureClassifier::new)
        .map_err(|e| e.to_string())?;
    Ok(format!(
        "{}, {} -> {}",
        classifier.backend(),
        classifier.input_len(),
        classifier.output_len()
    ))
}

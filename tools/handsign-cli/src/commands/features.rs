//! Dump angle features for every frame that has a hand.

use std::path::PathBuf;

use anyhow::Context;
use handsign_common::config::AppConfig;
use handsign_pipeline::{JsonlReplaySource, LandmarkSource};
use handsign_processing_core::{AngleFeatureVector, FeatureExtractor};
use serde::Serialize;

#[derive(Serialize)]
struct FeatureLine {
    t: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    features: Option<AngleFeatureVector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(config: &AppConfig, frames: PathBuf) -> anyhow::Result<()> {
    let mut source = JsonlReplaySource::open(&frames)
        .with_context(|| format!("Failed to open frame stream {}", frames.display()))?;
    let extractor = FeatureExtractor::new(config.pipeline.parent_mapping);

    let mut hands = 0u64;
    let mut failed = 0u64;
    while let Some(frame) = source.next_frame()? {
        let Some(hand) = frame.hand.as_ref() else {
            continue;
        };
        hands += 1;

        let line = match extractor.extract(hand) {
            Ok(features) => FeatureLine {
                t: frame.timestamp_ns,
                features: Some(features),
                error: None,
            },
            Err(e) => {
                failed += 1;
                FeatureLine {
                    t: frame.timestamp_ns,
                    features: None,
                    error: Some(e.to_string()),
                }
            }
        };
        println!("{}", serde_json::to_string(&line)?);
    }

    tracing::info!(hands, failed, mapping = ?extractor.mapping(), "Feature dump finished");
    Ok(())
}

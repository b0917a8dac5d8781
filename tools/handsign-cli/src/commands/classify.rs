//! Replay a recorded frame stream through the gesture pipeline.

use std::path::PathBuf;

use anyhow::Context;
use handsign_common::clock::FrameClock;
use handsign_common::config::AppConfig;
use handsign_hand_model::{ClassificationResult, LabelTable};
use handsign_pipeline::{frame_channel, pump_source, JsonlReplaySource, PipelineCoordinator};
use serde::Serialize;

#[derive(Serialize)]
struct ResultLine<'a> {
    t: u64,
    index: usize,
    label: &'a str,
    score: f32,
}

pub async fn run(config: AppConfig, frames: PathBuf, json: bool) -> anyhow::Result<()> {
    let labels = match &config.labels {
        Some(path) => LabelTable::load(path)
            .with_context(|| format!("Failed to load labels {}", path.display()))?,
        None => LabelTable::numbered(),
    };

    let source = JsonlReplaySource::open(&frames)
        .with_context(|| format!("Failed to open frame stream {}", frames.display()))?;
    if let Some(header) = source.header() {
        tracing::info!(
            source = header.source.as_deref().unwrap_or("unknown"),
            fps = header.fps,
            "Replaying frame stream"
        );
    }

    let presenter = |r: &ClassificationResult| {
        let label = labels.label(r.index).unwrap_or("?");
        if json {
            let line = ResultLine {
                t: r.timestamp_ns,
                index: r.index,
                label,
                score: r.score,
            };
            match serde_json::to_string(&line) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(error = %e, "Cannot serialize result"),
            }
        } else {
            println!(
                "{:>10.3}s  #{:02}  {:<16} {:.4}",
                FrameClock::ns_to_secs(r.timestamp_ns),
                r.index,
                label,
                r.score
            );
        }
    };

    // Fails here, before any frame is read, when the model is unusable.
    let mut coordinator = PipelineCoordinator::from_config(&config, presenter).with_context(|| {
        format!("Failed to load gesture model {}", config.model.path.display())
    })?;

    let (tx, rx) = frame_channel(config.pipeline.backpressure);
    let pump = tokio::spawn(pump_source(
        Box::new(source),
        tx,
        config.pipeline.realtime_replay,
    ));

    coordinator.run(rx).await;
    let pumped = pump.await.context("Frame pump task failed")??;
    let stats = coordinator.shutdown();

    if !json {
        println!();
        println!("Frames:      {}", stats.frames);
        println!("  classified {}", stats.classified);
        println!("  idle       {}", stats.idle_frames);
        println!("  failed     {}", stats.failed);
        println!("  dropped    {}", pumped.dropped);
        println!(
            "Mean time:   extract {:.3} ms, classify {:.3} ms",
            stats.mean_extract_ms(),
            stats.mean_classify_ms()
        );
    }

    Ok(())
}

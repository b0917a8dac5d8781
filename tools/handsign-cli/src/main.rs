//! Handsign CLI: replay hand landmark streams through the gesture pipeline.
//!
//! Usage:
//!   handsign classify <FRAMES>   Classify every frame of a recorded stream
//!   handsign features <FRAMES>   Print the angle features of each hand frame
//!   handsign model <PATH>        Inspect a gesture model
//!   handsign check               Check config, model and labels

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use handsign_common::config::{AppConfig, Backpressure, ModelBackend, ParentMapping};

mod commands;

#[derive(Parser)]
#[command(
    name = "handsign",
    about = "Hand gesture recognition from hand landmarks",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/handsign/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a frame stream through the full pipeline
    Classify {
        /// Path to a JSONL frame stream
        frames: PathBuf,

        /// Gesture model asset
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Label table (JSON array or one label per line)
        #[arg(short, long)]
        labels: Option<PathBuf>,

        /// Model backend
        #[arg(long, value_enum)]
        backend: Option<BackendArg>,

        /// Drop frames that arrive while the pipeline is busy
        #[arg(long)]
        drop_frames: bool,

        /// Replay at recorded frame timing
        #[arg(long)]
        realtime: bool,

        /// Bone parent mapping used for feature extraction
        #[arg(long, value_enum)]
        mapping: Option<MappingArg>,

        /// Print results as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Print the 15 angle features of each frame with a hand
    Features {
        /// Path to a JSONL frame stream
        frames: PathBuf,

        /// Bone parent mapping used for feature extraction
        #[arg(long, value_enum)]
        mapping: Option<MappingArg>,
    },

    /// Load a model and print its shape and layers
    Model {
        /// Path to the model asset
        path: PathBuf,

        /// Model backend
        #[arg(long, value_enum, default_value = "dense")]
        backend: BackendArg,
    },

    /// Check config, model and labels
    Check {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Dense,
    Onnx,
}

impl From<BackendArg> for ModelBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Dense => ModelBackend::Dense,
            BackendArg::Onnx => ModelBackend::Onnx,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MappingArg {
    WristAnchored,
    Sequential,
}

impl From<MappingArg> for ParentMapping {
    fn from(arg: MappingArg) -> Self {
        match arg {
            MappingArg::WristAnchored => ParentMapping::WristAnchored,
            MappingArg::Sequential => ParentMapping::Sequential,
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(AppConfig::load()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    handsign_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Classify {
            frames,
            model,
            labels,
            backend,
            drop_frames,
            realtime,
            mapping,
            json,
        } => {
            if let Some(model) = model {
                config.model.path = model;
            }
            if let Some(backend) = backend {
                config.model.backend = backend.into();
            }
            if labels.is_some() {
                config.labels = labels;
            }
            if drop_frames {
                config.pipeline.backpressure = Backpressure::DropNewest;
            }
            if realtime {
                config.pipeline.realtime_replay = true;
            }
            if let Some(mapping) = mapping {
                config.pipeline.parent_mapping = mapping.into();
            }
            commands::classify::run(config, frames, json).await
        }
        Commands::Features { frames, mapping } => {
            if let Some(mapping) = mapping {
                config.pipeline.parent_mapping = mapping.into();
            }
            commands::features::run(&config, frames)
        }
        Commands::Model { path, backend } => commands::model::run(path, backend.into()),
        Commands::Check { init } => commands::check::run(&config, cli.config.as_deref(), init),
    }
}

//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HandsignError, HandsignResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gesture model asset.
    pub model: ModelConfig,

    /// Optional label table (JSON array or one label per line).
    pub labels: Option<PathBuf>,

    /// Pipeline behavior.
    pub pipeline: PipelineConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Where the gesture model lives and how to run it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the model asset.
    pub path: PathBuf,

    /// Inference backend used to execute the asset.
    pub backend: ModelBackend,
}

/// Inference backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelBackend {
    /// Pure-Rust feed-forward network stored as JSON.
    #[default]
    Dense,
    /// ONNX graph executed by ONNX Runtime (requires the `onnx` feature).
    Onnx,
}

/// Pipeline tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Which landmark each bone vector starts from.
    pub parent_mapping: ParentMapping,

    /// What happens to frames that arrive while one is in flight.
    pub backpressure: Backpressure,

    /// Replay recorded streams at their original frame timing.
    pub realtime_replay: bool,
}

/// Bone parent mapping used by feature extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParentMapping {
    /// Bones 4, 8, 12 and 16 start at the wrist; every other bone `i`
    /// starts at landmark `i`.
    #[default]
    WristAnchored,
    /// Every bone `i` starts at landmark `i`.
    Sequential,
}

/// Frame delivery policy between a landmark source and the coordinator.
///
/// The frame channel holds a single frame; neither policy lets it grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Backpressure {
    /// The producer waits until the in-flight frame is consumed.
    #[default]
    Block,
    /// A frame arriving while the slot is occupied is discarded.
    DropNewest,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "handsign=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_data_dir().join("model.json"),
            backend: ModelBackend::Dense,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parent_mapping: ParentMapping::WristAnchored,
            backpressure: Backpressure::Block,
            realtime_replay: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path. Unlike [`AppConfig::load`], a
    /// missing or malformed file is an error.
    pub fn load_from(path: &Path) -> HandsignResult<Self> {
        if !path.exists() {
            return Err(HandsignError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| HandsignError::config(format!("{}: {e}", path.display())))
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("handsign").join("config.json")
}

/// Default directory for model and label assets.
fn default_data_dir() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("handsign")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let raw = r#"{ "pipeline": { "backpressure": "drop_newest" } }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.pipeline.backpressure, Backpressure::DropNewest);
        assert_eq!(config.pipeline.parent_mapping, ParentMapping::WristAnchored);
        assert_eq!(config.model.backend, ModelBackend::Dense);
        assert_eq!(config.logging.level, "info");
        assert!(config.labels.is_none());
    }

    #[test]
    fn load_from_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("handsign_test_missing_config.json");
        let _ = std::fs::remove_file(&path);
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, HandsignError::FileNotFound { .. }));
    }

    #[test]
    fn load_from_rejects_malformed_json() {
        let dir = std::env::temp_dir().join("handsign_test_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, HandsignError::Config { .. }));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn backend_names_are_snake_case() {
        let json = serde_json::to_string(&ModelBackend::Onnx).unwrap();
        assert_eq!(json, "\"onnx\"");
        let mapping: ParentMapping = serde_json::from_str("\"sequential\"").unwrap();
        assert_eq!(mapping, ParentMapping::Sequential);
    }
}

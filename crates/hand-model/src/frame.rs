//! Per-frame detector output and the landmark stream format.
//!
//! Recorded streams are JSONL: an optional `# {header}` comment line, then
//! one frame object per line. Frames without a hand carry `"hand": null`.

use serde::{Deserialize, Serialize};

use crate::landmark::HandLandmarks;

/// Monotonic timestamp in nanoseconds since stream start.
pub type TimestampNs = u64;

/// What the hand tracker reported for a single video frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    /// Monotonic nanoseconds since stream start.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// The detected hand, or `None` when no hand is in view.
    #[serde(default)]
    pub hand: Option<HandLandmarks>,
}

impl HandFrame {
    /// A frame with a detected hand.
    pub fn with_hand(timestamp_ns: TimestampNs, hand: HandLandmarks) -> Self {
        Self {
            timestamp_ns,
            hand: Some(hand),
        }
    }

    /// A frame in which no hand was detected.
    pub fn empty(timestamp_ns: TimestampNs) -> Self {
        Self {
            timestamp_ns,
            hand: None,
        }
    }

    pub fn has_hand(&self) -> bool {
        self.hand.is_some()
    }

    /// Timestamp as fractional seconds since stream start.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }
}

/// Metadata written as the first (comment) line of a frame stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Detector that produced the landmarks (e.g. "mediapipe-hands").
    #[serde(default)]
    pub source: Option<String>,

    /// Nominal camera frame rate.
    #[serde(default)]
    pub fps: Option<u32>,
}

impl FrameStreamHeader {
    pub fn new(source: impl Into<String>, fps: u32) -> Self {
        Self {
            schema_version: "1.0".to_string(),
            source: Some(source.into()),
            fps: Some(fps),
        }
    }
}

/// Parse a single stream line. Blank and comment lines yield `None`.
pub fn parse_frame_line(line: &str) -> Option<Result<HandFrame, serde_json::Error>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    Some(serde_json::from_str(trimmed))
}

/// Parse frames from JSONL content (one JSON object per line).
pub fn parse_frames(jsonl: &str) -> Result<Vec<HandFrame>, serde_json::Error> {
    jsonl.lines().filter_map(parse_frame_line).collect()
}

/// Read the stream header from the first non-blank line, if it is one.
pub fn parse_header(jsonl: &str) -> Option<FrameStreamHeader> {
    let first = jsonl.lines().map(str::trim).find(|l| !l.is_empty())?;
    let body = first.strip_prefix('#')?;
    serde_json::from_str(body.trim()).ok()
}

/// Serialize frames to JSONL, with the header as a leading comment line.
pub fn serialize_frames(
    header: Option<&FrameStreamHeader>,
    frames: &[HandFrame],
) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    if let Some(header) = header {
        output.push_str("# ");
        output.push_str(&serde_json::to_string(header)?);
        output.push('\n');
    }
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}

//! Clock and timing utilities for frame delivery.
//!
//! Landmark frames carry monotonic nanosecond timestamps relative to the
//! start of their stream. This module provides:
//! - A session clock anchored at pipeline start
//! - Conversions between nanoseconds and seconds
//! - Pacing for replaying recorded streams at their original rate

use std::time::{Duration, Instant};

/// A session clock that provides monotonic timestamps relative to a
/// fixed epoch (the moment the pipeline started).
#[derive(Debug, Clone)]
pub struct FrameClock {
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339).
    epoch_wall: String,
}

impl FrameClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Nanoseconds elapsed since the epoch.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Seconds elapsed since the epoch.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at the epoch.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }
}

/// Schedules recorded frames against a running clock so a replay
/// reproduces the original inter-frame timing.
#[derive(Debug, Default)]
pub struct ReplayPacer {
    /// Timestamp of the first frame seen; all later frames are relative to it.
    first_frame_ns: Option<u64>,
}

impl ReplayPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// How long to wait before delivering a frame stamped `frame_ns`, given
    /// that `elapsed_ns` have passed since replay started.
    ///
    /// The first frame is always due immediately. Frames that are already
    /// late are due immediately too; the pacer never tries to catch up.
    pub fn delay_for(&mut self, frame_ns: u64, elapsed_ns: u64) -> Duration {
        let first = *self.first_frame_ns.get_or_insert(frame_ns);
        let due_ns = frame_ns.saturating_sub(first);
        Duration::from_nanos(due_ns.saturating_sub(elapsed_ns))
    }
}

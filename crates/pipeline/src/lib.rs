//! Handsign Pipeline
//!
//! Drives one hand frame at a time through feature extraction,
//! classification and selection, and hands each result to a presenter.
//!
//! - **Sources:** pluggable landmark producers (recorded streams, memory)
//! - **Channel:** single-slot frame delivery with an explicit backpressure
//!   policy; the queue never grows
//! - **Coordinator:** the per-frame state machine that owns the model
//!
//! Each frame is decided on its own. Nothing is carried between frames.

pub mod channel;
pub mod coordinator;
pub mod pump;
pub mod source;

pub use channel::{frame_channel, FrameReceiver, FrameSender, SendOutcome};
pub use coordinator::{PipelineCoordinator, PipelineStats, Presenter, TrackingState};
pub use pump::{pump_source, PumpStats};
pub use source::{JsonlReplaySource, LandmarkSource, MemorySource};

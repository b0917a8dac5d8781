//! Single-slot frame hand-off between the landmark producer and the
//! coordinator.
//!
//! At most one frame is in flight. What happens when the slot is still
//! occupied is decided by [`Backpressure`]:
//! - `Block`: the producer waits until the coordinator takes the frame.
//! - `DropNewest`: the incoming frame is discarded and counted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use handsign_common::config::Backpressure;
use handsign_common::error::{HandsignError, HandsignResult};
use handsign_hand_model::HandFrame;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Result of handing one frame to the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Delivered,
    Dropped,
}

/// Producer half.
#[derive(Clone)]
pub struct FrameSender {
    tx: mpsc::Sender<HandFrame>,
    policy: Backpressure,
    dropped: Arc<AtomicU64>,
}

/// Consumer half, owned by the coordinator.
pub struct FrameReceiver {
    rx: mpsc::Receiver<HandFrame>,
    dropped: Arc<AtomicU64>,
}

/// Create a frame channel with room for one pending frame.
pub fn frame_channel(policy: Backpressure) -> (FrameSender, FrameReceiver) {
    let (tx, rx) = mpsc::channel(1);
    let dropped = Arc::new(AtomicU64::new(0));
    (
        FrameSender {
            tx,
            policy,
            dropped: dropped.clone(),
        },
        FrameReceiver { rx, dropped },
    )
}

fn closed() -> HandsignError {
    HandsignError::source("frame channel closed by consumer")
}

impl FrameSender {
    /// Hand a frame over, honouring the backpressure policy.
    pub async fn send(&self, frame: HandFrame) -> HandsignResult<SendOutcome> {
        match self.policy {
            Backpressure::Block => {
                self.tx.send(frame).await.map_err(|_| closed())?;
                Ok(SendOutcome::Delivered)
            }
            Backpressure::DropNewest => self.offer(frame),
        }
    }

    /// Blocking variant for producers running on their own thread, such
    /// as a detector callback.
    ///
    /// Must not be called from inside an async task when the policy is
    /// `Block`.
    pub fn push_blocking(&self, frame: HandFrame) -> HandsignResult<SendOutcome> {
        match self.policy {
            Backpressure::Block => {
                self.tx.blocking_send(frame).map_err(|_| closed())?;
                Ok(SendOutcome::Delivered)
            }
            Backpressure::DropNewest => self.offer(frame),
        }
    }

    fn offer(&self, frame: HandFrame) -> HandsignResult<SendOutcome> {
        match self.tx.try_send(frame) {
            Ok(()) => Ok(SendOutcome::Delivered),
            Err(TrySendError::Full(frame)) => {
                let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::trace!(t = frame.timestamp_ns, total, "Dropped frame, coordinator busy");
                Ok(SendOutcome::Dropped)
            }
            Err(TrySendError::Closed(_)) => Err(closed()),
        }
    }

    pub fn policy(&self) -> Backpressure {
        self.policy
    }

    /// Frames discarded so far under `DropNewest`.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl FrameReceiver {
    /// Next frame, or `None` once every sender is gone and the slot is empty.
    pub async fn recv(&mut self) -> Option<HandFrame> {
        self.rx.recv().await
    }

    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

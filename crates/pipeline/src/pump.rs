//! Feeds a [`LandmarkSource`] into a frame channel.

use handsign_common::clock::{FrameClock, ReplayPacer};
use handsign_common::error::HandsignResult;

use crate::channel::{FrameSender, SendOutcome};
use crate::source::LandmarkSource;

/// Counters for one pump run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    pub read: u64,
    pub delivered: u64,
    pub dropped: u64,
}

/// Read every frame from `source` and push it through `tx`.
///
/// With `realtime` set, frames are released at their recorded timestamps
/// relative to the first frame, the way a camera would deliver them.
/// Otherwise they are pushed as fast as the channel accepts them.
///
/// Returns when the source is exhausted. A source error stops the pump.
pub async fn pump_source(
    mut source: Box<dyn LandmarkSource>,
    tx: FrameSender,
    realtime: bool,
) -> HandsignResult<PumpStats> {
    let clock = FrameClock::start();
    let mut pacer = ReplayPacer::new();
    let mut stats = PumpStats::default();

    tracing::info!(
        source = source.name(),
        realtime,
        policy = ?tx.policy(),
        epoch = clock.epoch_wall(),
        "Frame pump started"
    );

    while let Some(frame) = source.next_frame()? {
        stats.read += 1;

        if realtime {
            let delay = pacer.delay_for(frame.timestamp_ns, clock.elapsed_ns());
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        match tx.send(frame).await? {
            SendOutcome::Delivered => stats.delivered += 1,
            SendOutcome::Dropped => stats.dropped += 1,
        }
    }

    tracing::info!(
        source = source.name(),
        read = stats.read,
        delivered = stats.delivered,
        dropped = stats.dropped,
        elapsed_secs = clock.elapsed_secs(),
        "Frame pump finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::frame_channel;
    use crate::source::MemorySource;
    use handsign_common::config::Backpressure;
    use handsign_common::error::HandsignError;
    use handsign_hand_model::HandFrame;

    struct FailingSource {
        served: bool,
    }

    impl LandmarkSource for FailingSource {
        fn next_frame(&mut self) -> HandsignResult<Option<HandFrame>> {
            if self.served {
                return Err(HandsignError::source("camera unplugged"));
            }
            self.served = true;
            Ok(Some(HandFrame::empty(0)))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn pump_delivers_everything_under_block() {
        let (tx, mut rx) = frame_channel(Backpressure::Block);
        let source = MemorySource::new((0..5).map(HandFrame::empty));
        let pump = tokio::spawn(pump_source(Box::new(source), tx, false));

        let mut received = 0;
        while rx.recv().await.is_some() {
            received += 1;
        }
        let stats = pump.await.unwrap().unwrap();
        assert_eq!(received, 5);
        assert_eq!(
            stats,
            PumpStats {
                read: 5,
                delivered: 5,
                dropped: 0
            }
        );
    }

    #[tokio::test]
    async fn pump_accounts_for_drops_when_nobody_reads() {
        let (tx, mut rx) = frame_channel(Backpressure::DropNewest);
        let source = MemorySource::new((0..4).map(HandFrame::empty));
        let stats = pump_source(Box::new(source), tx, false).await.unwrap();

        assert_eq!(stats.read, 4);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.dropped, 3);
        assert_eq!(rx.dropped(), 3);
        assert_eq!(rx.recv().await.unwrap().timestamp_ns, 0);
    }

    #[tokio::test]
    async fn realtime_pump_waits_for_recorded_timestamps() {
        let (tx, mut rx) = frame_channel(Backpressure::Block);
        let frames = [0, 20_000_000, 40_000_000].map(HandFrame::empty);
        let start = std::time::Instant::now();
        let pump = tokio::spawn(pump_source(Box::new(MemorySource::new(frames)), tx, true));

        while rx.recv().await.is_some() {}
        pump.await.unwrap().unwrap();
        assert!(start.elapsed() >= std::time::Duration::from_millis(35));
    }

    #[tokio::test]
    async fn source_error_stops_the_pump() {
        let (tx, mut rx) = frame_channel(Backpressure::Block);
        let pump = tokio::spawn(pump_source(
            Box::new(FailingSource { served: false }),
            tx,
            false,
        ));
        assert!(rx.recv().await.is_some());
        let err = pump.await.unwrap().unwrap_err();
        assert!(matches!(err, HandsignError::Source { .. }));
    }
}

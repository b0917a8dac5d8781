//! Per-frame orchestration: landmarks → angles → scores → class index.
//!
//! Each frame is either `Idle` (no hand, nothing runs) or `Tracking`
//! (extract, classify, select, present). The state is decided from the
//! current frame alone.

use std::time::{Duration, Instant};

use handsign_classifier::GestureClassifier;
use handsign_common::config::AppConfig;
use handsign_common::error::{HandsignError, HandsignResult};
use handsign_hand_model::{ClassificationResult, HandFrame, HandLandmarks, TimestampNs};
use handsign_processing_core::selector::select_with_score;
use handsign_processing_core::FeatureExtractor;
use serde::Serialize;

use crate::channel::FrameReceiver;

/// Timing summaries are logged every this many frames.
const PROFILE_EVERY: u64 = 300;

/// Receives every classification the pipeline produces.
pub trait Presenter {
    fn present(&mut self, result: &ClassificationResult);
}

impl<F> Presenter for F
where
    F: FnMut(&ClassificationResult),
{
    fn present(&mut self, result: &ClassificationResult) {
        self(result)
    }
}

/// Per-frame state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingState {
    Idle,
    Tracking,
}

/// Counters accumulated over the coordinator's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PipelineStats {
    pub frames: u64,
    pub idle_frames: u64,
    pub classified: u64,
    pub failed: u64,
    /// Frames the channel discarded before they reached the coordinator.
    pub dropped: u64,
    pub extract_time: Duration,
    pub classify_time: Duration,
}

impl PipelineStats {
    fn tracked(&self) -> u64 {
        self.classified + self.failed
    }

    /// Mean feature extraction time per tracked frame, in milliseconds.
    pub fn mean_extract_ms(&self) -> f64 {
        mean_ms(self.extract_time, self.tracked())
    }

    /// Mean classification time per tracked frame, in milliseconds.
    pub fn mean_classify_ms(&self) -> f64 {
        mean_ms(self.classify_time, self.tracked())
    }
}

fn mean_ms(total: Duration, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total.as_secs_f64() * 1000.0 / count as f64
}

/// Drives frames through extraction, classification and selection.
///
/// Owns the classifier, so the model lives exactly as long as the
/// coordinator.
pub struct PipelineCoordinator<P> {
    extractor: FeatureExtractor,
    classifier: GestureClassifier,
    presenter: P,
    state: TrackingState,
    stats: PipelineStats,
}

impl<P: Presenter> PipelineCoordinator<P> {
    pub fn new(extractor: FeatureExtractor, classifier: GestureClassifier, presenter: P) -> Self {
        tracing::info!(
            backend = classifier.backend(),
            mapping = ?extractor.mapping(),
            "Pipeline coordinator started"
        );
        Self {
            extractor,
            classifier,
            presenter,
            state: TrackingState::Idle,
            stats: PipelineStats::default(),
        }
    }

    /// Load the configured model and build a coordinator around it.
    ///
    /// Fails with `ModelLoad` or `ShapeMismatch` before any frame is seen.
    pub fn from_config(config: &AppConfig, presenter: P) -> HandsignResult<Self> {
        let classifier = GestureClassifier::load(&config.model)?;
        let extractor = FeatureExtractor::new(config.pipeline.parent_mapping);
        Ok(Self::new(extractor, classifier, presenter))
    }

    /// Handle one frame.
    ///
    /// Returns the result that was presented, if any. Errors are logged and
    /// counted; they never end the pipeline.
    pub fn process_frame(&mut self, frame: &HandFrame) -> Option<ClassificationResult> {
        self.stats.frames += 1;

        let Some(hand) = frame.hand.as_ref() else {
            self.state = TrackingState::Idle;
            self.stats.idle_frames += 1;
            return None;
        };
        self.state = TrackingState::Tracking;

        match self.track(frame.timestamp_ns, hand) {
            Ok(result) => {
                self.stats.classified += 1;
                tracing::debug!(
                    t = result.timestamp_ns,
                    index = result.index,
                    score = result.score,
                    "Classified frame"
                );
                self.presenter.present(&result);
                Some(result)
            }
            Err(e) => {
                self.stats.failed += 1;
                log_frame_error(frame.timestamp_ns, &e);
                None
            }
        }
    }

    fn track(
        &mut self,
        timestamp_ns: TimestampNs,
        hand: &HandLandmarks,
    ) -> HandsignResult<ClassificationResult> {
        let t0 = Instant::now();
        let features = self.extractor.extract(hand);
        let t1 = Instant::now();
        self.stats.extract_time += t1 - t0;
        let features = features?;

        let scores = self.classifier.classify(&features.to_model_input());
        self.stats.classify_time += t1.elapsed();
        let (index, score) = select_with_score(&scores?);

        Ok(ClassificationResult {
            timestamp_ns,
            index,
            score,
        })
    }

    /// Consume frames until every sender is gone.
    pub async fn run(&mut self, mut frames: FrameReceiver) -> PipelineStats {
        while let Some(frame) = frames.recv().await {
            self.process_frame(&frame);

            if self.stats.frames % PROFILE_EVERY == 0 {
                tracing::info!(
                    frames = self.stats.frames,
                    idle = self.stats.idle_frames,
                    failed = self.stats.failed,
                    dropped = frames.dropped(),
                    extract_ms = self.stats.mean_extract_ms(),
                    classify_ms = self.stats.mean_classify_ms(),
                    "Pipeline timings"
                );
            }
        }

        self.stats.dropped = frames.dropped();
        tracing::info!(
            frames = self.stats.frames,
            classified = self.stats.classified,
            idle = self.stats.idle_frames,
            failed = self.stats.failed,
            dropped = self.stats.dropped,
            "Frame stream ended"
        );
        self.stats
    }

    /// Stop the pipeline and release the model.
    pub fn shutdown(self) -> PipelineStats {
        tracing::info!(
            frames = self.stats.frames,
            inferences = self.classifier.inferences(),
            "Pipeline coordinator stopped"
        );
        self.stats
    }

    pub fn state(&self) -> TrackingState {
        self.state
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}

fn log_frame_error(timestamp_ns: TimestampNs, error: &HandsignError) {
    if error.is_frame_local() {
        tracing::warn!(t = timestamp_ns, error = %error, "Frame skipped");
    } else {
        tracing::error!(t = timestamp_ns, error = %error, "Frame failed");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use handsign_classifier::GestureModel;
    use handsign_common::config::Backpressure;
    use handsign_hand_model::{Landmark, LANDMARK_COUNT};

    use super::*;
    use crate::channel::frame_channel;

    /// Returns fixed scores and counts invocations.
    struct CountingModel {
        calls: Arc<AtomicUsize>,
        scores: Vec<f32>,
    }

    impl GestureModel for CountingModel {
        fn input_len(&self) -> usize {
            15
        }
        fn output_len(&self) -> usize {
            26
        }
        fn run(&mut self, _input: &[f32]) -> HandsignResult<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.scores.clone())
        }
        fn name(&self) -> &str {
            "counting"
        }
    }

    fn peaked_scores(peak: usize) -> Vec<f32> {
        let mut scores = vec![0.0; 26];
        scores[peak] = 0.9;
        scores
    }

    fn coordinator_with<P: Presenter>(
        scores: Vec<f32>,
        presenter: P,
    ) -> (PipelineCoordinator<P>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let model = CountingModel {
            calls: calls.clone(),
            scores,
        };
        let classifier = GestureClassifier::new(Box::new(model)).unwrap();
        (
            PipelineCoordinator::new(FeatureExtractor::default(), classifier, presenter),
            calls,
        )
    }

    fn straight_hand() -> HandLandmarks {
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        for (i, p) in points.iter_mut().enumerate() {
            *p = Landmark::new(0.1 + i as f32 * 0.04, 0.5, 0.0);
        }
        HandLandmarks::new(points)
    }

    #[test]
    fn idle_frames_never_reach_the_model() {
        let (mut coordinator, calls) = coordinator_with(peaked_scores(3), |_: &ClassificationResult| {
            panic!("no result expected for idle frames")
        });

        for t in 0..5 {
            assert!(coordinator.process_frame(&HandFrame::empty(t)).is_none());
            assert_eq!(coordinator.state(), TrackingState::Idle);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(coordinator.stats().idle_frames, 5);
        assert_eq!(coordinator.stats().extract_time, Duration::ZERO);
    }

    #[test]
    fn tracking_frame_presents_arg_max() {
        let mut seen = Vec::new();
        let (mut coordinator, calls) =
            coordinator_with(peaked_scores(7), |r: &ClassificationResult| seen.push(*r));

        let result = coordinator
            .process_frame(&HandFrame::with_hand(42, straight_hand()))
            .unwrap();
        assert_eq!(coordinator.state(), TrackingState::Tracking);
        assert_eq!(result.index, 7);
        assert_eq!(result.timestamp_ns, 42);
        assert!((result.score - 0.9).abs() < 1e-6);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        drop(coordinator);
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].index, 7);
    }

    #[test]
    fn states_follow_each_frame_without_memory() {
        let (mut coordinator, _) = coordinator_with(peaked_scores(0), |_: &ClassificationResult| {});

        coordinator.process_frame(&HandFrame::with_hand(0, straight_hand()));
        assert_eq!(coordinator.state(), TrackingState::Tracking);
        coordinator.process_frame(&HandFrame::empty(1));
        assert_eq!(coordinator.state(), TrackingState::Idle);
        coordinator.process_frame(&HandFrame::with_hand(2, straight_hand()));
        assert_eq!(coordinator.state(), TrackingState::Tracking);
    }

    #[test]
    fn degenerate_hand_is_skipped_and_pipeline_continues() {
        let (mut coordinator, calls) = coordinator_with(peaked_scores(2), |_: &ClassificationResult| {});

        let mut bad = straight_hand();
        bad.0[3] = bad.0[2];
        assert!(coordinator.process_frame(&HandFrame::with_hand(0, bad)).is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let next = coordinator.process_frame(&HandFrame::with_hand(1, straight_hand()));
        assert_eq!(next.map(|r| r.index), Some(2));

        let stats = coordinator.shutdown();
        assert_eq!(stats.frames, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.classified, 1);
    }

    #[test]
    fn bad_model_output_counts_as_failed_frame() {
        let (mut coordinator, calls) = coordinator_with(vec![1.0; 20], |_: &ClassificationResult| {});

        assert!(coordinator
            .process_frame(&HandFrame::with_hand(0, straight_hand()))
            .is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(coordinator.stats().failed, 1);
    }

    #[tokio::test]
    async fn run_drains_channel_and_reports_stats() {
        let (tx, rx) = frame_channel(Backpressure::Block);
        let producer = tokio::spawn(async move {
            for t in 0..6u64 {
                let frame = if t % 2 == 0 {
                    HandFrame::with_hand(t, straight_hand())
                } else {
                    HandFrame::empty(t)
                };
                tx.send(frame).await.unwrap();
            }
        });

        let mut indices = Vec::new();
        let (mut coordinator, _) =
            coordinator_with(peaked_scores(11), |r: &ClassificationResult| indices.push(r.index));
        let stats = coordinator.run(rx).await;
        producer.await.unwrap();

        assert_eq!(stats.frames, 6);
        assert_eq!(stats.classified, 3);
        assert_eq!(stats.idle_frames, 3);
        assert_eq!(stats.dropped, 0);
        drop(coordinator);
        assert_eq!(indices, vec![11, 11, 11]);
    }
}

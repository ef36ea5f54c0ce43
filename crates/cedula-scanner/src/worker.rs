//! Cooperative driver loop: capture, recognize, merge, repeat

use crate::{ScanMetrics, ScannerConfig, ScannerError};
use cedula_accumulator::{ScanSession, ScanState};
use cedula_domain::traits::{FieldExtractor, FrameSource, Recognizer};
use cedula_domain::{Frame, Snapshot};
use cedula_extractor::CedulaExtractor;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};

/// Outcome of one sampling tick
enum Tick {
    /// A snapshot was merged
    Merged(ScanState),
    /// No snapshot this tick (capture or recognizer failure)
    Skipped,
    /// The capture source has no more frames
    Exhausted,
}

/// Background worker that samples frames into a scan session
///
/// One frame is in flight at a time: the worker awaits the recognizer before
/// taking the next tick, and late ticks are delayed rather than bunched up.
/// Recognizer calls run on the blocking pool under the configured timeout.
/// A call that times out keeps running there; until it returns, ticks are
/// skipped without capturing a frame.
/// Failures are logged and counted, never propagated into the session.
///
/// Every merged state is published on a watch channel (see
/// [`subscribe`](Self::subscribe)).
///
/// # Examples
///
/// ```no_run
/// use cedula_scanner::{ReplaySource, ScanWorker, ScannerConfig, TranscriptRecognizer};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let source = ReplaySource::from_transcripts(["Número de Cédula: 1-0234-0567"]).looping(true);
///     let mut worker = ScanWorker::new(ScannerConfig::default());
///
///     // Run until the record is complete or Ctrl+C
///     let state = worker.run(source, TranscriptRecognizer).await?;
///     println!("{}", state.score);
///     Ok(())
/// }
/// ```
pub struct ScanWorker<E = CedulaExtractor> {
    session: ScanSession<E>,
    config: ScannerConfig,
    metrics: ScanMetrics,
    observer: watch::Sender<ScanState>,
    in_flight: Option<JoinHandle<Result<String, ScannerError>>>,
}

impl ScanWorker<CedulaExtractor> {
    /// Create a worker using the default extractor
    pub fn new(config: ScannerConfig) -> Self {
        Self::with_extractor(config, CedulaExtractor::default_config())
    }

    /// Create a worker with default configuration
    pub fn default_config() -> Self {
        Self::new(ScannerConfig::default())
    }
}

impl<E: FieldExtractor> ScanWorker<E> {
    /// Create a worker using a specific extractor
    pub fn with_extractor(config: ScannerConfig, extractor: E) -> Self {
        let (observer, _) = watch::channel(ScanState::default());
        Self {
            session: ScanSession::new(extractor),
            config,
            metrics: ScanMetrics::new(),
            observer,
            in_flight: None,
        }
    }

    /// Receive the state after every merge
    ///
    /// The channel also sees the empty state published when a run starts
    /// and when it stops.
    pub fn subscribe(&self) -> watch::Receiver<ScanState> {
        self.observer.subscribe()
    }

    /// Get the worker configuration
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Get a reference to the metrics of the last run
    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    /// Reset the metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Run until the record completes, the source is exhausted, or Ctrl+C
    ///
    /// Returns the last state before the session was stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub async fn run<S, R>(&mut self, source: S, recognizer: R) -> Result<ScanState, ScannerError>
    where
        S: FrameSource,
        S::Error: Display,
        R: Recognizer + Send + Sync + 'static,
        R::Error: Display,
    {
        self.run_until(source, recognizer, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Unable to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Run until `shutdown` resolves, or an earlier stop condition
    ///
    /// Stop conditions: the record completes (when `stop_on_complete`),
    /// `max_frames` ticks were taken, or the source is exhausted. The
    /// shutdown future is only observed between ticks.
    ///
    /// Returns the last state before the session was stopped.
    pub async fn run_until<S, R, F>(
        &mut self,
        mut source: S,
        recognizer: R,
        shutdown: F,
    ) -> Result<ScanState, ScannerError>
    where
        S: FrameSource,
        S::Error: Display,
        R: Recognizer + Send + Sync + 'static,
        R::Error: Display,
        F: Future<Output = ()>,
    {
        self.config.validate().map_err(ScannerError::Config)?;

        let recognizer = Arc::new(recognizer);
        let started = Instant::now();
        let mut ticker = interval(self.config.sample_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        self.observer.send_replace(self.session.start());

        tracing::info!(
            "Scan worker started (interval: {:?}, recognizer timeout: {:?})",
            self.config.sample_interval(),
            self.config.recognizer_timeout()
        );

        let mut ticks: u64 = 0;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    ticks += 1;

                    match self.tick(&mut source, &recognizer).await {
                        Tick::Merged(state) if state.is_complete() && self.config.stop_on_complete => {
                            tracing::info!("Record complete after {} tick(s), stopping", ticks);
                            break;
                        }
                        Tick::Exhausted => {
                            tracing::info!("Frame source exhausted, stopping");
                            break;
                        }
                        Tick::Merged(_) | Tick::Skipped => {}
                    }

                    if self.config.max_frames.is_some_and(|max| ticks >= max) {
                        tracing::info!("Reached max_frames ({}), stopping", ticks);
                        break;
                    }
                }
                _ = &mut shutdown => {
                    tracing::info!("Shutdown signal received, stopping scanner");
                    break;
                }
            }
        }

        self.metrics.total_runtime_ms += started.elapsed().as_millis() as u64;

        let last = self.session.stop();
        self.observer.send_replace(self.session.current());

        tracing::info!("Scan worker stopped at {}. Metrics:\n{}", last.score, self.metrics.summary());

        Ok(last)
    }

    /// Take one frame through capture, recognition and merge
    async fn tick<S, R>(&mut self, source: &mut S, recognizer: &Arc<R>) -> Tick
    where
        S: FrameSource,
        S::Error: Display,
        R: Recognizer + Send + Sync + 'static,
        R::Error: Display,
    {
        if self.recognizer_busy() {
            tracing::debug!("Recognizer still busy with a timed-out frame, skipping tick");
            self.metrics.record_busy_tick();
            return Tick::Skipped;
        }

        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => return Tick::Exhausted,
            Err(e) => {
                let err = ScannerError::Capture(e.to_string());
                tracing::warn!("{}", err);
                self.metrics.record_capture_failure();
                return Tick::Skipped;
            }
        };
        self.metrics.record_frame();

        let sequence = frame.sequence;
        let text = match self.recognize(recognizer, frame).await {
            Ok(text) => text,
            Err(err @ ScannerError::Timeout(_)) => {
                tracing::warn!("Frame {}: {}", sequence, err);
                self.metrics.record_recognizer_timeout();
                return Tick::Skipped;
            }
            Err(err) => {
                tracing::warn!("Frame {}: {}", sequence, err);
                self.metrics.record_recognizer_failure();
                return Tick::Skipped;
            }
        };

        let snapshot = Snapshot::from_text(&text);
        let state = self.session.frame_observed(&snapshot);
        self.metrics
            .record_merge(self.session.last_report(), snapshot.is_empty());

        let report = self.session.last_report();
        if !report.is_noop() {
            tracing::debug!(
                "Frame {}: {} new, {} replaced, now {}",
                sequence,
                report.detected.len(),
                report.replaced.len(),
                state.score
            );
        }

        if state.is_complete() {
            self.metrics.record_completion();
        }

        self.observer.send_replace(state.clone());
        Tick::Merged(state)
    }

    /// Check if a timed-out recognizer call is still running
    fn recognizer_busy(&mut self) -> bool {
        let busy = self
            .in_flight
            .as_ref()
            .is_some_and(|task| !task.is_finished());
        if !busy {
            self.in_flight = None;
        }
        busy
    }

    /// Run the recognizer on the blocking pool under the configured timeout
    ///
    /// On timeout the task is kept in `in_flight` rather than dropped, since
    /// a blocking task cannot be cancelled.
    async fn recognize<R>(&mut self, recognizer: &Arc<R>, frame: Frame) -> Result<String, ScannerError>
    where
        R: Recognizer + Send + Sync + 'static,
        R::Error: Display,
    {
        let recognizer = Arc::clone(recognizer);
        let limit = self.config.recognizer_timeout();

        let mut task = tokio::task::spawn_blocking(move || {
            recognizer
                .recognize(&frame)
                .map_err(|e| ScannerError::Recognizer(e.to_string()))
        });

        match timeout(limit, &mut task).await {
            Ok(joined) => {
                joined.map_err(|e| ScannerError::Recognizer(format!("Task join error: {}", e)))?
            }
            Err(_) => {
                self.in_flight = Some(task);
                Err(ScannerError::Timeout(limit))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MockRecognizer, ReplaySource, TranscriptRecognizer};
    use cedula_domain::{Field, Score};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const FRONT: &str = "Número de Cédula: 1-0234-0567\nJUAN PEREZ GOMEZ\nMASCULINO\nFecha de Nacimiento: 01/01/1990";
    const BACK: &str = "Lugar de Nacimiento: Cartago\nNombre del Padre: Pedro Perez\nNombre de la Madre: Ana Gomez\nDomicilio Electoral: Escazu\nVencimiento: 15/03/2031";

    fn fast_config() -> ScannerConfig {
        ScannerConfig {
            sample_interval_ms: 1,
            recognizer_timeout_ms: 1_000,
            ..Default::default()
        }
    }

    // Capture source whose every other tick fails
    struct FlakySource {
        inner: ReplaySource,
        calls: usize,
    }

    impl FrameSource for FlakySource {
        type Error = String;

        fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error> {
            self.calls += 1;
            if self.calls % 2 == 1 {
                return Err("device busy".to_string());
            }
            Ok(self.inner.next_frame().unwrap_or(None))
        }
    }

    #[tokio::test]
    async fn test_worker_creation() {
        let worker = ScanWorker::default_config();
        assert_eq!(worker.metrics(), &ScanMetrics::default());
        assert!(worker.subscribe().borrow().record.is_empty());
    }

    #[tokio::test]
    async fn test_stops_when_complete() {
        let source = ReplaySource::from_transcripts([FRONT, "noise", BACK, FRONT]);
        let mut worker = ScanWorker::new(fast_config());

        let state = worker
            .run_until(source, TranscriptRecognizer, std::future::pending())
            .await
            .unwrap();

        assert_eq!(state.score, Score::COMPLETE);
        assert_eq!(state.record.get(Field::ExpirationDate), Some("15/03/2031"));
        // The fourth transcript is never sampled
        assert_eq!(worker.metrics().frames_captured, 3);
        assert_eq!(worker.metrics().completed_after, Some(3));
        assert_eq!(worker.metrics().fields_detected, 9);
    }

    #[tokio::test]
    async fn test_keeps_sampling_until_exhausted() {
        let source = ReplaySource::from_transcripts([FRONT, BACK, FRONT]);
        let config = ScannerConfig {
            stop_on_complete: false,
            ..fast_config()
        };
        let mut worker = ScanWorker::new(config);

        let state = worker
            .run_until(source, TranscriptRecognizer, std::future::pending())
            .await
            .unwrap();

        assert!(state.is_complete());
        assert_eq!(worker.metrics().frames_captured, 3);
        assert_eq!(worker.metrics().snapshots_merged, 3);
    }

    #[tokio::test]
    async fn test_max_frames() {
        let source = ReplaySource::from_transcripts(["noise"]).looping(true);
        let config = ScannerConfig {
            max_frames: Some(5),
            ..fast_config()
        };
        let mut worker = ScanWorker::new(config);

        let state = worker
            .run_until(source, TranscriptRecognizer, std::future::pending())
            .await
            .unwrap();

        assert!(state.record.is_empty());
        assert_eq!(worker.metrics().frames_captured, 5);
    }

    #[tokio::test]
    async fn test_recognizer_failures_are_swallowed() {
        let recognizer = MockRecognizer::new("");
        recognizer.push_text(FRONT);
        recognizer.push_error("blurry frame");
        recognizer.push_text(BACK);

        let source = ReplaySource::from_transcripts(["", "", "", ""]);
        let mut worker = ScanWorker::new(fast_config());

        let state = worker
            .run_until(source, recognizer.clone(), std::future::pending())
            .await
            .unwrap();

        assert!(state.is_complete());
        assert_eq!(recognizer.call_count(), 3);
        assert_eq!(worker.metrics().recognizer_failures, 1);
        assert_eq!(worker.metrics().snapshots_merged, 2);
    }

    #[tokio::test]
    async fn test_recognizer_timeout_is_skipped() {
        let recognizer = MockRecognizer::new(FRONT).with_delay(Duration::from_millis(200));
        let source = ReplaySource::from_transcripts([""]);
        let config = ScannerConfig {
            recognizer_timeout_ms: 10,
            ..fast_config()
        };
        let mut worker = ScanWorker::new(config);

        let state = worker
            .run_until(source, recognizer, std::future::pending())
            .await
            .unwrap();

        assert!(state.record.is_empty());
        assert_eq!(worker.metrics().recognizer_timeouts, 1);
        assert_eq!(worker.metrics().snapshots_merged, 0);
    }

    // Tracks how many recognize calls run at once
    #[derive(Clone, Default)]
    struct SlowRecognizer {
        running: Arc<AtomicUsize>,
        max_running: Arc<AtomicUsize>,
        calls: Arc<AtomicUsize>,
    }

    impl Recognizer for SlowRecognizer {
        type Error = std::convert::Infallible;

        fn recognize(&self, _frame: &Frame) -> Result<String, Self::Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_running.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(60));
            self.running.fetch_sub(1, Ordering::SeqCst);
            Ok(FRONT.to_string())
        }
    }

    #[tokio::test]
    async fn test_timed_out_calls_never_overlap() {
        let recognizer = SlowRecognizer::default();
        let source = ReplaySource::from_transcripts(["", "", "", "", "", ""]);
        let config = ScannerConfig {
            recognizer_timeout_ms: 10,
            ..fast_config()
        };
        let mut worker = ScanWorker::new(config);

        let state = worker
            .run_until(source, recognizer.clone(), std::future::pending())
            .await
            .unwrap();

        assert!(state.record.is_empty());
        assert_eq!(recognizer.max_running.load(Ordering::SeqCst), 1);
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 6);
        assert_eq!(worker.metrics().recognizer_timeouts, 6);
        assert!(worker.metrics().busy_ticks > 0);
    }

    #[tokio::test]
    async fn test_capture_failures_are_swallowed() {
        let source = FlakySource {
            inner: ReplaySource::from_transcripts([FRONT, BACK]),
            calls: 0,
        };
        let mut worker = ScanWorker::new(fast_config());

        let state = worker
            .run_until(source, TranscriptRecognizer, std::future::pending())
            .await
            .unwrap();

        assert!(state.is_complete());
        assert_eq!(worker.metrics().capture_failures, 2);
        assert_eq!(worker.metrics().frames_captured, 2);
    }

    #[tokio::test]
    async fn test_shutdown_future_stops_the_loop() {
        let source = ReplaySource::from_transcripts(["noise"]).looping(true);
        let mut worker = ScanWorker::new(fast_config());

        let state = worker
            .run_until(source, TranscriptRecognizer, async {})
            .await
            .unwrap();

        assert!(state.record.is_empty());
    }

    #[tokio::test]
    async fn test_observer_sees_merged_states() {
        let source = ReplaySource::from_transcripts([FRONT, BACK]).looping(true);
        let config = ScannerConfig {
            stop_on_complete: false,
            ..fast_config()
        };
        let mut worker = ScanWorker::new(config);
        let mut observer = worker.subscribe();

        // Stop as soon as an observer sees the complete record
        let shutdown = async move {
            let _ = observer.wait_for(|state| state.is_complete()).await;
        };

        let state = worker
            .run_until(source, TranscriptRecognizer, shutdown)
            .await
            .unwrap();

        assert!(state.is_complete());
        // Stopping publishes the cleared state
        assert!(worker.subscribe().borrow().record.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let config = ScannerConfig {
            sample_interval_ms: 0,
            ..Default::default()
        };
        let mut worker = ScanWorker::new(config);

        let result = worker
            .run_until(ReplaySource::default(), TranscriptRecognizer, std::future::pending())
            .await;

        assert!(matches!(result, Err(ScannerError::Config(_))));
    }

    #[tokio::test]
    async fn test_reset_metrics() {
        let mut worker = ScanWorker::new(fast_config());
        worker
            .run_until(
                ReplaySource::from_transcripts([FRONT]),
                TranscriptRecognizer,
                std::future::pending(),
            )
            .await
            .unwrap();
        assert_eq!(worker.metrics().frames_captured, 1);

        worker.reset_metrics();
        assert_eq!(worker.metrics().frames_captured, 0);
    }
}

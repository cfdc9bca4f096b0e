//! Cancellable processing loop over an async pose estimator.
//!
//! The host's open-ended frame-scheduling callback is represented here as an
//! explicit loop with a start/stop handle. Exactly one inference is in
//! flight at any time: each cycle awaits the estimator before the next one
//! is issued, so a slow or remote estimator makes the loop run slower rather
//! than letting requests overlap.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use formsense_core::{EngineError, EngineResult, FeedbackSink, PoseEstimator};
use tracing::{debug, info, warn};

use crate::session::SessionEngine;

/// Configuration for a [`SessionRunner`].
#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
    /// Pacing delay between cycles; zero runs the cycles back to back
    pub frame_interval: Duration,
    /// Consecutive recoverable estimator failures tolerated before the loop
    /// gives up
    pub max_consecutive_failures: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            // Roughly 30 frames per second.
            frame_interval: Duration::from_millis(33),
            max_consecutive_failures: 30,
        }
    }
}

/// Handle for stopping a running [`SessionRunner`] from outside the loop.
#[derive(Debug, Clone, Default)]
pub struct RunnerHandle {
    running: Arc<AtomicBool>,
}

impl RunnerHandle {
    /// Creates a fresh handle, to be shared with a runner via
    /// [`SessionRunner::with_handle`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the loop to stop after the current cycle.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Returns `true` while the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Summary of a completed processing session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames received from the estimator
    pub frames_received: u64,
    /// Frames that produced an emitted output (not skipped)
    pub frames_processed: u64,
    /// Final repetition count
    pub rep_count: u32,
}

/// Drives a [`SessionEngine`] against a [`PoseEstimator`] and a
/// [`FeedbackSink`] until stopped.
pub struct SessionRunner<E, S> {
    engine: SessionEngine,
    estimator: E,
    sink: S,
    config: RunnerConfig,
    running: Arc<AtomicBool>,
}

impl<E, S> SessionRunner<E, S>
where
    E: PoseEstimator,
    S: FeedbackSink,
{
    /// Creates a runner with its own stop handle.
    #[must_use]
    pub fn new(engine: SessionEngine, estimator: E, sink: S, config: RunnerConfig) -> Self {
        Self::with_handle(engine, estimator, sink, config, RunnerHandle::new())
    }

    /// Creates a runner sharing an externally created stop handle.
    ///
    /// Useful when the estimator itself needs to end the session, e.g. a
    /// replay source stopping the loop at the end of its recording.
    #[must_use]
    pub fn with_handle(
        engine: SessionEngine,
        estimator: E,
        sink: S,
        config: RunnerConfig,
        handle: RunnerHandle,
    ) -> Self {
        Self {
            engine,
            estimator,
            sink,
            config,
            running: handle.running,
        }
    }

    /// Returns a handle that can stop this runner.
    #[must_use]
    pub fn handle(&self) -> RunnerHandle {
        RunnerHandle {
            running: Arc::clone(&self.running),
        }
    }

    /// Runs the processing loop until stopped or until the estimator fails
    /// persistently.
    ///
    /// Recoverable estimator failures are logged and retried on the next
    /// cycle; the previously emitted display state persists across them.
    ///
    /// # Errors
    ///
    /// Returns an error when the estimator fails non-recoverably, or when it
    /// fails recoverably more than `max_consecutive_failures` times in a row.
    pub async fn run(mut self) -> EngineResult<SessionStats> {
        self.running.store(true, Ordering::SeqCst);
        info!(exercise = %self.engine.exercise(), "session started");

        let mut stats = SessionStats::default();
        let mut consecutive_failures = 0u32;

        while self.running.load(Ordering::SeqCst) {
            match self.estimator.estimate().await {
                Ok(Some(frame)) => {
                    consecutive_failures = 0;
                    stats.frames_received += 1;
                    if let Some(output) = self.engine.process_frame(&frame) {
                        stats.frames_processed += 1;
                        stats.rep_count = output.rep_count;
                        self.sink.emit(&output);
                    }
                }
                Ok(None) => {
                    // No person in the frame this cycle.
                    consecutive_failures = 0;
                }
                Err(error) if error.is_recoverable() => {
                    consecutive_failures += 1;
                    warn!(
                        %error,
                        consecutive_failures,
                        "pose inference failed, retrying next cycle"
                    );
                    if consecutive_failures >= self.config.max_consecutive_failures {
                        self.running.store(false, Ordering::SeqCst);
                        return Err(EngineError::from(error));
                    }
                }
                Err(error) => {
                    self.running.store(false, Ordering::SeqCst);
                    return Err(EngineError::from(error));
                }
            }

            if !self.config.frame_interval.is_zero() {
                tokio::time::sleep(self.config.frame_interval).await;
            }
        }

        stats.rep_count = self.engine.rep_count();
        debug!(
            frames_received = stats.frames_received,
            frames_processed = stats.frames_processed,
            rep_count = stats.rep_count,
            "session stopped"
        );
        Ok(stats)
    }
}

//! The `replay` subcommand: drive the engine with a recorded stream.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use formsense_core::{
    EstimatorError, FeedbackSink, FrameOutput, Keypoint, PoseEstimator, PoseFrame, Timestamp,
};
use formsense_engine::{
    EngineConfig, EvaluationMode, RunnerConfig, RunnerHandle, SessionEngine, SessionRunner,
};

use crate::ReplayCmd;

/// One recorded pose frame, one JSON object per line of the input file.
#[derive(Debug, Deserialize)]
struct RecordedFrame {
    /// Capture time in milliseconds since the start of the recording
    timestamp_ms: i64,
    /// Observed landmarks
    keypoints: Vec<Keypoint>,
}

impl From<RecordedFrame> for PoseFrame {
    fn from(record: RecordedFrame) -> Self {
        PoseFrame::from_keypoints(Timestamp::from_millis(record.timestamp_ms), record.keypoints)
    }
}

/// Reads a recording: one JSON pose frame per line, blank lines ignored.
fn load_frames(path: &Path) -> anyhow::Result<VecDeque<PoseFrame>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open recording '{}'", path.display()))?;
    let reader = BufReader::new(file);

    let mut frames = VecDeque::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: RecordedFrame = serde_json::from_str(&line)
            .with_context(|| format!("malformed frame on line {}", line_no + 1))?;
        frames.push_back(record.into());
    }
    Ok(frames)
}

/// Serves recorded frames one per cycle, then stops the session at the end
/// of the recording.
struct ReplayEstimator {
    frames: VecDeque<PoseFrame>,
    handle: RunnerHandle,
}

#[async_trait]
impl PoseEstimator for ReplayEstimator {
    async fn estimate(&mut self) -> Result<Option<PoseFrame>, EstimatorError> {
        match self.frames.pop_front() {
            Some(frame) => Ok(Some(frame)),
            None => {
                self.handle.stop();
                Ok(None)
            }
        }
    }
}

/// Prints each emitted result the way the live overlay renders it.
struct ConsoleSink;

impl FeedbackSink for ConsoleSink {
    fn emit(&mut self, output: &FrameOutput) {
        println!(
            "{}: {} | Count: {}",
            output.exercise, output.evaluation, output.rep_count
        );
    }
}

/// Executes the `replay` subcommand.
pub async fn execute(cmd: ReplayCmd) -> anyhow::Result<()> {
    let frames = load_frames(&cmd.input)?;
    info!(
        frames = frames.len(),
        input = %cmd.input.display(),
        "recording loaded"
    );

    let mode = if cmd.binary {
        EvaluationMode::Binary
    } else {
        EvaluationMode::Graded
    };
    let mut builder = EngineConfig::builder()
        .exercise(cmd.exercise.into())
        .mode(mode)
        .rep_policy(cmd.policy.into());
    if let Some(debounce_ms) = cmd.debounce_ms {
        builder = builder.debounce_window(Duration::from_millis(debounce_ms));
    }
    let config = builder.build();

    let handle = RunnerHandle::new();
    let estimator = ReplayEstimator {
        frames,
        handle: handle.clone(),
    };
    let runner = SessionRunner::with_handle(
        SessionEngine::new(config),
        estimator,
        ConsoleSink,
        RunnerConfig {
            frame_interval: Duration::from_millis(cmd.interval_ms),
            max_consecutive_failures: 30,
        },
        handle,
    );

    let stats = runner.run().await?;
    println!(
        "Replayed {} frames ({} evaluated). Final count: {}",
        stats.frames_received, stats.frames_processed, stats.rep_count
    );
    Ok(())
}

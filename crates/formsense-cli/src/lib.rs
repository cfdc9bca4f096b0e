//! Command-line interface for the FormSense engine.
//!
//! The CLI replays recorded keypoint streams through the evaluation engine,
//! printing the per-frame feedback and the final repetition count. It stands
//! in for the live capture/render surface, which is outside the engine's
//! scope.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use formsense_core::ExerciseKind;
use formsense_engine::RepPolicy;

pub mod replay;

/// FormSense: exercise form evaluation and repetition counting.
#[derive(Debug, Parser)]
#[command(name = "formsense", version, about)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a recorded keypoint stream through the engine
    Replay(ReplayCmd),
    /// Print version information
    Version,
}

/// Arguments for the `replay` subcommand.
#[derive(Debug, Args)]
pub struct ReplayCmd {
    /// Path to the recording: one JSON pose frame per line
    #[arg(short, long)]
    pub input: PathBuf,

    /// Exercise to evaluate the stream against
    #[arg(short, long, value_enum, default_value_t = ExerciseArg::Squat)]
    pub exercise: ExerciseArg,

    /// Use the two-level correct/incorrect variant with corrective cues
    #[arg(long)]
    pub binary: bool,

    /// Debounce window in milliseconds (defaults to the variant's window)
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Counting policy for bilateral evaluations
    #[arg(long, value_enum, default_value_t = PolicyArg::FirstSide)]
    pub policy: PolicyArg,

    /// Pacing delay between frames in milliseconds (0 replays back to back)
    #[arg(long, default_value_t = 0)]
    pub interval_ms: u64,
}

/// Exercise selection argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExerciseArg {
    /// Squat, graded on the knee angle
    Squat,
    /// Lunge, graded on both knee angles
    Lunge,
    /// Shoulder press, graded on the elbow angle
    ShoulderPress,
    /// Dumbbell curl, graded on the elbow angle
    DumbbellCurl,
}

impl From<ExerciseArg> for ExerciseKind {
    fn from(arg: ExerciseArg) -> Self {
        match arg {
            ExerciseArg::Squat => Self::Squat,
            ExerciseArg::Lunge => Self::Lunge,
            ExerciseArg::ShoulderPress => Self::ShoulderPress,
            ExerciseArg::DumbbellCurl => Self::DumbbellCurl,
        }
    }
}

/// Counting policy argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Count at most one qualifying side per frame
    FirstSide,
    /// Feed every evaluated side to the counter
    PerLimb,
}

impl From<PolicyArg> for RepPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::FirstSide => Self::FirstQualifyingSide,
            PolicyArg::PerLimb => Self::PerLimb,
        }
    }
}

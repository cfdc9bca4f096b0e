//! Performance benchmarks for the FormSense evaluation pipeline.
//!
//! Run with: cargo bench --package formsense-engine
//!
//! Benchmarks cover:
//! - Joint angle calculation
//! - Sliding-window smoothing
//! - Per-exercise grading
//! - The full per-frame orchestration cycle

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use formsense_core::{BodyPart, Confidence, ExerciseKind, Keypoint, PoseFrame, Side, Timestamp};
use formsense_engine::{
    joint_angle, AngleSmoother, EngineConfig, EvaluationMode, FormEvaluator, SessionEngine,
};

/// Builds a squat frame whose knee sits at the given angle.
fn squat_frame(knee_angle_deg: f32, at_ms: i64) -> PoseFrame {
    let knee = (100.0_f32, 100.0_f32);
    let hip = (100.0, 0.0);
    let rad = knee_angle_deg.to_radians();
    let ankle = (knee.0 + 100.0 * rad.sin(), knee.1 - 100.0 * rad.cos());

    let confidence = Confidence::new(0.9).unwrap();
    PoseFrame::from_keypoints(
        Timestamp::from_millis(at_ms),
        [
            Keypoint::new(BodyPart::hip(Side::Left), hip.0, hip.1, confidence),
            Keypoint::new(BodyPart::knee(Side::Left), knee.0, knee.1, confidence),
            Keypoint::new(BodyPart::ankle(Side::Left), ankle.0, ankle.1, confidence),
        ],
    )
}

/// A sweep of knee angles covering one squat descent and ascent.
fn descent_angles(frame_count: usize) -> Vec<f32> {
    (0..frame_count)
        .map(|i| {
            let t = i as f32 / frame_count as f32;
            // 170 degrees standing down to 90 at the bottom and back up.
            130.0 + 40.0 * (2.0 * std::f32::consts::PI * t).cos()
        })
        .collect()
}

fn bench_joint_angle(c: &mut Criterion) {
    c.bench_function("joint_angle", |b| {
        b.iter(|| {
            joint_angle(
                black_box((118.0, 260.0)),
                black_box((120.0, 340.0)),
                black_box((190.0, 360.0)),
            )
        })
    });
}

fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothing");

    for window in [5usize, 10, 30] {
        let angles = descent_angles(300);
        group.bench_with_input(
            BenchmarkId::new("window", window),
            &angles,
            |b, angles| {
                b.iter(|| {
                    let mut smoother = AngleSmoother::new(window);
                    for &angle in angles {
                        black_box(smoother.push(black_box(angle)));
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");

    let evaluator = FormEvaluator::new(EvaluationMode::Graded);
    for exercise in [
        ExerciseKind::Squat,
        ExerciseKind::ShoulderPress,
        ExerciseKind::DumbbellCurl,
    ] {
        group.bench_with_input(
            BenchmarkId::new("single_angle", exercise.name()),
            &exercise,
            |b, &exercise| b.iter(|| evaluator.evaluate(black_box(exercise), black_box(92.0))),
        );
    }

    group.bench_function("lunge_composite", |b| {
        b.iter(|| evaluator.evaluate_lunge(black_box(88.0), black_box(168.0)))
    });

    group.finish();
}

fn bench_frame_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_cycle");

    // A pre-built squat session of frames at 30 fps.
    for frame_count in [30usize, 300] {
        let frames: Vec<PoseFrame> = descent_angles(frame_count)
            .into_iter()
            .enumerate()
            .map(|(i, angle)| squat_frame(angle, i as i64 * 33))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("squat_session", frame_count),
            &frames,
            |b, frames| {
                b.iter(|| {
                    let mut engine = SessionEngine::new(EngineConfig::default());
                    for frame in frames {
                        black_box(engine.process_frame(black_box(frame)));
                    }
                    engine.rep_count()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    name = pipeline_benches;
    config = Criterion::default()
        .warm_up_time(std::time::Duration::from_millis(500))
        .measurement_time(std::time::Duration::from_secs(2));
    targets =
        bench_joint_angle,
        bench_smoothing,
        bench_evaluation,
        bench_frame_cycle
);

criterion_main!(pipeline_benches);

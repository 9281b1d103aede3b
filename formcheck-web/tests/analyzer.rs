//! End-to-end rep counting scenarios through the public analyzer API

use formcheck_web::form::{
    ExerciseAnalyzer, ExerciseConfig, ExerciseKind, Landmark, ManualClock, RepCounter, Stage,
    StageMachine, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, NOSE, POSE_LANDMARK_COUNT, RIGHT_HIP,
    RIGHT_KNEE, RIGHT_SHOULDER,
};

const HIP: (f32, f32) = (0.5, 0.5);
const LIMB: f32 = 0.3;

fn frame_with(shoulder: (f32, f32), knee: (f32, f32), nose: (f32, f32)) -> Vec<Landmark> {
    let mut frame = vec![Landmark::default(); POSE_LANDMARK_COUNT];
    for (index, (x, y)) in [
        (NOSE, nose),
        (LEFT_SHOULDER, shoulder),
        (RIGHT_SHOULDER, shoulder),
        (LEFT_HIP, HIP),
        (RIGHT_HIP, HIP),
        (LEFT_KNEE, knee),
        (RIGHT_KNEE, knee),
    ] {
        frame[index] = Landmark::new(x, y, 0.0);
    }
    frame
}

/// Standing subject whose hips are bent to `angle` degrees
fn deadlift_frame(angle: f32) -> Vec<Landmark> {
    let shoulder = (HIP.0, HIP.1 - LIMB);
    let heading = (angle - 90.0).to_radians();
    let knee = (HIP.0 + LIMB * heading.cos(), HIP.1 + LIMB * heading.sin());
    frame_with(shoulder, knee, (HIP.0, HIP.1 - 0.45))
}

/// Lying subject whose torso is raised to an adjusted angle of `angle` degrees
fn situp_frame(angle: f32) -> Vec<Landmark> {
    let raw = (90.0 - angle).to_radians();
    let shoulder = (HIP.0 + LIMB * raw.cos(), HIP.1 - LIMB * raw.sin());
    frame_with(shoulder, (HIP.0 - LIMB, HIP.1), (shoulder.0 + 0.1, shoulder.1))
}

/// Feed each angle `hold` frames in a row, 33 ms apart
fn run(
    analyzer: &mut ExerciseAnalyzer,
    frame: fn(f32) -> Vec<Landmark>,
    angles: &[f32],
    hold: usize,
) {
    let mut now = 0.0;
    for &angle in angles {
        for _ in 0..hold {
            analyzer.analyze_frame_at(&frame(angle), now);
            now += 33.0;
        }
    }
}

#[test]
fn deadlift_smoothed_sequence_counts_one_rep() {
    let config = ExerciseConfig::deadlift();
    let mut machine = StageMachine::new(config.initial_stage, config.up_threshold, config.down_threshold);
    let mut reps = RepCounter::new(config.counted_transition);

    for smoothed in [170.0, 170.0, 170.0, 100.0, 100.0, 100.0, 170.0, 170.0, 170.0] {
        if let Some(transition) = machine.update(smoothed) {
            reps.observe(transition);
        }
    }

    assert_eq!(reps.count(), 1);
    assert_eq!(machine.stage(), Stage::Up);
}

#[test]
fn situp_smoothed_sequence_counts_one_rep() {
    let config = ExerciseConfig::situp();
    let mut machine = StageMachine::new(config.initial_stage, config.up_threshold, config.down_threshold);
    let mut reps = RepCounter::new(config.counted_transition);

    for smoothed in [10.0, 10.0, 10.0, 60.0, 60.0, 60.0, 10.0, 10.0, 10.0] {
        if let Some(transition) = machine.update(smoothed) {
            reps.observe(transition);
        }
    }

    assert_eq!(reps.count(), 1);
    assert_eq!(machine.stage(), Stage::Down);
}

#[test]
fn deadlift_frames_count_one_rep() {
    let mut analyzer = ExerciseAnalyzer::new(ExerciseKind::Deadlift);
    run(&mut analyzer, deadlift_frame, &[170.0, 100.0, 170.0], 5);
    assert_eq!(analyzer.rep_count(), 1);
    assert_eq!(analyzer.stage(), Stage::Up);
}

#[test]
fn situp_frames_count_one_rep() {
    let mut analyzer = ExerciseAnalyzer::new(ExerciseKind::Situp);
    run(&mut analyzer, situp_frame, &[10.0, 60.0, 10.0], 5);
    assert_eq!(analyzer.rep_count(), 1);
    assert_eq!(analyzer.stage(), Stage::Down);
}

#[test]
fn situp_counts_on_return_not_on_rise() {
    let mut analyzer = ExerciseAnalyzer::new(ExerciseKind::Situp);
    run(&mut analyzer, situp_frame, &[10.0, 60.0], 5);
    assert_eq!(analyzer.stage(), Stage::Up);
    assert_eq!(analyzer.rep_count(), 0);
}

#[test]
fn full_cycles_count_exactly_k_reps() {
    for k in 0..6 {
        let mut angles = vec![170.0];
        for _ in 0..k {
            angles.extend([100.0, 170.0]);
        }
        let mut analyzer = ExerciseAnalyzer::new(ExerciseKind::Deadlift);
        run(&mut analyzer, deadlift_frame, &angles, 6);
        assert_eq!(analyzer.rep_count(), k, "deadlift cycles: {k}");

        let mut angles = vec![5.0];
        for _ in 0..k {
            angles.extend([70.0, 5.0]);
        }
        let mut analyzer = ExerciseAnalyzer::new(ExerciseKind::Situp);
        run(&mut analyzer, situp_frame, &angles, 6);
        assert_eq!(analyzer.rep_count(), k, "situp cycles: {k}");
    }
}

#[test]
fn half_cycle_does_not_count() {
    let mut analyzer = ExerciseAnalyzer::new(ExerciseKind::Deadlift);
    run(&mut analyzer, deadlift_frame, &[170.0, 100.0], 5);
    assert_eq!(analyzer.rep_count(), 0);
    assert_eq!(analyzer.stage(), Stage::Down);
}

#[test]
fn first_two_valid_samples_are_not_ready() {
    let mut analyzer = ExerciseAnalyzer::new(ExerciseKind::Deadlift);
    for _ in 0..2 {
        assert!(analyzer.analyze_frame_at(&deadlift_frame(170.0), 0.0).is_none());
        // Missing landmarks do not count toward warm-up
        assert!(analyzer.analyze_frame_at(&[], 0.0).is_none());
    }
    assert!(analyzer.analyze_frame_at(&deadlift_frame(170.0), 0.0).is_some());

    analyzer.reset();
    assert!(analyzer.analyze_frame_at(&deadlift_frame(170.0), 0.0).is_none());
    assert!(analyzer.analyze_frame_at(&deadlift_frame(170.0), 0.0).is_none());
    assert!(analyzer.analyze_frame_at(&deadlift_frame(170.0), 0.0).is_some());
}

#[test]
fn reset_after_long_session() {
    let mut analyzer = ExerciseAnalyzer::new(ExerciseKind::Situp);
    let angles: Vec<f32> = (0..40).map(|i| if i % 2 == 0 { 5.0 } else { 70.0 }).collect();
    run(&mut analyzer, situp_frame, &angles, 5);
    assert!(analyzer.rep_count() > 10);

    analyzer.reset();
    assert_eq!(analyzer.rep_count(), 0);
    assert_eq!(analyzer.stage(), Stage::Down);
    assert!(analyzer.state().history().is_empty());
    assert_eq!(analyzer.summary().total_reps, 0);
}

#[test]
fn constant_angle_in_gap_never_counts() {
    let mut analyzer = ExerciseAnalyzer::new(ExerciseKind::Deadlift);
    run(&mut analyzer, deadlift_frame, &[145.0], 5000);
    assert_eq!(analyzer.rep_count(), 0);
    assert_eq!(analyzer.stage(), Stage::Up);

    // Jitter that stays between the thresholds
    let noisy: Vec<f32> = (0..2000).map(|i| if i % 2 == 0 { 135.0 } else { 155.0 }).collect();
    run(&mut analyzer, deadlift_frame, &noisy, 1);
    assert_eq!(analyzer.rep_count(), 0);

    let mut analyzer = ExerciseAnalyzer::new(ExerciseKind::Situp);
    run(&mut analyzer, situp_frame, &[30.0], 5000);
    assert_eq!(analyzer.rep_count(), 0);
    assert_eq!(analyzer.stage(), Stage::Down);
}

#[test]
fn feedback_is_throttled_across_frames() {
    let clock = ManualClock::new(50_000.0);
    let mut analyzer = ExerciseAnalyzer::new(ExerciseKind::Deadlift).with_clock(clock.clone());
    let frame = deadlift_frame(100.0);
    for _ in 0..3 {
        analyzer.analyze_frame(&frame);
    }

    clock.advance(2500.0);
    let first = analyzer.analyze_frame(&frame).unwrap();
    clock.advance(500.0);
    let second = analyzer.analyze_frame(&frame).unwrap();

    assert!(first.feedback.len() + second.feedback.len() <= 1);
}

#[test]
fn situp_feedback_bands() {
    let clock = ManualClock::new(0.0);
    let mut analyzer = ExerciseAnalyzer::new(ExerciseKind::Situp).with_clock(clock.clone());

    // Lying but not flat: "Lie down completely!"
    let mut messages = Vec::new();
    for _ in 0..3 {
        if let Some(result) = analyzer.analyze_frame(&situp_frame(30.0)) {
            messages.extend(result.feedback);
        }
    }
    assert_eq!(messages, vec!["Lie down completely!".to_string()]);

    // Rising within the throttle interval: silent
    for _ in 0..5 {
        let result = analyzer.analyze_frame(&situp_frame(80.0)).unwrap();
        assert!(result.feedback.is_empty());
    }

    // Fully raised once the interval has passed: "Good sit-up!"
    clock.advance(2001.0);
    let last = analyzer.analyze_frame(&situp_frame(80.0)).unwrap();
    assert_eq!(last.stage, Stage::Up);
    assert_eq!(last.feedback, vec!["Good sit-up!".to_string()]);

    let summary = analyzer.summary();
    assert_eq!(
        summary.feedback,
        vec!["Lie down completely!".to_string(), "Good sit-up!".to_string()]
    );
}

#[test]
fn unknown_exercise_fails_at_construction() {
    assert!(ExerciseAnalyzer::for_exercise("bench press").is_err());
    assert!(ExerciseAnalyzer::for_exercise("").is_err());
}

#[test]
fn summary_reports_session() {
    let mut analyzer = ExerciseAnalyzer::new(ExerciseKind::Deadlift);
    analyzer.analyze_frame_at(&[], 0.0);
    run(&mut analyzer, deadlift_frame, &[170.0, 100.0, 170.0], 5);

    let summary = analyzer.summary();
    assert_eq!(summary.exercise, "deadlift");
    assert_eq!(summary.total_reps, 1);
    assert_eq!(summary.frames_analyzed, 13);
    assert_eq!(summary.frames_skipped, 3);
    let last = summary.last_angle.unwrap();
    assert!((last - 170.0).abs() < 1e-2);
    let avg = summary.avg_angle.unwrap();
    assert!(avg > 100.0 && avg < 170.0);
}

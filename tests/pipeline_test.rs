//! Integration tests for the frame pipeline
//!
//! These tests drive the complete per-frame path over synthetic frame
//! streams: HandFrame -> classification/features/velocity -> descriptor ->
//! recording session.

use motion_descriptor::hand::landmarks::{Landmark, LandmarkId, LANDMARK_COUNT};
use motion_descriptor::{
    AppendOutcome, HandFrame, MotionDescriptorBuilder, MotionSequence, Primitive, RecorderState,
    SequenceRecorder, StartPolicy,
};

const FRAME_DT: f64 = 1.0 / 30.0;

/// Synthetic hand with a 100-unit palm reference (wrist at (320, 400),
/// middle MCP at (320, 300)) and explicit fingertip placement.
fn hand_landmarks(tips: [(f64, f64); 5], wrist_dx: f64) -> Vec<Landmark> {
    let mut landmarks: Vec<Landmark> = (0..LANDMARK_COUNT)
        .map(|i| Landmark::new(300.0 + i as f64, 280.0 + i as f64))
        .collect();
    landmarks[LandmarkId::Wrist.index()] = Landmark::new(320.0 + wrist_dx, 400.0);
    landmarks[LandmarkId::MiddleMcp.index()] = Landmark::new(320.0, 300.0);
    for (tip, (x, y)) in [
        LandmarkId::ThumbTip,
        LandmarkId::IndexTip,
        LandmarkId::MiddleTip,
        LandmarkId::RingTip,
        LandmarkId::PinkyTip,
    ]
    .iter()
    .zip(tips)
    {
        landmarks[tip.index()] = Landmark::new(x, y);
    }
    landmarks
}

/// Index finger raised, thumb resting on the curled fingers
fn point_frame(timestamp: f64, wrist_dx: f64) -> HandFrame {
    let tips = [
        (340.0, 330.0),
        (320.0, 180.0),
        (315.0, 335.0),
        (325.0, 338.0),
        (340.0, 342.0),
    ];
    HandFrame::new(
        timestamp,
        hand_landmarks(tips, wrist_dx),
        vec![0, 1, 0, 0, 0],
    )
}

/// Spread fingertips, thumb and index well apart
fn open_frame(timestamp: f64) -> HandFrame {
    let tips = [
        (220.0, 260.0),
        (280.0, 200.0),
        (320.0, 190.0),
        (360.0, 200.0),
        (420.0, 260.0),
    ];
    HandFrame::new(timestamp, hand_landmarks(tips, 0.0), vec![1, 1, 1, 1, 1])
}

/// Curled fingertips, thumb across the fingers away from the index tip
fn fist_frame(timestamp: f64) -> HandFrame {
    let tips = [
        (360.0, 350.0),
        (300.0, 330.0),
        (310.0, 335.0),
        (325.0, 338.0),
        (340.0, 342.0),
    ];
    HandFrame::new(timestamp, hand_landmarks(tips, 0.0), vec![0, 0, 0, 0, 0])
}

/// Record a stream of frames into a finalized sequence
fn record(frames: impl IntoIterator<Item = HandFrame>, gesture: &str) -> MotionSequence {
    let mut builder = MotionDescriptorBuilder::new();
    let mut recorder = SequenceRecorder::new(StartPolicy::Reject, 0);
    builder.reset();
    recorder.start(gesture).unwrap();
    for frame in frames {
        let descriptor = builder.build(&frame);
        match recorder.append(descriptor).unwrap() {
            AppendOutcome::Recorded => {}
            AppendOutcome::AutoStopped(_) => panic!("unexpected auto-stop"),
        }
    }
    recorder.stop().expect("frames were recorded")
}

#[test]
fn test_static_point_hold() {
    // A [0,1,0,0,0] vector held for 69 frames at 30 fps with sub-pixel
    // wrist jitter -> POINT on every frame, low mean velocity.
    let frames = (0..69).map(|i| {
        let jitter = ((i % 3) as f64 - 1.0) * 0.2;
        point_frame(i as f64 * FRAME_DT, jitter)
    });
    let sequence = record(frames, "point_hold");

    assert_eq!(sequence.metadata.total_frames, 69);
    assert_eq!(sequence.frames_with_primitive(Primitive::Point).len(), 69);
    assert_eq!(sequence.primitive_share(Primitive::Point), 1.0);
    assert_eq!(sequence.metadata.primitives_used, vec![Primitive::Point]);

    let stats = sequence.statistics();
    assert!(
        stats.velocity.mean < 15.0,
        "static hold should be low motion, got mean {}",
        stats.velocity.mean
    );

    // metadata invariants
    let expected_duration = 68.0 * FRAME_DT;
    assert!((sequence.metadata.duration_seconds - expected_duration).abs() < 1e-9);
    assert!(
        (sequence.metadata.average_fps - 69.0 / expected_duration).abs() < 1e-9
    );
}

#[test]
fn test_open_close_alternation() {
    // 5 cycles of 13 open-hand frames and 2 fist frames ->
    // OPEN_HAND 65 frames (86.7%), FIST 10 frames (13.3%).
    let mut frames = Vec::new();
    for cycle in 0..5 {
        let base = cycle * 15;
        for i in 0..13 {
            frames.push(open_frame((base + i) as f64 * FRAME_DT));
        }
        for i in 13..15 {
            frames.push(fist_frame((base + i) as f64 * FRAME_DT));
        }
    }
    let sequence = record(frames, "open_close");

    assert_eq!(sequence.metadata.total_frames, 75);
    let stats = sequence.statistics();
    assert_eq!(stats.primitive_counts[&Primitive::OpenHand], 65);
    assert_eq!(stats.primitive_counts[&Primitive::Fist], 10);
    assert!((sequence.primitive_share(Primitive::OpenHand) - 0.867).abs() < 0.001);
    assert!((sequence.primitive_share(Primitive::Fist) - 0.133).abs() < 0.001);
    assert_eq!(
        sequence.metadata.primitives_used,
        vec![Primitive::OpenHand, Primitive::Fist]
    );
}

#[test]
fn test_short_frame_mid_sequence() {
    // A 10-landmark frame injected mid-sequence is classified
    // UNKNOWN and flagged; sequence length and ordering are unaffected.
    let mut builder = MotionDescriptorBuilder::new();
    let mut recorder = SequenceRecorder::default();
    builder.reset();
    recorder.start("degraded").unwrap();

    for i in 0..12 {
        let frame = if i == 5 {
            let full = point_frame(i as f64 * FRAME_DT, 0.0);
            HandFrame::new(frame_timestamp(i), full.landmarks[..10].to_vec(), full.fingers)
        } else {
            point_frame(i as f64 * FRAME_DT, 0.0)
        };
        let descriptor = builder.build(&frame);
        recorder.append(descriptor).unwrap();
    }
    let sequence = recorder.stop().unwrap();

    assert_eq!(sequence.metadata.total_frames, 12);
    assert_eq!(sequence.frames[5].primitive, Primitive::Unknown);
    assert!(sequence.frames[5].flags.missing_landmarks);
    assert_eq!(sequence.frames_with_primitive(Primitive::Point).len(), 11);

    // ordering is intact: indices contiguous, timestamps non-decreasing
    for (i, frame) in sequence.frames.iter().enumerate() {
        assert_eq!(frame.frame_num, i as u64);
    }
    sequence.validate().expect("sequence passes schema validation");
    assert!(sequence
        .metadata
        .primitives_used
        .contains(&Primitive::Unknown));
}

fn frame_timestamp(i: usize) -> f64 {
    i as f64 * FRAME_DT
}

#[test]
fn test_tracking_stall_absorbed_without_reordering() {
    // A stalled acquisition source (a long inter-frame delta) resets
    // velocity instead of producing a spike, and the sequence stays ordered.
    let mut builder = MotionDescriptorBuilder::new();
    let mut recorder = SequenceRecorder::default();
    builder.reset();
    recorder.start("stalled").unwrap();

    for i in 0..5 {
        recorder
            .append(builder.build(&open_frame(frame_timestamp(i))))
            .unwrap();
    }
    // half a second of lost tracking
    let resumed_at = frame_timestamp(5) + 0.5;
    recorder
        .append(builder.build(&open_frame(resumed_at)))
        .unwrap();
    recorder
        .append(builder.build(&open_frame(resumed_at + FRAME_DT)))
        .unwrap();
    let sequence = recorder.stop().unwrap();

    let gap_frame = &sequence.frames[5];
    assert!(gap_frame.flags.tracking_gap);
    assert!(gap_frame.velocity.is_zero());
    assert_eq!(gap_frame.primitive, Primitive::OpenHand);
    sequence.validate().expect("ordering survives the stall");
}

#[test]
fn test_first_frame_velocity_is_zero() {
    let sequence = record((0..3).map(|i| open_frame(frame_timestamp(i))), "warmup");
    assert!(sequence.frames[0].velocity.is_zero());
    assert!(!sequence.frames[0].flags.any());
}

#[test]
fn test_restart_policy_never_merges_sessions() {
    let mut builder = MotionDescriptorBuilder::new();
    let mut recorder = SequenceRecorder::new(StartPolicy::Restart, 0);

    builder.reset();
    recorder.start("first").unwrap();
    for i in 0..4 {
        recorder
            .append(builder.build(&open_frame(frame_timestamp(i))))
            .unwrap();
    }

    // restart mid-session: the new session starts from frame 0
    builder.reset();
    recorder.start("second").unwrap();
    for i in 0..2 {
        recorder
            .append(builder.build(&point_frame(frame_timestamp(i), 0.0)))
            .unwrap();
    }
    let sequence = recorder.stop().unwrap();

    assert_eq!(sequence.metadata.gesture_name, "second");
    assert_eq!(sequence.metadata.total_frames, 2);
    assert_eq!(sequence.frames[0].frame_num, 0);
    assert_eq!(sequence.frames_with_primitive(Primitive::OpenHand).len(), 0);
}

#[test]
fn test_frame_cap_stops_session() {
    let mut builder = MotionDescriptorBuilder::new();
    let mut recorder = SequenceRecorder::new(StartPolicy::Reject, 10);
    builder.reset();
    recorder.start("capped").unwrap();

    let mut finalized = None;
    for i in 0..100 {
        let descriptor = builder.build(&open_frame(frame_timestamp(i)));
        match recorder.append(descriptor).unwrap() {
            AppendOutcome::Recorded => {}
            AppendOutcome::AutoStopped(sequence) => {
                finalized = Some(sequence);
                break;
            }
        }
    }
    let sequence = finalized.expect("cap must trigger an automatic stop");
    assert_eq!(sequence.metadata.total_frames, 10);
    assert_eq!(recorder.state(), RecorderState::Idle);
}

#[test]
fn test_classification_is_stable_across_identical_streams() {
    let run = |gesture: &str| record((0..20).map(|i| open_frame(frame_timestamp(i))), gesture);
    let a = run("a");
    let b = run("b");
    let primitives_a: Vec<Primitive> = a.frames.iter().map(|f| f.primitive).collect();
    let primitives_b: Vec<Primitive> = b.frames.iter().map(|f| f.primitive).collect();
    assert_eq!(primitives_a, primitives_b);
}

//! # Motion Descriptor
//!
//! A hand motion interpretation pipeline that turns a per-frame stream of
//! hand-landmark coordinates and finger-extension flags into structured,
//! temporally-sequenced gesture recordings.
//!
//! ## Overview
//!
//! Each input frame (21 named landmarks + a 5-element finger vector + a
//! monotonic timestamp) is classified into a discrete handshape primitive,
//! enriched with geometric features and a smoothed wrist velocity, and
//! composed into one immutable motion descriptor. An explicit recording
//! session buffers descriptors and finalizes them into a sequence that is
//! persisted as JSON for offline analysis and dataset building.
//!
//! ## Quick Start
//!
//! ```
//! use motion_descriptor::{
//!     HandFrame, Landmark, MotionDescriptorBuilder, SequenceRecorder, StartPolicy,
//! };
//!
//! let mut builder = MotionDescriptorBuilder::new();
//! let mut recorder = SequenceRecorder::new(StartPolicy::Reject, 0);
//!
//! builder.reset();
//! recorder.start("wave").unwrap();
//! for i in 0..3 {
//!     let landmarks: Vec<Landmark> = (0..21)
//!         .map(|j| Landmark::new(10.0 * j as f64 + i as f64, 5.0 * j as f64))
//!         .collect();
//!     let frame = HandFrame::new(i as f64 / 30.0, landmarks, vec![1, 1, 1, 1, 1]);
//!     let descriptor = builder.build(&frame);
//!     recorder.append(descriptor).unwrap();
//! }
//! let sequence = recorder.stop().expect("frames were recorded");
//! assert_eq!(sequence.metadata.total_frames, 3);
//! ```
//!
//! ## Architecture
//!
//! - [`hand`]: Input contract from the hand-tracking collaborator
//! - [`pipeline`]: Per-frame classification, features and velocity
//! - [`recording`]: Session state machine, sequences and persistence
//! - [`app`]: CLI and configuration management
//!
//! ## Frame Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  HandFrame  │───▶│  Classifier  │───▶│  Descriptor │───▶│  Recording  │
//! │ (landmarks) │    │ + Features   │    │   Builder   │    │   Session   │
//! └─────────────┘    │ + Velocity   │    └─────────────┘    └─────────────┘
//!                    └──────────────┘                             │
//!                                                                 ▼
//!                                                       {gesture}_{ts}.json
//! ```
//!
//! Per-frame anomalies (missing landmarks, tracking gaps) are absorbed into
//! the recorded data as flags rather than raised: a recording session is
//! never aborted by transient tracking noise. Only I/O and schema failures
//! surface as errors.

pub mod app;
pub mod hand;
pub mod pipeline;
pub mod recording;

// Re-export commonly used types
pub use hand::landmarks::{Landmark, LandmarkId, LandmarkMap, Point, LANDMARK_COUNT};
pub use hand::types::{Finger, FingerVector, HandFrame};
pub use pipeline::classifier::{Primitive, PrimitiveClassifier};
pub use pipeline::descriptor::{FrameFlags, MotionDescriptor, MotionDescriptorBuilder};
pub use pipeline::features::{FeatureExtractor, FeatureSet};
pub use pipeline::velocity::{Velocity, VelocityEstimator};
pub use recording::sequence::{MotionSequence, SequenceMetadata, SequenceStats};
pub use recording::session::{AppendOutcome, RecorderState, SequenceRecorder, StartPolicy};

/// Result type alias for the motion descriptor pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the motion descriptor pipeline.
///
/// Per-frame tracking anomalies are not errors; they are encoded in the
/// descriptor flags. Only rejected recorder commands, configuration
/// problems and persistence failures surface here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Schema violation: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

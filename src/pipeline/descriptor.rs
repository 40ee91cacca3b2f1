//! Structured per-frame motion records
//!
//! `MotionDescriptor` is the immutable composition of one frame's
//! classification, features and velocity; `MotionDescriptorBuilder` owns the
//! sub-components and the sequential frame counter and stamps each record.

use crate::hand::landmarks::{landmark_map, LandmarkId, LandmarkMap, LANDMARK_COUNT};
use crate::hand::types::{FingerVector, HandFrame};
use crate::pipeline::classifier::{Primitive, PrimitiveClassifier};
use crate::pipeline::features::{FeatureExtractor, FeatureSet};
use crate::pipeline::velocity::{Velocity, VelocityEstimator};
use serde::{Deserialize, Serialize};

/// Per-frame anomaly flags.
///
/// Transient tracking noise is encoded in the record rather than raised:
/// a recording session must never be aborted by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FrameFlags {
    /// The frame arrived structurally invalid (landmark count != 21 or a
    /// malformed finger vector); the primitive is UNKNOWN
    #[serde(default)]
    pub missing_landmarks: bool,
    /// The inter-frame time delta exceeded the gap threshold; velocity was
    /// reset to zero
    #[serde(default)]
    pub tracking_gap: bool,
}

impl FrameFlags {
    pub fn any(&self) -> bool {
        self.missing_landmarks || self.tracking_gap
    }
}

/// One frame's structured motion record.
///
/// Immutable after creation. Timestamps are non-decreasing and frame
/// indices strictly increasing within a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionDescriptor {
    /// Frame timestamp in seconds (collaborator's monotonic clock)
    pub timestamp: f64,
    /// Sequential frame index within the session, starting at 0
    pub frame_num: u64,
    /// Classified handshape primitive
    pub primitive: Primitive,
    /// Finger-extension vector, {thumb, index, middle, ring, pinky}
    pub fingers_extended: FingerVector,
    /// Named landmark positions present in this frame
    pub landmarks: LandmarkMap,
    /// Wrist velocity, zero when not inferable
    pub velocity: Velocity,
    /// Derived geometric features
    pub features: FeatureSet,
    /// Per-frame anomaly flags
    #[serde(default)]
    pub flags: FrameFlags,
}

/// Composes classifier, feature extractor and velocity estimator into one
/// descriptor per frame.
///
/// No branching logic of its own beyond input validation: UNKNOWN and
/// zero-velocity handling live in the sub-components. `reset()` must be
/// called when a new recording session starts so the frame counter and
/// velocity history begin fresh.
#[derive(Debug, Clone)]
pub struct MotionDescriptorBuilder {
    classifier: PrimitiveClassifier,
    estimator: VelocityEstimator,
    next_frame: u64,
}

impl MotionDescriptorBuilder {
    /// Builder with default calibration
    pub fn new() -> Self {
        Self {
            classifier: PrimitiveClassifier::default(),
            estimator: VelocityEstimator::default(),
            next_frame: 0,
        }
    }

    /// Builder with explicit calibration (see the configuration layer)
    pub fn with_settings(pinch_ratio: f64, window: usize, gap_threshold_secs: f64) -> Self {
        Self {
            classifier: PrimitiveClassifier::new(pinch_ratio),
            estimator: VelocityEstimator::new(window, gap_threshold_secs),
            next_frame: 0,
        }
    }

    /// Build the descriptor for one input frame. Never fails: malformed
    /// frames are flagged and classified UNKNOWN.
    pub fn build(&mut self, frame: &HandFrame) -> MotionDescriptor {
        let landmarks = landmark_map(&frame.landmarks);
        let fingers = FingerVector::from_slice(&frame.fingers);

        let mut flags = FrameFlags::default();
        if fingers.is_none() || frame.landmarks.len() != LANDMARK_COUNT {
            flags.missing_landmarks = true;
        }

        let primitive = match &fingers {
            Some(v) if !flags.missing_landmarks => self.classifier.classify(v, &landmarks),
            _ => Primitive::Unknown,
        };
        let fingers = fingers.unwrap_or_default();
        let features = FeatureExtractor::extract(&fingers, &landmarks);

        let velocity = match landmarks.get(&LandmarkId::Wrist) {
            Some(&wrist) => {
                let estimate = self.estimator.update(wrist, frame.timestamp);
                if estimate.gap {
                    flags.tracking_gap = true;
                }
                estimate.velocity
            }
            None => {
                // reference point lost entirely: start a fresh sub-sequence
                self.estimator.reset();
                Velocity::zero()
            }
        };

        let descriptor = MotionDescriptor {
            timestamp: frame.timestamp,
            frame_num: self.next_frame,
            primitive,
            fingers_extended: fingers,
            landmarks,
            velocity,
            features,
            flags,
        };
        self.next_frame += 1;

        tracing::trace!(
            frame = descriptor.frame_num,
            primitive = %descriptor.primitive,
            handshape = %descriptor.fingers_extended,
            velocity = descriptor.velocity.magnitude,
            "descriptor built"
        );
        descriptor
    }

    /// Rewind the frame counter and velocity history for a new session
    pub fn reset(&mut self) {
        self.next_frame = 0;
        self.estimator.reset();
    }

    /// Frames built since the last reset
    pub fn frames_built(&self) -> u64 {
        self.next_frame
    }
}

impl Default for MotionDescriptorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Finalized motion sequences
//!
//! An ordered, timestamped collection of per-frame motion descriptors
//! representing one gesture recording, plus its metadata and derived
//! statistics.

use crate::pipeline::classifier::Primitive;
use crate::pipeline::descriptor::MotionDescriptor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Current persisted document format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

fn default_format_version() -> String {
    CURRENT_FORMAT_VERSION.to_string()
}

/// Sequence metadata.
///
/// The six schema-required keys are mandatory on load; `id` and
/// `format_version` are additive and defaulted for documents that predate
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceMetadata {
    /// Recording session identifier
    #[serde(default)]
    pub id: Uuid,
    /// User-facing gesture label
    pub gesture_name: String,
    /// Wall-clock time the sequence was finalized
    pub recorded_at: DateTime<Utc>,
    /// Elapsed time between first and last frame timestamp
    pub duration_seconds: f64,
    /// Number of frames; invariant: equals the frame list length
    pub total_frames: usize,
    /// total_frames / duration_seconds, 0 when the duration is ~0
    pub average_fps: f64,
    /// Primitives encountered, in first-seen order
    pub primitives_used: Vec<Primitive>,
    /// Document format version
    #[serde(default = "default_format_version")]
    pub format_version: String,
}

/// Derived velocity statistics over a sequence
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityStats {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

/// Summary statistics for a recorded sequence
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceStats {
    pub duration_seconds: f64,
    pub total_frames: usize,
    pub average_fps: f64,
    /// Frames per primitive
    pub primitive_counts: BTreeMap<Primitive, usize>,
    pub velocity: VelocityStats,
}

/// One finalized gesture recording: metadata plus the ordered frame list.
///
/// Insertion order is temporal order; frame indices are strictly increasing
/// with no gaps and timestamps are non-decreasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionSequence {
    pub metadata: SequenceMetadata,
    pub frames: Vec<MotionDescriptor>,
}

impl MotionSequence {
    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if the sequence has no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames matching a predicate
    pub fn frames_where(
        &self,
        filter: impl Fn(&MotionDescriptor) -> bool,
    ) -> Vec<&MotionDescriptor> {
        self.frames.iter().filter(|f| filter(f)).collect()
    }

    /// Frames classified as the given primitive
    pub fn frames_with_primitive(&self, primitive: Primitive) -> Vec<&MotionDescriptor> {
        self.frames_where(|f| f.primitive == primitive)
    }

    /// Fraction of frames classified as the given primitive (0 for an
    /// empty sequence)
    pub fn primitive_share(&self, primitive: Primitive) -> f64 {
        if self.frames.is_empty() {
            return 0.0;
        }
        self.frames_with_primitive(primitive).len() as f64 / self.frames.len() as f64
    }

    /// Compute summary statistics: primitive distribution and velocity
    /// profile over the whole sequence.
    pub fn statistics(&self) -> SequenceStats {
        let mut primitive_counts = BTreeMap::new();
        for frame in &self.frames {
            *primitive_counts.entry(frame.primitive).or_insert(0) += 1;
        }

        let velocity = if self.frames.is_empty() {
            VelocityStats::default()
        } else {
            let magnitudes = self.frames.iter().map(|f| f.velocity.magnitude);
            VelocityStats {
                mean: magnitudes.clone().sum::<f64>() / self.frames.len() as f64,
                max: magnitudes.clone().fold(f64::NEG_INFINITY, f64::max),
                min: magnitudes.fold(f64::INFINITY, f64::min),
            }
        };

        SequenceStats {
            duration_seconds: self.metadata.duration_seconds,
            total_frames: self.metadata.total_frames,
            average_fps: self.metadata.average_fps,
            primitive_counts,
            velocity,
        }
    }
}

//! Per-frame input records
//!
//! `FingerVector` wraps the collaborator's 5-element finger-extension vector
//! with its structural invariants; `HandFrame` is the complete per-frame
//! input packet (landmarks + fingers + timestamp).

use super::landmarks::Landmark;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five fingers, in vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Finger {
    Thumb = 0,
    Index = 1,
    Middle = 2,
    Ring = 3,
    Pinky = 4,
}

/// Finger-extension vector: exactly 5 binary values ordered
/// {thumb, index, middle, ring, pinky}.
///
/// Constructed via [`FingerVector::from_slice`], which enforces the
/// structural invariants (length 5, values 0/1). Values deserialized from
/// untrusted documents are re-checked by [`FingerVector::is_valid`] during
/// schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct FingerVector([u8; 5]);

impl FingerVector {
    /// Build from the collaborator's raw vector. Returns `None` when the
    /// slice is not exactly 5 elements of 0/1; the frame is still recorded,
    /// classified UNKNOWN.
    pub fn from_slice(values: &[u8]) -> Option<Self> {
        let values: [u8; 5] = values.try_into().ok()?;
        values.iter().all(|v| *v <= 1).then_some(Self(values))
    }

    /// Re-check the structural invariant (for deserialized documents)
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|v| *v <= 1)
    }

    /// Number of extended fingers
    pub fn count(&self) -> usize {
        self.0.iter().filter(|v| **v == 1).count()
    }

    /// Check if a specific finger is extended
    pub fn is_extended(&self, finger: Finger) -> bool {
        self.0[finger as usize] == 1
    }

    /// The raw vector, {thumb, index, middle, ring, pinky}
    pub fn as_array(&self) -> [u8; 5] {
        self.0
    }

    /// Compact handshape code, e.g. `[0,1,0,0,0]` renders as `01000`
    pub fn code(&self) -> String {
        self.0.iter().map(|v| char::from(b'0' + v)).collect()
    }
}

impl fmt::Display for FingerVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// One frame of input from the hand-tracking collaborator.
///
/// `timestamp` is in seconds on the collaborator's monotonic clock.
/// A well-formed frame carries 21 landmarks and a 5-element finger vector;
/// malformed frames are still accepted by the pipeline and flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    pub timestamp: f64,
    pub landmarks: Vec<Landmark>,
    pub fingers: Vec<u8>,
}

impl HandFrame {
    pub fn new(timestamp: f64, landmarks: Vec<Landmark>, fingers: Vec<u8>) -> Self {
        Self {
            timestamp,
            landmarks,
            fingers,
        }
    }
}

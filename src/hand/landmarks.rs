//! Hand landmark vocabulary and shared geometry
//!
//! The 21 fixed anatomical points reported by the tracking collaborator,
//! indexed wrist-first with four joints per digit from base to tip, plus the
//! small geometry helpers shared by the classifier and feature extractor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of landmarks in a complete hand frame
pub const LANDMARK_COUNT: usize = 21;

/// One of the 21 fixed anatomical points on a tracked hand
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LandmarkId {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

/// All landmark identifiers in index order
pub const ALL_LANDMARKS: [LandmarkId; LANDMARK_COUNT] = [
    LandmarkId::Wrist,
    LandmarkId::ThumbCmc,
    LandmarkId::ThumbMcp,
    LandmarkId::ThumbIp,
    LandmarkId::ThumbTip,
    LandmarkId::IndexMcp,
    LandmarkId::IndexPip,
    LandmarkId::IndexDip,
    LandmarkId::IndexTip,
    LandmarkId::MiddleMcp,
    LandmarkId::MiddlePip,
    LandmarkId::MiddleDip,
    LandmarkId::MiddleTip,
    LandmarkId::RingMcp,
    LandmarkId::RingPip,
    LandmarkId::RingDip,
    LandmarkId::RingTip,
    LandmarkId::PinkyMcp,
    LandmarkId::PinkyPip,
    LandmarkId::PinkyDip,
    LandmarkId::PinkyTip,
];

/// The five fingertip landmarks, thumb to pinky
pub const FINGERTIPS: [LandmarkId; 5] = [
    LandmarkId::ThumbTip,
    LandmarkId::IndexTip,
    LandmarkId::MiddleTip,
    LandmarkId::RingTip,
    LandmarkId::PinkyTip,
];

impl LandmarkId {
    /// Look up a landmark by its position in the collaborator's ordered list
    pub fn from_index(index: usize) -> Option<Self> {
        ALL_LANDMARKS.get(index).copied()
    }

    /// Position of this landmark in the collaborator's ordered list
    pub fn index(self) -> usize {
        self as usize
    }

    /// Check if this is a fingertip landmark
    pub fn is_fingertip(&self) -> bool {
        matches!(
            self,
            LandmarkId::ThumbTip
                | LandmarkId::IndexTip
                | LandmarkId::MiddleTip
                | LandmarkId::RingTip
                | LandmarkId::PinkyTip
        )
    }
}

/// A 2-D coordinate, in whatever space the collaborator reports
/// (pixels or normalized units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Midpoint between this point and another
    pub fn midpoint(&self, other: &Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// A raw landmark as reported by the collaborator.
///
/// Owned by the frame that produced it; never mutated after creation.
/// The optional depth coordinate is carried through but unused by the
/// 2-D pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn point(&self) -> Point {
        Point { x: self.x, y: self.y }
    }
}

/// Named landmark positions for one frame.
///
/// A `BTreeMap` keeps iteration (and serialization) in index order, so the
/// persisted document is deterministic.
pub type LandmarkMap = BTreeMap<LandmarkId, Point>;

/// Build the named landmark map from the collaborator's ordered list.
///
/// Entries beyond the 21 named points are ignored; a short list simply
/// yields a partial map (the frame is flagged upstream).
pub fn landmark_map(landmarks: &[Landmark]) -> LandmarkMap {
    landmarks
        .iter()
        .take(LANDMARK_COUNT)
        .enumerate()
        .filter_map(|(i, lm)| LandmarkId::from_index(i).map(|id| (id, lm.point())))
        .collect()
}

/// Minimum reference distance considered non-degenerate
const MIN_REFERENCE: f64 = 1e-6;

/// Stable per-frame reference distance: wrist to middle-finger MCP.
///
/// Used to normalize geometric features so they are resolution independent.
/// Returns `None` when either landmark is absent or the hand is degenerate.
pub fn reference_distance(map: &LandmarkMap) -> Option<f64> {
    let wrist = map.get(&LandmarkId::Wrist)?;
    let middle_mcp = map.get(&LandmarkId::MiddleMcp)?;
    let d = wrist.distance_to(middle_mcp);
    (d > MIN_REFERENCE).then_some(d)
}

/// Distance between two named landmarks, normalized by the reference
/// distance. `None` when either landmark or the reference is unavailable.
pub fn normalized_distance(map: &LandmarkMap, a: LandmarkId, b: LandmarkId) -> Option<f64> {
    let pa = map.get(&a)?;
    let pb = map.get(&b)?;
    Some(pa.distance_to(pb) / reference_distance(map)?)
}

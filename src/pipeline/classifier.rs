//! Handshape primitive classification
//!
//! Maps a frame's finger-extension vector and landmark geometry to one
//! discrete primitive. The rules live in an explicit ordered table evaluated
//! most-specific-first: geometric checks (thumb-tip-to-index-tip contact)
//! run before the generic finger-count rules, so a closed-looking vector
//! with touching fingertips classifies as OK_SIGN/PINCH rather than FIST.
//! First matching rule wins; no match, or structurally invalid input, is
//! UNKNOWN, a valid terminal classification rather than a failure.

use crate::hand::landmarks::{normalized_distance, LandmarkId, LandmarkMap, LANDMARK_COUNT};
use crate::hand::types::{Finger, FingerVector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default pinch threshold: thumb-tip-to-index-tip distance as a fraction of
/// the wrist-to-middle-MCP reference distance
pub const DEFAULT_PINCH_RATIO: f64 = 0.40;

/// A discrete handshape classified from a single frame
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Primitive {
    Point,
    Fist,
    OpenHand,
    PeaceV,
    ThumbsUp,
    OkSign,
    Pinch,
    Unknown,
}

impl Primitive {
    /// The wire/display name, e.g. `OPEN_HAND`
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Point => "POINT",
            Primitive::Fist => "FIST",
            Primitive::OpenHand => "OPEN_HAND",
            Primitive::PeaceV => "PEACE_V",
            Primitive::ThumbsUp => "THUMBS_UP",
            Primitive::OkSign => "OK_SIGN",
            Primitive::Pinch => "PINCH",
            Primitive::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evidence a rule predicate sees for one frame
pub(crate) struct RuleContext<'a> {
    /// Validated finger-extension vector
    pub fingers: &'a FingerVector,
    /// Thumb-tip-to-index-tip distance normalized by the palm reference;
    /// `None` when the geometry is unavailable
    pub pinch: Option<f64>,
    /// Calibrated contact threshold for the pinch distance
    pub pinch_threshold: f64,
}

impl RuleContext<'_> {
    fn pinch_closed(&self) -> bool {
        self.pinch.is_some_and(|d| d < self.pinch_threshold)
    }
}

mod rules {
    use super::*;

    pub(super) fn ok_sign(ctx: &RuleContext) -> bool {
        ctx.pinch_closed()
            && ctx.fingers.is_extended(Finger::Middle)
            && ctx.fingers.is_extended(Finger::Ring)
            && ctx.fingers.is_extended(Finger::Pinky)
    }

    pub(super) fn pinch(ctx: &RuleContext) -> bool {
        ctx.pinch_closed()
    }

    pub(super) fn point(ctx: &RuleContext) -> bool {
        ctx.fingers.as_array() == [0, 1, 0, 0, 0]
    }

    pub(super) fn peace_v(ctx: &RuleContext) -> bool {
        ctx.fingers.as_array() == [0, 1, 1, 0, 0]
    }

    pub(super) fn open_hand(ctx: &RuleContext) -> bool {
        ctx.fingers.as_array() == [1, 1, 1, 1, 1]
    }

    pub(super) fn thumbs_up(ctx: &RuleContext) -> bool {
        ctx.fingers.as_array() == [1, 0, 0, 0, 0]
    }

    pub(super) fn fist(ctx: &RuleContext) -> bool {
        ctx.fingers.count() == 0
    }
}

/// The ordered rule table. Order is load-bearing: geometric rules first,
/// then exact-vector rules, then the count rule.
pub(crate) const RULES: &[(Primitive, fn(&RuleContext) -> bool)] = &[
    (Primitive::OkSign, rules::ok_sign),
    (Primitive::Pinch, rules::pinch),
    (Primitive::Point, rules::point),
    (Primitive::PeaceV, rules::peace_v),
    (Primitive::OpenHand, rules::open_hand),
    (Primitive::ThumbsUp, rules::thumbs_up),
    (Primitive::Fist, rules::fist),
];

/// Stateless per-frame handshape classifier
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveClassifier {
    pinch_ratio: f64,
}

impl PrimitiveClassifier {
    pub fn new(pinch_ratio: f64) -> Self {
        Self { pinch_ratio }
    }

    /// Classify one frame. Pure function of its inputs: the same vector and
    /// landmark geometry always yield the same primitive.
    ///
    /// An incomplete landmark set (fewer than the 21 named points) is
    /// structurally invalid input and classifies as UNKNOWN.
    pub fn classify(&self, fingers: &FingerVector, landmarks: &LandmarkMap) -> Primitive {
        if landmarks.len() < LANDMARK_COUNT {
            return Primitive::Unknown;
        }

        let ctx = RuleContext {
            fingers,
            pinch: normalized_distance(landmarks, LandmarkId::ThumbTip, LandmarkId::IndexTip),
            pinch_threshold: self.pinch_ratio,
        };

        RULES
            .iter()
            .find(|(_, matches)| matches(&ctx))
            .map(|(label, _)| *label)
            .unwrap_or(Primitive::Unknown)
    }
}

impl Default for PrimitiveClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_PINCH_RATIO)
    }
}

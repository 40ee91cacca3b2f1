//! Input contract from the hand-tracking collaborator
//!
//! Defines the per-frame vocabulary this crate consumes: the 21 named
//! landmarks, the 5-element finger-extension vector, and the frame record
//! that bundles them with a timestamp.

pub mod landmarks;
pub mod types;

pub use landmarks::{Landmark, LandmarkId, LandmarkMap, Point, LANDMARK_COUNT};
pub use types::{FingerVector, HandFrame};

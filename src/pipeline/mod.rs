//! Per-frame motion interpretation
//!
//! Transforms one input frame into one structured motion descriptor:
//! - primitive classification via an ordered rule table
//! - scalar feature extraction (openness, span, pinch, palm center)
//! - velocity estimation over a bounded positional history with
//!   tracking-gap detection

pub mod classifier;
pub mod descriptor;
pub mod features;
pub mod velocity;

pub use classifier::{Primitive, PrimitiveClassifier};
pub use descriptor::{FrameFlags, MotionDescriptor, MotionDescriptorBuilder};
pub use features::{FeatureExtractor, FeatureSet};
pub use velocity::{Velocity, VelocityEstimator};

//! Gesture sequence recording
//!
//! The session state machine that buffers per-frame descriptors, the
//! finalized sequence with its metadata and derived statistics, and JSON
//! persistence with load-time schema validation.

pub mod sequence;
pub mod session;
pub mod store;

pub use sequence::{MotionSequence, SequenceMetadata, SequenceStats, CURRENT_FORMAT_VERSION};
pub use session::{AppendOutcome, RecorderState, SequenceRecorder, StartPolicy};
pub use store::{recordings_in_dir, sequence_filename};

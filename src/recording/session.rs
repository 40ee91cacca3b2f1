//! Recording session state machine
//!
//! `SequenceRecorder` is an explicit value owned by the frame loop; no
//! process-wide recording state. It buffers descriptors while `Recording`
//! and finalizes sequence metadata on stop. The recorder is reusable across
//! sessions; the caller resets its `MotionDescriptorBuilder` alongside
//! `start()` so frame indices and velocity history begin fresh.

use crate::pipeline::descriptor::MotionDescriptor;
use crate::recording::sequence::{MotionSequence, SequenceMetadata, CURRENT_FORMAT_VERSION};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Durations at or below this are treated as zero when deriving fps
const MIN_DURATION_SECS: f64 = 1e-9;

/// Recorder state tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
}

/// Policy for `start` while a session is already recording.
///
/// Either way, frames from two sessions are never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StartPolicy {
    /// Reject the command and keep the in-progress session untouched
    #[default]
    Reject,
    /// Discard the in-progress buffer and begin a fresh session
    Restart,
}

/// Result of a successful append
#[derive(Debug)]
pub enum AppendOutcome {
    /// Frame buffered; session continues
    Recorded,
    /// The maximum-frame safety cap was reached: the session was stopped
    /// automatically and this is the finalized sequence
    AutoStopped(MotionSequence),
}

/// Session state machine buffering one gesture recording.
///
/// States: `Idle` ⇄ `Recording`. Initial state is `Idle`; there is no
/// terminal state. The buffer is exclusively owned by the recorder until
/// finalize, at which point the immutable `MotionSequence` passes to the
/// caller.
#[derive(Debug)]
pub struct SequenceRecorder {
    state: RecorderState,
    policy: StartPolicy,
    /// Automatic-stop safety cap; 0 disables it
    max_frames: usize,
    session_id: Uuid,
    gesture_name: String,
    buffer: Vec<MotionDescriptor>,
}

impl SequenceRecorder {
    pub fn new(policy: StartPolicy, max_frames: usize) -> Self {
        Self {
            state: RecorderState::Idle,
            policy,
            max_frames,
            session_id: Uuid::nil(),
            gesture_name: String::new(),
            buffer: Vec::new(),
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    /// Frames buffered in the in-progress session
    pub fn frames_buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Begin a recording session.
    ///
    /// While already recording, the configured [`StartPolicy`] applies:
    /// `Reject` returns [`Error::InvalidCommand`] and leaves the session
    /// untouched; `Restart` discards the in-progress buffer.
    pub fn start(&mut self, gesture_name: &str) -> Result<()> {
        if self.is_recording() {
            match self.policy {
                StartPolicy::Reject => {
                    return Err(Error::InvalidCommand(format!(
                        "already recording '{}'",
                        self.gesture_name
                    )));
                }
                StartPolicy::Restart => {
                    warn!(
                        session = %self.session_id,
                        gesture = %self.gesture_name,
                        discarded_frames = self.buffer.len(),
                        "restart: in-progress session discarded"
                    );
                }
            }
        }

        self.buffer.clear();
        self.session_id = Uuid::new_v4();
        self.gesture_name = gesture_name.to_string();
        self.state = RecorderState::Recording;
        info!(session = %self.session_id, gesture = gesture_name, "recording started");
        Ok(())
    }

    /// Append a descriptor to the in-progress session.
    ///
    /// Appends are only valid while `Recording`, in strictly increasing
    /// frame-index order with non-decreasing timestamps; violations are
    /// rejected without corrupting the buffer.
    pub fn append(&mut self, descriptor: MotionDescriptor) -> Result<AppendOutcome> {
        if !self.is_recording() {
            return Err(Error::InvalidCommand(
                "append while idle: no active recording session".to_string(),
            ));
        }
        if let Some(last) = self.buffer.last() {
            if descriptor.frame_num <= last.frame_num {
                return Err(Error::InvalidCommand(format!(
                    "frame index {} does not advance past {}",
                    descriptor.frame_num, last.frame_num
                )));
            }
            if descriptor.timestamp < last.timestamp {
                return Err(Error::InvalidCommand(format!(
                    "timestamp {} precedes previous frame's {}",
                    descriptor.timestamp, last.timestamp
                )));
            }
        }

        self.buffer.push(descriptor);

        if self.max_frames > 0 && self.buffer.len() >= self.max_frames {
            warn!(
                session = %self.session_id,
                max_frames = self.max_frames,
                "frame cap reached: stopping automatically"
            );
            return Ok(AppendOutcome::AutoStopped(self.finalize()));
        }
        Ok(AppendOutcome::Recorded)
    }

    /// Stop the session and emit the finalized sequence.
    ///
    /// Idempotent: stop while idle is a no-op returning `None`. A session
    /// with zero buffered frames also returns `None`: there is nothing to
    /// persist.
    pub fn stop(&mut self) -> Option<MotionSequence> {
        if !self.is_recording() {
            debug!("stop while idle ignored");
            return None;
        }
        if self.buffer.is_empty() {
            warn!(session = %self.session_id, "stop with no recorded frames");
            self.state = RecorderState::Idle;
            return None;
        }
        Some(self.finalize())
    }

    /// Discard the in-progress session without emitting output.
    /// Idempotent: cancel while idle is a no-op.
    pub fn cancel(&mut self) {
        if self.is_recording() {
            info!(
                session = %self.session_id,
                discarded_frames = self.buffer.len(),
                "recording cancelled"
            );
            self.buffer.clear();
            self.state = RecorderState::Idle;
        } else {
            debug!("cancel while idle ignored");
        }
    }

    fn finalize(&mut self) -> MotionSequence {
        let frames = std::mem::take(&mut self.buffer);
        self.state = RecorderState::Idle;

        // duration from first/last frame timestamp; a single frame has none
        let duration = match frames.len() {
            0 | 1 => 0.0,
            n => frames[n - 1].timestamp - frames[0].timestamp,
        };
        let average_fps = if duration > MIN_DURATION_SECS {
            frames.len() as f64 / duration
        } else {
            0.0
        };

        let mut primitives_used = Vec::new();
        for frame in &frames {
            if !primitives_used.contains(&frame.primitive) {
                primitives_used.push(frame.primitive);
            }
        }

        let metadata = SequenceMetadata {
            id: self.session_id,
            gesture_name: std::mem::take(&mut self.gesture_name),
            recorded_at: chrono::Utc::now(),
            duration_seconds: duration,
            total_frames: frames.len(),
            average_fps,
            primitives_used,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        };
        info!(
            session = %metadata.id,
            gesture = %metadata.gesture_name,
            frames = metadata.total_frames,
            duration = metadata.duration_seconds,
            fps = metadata.average_fps,
            "recording finalized"
        );
        MotionSequence { metadata, frames }
    }
}

impl Default for SequenceRecorder {
    fn default() -> Self {
        Self::new(StartPolicy::default(), 0)
    }
}

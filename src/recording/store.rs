//! Sequence persistence
//!
//! Saves finalized sequences as pretty-printed JSON and loads them back with
//! schema validation. Save and load are inverse operations up to
//! floating-point rounding. Only I/O and schema failures surface to the
//! caller; a failed save leaves the in-memory sequence untouched so it can
//! be retried.

use crate::recording::sequence::{MotionSequence, SequenceMetadata, CURRENT_FORMAT_VERSION};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

impl MotionSequence {
    /// Save the sequence to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(
            path = %path.display(),
            frames = self.metadata.total_frames,
            "sequence saved"
        );
        Ok(())
    }

    /// Save into a directory using the canonical
    /// `{gesture_name}_{timestamp}.json` file name, creating the directory
    /// if needed. Returns the written path.
    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(sequence_filename(&self.metadata));
        self.save(&path)?;
        Ok(path)
    }

    /// Load a sequence from a file and validate it against the schema.
    ///
    /// Logs a warning for unknown format versions but still attempts the
    /// load (additive fields deserialize with defaults).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let sequence: MotionSequence = serde_json::from_str(&content)?;
        if sequence.metadata.format_version != CURRENT_FORMAT_VERSION {
            warn!(
                gesture = %sequence.metadata.gesture_name,
                found = %sequence.metadata.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "sequence has a different format version"
            );
        }
        sequence.validate()?;
        Ok(sequence)
    }

    /// Check the document invariants: declared frame count matches the
    /// frame list, frame indices are contiguous from 0, timestamps are
    /// non-decreasing, finger vectors are binary.
    pub fn validate(&self) -> Result<()> {
        if self.metadata.total_frames != self.frames.len() {
            return Err(Error::Schema(format!(
                "metadata declares {} frames but the document has {}",
                self.metadata.total_frames,
                self.frames.len()
            )));
        }
        for (i, frame) in self.frames.iter().enumerate() {
            if frame.frame_num != i as u64 {
                return Err(Error::Schema(format!(
                    "frame at position {} carries index {}",
                    i, frame.frame_num
                )));
            }
            if i > 0 && frame.timestamp < self.frames[i - 1].timestamp {
                return Err(Error::Schema(format!(
                    "timestamp decreases at frame {}",
                    frame.frame_num
                )));
            }
            if !frame.fingers_extended.is_valid() {
                return Err(Error::Schema(format!(
                    "non-binary finger vector at frame {}",
                    frame.frame_num
                )));
            }
        }
        Ok(())
    }
}

/// Canonical file name for a sequence: `{gesture_name}_{timestamp}.json`
/// with the gesture name lowercased and non-alphanumerics collapsed to `_`.
pub fn sequence_filename(metadata: &SequenceMetadata) -> String {
    format!(
        "{}_{}.json",
        sanitize(&metadata.gesture_name),
        metadata.recorded_at.timestamp()
    )
}

fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned
    }
}

/// List persisted sequence files in a directory, sorted by file name.
/// A missing directory is an empty dataset, not an error.
pub fn recordings_in_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    paths.sort();
    Ok(paths)
}

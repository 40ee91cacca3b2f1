//! Velocity estimation over a bounded positional history
//!
//! Tracks the wrist reference point across frames and derives a smoothed
//! velocity vector. History lives in a fixed-capacity ring owned by the
//! estimator; a tracking gap (inter-frame delta above the configured
//! threshold) discards the history and starts a fresh sub-sequence instead
//! of reporting a spurious spike.

use crate::hand::landmarks::Point;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default smoothing window (number of buffered samples)
pub const DEFAULT_WINDOW: usize = 3;

/// Default tracking-gap threshold in seconds
pub const DEFAULT_GAP_THRESHOLD_SECS: f64 = 0.25;

/// Smallest usable smoothing window
pub const MIN_WINDOW: usize = 2;

/// Largest supported smoothing window
pub const MAX_WINDOW: usize = 5;

/// Velocity of the reference point, in input units per second
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Velocity {
    pub magnitude: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Velocity {
    /// The zero vector: no velocity is inferable (first sample, gap, or
    /// lost reference point)
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_components(vx: f64, vy: f64) -> Self {
        Self {
            magnitude: vx.hypot(vy),
            vx,
            vy,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.vx == 0.0 && self.vy == 0.0
    }
}

/// One estimator output: the velocity plus whether a tracking gap was
/// detected on this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityEstimate {
    pub velocity: Velocity,
    pub gap: bool,
}

/// Stateful per-session velocity estimator.
///
/// Keeps the most recent `window` reference positions with timestamps.
/// Velocity is the positional delta between the oldest and newest buffered
/// samples over their elapsed time, the window-averaged form of the
/// two-sample delta (identical to it at `window == 2`).
#[derive(Debug, Clone)]
pub struct VelocityEstimator {
    window: usize,
    gap_threshold: f64,
    history: VecDeque<(Point, f64)>,
}

impl VelocityEstimator {
    /// Create an estimator. The window is clamped to the supported
    /// [`MIN_WINDOW`]..=[`MAX_WINDOW`] range.
    pub fn new(window: usize, gap_threshold_secs: f64) -> Self {
        let window = window.clamp(MIN_WINDOW, MAX_WINDOW);
        Self {
            window,
            gap_threshold: gap_threshold_secs,
            history: VecDeque::with_capacity(window),
        }
    }

    /// Observe the reference point for one frame.
    ///
    /// Returns the zero vector on the first sample of a session, after any
    /// gap exceeding the threshold, and for non-increasing timestamps.
    pub fn update(&mut self, position: Point, timestamp: f64) -> VelocityEstimate {
        let gap = self
            .history
            .back()
            .is_some_and(|&(_, prev)| timestamp - prev > self.gap_threshold);
        if gap {
            tracing::debug!(
                dt = timestamp - self.history.back().map(|&(_, t)| t).unwrap_or(timestamp),
                threshold = self.gap_threshold,
                "tracking gap: velocity history discarded"
            );
            self.history.clear();
        }

        self.history.push_back((position, timestamp));
        if self.history.len() > self.window {
            self.history.pop_front();
        }

        VelocityEstimate {
            velocity: self.current_velocity(),
            gap,
        }
    }

    /// Discard the history, as at the start of a new session
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Number of buffered samples
    pub fn samples(&self) -> usize {
        self.history.len()
    }

    fn current_velocity(&self) -> Velocity {
        let (Some(&(oldest, t0)), Some(&(newest, t1))) =
            (self.history.front(), self.history.back())
        else {
            return Velocity::zero();
        };
        let dt = t1 - t0;
        if self.history.len() < 2 || dt <= 0.0 {
            return Velocity::zero();
        }
        Velocity::from_components((newest.x - oldest.x) / dt, (newest.y - oldest.y) / dt)
    }
}

impl Default for VelocityEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_GAP_THRESHOLD_SECS)
    }
}

// Tap tempo - BPM estimation from a rolling timestamp window
// Keeps the most recent taps within a short window and averages the
// consecutive inter-tap intervals

use crate::engine::{MAX_BPM, MIN_BPM};
use std::time::{Duration, Instant};

/// Taps older than this (relative to the newest tap) are discarded.
pub const TAP_WINDOW: Duration = Duration::from_secs(3);

/// At most this many taps contribute to the estimate.
pub const MAX_TAPS: usize = 8;

/// Rolling tap window producing BPM estimates.
///
/// The estimate itself is ephemeral: it is returned to the caller (which
/// feeds it into the scheduler) and not retained here.
#[derive(Debug, Clone, Default)]
pub struct TapTempo {
    taps: Vec<Instant>,
}

impl TapTempo {
    pub fn new() -> Self {
        Self { taps: Vec::new() }
    }

    /// Record a tap at `now` and return the BPM estimate, if any.
    ///
    /// Taps older than [`TAP_WINDOW`] relative to `now` are dropped and only
    /// the most recent [`MAX_TAPS`] kept. With fewer than two surviving taps
    /// there is nothing to estimate and `None` is returned.
    pub fn register(&mut self, now: Instant) -> Option<f64> {
        self.taps.push(now);
        self.taps
            .retain(|&t| now.saturating_duration_since(t) <= TAP_WINDOW);
        if self.taps.len() > MAX_TAPS {
            let excess = self.taps.len() - MAX_TAPS;
            self.taps.drain(..excess);
        }

        if self.taps.len() < 2 {
            return None;
        }

        // Mean of consecutive intervals == total span / interval count.
        let first = self.taps[0];
        let last = self.taps[self.taps.len() - 1];
        let span = last.saturating_duration_since(first);
        let mean = span.as_secs_f64() / (self.taps.len() - 1) as f64;

        let bpm = 60.0 / mean;
        Some(bpm.clamp(MIN_BPM, MAX_BPM))
    }

    /// Number of taps currently inside the window.
    pub fn tap_count(&self) -> usize {
        self.taps.len()
    }

    /// Forget all recorded taps.
    pub fn reset(&mut self) {
        self.taps.clear();
    }
}

// Pattern store - beat-activity grid and accent grid
// Resizable, independent of playback state; lengths only ever grow so that
// shrinking and re-growing the beat count never loses authored cells

use crate::engine::note_value::NoteValue;
use rand::Rng;
use rand::seq::SliceRandom;

/// Minimum allocated grid length, regardless of beats per measure.
pub const MIN_GRID_LEN: usize = 16;

/// Canonical layouts place at most this many accents.
pub const MAX_ACCENTS: usize = 4;

/// Beat-activity and accent grids for one measure.
///
/// Invariant: both sequences always have the same length, and that length is
/// at least `max(16, beats_per_measure)`. Indices below `beats_per_measure`
/// are meaningful; anything beyond is inert padding kept around so a later
/// beat-count increase finds previously authored cells intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternState {
    beats_per_measure: usize,
    grid: Vec<bool>,
    accents: Vec<bool>,
}

impl PatternState {
    /// Create a pattern with the canonical default layout for `note_value`.
    pub fn new(note_value: NoteValue) -> Self {
        let beats = note_value.canonical_beats_per_measure();
        let len = beats.max(MIN_GRID_LEN);
        let mut pattern = Self {
            beats_per_measure: beats,
            grid: vec![false; len],
            accents: vec![false; len],
        };
        pattern.apply_canonical(note_value);
        pattern
    }

    pub fn beats_per_measure(&self) -> usize {
        self.beats_per_measure
    }

    /// Allocated grid length (>= max(16, beats_per_measure)).
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn grid(&self) -> &[bool] {
        &self.grid
    }

    pub fn accents(&self) -> &[bool] {
        &self.accents
    }

    /// Whether the beat at `index` is active. Out-of-range reads as inactive
    /// rather than faulting (a tick can race a resize).
    pub fn is_active(&self, index: usize) -> bool {
        self.grid.get(index).copied().unwrap_or(false)
    }

    /// Whether the beat at `index` is accented. Out-of-range reads false.
    pub fn is_accented(&self, index: usize) -> bool {
        self.accents.get(index).copied().unwrap_or(false)
    }

    /// Flip the activity cell at `index`. Out-of-range is a no-op; the grid
    /// is never extended on access.
    pub fn toggle_cell(&mut self, index: usize) {
        if let Some(cell) = self.grid.get_mut(index) {
            *cell = !*cell;
        }
    }

    /// Flip the accent cell at `index`. Out-of-range is a no-op.
    pub fn toggle_accent(&mut self, index: usize) {
        if let Some(cell) = self.accents.get_mut(index) {
            *cell = !*cell;
        }
    }

    /// Adopt `note_value`'s canonical beat count and default layout.
    /// Grows the sequences if needed; never shrinks them.
    pub fn resize_to_note_value(&mut self, note_value: NoteValue) {
        self.beats_per_measure = note_value.canonical_beats_per_measure();
        self.ensure_len(self.beats_per_measure.max(MIN_GRID_LEN));
        self.apply_canonical(note_value);
    }

    /// Change the beat count, keeping the current note value's grouping.
    ///
    /// Reapplies the canonical default scaled to `beats`, overwriting manual
    /// edits below the new count. Cells at or beyond `beats` are untouched.
    pub fn set_beats_per_measure(&mut self, beats: usize, note_value: NoteValue) {
        self.beats_per_measure = beats.max(1);
        self.ensure_len(self.beats_per_measure.max(MIN_GRID_LEN));
        self.apply_canonical(note_value);
    }

    /// Write the canonical default layout over indices below the beat count:
    /// every position active, accents on main-beat boundaries (at most 4).
    /// Padding beyond the beat count keeps its authored values.
    pub fn apply_canonical(&mut self, note_value: NoteValue) {
        for i in 0..self.beats_per_measure {
            self.grid[i] = true;
            self.accents[i] = false;
        }
        let step = note_value.accent_step();
        for k in 0..MAX_ACCENTS {
            let pos = k * step;
            if pos < self.beats_per_measure {
                self.accents[pos] = true;
            }
        }
    }

    /// Copy a frozen snapshot into the live grids.
    ///
    /// Grows (never shrinks) to fit the snapshot; live cells beyond the
    /// snapshot length keep their values.
    pub fn load_snapshot(&mut self, beats_per_measure: usize, grid: &[bool], accents: &[bool]) {
        self.beats_per_measure = beats_per_measure.max(1);
        let wanted = grid
            .len()
            .max(accents.len())
            .max(self.beats_per_measure)
            .max(MIN_GRID_LEN);
        self.ensure_len(wanted);
        self.grid[..grid.len()].copy_from_slice(grid);
        self.accents[..accents.len()].copy_from_slice(accents);
    }

    /// Replace the grids with a random layout.
    ///
    /// Beat 0 is always active and accented. The total active count is drawn
    /// uniformly from `[max(2, beats/4), min(beats, 12)]`; each active beat
    /// other than 0 is accented with probability 1/4.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        self.grid.fill(false);
        self.accents.fill(false);

        self.grid[0] = true;
        self.accents[0] = true;

        let beats = self.beats_per_measure;
        let low = 2usize.max(beats / 4);
        let high = beats.min(12);
        // A one- or two-beat measure can't fit the usual minimum.
        let low = low.min(high);
        let target_active = rng.gen_range(low..=high);

        let mut candidates: Vec<usize> = (1..beats).collect();
        candidates.shuffle(rng);
        for &pos in candidates.iter().take(target_active.saturating_sub(1)) {
            self.grid[pos] = true;
            if rng.gen_bool(0.25) {
                self.accents[pos] = true;
            }
        }
    }

    fn ensure_len(&mut self, len: usize) {
        if self.grid.len() < len {
            self.grid.resize(len, false);
            self.accents.resize(len, false);
        }
    }
}

impl Default for PatternState {
    fn default() -> Self {
        Self::new(NoteValue::Quarter)
    }
}

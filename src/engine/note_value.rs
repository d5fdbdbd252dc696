// Note values - subdivision lookup table
// Maps each rhythmic subdivision to its tick rate relative to a quarter-note
// beat, its default measure length, and its accent grouping

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rhythmic subdivision controlling tick rate relative to BPM.
///
/// The table is fixed: six values, never mutated. Triplet variants divide the
/// same span into three equal parts instead of two or four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteValue {
    Quarter,
    Eighth,
    Sixteenth,
    QuarterTriplet,
    EighthTriplet,
    SixteenthTriplet,
}

impl NoteValue {
    /// Every note value, in picker order.
    pub const ALL: [NoteValue; 6] = [
        NoteValue::Quarter,
        NoteValue::Eighth,
        NoteValue::Sixteenth,
        NoteValue::QuarterTriplet,
        NoteValue::EighthTriplet,
        NoteValue::SixteenthTriplet,
    ];

    /// Ticks per quarter-note beat.
    ///
    /// The scheduler divides the beat duration (60/BPM seconds) by this to
    /// get the tick interval.
    pub fn multiplier(&self) -> f64 {
        match self {
            NoteValue::Quarter => 1.0,
            NoteValue::Eighth => 2.0,
            NoteValue::Sixteenth => 4.0,
            NoteValue::QuarterTriplet => 1.5,
            NoteValue::EighthTriplet => 3.0,
            NoteValue::SixteenthTriplet => 6.0,
        }
    }

    /// Default beats per measure when this subdivision is selected.
    pub fn canonical_beats_per_measure(&self) -> usize {
        match self {
            NoteValue::Quarter => 4,
            NoteValue::Eighth => 8,
            NoteValue::Sixteenth => 16,
            NoteValue::QuarterTriplet => 3,
            NoteValue::EighthTriplet => 6,
            NoteValue::SixteenthTriplet => 12,
        }
    }

    /// Whether this is a triplet subdivision.
    pub fn is_triplet(&self) -> bool {
        matches!(
            self,
            NoteValue::QuarterTriplet | NoteValue::EighthTriplet | NoteValue::SixteenthTriplet
        )
    }

    /// Tick spacing between canonical accents (main-beat boundaries).
    ///
    /// Straight values accent every `multiplier`-th tick. Triplets group in
    /// threes, except the quarter-triplet whose three ticks are all main
    /// beats.
    pub fn accent_step(&self) -> usize {
        match self {
            NoteValue::Quarter | NoteValue::QuarterTriplet => 1,
            NoteValue::Eighth => 2,
            NoteValue::Sixteenth => 4,
            NoteValue::EighthTriplet | NoteValue::SixteenthTriplet => 3,
        }
    }

    /// Human-readable name, as shown in pickers.
    pub fn name(&self) -> &'static str {
        match self {
            NoteValue::Quarter => "Quarter",
            NoteValue::Eighth => "Eighth",
            NoteValue::Sixteenth => "Sixteenth",
            NoteValue::QuarterTriplet => "Quarter Triplet",
            NoteValue::EighthTriplet => "Eighth Triplet",
            NoteValue::SixteenthTriplet => "Sixteenth Triplet",
        }
    }

    /// Notation glyph for compact display.
    pub fn symbol(&self) -> &'static str {
        match self {
            NoteValue::Quarter => "♩",
            NoteValue::Eighth => "♪",
            NoteValue::Sixteenth => "♬",
            NoteValue::QuarterTriplet => "♩3",
            NoteValue::EighthTriplet => "♪3",
            NoteValue::SixteenthTriplet => "♬3",
        }
    }
}

impl Default for NoteValue {
    fn default() -> Self {
        NoteValue::Quarter
    }
}

impl fmt::Display for NoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_table() {
        assert_eq!(NoteValue::Quarter.multiplier(), 1.0);
        assert_eq!(NoteValue::Eighth.multiplier(), 2.0);
        assert_eq!(NoteValue::Sixteenth.multiplier(), 4.0);
        assert_eq!(NoteValue::QuarterTriplet.multiplier(), 1.5);
        assert_eq!(NoteValue::EighthTriplet.multiplier(), 3.0);
        assert_eq!(NoteValue::SixteenthTriplet.multiplier(), 6.0);
    }

    #[test]
    fn test_canonical_beat_counts() {
        assert_eq!(NoteValue::Quarter.canonical_beats_per_measure(), 4);
        assert_eq!(NoteValue::Eighth.canonical_beats_per_measure(), 8);
        assert_eq!(NoteValue::Sixteenth.canonical_beats_per_measure(), 16);
        assert_eq!(NoteValue::QuarterTriplet.canonical_beats_per_measure(), 3);
        assert_eq!(NoteValue::EighthTriplet.canonical_beats_per_measure(), 6);
        assert_eq!(NoteValue::SixteenthTriplet.canonical_beats_per_measure(), 12);
    }

    #[test]
    fn test_triplet_flags() {
        assert!(!NoteValue::Quarter.is_triplet());
        assert!(!NoteValue::Eighth.is_triplet());
        assert!(!NoteValue::Sixteenth.is_triplet());
        assert!(NoteValue::QuarterTriplet.is_triplet());
        assert!(NoteValue::EighthTriplet.is_triplet());
        assert!(NoteValue::SixteenthTriplet.is_triplet());
    }

    #[test]
    fn test_accent_steps_match_canonical_groups() {
        // Every accent position k * step must land inside the canonical
        // measure for at least one k (the downbeat).
        for nv in NoteValue::ALL {
            assert!(nv.accent_step() >= 1);
            assert!(nv.accent_step() < nv.canonical_beats_per_measure() || nv.canonical_beats_per_measure() == 1);
        }

        assert_eq!(NoteValue::Eighth.accent_step(), 2);
        assert_eq!(NoteValue::Sixteenth.accent_step(), 4);
        assert_eq!(NoteValue::SixteenthTriplet.accent_step(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(NoteValue::Quarter.to_string(), "Quarter");
        assert_eq!(NoteValue::EighthTriplet.to_string(), "Eighth Triplet");
    }
}

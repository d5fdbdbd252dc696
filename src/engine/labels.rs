// Beat labels - pure formatting of grid positions
// Maps (position, note value, display mode) to the counting syllable shown
// on a beat tile; no state, total over all in-range positions

use crate::engine::note_value::NoteValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How beat positions are verbalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Standard "1 & 2 &" / "1 e & a" counting; triplets number sequentially.
    AndCounting,
    /// Same as [`AndCounting`](DisplayMode::AndCounting) for straight values;
    /// triplets count "1 trip let".
    SubdivisionCounting,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 2] = [DisplayMode::AndCounting, DisplayMode::SubdivisionCounting];
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::AndCounting
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::AndCounting => write!(f, "and-counting"),
            DisplayMode::SubdivisionCounting => write!(f, "subdivision-counting"),
        }
    }
}

/// Label for the beat at `position` under the given note value and mode.
pub fn label(position: usize, note_value: NoteValue, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::AndCounting => and_counting(position, note_value),
        DisplayMode::SubdivisionCounting => {
            if note_value.is_triplet() {
                triplet_counting(position)
            } else {
                and_counting(position, note_value)
            }
        }
    }
}

fn and_counting(position: usize, note_value: NoteValue) -> String {
    match note_value {
        NoteValue::Quarter => (position + 1).to_string(),
        NoteValue::Eighth => {
            if position % 2 == 0 {
                (position / 2 + 1).to_string()
            } else {
                "&".to_string()
            }
        }
        NoteValue::Sixteenth => match position % 4 {
            0 => (position / 4 + 1).to_string(),
            1 => "e".to_string(),
            2 => "&".to_string(),
            _ => "a".to_string(),
        },
        // Triplets number plainly in this mode.
        NoteValue::QuarterTriplet | NoteValue::EighthTriplet | NoteValue::SixteenthTriplet => {
            (position + 1).to_string()
        }
    }
}

fn triplet_counting(position: usize) -> String {
    match position % 3 {
        0 => (position / 3 + 1).to_string(),
        1 => "trip".to_string(),
        _ => "let".to_string(),
    }
}

// Engine snapshot - read-only observation surface
// One flat copy of everything a front end needs to render, taken under the
// same lock that serializes mutations and ticks

use crate::engine::labels::DisplayMode;
use crate::engine::note_value::NoteValue;
use crate::preset::store::BeatPreset;

/// Point-in-time copy of the observable engine state.
///
/// Produced synchronously with every mutating call; holding one never blocks
/// or aliases the live engine.
#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    pub is_playing: bool,
    pub bpm: f64,
    pub note_value: NoteValue,
    pub display_mode: DisplayMode,
    pub beats_per_measure: usize,
    /// -1 while stopped or before the first tick, else in `0..beats_per_measure`.
    pub current_beat: i32,
    /// Whether the 100 ms tick pulse is currently lit.
    pub visual_pulse: bool,
    pub grid_pattern: Vec<bool>,
    pub accent_pattern: Vec<bool>,
    pub presets: Vec<BeatPreset>,
    pub active_preset_name: Option<String>,
}

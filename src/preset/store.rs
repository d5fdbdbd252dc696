// Preset store - named snapshots of engine configuration
// Presets are frozen copies: loading one copies fields into the live state,
// it never aliases it

use crate::engine::labels::DisplayMode;
use crate::engine::note_value::NoteValue;
use crate::engine::pattern::PatternState;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for presets.
pub type PresetId = Uuid;

/// Immutable snapshot of tempo, subdivision, pattern, and display settings.
///
/// Names are unique within a store (last save under a name wins); ids are
/// unique always. The grids are sized to the pattern at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatPreset {
    pub id: PresetId,
    pub name: String,
    pub note_value: NoteValue,
    pub bpm: f64,
    pub beats_per_measure: usize,
    pub grid_pattern: Vec<bool>,
    pub accent_pattern: Vec<bool>,
    pub display_mode: DisplayMode,
}

impl BeatPreset {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        note_value: NoteValue,
        bpm: f64,
        beats_per_measure: usize,
        grid_pattern: Vec<bool>,
        accent_pattern: Vec<bool>,
        display_mode: DisplayMode,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            note_value,
            bpm,
            beats_per_measure,
            grid_pattern,
            accent_pattern,
            display_mode,
        }
    }

    /// Preset with the canonical pattern for `note_value` at `bpm`.
    pub fn canonical(name: impl Into<String>, note_value: NoteValue, bpm: f64) -> Self {
        let pattern = PatternState::new(note_value);
        Self::new(
            name,
            note_value,
            bpm,
            pattern.beats_per_measure(),
            pattern.grid().to_vec(),
            pattern.accents().to_vec(),
            DisplayMode::default(),
        )
    }
}

/// Collection of saved presets with overwrite-by-name semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetStore {
    presets: Vec<BeatPreset>,
}

impl PresetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the stock quick presets.
    pub fn factory() -> Self {
        let mut store = Self::new();
        store.save(BeatPreset::canonical("Basic", NoteValue::Quarter, 120.0));
        store.save(BeatPreset::canonical("Rock", NoteValue::Eighth, 110.0));
        store.save(BeatPreset::canonical("Jazz", NoteValue::QuarterTriplet, 140.0));
        store.save(BeatPreset::canonical("Fast", NoteValue::Sixteenth, 160.0));
        store
    }

    /// Add a preset. An existing preset with the same name is removed first.
    pub fn save(&mut self, preset: BeatPreset) {
        self.presets.retain(|p| p.name != preset.name);
        self.presets.push(preset);
    }

    pub fn get(&self, id: PresetId) -> Option<&BeatPreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&BeatPreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Remove a preset by id. Unknown ids are a no-op returning `None`.
    pub fn delete(&mut self, id: PresetId) -> Option<BeatPreset> {
        let index = self.presets.iter().position(|p| p.id == id)?;
        Some(self.presets.remove(index))
    }

    pub fn all(&self) -> &[BeatPreset] {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Swap in a whole new set of presets (e.g. loaded from disk).
    pub fn replace_all(&mut self, presets: Vec<BeatPreset>) {
        self.presets = presets;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_get() {
        let mut store = PresetStore::new();
        let preset = BeatPreset::canonical("Groove", NoteValue::Eighth, 95.0);
        let id = preset.id;

        store.save(preset);
        assert_eq!(store.len(), 1);

        let found = store.get(id).unwrap();
        assert_eq!(found.name, "Groove");
        assert_eq!(found.bpm, 95.0);
        assert_eq!(found.note_value, NoteValue::Eighth);
        assert_eq!(found.beats_per_measure, 8);
    }

    #[test]
    fn test_save_overwrites_by_name() {
        let mut store = PresetStore::new();
        let first = BeatPreset::canonical("Groove", NoteValue::Quarter, 100.0);
        let first_id = first.id;
        store.save(first);

        let second = BeatPreset::canonical("Groove", NoteValue::Sixteenth, 160.0);
        let second_id = second.id;
        store.save(second);

        assert_eq!(store.len(), 1);
        assert!(store.get(first_id).is_none());
        assert_eq!(store.get(second_id).unwrap().bpm, 160.0);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut store = PresetStore::factory();
        let before = store.len();

        assert!(store.delete(Uuid::new_v4()).is_none());
        assert_eq!(store.len(), before);
    }

    #[test]
    fn test_factory_presets() {
        let store = PresetStore::factory();
        assert_eq!(store.len(), 4);

        let jazz = store.find_by_name("Jazz").unwrap();
        assert_eq!(jazz.note_value, NoteValue::QuarterTriplet);
        assert_eq!(jazz.bpm, 140.0);
        assert_eq!(jazz.beats_per_measure, 3);

        let fast = store.find_by_name("Fast").unwrap();
        assert_eq!(fast.note_value, NoteValue::Sixteenth);
        // Canonical sixteenth grid: all active, accents every 4th.
        assert!(fast.grid_pattern[..16].iter().all(|&b| b));
        for (i, &accent) in fast.accent_pattern[..16].iter().enumerate() {
            assert_eq!(accent, matches!(i, 0 | 4 | 8 | 12));
        }
    }
}

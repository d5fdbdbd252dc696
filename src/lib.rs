// BeatGrid - Library exports for front ends, tests, and benchmarks

pub mod audio;
pub mod engine;
pub mod messaging;
pub mod preset;

// Re-export commonly used types for convenience
pub use audio::click::{ClickPlayer, ClickTone};
pub use audio::output::{AudioError, ClickHandle, ClickOutput};
pub use audio::sink::{NullSink, SoundSink};
pub use engine::labels::{DisplayMode, label};
pub use engine::note_value::NoteValue;
pub use engine::pattern::PatternState;
pub use engine::scheduler::{Metronome, tick_interval};
pub use engine::snapshot::EngineSnapshot;
pub use engine::tap_tempo::TapTempo;
pub use engine::{DEFAULT_BPM, MAX_BPM, MIN_BPM};
pub use messaging::channels::{create_click_channel, create_event_channel};
pub use messaging::event::EngineEvent;
pub use preset::persistence::{default_bank_path, load_bank, save_bank};
pub use preset::store::{BeatPreset, PresetId, PresetStore};

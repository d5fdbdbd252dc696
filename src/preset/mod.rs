// Preset module - named configuration snapshots and their persistence

pub mod persistence;
pub mod store;

pub use persistence::{
    PresetBank, PresetStoreError, default_bank_path, export_json, import_json, load_bank,
    save_bank,
};
pub use store::{BeatPreset, PresetId, PresetStore};

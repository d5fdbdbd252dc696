// Preset persistence - bank file on disk
// The engine itself never touches the filesystem; callers load a bank at
// startup and save it on demand. RON for the bank file, JSON for interchange.

use crate::preset::store::BeatPreset;
use chrono::{DateTime, Utc};
use ron::{from_str as ron_from_str, to_string as ron_to_string};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PresetStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON error: {0}")]
    Ron(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no usable config directory on this system")]
    NoConfigDir,
}

/// On-disk container for the saved presets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetBank {
    /// When this bank was written.
    pub saved_at: DateTime<Utc>,
    pub presets: Vec<BeatPreset>,
}

impl PresetBank {
    pub fn new(presets: Vec<BeatPreset>) -> Self {
        Self {
            saved_at: Utc::now(),
            presets,
        }
    }
}

/// Default bank location under the user config directory.
pub fn default_bank_path() -> Result<PathBuf, PresetStoreError> {
    let base = dirs::config_dir().ok_or(PresetStoreError::NoConfigDir)?;
    Ok(base.join("beatgrid").join("presets.ron"))
}

/// Write the presets to `path` as a RON bank, creating parent directories.
pub fn save_bank(path: &Path, presets: &[BeatPreset]) -> Result<(), PresetStoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let bank = PresetBank::new(presets.to_vec());
    let ron_data =
        ron_to_string(&bank).map_err(|e| PresetStoreError::Ron(format!("serialize: {}", e)))?;
    fs::write(path, ron_data)?;
    Ok(())
}

/// Read a RON bank from `path`.
pub fn load_bank(path: &Path) -> Result<PresetBank, PresetStoreError> {
    let ron_data = fs::read_to_string(path)?;
    ron_from_str(&ron_data).map_err(|e| PresetStoreError::Ron(format!("deserialize: {}", e)))
}

/// Presets as pretty-printed JSON, for sharing outside the bank file.
pub fn export_json(presets: &[BeatPreset]) -> Result<String, PresetStoreError> {
    Ok(serde_json::to_string_pretty(presets)?)
}

/// Parse presets previously exported with [`export_json`].
pub fn import_json(json_data: &str) -> Result<Vec<BeatPreset>, PresetStoreError> {
    Ok(serde_json::from_str(json_data)?)
}

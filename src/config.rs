use crate::errors::{ForgeError, ForgeResult};
use crate::living_dex::LivingDexSettings;
use crate::synthesis::DEFAULT_MAX_CANDIDATES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Engine settings, read from a RON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Directory of entity files whose trainers populate the database
    pub trainer_path: PathBuf,
    /// Stamp generated entities with database trainers instead of the save's own
    pub use_trainer_data: bool,
    pub living_dex: LivingDexSettings,
    /// Encounter templates examined per fallback search
    pub max_candidates: usize,
    /// Personal tables to load instead of the embedded ones
    pub personal_data: Option<PathBuf>,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        ForgeConfig {
            trainer_path: PathBuf::from("trainers"),
            use_trainer_data: true,
            living_dex: LivingDexSettings::default(),
            max_candidates: DEFAULT_MAX_CANDIDATES,
            personal_data: None,
        }
    }
}

impl ForgeConfig {
    pub fn load(path: &Path) -> ForgeResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| ForgeError::io(path, e))?;
        Self::parse(&text).map_err(|details| ForgeError::Document {
            path: path.to_path_buf(),
            details,
        })
    }

    pub fn parse(text: &str) -> Result<Self, String> {
        ron::from_str(text).map_err(|e| e.to_string())
    }
}

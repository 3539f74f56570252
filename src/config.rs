use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

/// Per-query tuning knobs. Missing fields fall back to their defaults.
///
/// ```json
/// { "number_of_landmarks": 4, "landmark_update_interval": 100, "draw_interval": 0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// How many landmarks an ALT query uses at once.
    pub number_of_landmarks: u32,
    /// Landmarks are chosen again every this many expansions, 0 means never.
    pub landmark_update_interval: u32,
    /// Expansions between two rendered frames, 0 renders after every one.
    pub draw_interval: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            number_of_landmarks: 3,
            landmark_update_interval: 0,
            draw_interval: 0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SearchConfig {
    pub fn from_json_file(path: &Path) -> Result<SearchConfig, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(json: &str) -> Result<SearchConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

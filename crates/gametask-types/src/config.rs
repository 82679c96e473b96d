use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::buttons::{BUTTON_COUNT, DEFAULT_BUTTON_MAP};
use crate::error::TaskError;

/// File the CLI reads when no path is given.
pub const CONFIG_FILE: &str = "gametask.json";

/// Game most sessions are run with.
pub const DEFAULT_GAME: &str = "ShinobiIIIReturnOfTheNinjaMaster-Genesis";

/// Presentation and output settings shared by the game tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TaskConfig {
    /// Display refresh rate the scheduler ticks at.
    pub frame_rate: u32,
    /// How long the instruction screen stays up.
    pub instruction_duration_secs: u32,
    /// Wrap width for instruction text.
    pub wrap_width: f32,
    /// Stereo frames per audio block; one block per emulator step.
    pub audio_block_size: usize,
    pub audio_sample_rate: u32,
    /// Directory movies are recorded into.
    pub output_dir: PathBuf,
    pub default_game: String,
    /// Key name for each action-vector slot, `_` for none.
    pub button_map: Vec<String>,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            instruction_duration_secs: 5,
            wrap_width: 1.2,
            audio_block_size: 735,
            audio_sample_rate: 44100,
            output_dir: PathBuf::from("output"),
            default_game: DEFAULT_GAME.to_string(),
            button_map: DEFAULT_BUTTON_MAP.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TaskConfig {
    /// Loads config from a specified path.
    /// Returns default config if file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves config to a specified path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Reject settings the frame loop cannot run with.
    pub fn validate(&self) -> Result<(), TaskError> {
        if self.button_map.len() != BUTTON_COUNT {
            return Err(TaskError::InvalidButtonMap {
                expected: BUTTON_COUNT,
                actual: self.button_map.len(),
            });
        }
        if self.frame_rate == 0 {
            return Err(TaskError::InvalidConfig("frame_rate must be positive".into()));
        }
        if self.audio_block_size == 0 || self.audio_sample_rate == 0 {
            return Err(TaskError::InvalidConfig(
                "audio block size and sample rate must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Number of frames the instruction screen is drawn for.
    pub fn instruction_frames(&self) -> u32 {
        self.frame_rate * self.instruction_duration_secs
    }
}

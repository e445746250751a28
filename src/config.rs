use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::app_dirs::AppDirs;

/// Vertical compensation for the fixed header when deciding which section is in view.
pub const HEADER_OFFSET: i32 = 100;
/// Vertical compensation for the fixed header when scrolling a section into view.
pub const TARGET_OFFSET: i32 = 80;
pub const RIPPLE_DURATION_MS: u64 = 500;
pub const SMOOTH_SCROLL_MS: u64 = 300;
/// Layout units per terminal row.
pub const ROW_HEIGHT: i32 = 20;
pub const TICK_RATE_MS: u64 = 50;

/// Presentation tuning values. Everything here is optional in the file;
/// missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub header_offset: i32,
    pub target_offset: i32,
    pub ripple_duration_ms: u64,
    pub smooth_scroll_ms: u64,
    pub row_height: i32,
    pub tick_rate_ms: u64,
    pub typewriter_step_ms: u64,
    pub typewriter_pause_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            header_offset: HEADER_OFFSET,
            target_offset: TARGET_OFFSET,
            ripple_duration_ms: RIPPLE_DURATION_MS,
            smooth_scroll_ms: SMOOTH_SCROLL_MS,
            row_height: ROW_HEIGHT,
            tick_rate_ms: TICK_RATE_MS,
            typewriter_step_ms: 100,
            typewriter_pause_ms: 1500,
        }
    }
}

impl Config {
    pub fn ripple_duration(&self) -> Duration {
        Duration::from_millis(self.ripple_duration_ms)
    }

    pub fn smooth_scroll_duration(&self) -> Duration {
        Duration::from_millis(self.smooth_scroll_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    /// Row height in units, never below one.
    pub fn row_units(&self) -> i32 {
        self.row_height.max(1)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("folio_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

//! Runtime settings: simulation tick, frame cap, RNG seed and asset location.

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tick interval must be at least 1 ms")]
    ZeroTick,
    #[error("frame rate cap must be at least 1 fps")]
    ZeroFps,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Milliseconds between snake moves.
    pub tick_ms: u64,
    /// Render frame-rate cap.
    pub fps: u32,
    /// Fixed seed for food placement; random when absent.
    pub seed: Option<u64>,
    /// Asset root. Relative paths resolve against the same base directory Bevy uses.
    pub asset_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            fps: 60,
            seed: None,
            asset_dir: PathBuf::from("assets"),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Absolute asset root: `BEVY_ASSET_ROOT`, then `CARGO_MANIFEST_DIR`, then the
    /// executable's directory serve as the base for a relative `asset_dir`.
    pub fn asset_root(&self) -> PathBuf {
        if self.asset_dir.is_absolute() {
            return self.asset_dir.clone();
        }
        let base = env::var_os("BEVY_ASSET_ROOT")
            .or_else(|| env::var_os("CARGO_MANIFEST_DIR"))
            .map(PathBuf::from)
            .or_else(|| {
                env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(Path::to_path_buf))
            })
            .unwrap_or_default();
        base.join(&self.asset_dir)
    }
}

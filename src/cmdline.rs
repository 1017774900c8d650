use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, GameConfig};

/// Retro Snake: steer with the arrow keys or WASD, Esc quits.
#[derive(Parser, Debug, Default)]
#[command(version)]
pub struct Args {
    /// JSON file with settings; flags below take precedence over it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Milliseconds between snake moves [default: 200]
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Render frame-rate cap [default: 60]
    #[arg(long)]
    pub fps: Option<u32>,

    /// Seed for food placement, for reproducible rounds
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory holding images/ and audio/ [default: assets]
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,
}

impl Args {
    /// Layers defaults, the optional config file and the flags, in that order.
    pub fn resolve_config(&self) -> Result<GameConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(assets) = &self.assets {
            config.asset_dir = assets.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

//! Configuration loading and parsing.
//!
//! Parses `boba.toml` (or an override path provided by the binary) into the
//! `[game]` table. Every field has a default so a partial file is fine, and a
//! missing or unparsable file falls back to defaults entirely. Unknown fields
//! are ignored to allow forward evolution without warnings.
//!
//! Scoring values are validated after parsing: `pearl_points` and
//! `target_score` must be at least 1 and are clamped up otherwise.

use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "boba.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GameConfig {
    #[serde(default = "GameConfig::default_pearl_points")]
    pub pearl_points: u32,
    #[serde(default = "GameConfig::default_target_score")]
    pub target_score: u32,
    #[serde(default = "GameConfig::default_max_game_time_secs")]
    pub max_game_time_secs: u64,
    #[serde(default = "GameConfig::default_move_cooldown_ms")]
    pub move_cooldown_ms: u64,
    /// Seed for every session's random source; absent means entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pearl_points: Self::default_pearl_points(),
            target_score: Self::default_target_score(),
            max_game_time_secs: Self::default_max_game_time_secs(),
            move_cooldown_ms: Self::default_move_cooldown_ms(),
            seed: None,
        }
    }
}

impl GameConfig {
    const fn default_pearl_points() -> u32 {
        100
    }
    const fn default_target_score() -> u32 {
        1000
    }
    const fn default_max_game_time_secs() -> u64 {
        30 * 60
    }
    const fn default_move_cooldown_ms() -> u64 {
        100
    }

    pub fn max_game_time(&self) -> Duration {
        Duration::from_secs(self.max_game_time_secs)
    }

    pub fn move_cooldown(&self) -> Duration {
        Duration::from_millis(self.move_cooldown_ms)
    }

    /// Pearls needed to reach the target score (rounded up).
    pub fn pearls_to_win(&self) -> u32 {
        self.target_score.div_ceil(self.pearl_points.max(1))
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub game: GameConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub source: Option<PathBuf>,
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    // Working directory wins over the platform config dir.
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("boba").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_file_absent_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let mut cfg = Config {
                raw: Some(content),
                file,
                source: Some(path),
            };
            cfg.validate();
            Ok(cfg)
        }
        Err(e) => {
            warn!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            Ok(Config::default())
        }
    }
}

impl Config {
    pub fn game(&self) -> &GameConfig {
        &self.file.game
    }

    /// Clamp scoring values into their legal range. Returns true when anything changed.
    pub fn validate(&mut self) -> bool {
        let game = &mut self.file.game;
        let mut changed = false;
        if game.pearl_points == 0 {
            info!(target: "config", raw = 0, clamped = 1, "pearl_points_clamped");
            game.pearl_points = 1;
            changed = true;
        }
        if game.target_score == 0 {
            info!(target: "config", raw = 0, clamped = 1, "target_score_clamped");
            game.target_score = 1;
            changed = true;
        }
        changed
    }

    /// Command-line seed overrides whatever the file says.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.file.game.seed = seed;
        }
        self
    }
}

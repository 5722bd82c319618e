//! Configuration loader - YAML settings + .env overrides

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration loaded from chaos_game.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasConfig,
    pub fractal_dir: PathBuf,
    pub default_fractal: String,
    pub steps: i32,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: usize,
    pub height: usize,
}

/// Environment overrides loaded from .env
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub fractal_dir: Option<PathBuf>,
    pub log_dir: String,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            fractal_dir: PathBuf::from("fractals"),
            default_fractal: "sierpinski_triangle".to_string(),
            steps: 100_000,
            seed: None,
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 650,
            height: 650,
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        if config.canvas.width == 0 || config.canvas.height == 0 {
            anyhow::bail!(
                "Canvas must be at least 1x1, got {}x{}",
                config.canvas.width,
                config.canvas.height
            );
        }
        Ok(config)
    }

    /// Load from `path` if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!("Loading config from {:?}", path);
            Self::load(path)
        } else {
            tracing::warn!("Config file not found: {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Apply environment overrides on top of the file settings
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(dir) = &overrides.fractal_dir {
            self.fractal_dir = dir.clone();
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
    }
}

impl Overrides {
    /// Load overrides from .env file and the process environment
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        Overrides {
            fractal_dir: std::env::var("CHAOS_FRACTAL_DIR").ok().map(PathBuf::from),
            log_dir: std::env::var("CHAOS_LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            seed: std::env::var("CHAOS_SEED")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }
}

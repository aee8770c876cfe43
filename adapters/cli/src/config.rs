//! Session configuration read from TOML and overridden by flags.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use snake_grid_core::{Rules, DEFAULT_CELL_SIZE};
use snake_grid_world::DEFAULT_FOOD_SEED;

/// Dimensions of the virtual drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct CanvasConfig {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) cell_size: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// Everything needed to start a session.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct SessionConfig {
    pub(crate) canvas: CanvasConfig,
    pub(crate) rules: Rules,
    pub(crate) seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            rules: Rules::default(),
            seed: DEFAULT_FOOD_SEED,
        }
    }
}

impl SessionConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read session config {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse session config {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("invalid session config toml")?;
        config
            .rules
            .validate()
            .context("session config describes unplayable rules")?;
        Ok(config)
    }
}

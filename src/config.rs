//! Editor configuration persistence
//!
//! Stores wrap settings in `~/.config/writer/config.yaml`. Changing the
//! configuration has no effect until it is passed to
//! [`Editor::apply_config`](crate::editor::Editor::apply_config).

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::document::DEFAULT_LINE_LIMIT;
use crate::wrap::{CellMeasure, LineBreaker, MeasuredWrap, NoWrap};

/// How lines are soft-wrapped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// Every logical line is one visual row
    None,
    /// Lines wrap at the measured render width
    #[default]
    Measure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrapConfig {
    #[serde(default)]
    pub mode: WrapMode,
    /// Render width in cells
    #[serde(default = "default_width")]
    pub width: usize,
    /// Width of one cell in measurement units
    #[serde(default = "default_cell_width")]
    pub cell_width: f32,
    /// Horizontal padding subtracted from the render width
    #[serde(default)]
    pub margin: f32,
}

fn default_width() -> usize {
    80
}

fn default_cell_width() -> f32 {
    1.0
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            mode: WrapMode::default(),
            width: default_width(),
            cell_width: default_cell_width(),
            margin: 0.0,
        }
    }
}

impl WrapConfig {
    /// Width budget handed to the line breaker
    pub fn max_width(&self) -> f32 {
        (self.width as f32 * self.cell_width - self.margin).max(0.0)
    }

    /// Build the line breaker this configuration describes
    pub fn breaker(&self) -> Box<dyn LineBreaker> {
        match self.mode {
            WrapMode::None => Box::new(NoWrap),
            WrapMode::Measure => Box::new(MeasuredWrap::new(
                CellMeasure::new(self.cell_width),
                self.max_width(),
            )),
        }
    }
}

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub wrap: WrapConfig,
    /// Maximum lines per chunk
    #[serde(default = "default_line_limit")]
    pub line_limit: usize,
    /// Quiet period before a full rewrap starts after a resize
    #[serde(default = "default_rewrap_debounce_ms")]
    pub rewrap_debounce_ms: u64,
}

fn default_line_limit() -> usize {
    DEFAULT_LINE_LIMIT
}

fn default_rewrap_debounce_ms() -> u64 {
    150
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            wrap: WrapConfig::default(),
            line_limit: default_line_limit(),
            rewrap_debounce_ms: default_rewrap_debounce_ms(),
        }
    }
}

impl EditorConfig {
    pub fn rewrap_debounce(&self) -> Duration {
        Duration::from_millis(self.rewrap_debounce_ms)
    }

    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Read and parse the config at `path`
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating its parent directory if needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

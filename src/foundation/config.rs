use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use crate::foundation::core::{PixelSize, Rgba8};
use crate::foundation::error::{ComposeError, ComposeResult};

/// Largest display size a base raster may occupy on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DisplayBounds {
    /// Maximum surface width in pixels.
    pub max_width: u32,
    /// Maximum surface height in pixels.
    pub max_height: u32,
}

impl Default for DisplayBounds {
    fn default() -> Self {
        Self {
            max_width: 600,
            max_height: 400,
        }
    }
}

impl DisplayBounds {
    /// Bounds as a pixel size.
    pub fn as_size(self) -> PixelSize {
        PixelSize::new(self.max_width, self.max_height)
    }
}

/// Parameters of the reference soft-light wash post-effect.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WashConfig {
    /// Simulated processing latency in milliseconds.
    pub delay_ms: u64,
    /// Wash color.
    pub color: Rgba8,
    /// Global alpha of the wash in `[0, 1]`.
    pub alpha: f32,
}

impl Default for WashConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            color: Rgba8::WHITE,
            alpha: 0.3,
        }
    }
}

impl WashConfig {
    /// Delay as a [`Duration`].
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Session configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Display bounds applied to every base raster.
    pub bounds: DisplayBounds,
    /// Reference post-effect parameters.
    pub effect: WashConfig,
}

impl ComposerConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(s: &str) -> ComposeResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| ComposeError::configuration(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_path(path: &Path) -> ComposeResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check value ranges.
    pub fn validate(&self) -> ComposeResult<()> {
        if self.bounds.max_width == 0 || self.bounds.max_height == 0 {
            return Err(ComposeError::configuration(
                "display bounds must be at least 1x1",
            ));
        }
        if !(0.0..=1.0).contains(&self.effect.alpha) {
            return Err(ComposeError::configuration(
                "effect alpha must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;

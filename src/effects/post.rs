//! Asynchronous post-processing applied to the finished composite.
//!
//! A [`PostEffect`] receives the surface and the user's prompt text. The session validates the
//! prompt, holds a [`TriggerGuard`] for the duration of the call, and runs the effect on a
//! snapshot so a failure never leaves a half-processed surface behind.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::composition::blend::BlendMode;
use crate::foundation::config::WashConfig;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{ComposeError, ComposeResult};
use crate::render::surface::Surface;

/// Pluggable asynchronous effect over the rendered surface.
#[async_trait::async_trait]
pub trait PostEffect: Send + Sync {
    /// Process `surface` in place. `prompt` is already validated as non-blank.
    async fn apply(&self, surface: &mut Surface, prompt: &str) -> ComposeResult<()>;
}

/// Stand-in for a remote generation service: waits, then washes the surface with a light
/// soft-light tint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoftLightWash {
    delay: Duration,
    color: Rgba8,
    alpha: f32,
}

impl SoftLightWash {
    /// Build from explicit parameters; `alpha` is clamped to `[0, 1]`.
    pub fn new(delay: Duration, color: Rgba8, alpha: f32) -> Self {
        Self {
            delay,
            color,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Build from configuration.
    pub fn from_config(cfg: &WashConfig) -> Self {
        Self::new(cfg.delay(), cfg.color, cfg.alpha)
    }

    /// Simulated processing time.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SoftLightWash {
    fn default() -> Self {
        Self::from_config(&WashConfig::default())
    }
}

#[async_trait::async_trait]
impl PostEffect for SoftLightWash {
    #[tracing::instrument(skip(self, surface))]
    async fn apply(&self, surface: &mut Surface, prompt: &str) -> ComposeResult<()> {
        tokio::time::sleep(self.delay).await;
        surface.fill(self.color, self.alpha, BlendMode::SoftLight);
        Ok(())
    }
}

/// Trim `prompt` and reject it when nothing is left.
pub fn validate_prompt(prompt: &str) -> ComposeResult<&str> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(ComposeError::validation("prompt must not be empty"));
    }
    Ok(trimmed)
}

/// Shared enabled/disabled flag for the generate control.
///
/// Clones observe the same flag, so a host can hand one to its UI layer and grey out the
/// control while a call is in flight.
#[derive(Clone, Debug)]
pub struct TriggerGate {
    enabled: Arc<AtomicBool>,
}

impl Default for TriggerGate {
    fn default() -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl TriggerGate {
    /// An enabled gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a new call may start.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Disable the gate, returning a guard that re-enables it on drop.
    ///
    /// Returns `None` if the gate is already disabled.
    pub fn try_acquire(&self) -> Option<TriggerGuard> {
        self.enabled
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TriggerGuard {
                enabled: Arc::clone(&self.enabled),
            })
    }
}

/// Keeps a [`TriggerGate`] disabled while alive.
#[derive(Debug)]
pub struct TriggerGuard {
    enabled: Arc<AtomicBool>,
}

impl Drop for TriggerGuard {
    fn drop(&mut self) {
        self.enabled.store(true, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/post.rs"]
mod tests;

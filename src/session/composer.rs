//! The editing session: one base raster, one component raster, and the controls that place the
//! component over the base.
//!
//! [`Composer`] owns every collaborator explicitly (decoder, compositor, transform, pointer
//! controller, post-effect) and re-renders after each state change.

use crate::assets::decode::{ImageDecoder, RasterDecoder, RasterHandle};
use crate::composition::blend::BlendMode;
use crate::effects::post::{PostEffect, SoftLightWash, TriggerGate, validate_prompt};
use crate::foundation::config::ComposerConfig;
use crate::foundation::core::{PixelSize, Point};
use crate::foundation::error::{ComposeError, ComposeResult};
use crate::interaction::controller::{Action, Cursor, InteractionController, PointerEvent};
use crate::layout::fit::fit_within;
use crate::render::compositor::Compositor;
use crate::render::surface::Surface;
use crate::transform::model::TransformModel;

/// Encoded snapshot of the surface produced by [`Composer::generate`].
///
/// Owns its bytes; later edits to the session do not affect it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preview {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// PNG-encoded pixels (straight alpha).
    pub png: Vec<u8>,
}

impl Preview {
    fn capture(surface: &Surface) -> ComposeResult<Self> {
        Ok(Self {
            width: surface.width(),
            height: surface.height(),
            png: surface.encode_png()?,
        })
    }
}

/// Two-layer compositing session.
pub struct Composer {
    config: ComposerConfig,
    decoder: Box<dyn RasterDecoder>,
    compositor: Compositor,
    base: Option<RasterHandle>,
    component: Option<RasterHandle>,
    transform: TransformModel,
    controller: InteractionController,
    effect: Box<dyn PostEffect>,
    gate: TriggerGate,
    prompt: String,
}

impl std::fmt::Debug for Composer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("config", &self.config)
            .field("surface", &self.compositor.surface().map(Surface::size))
            .field("base", &self.base.as_ref().map(RasterHandle::size))
            .field("component", &self.component.as_ref().map(RasterHandle::size))
            .field("transform", &self.transform)
            .field("controller", &self.controller)
            .field("gate_enabled", &self.gate.is_enabled())
            .finish_non_exhaustive()
    }
}

impl Composer {
    /// Session with the `image`-backed decoder and the soft-light wash from `config`.
    pub fn new(config: ComposerConfig) -> ComposeResult<Self> {
        let effect = SoftLightWash::from_config(&config.effect);
        Self::with_parts(config, Box::new(ImageDecoder), Box::new(effect))
    }

    /// Session with injected decoder and post-effect.
    pub fn with_parts(
        config: ComposerConfig,
        decoder: Box<dyn RasterDecoder>,
        effect: Box<dyn PostEffect>,
    ) -> ComposeResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            decoder,
            compositor: Compositor::new(),
            base: None,
            component: None,
            transform: TransformModel::default(),
            controller: InteractionController::new(),
            effect,
            gate: TriggerGate::new(),
            prompt: String::new(),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Whether a base is loaded, i.e. there is a workspace to show.
    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }

    /// The loaded base raster.
    pub fn base(&self) -> Option<&RasterHandle> {
        self.base.as_ref()
    }

    /// The loaded component raster.
    pub fn component(&self) -> Option<&RasterHandle> {
        self.component.as_ref()
    }

    /// Current component placement.
    pub fn transform(&self) -> &TransformModel {
        &self.transform
    }

    /// The output surface; present once a base is loaded.
    pub fn surface(&self) -> Option<&Surface> {
        self.compositor.surface()
    }

    /// Pointer affordance to display over the surface.
    pub fn cursor(&self) -> Cursor {
        self.controller.cursor()
    }

    /// Whether a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// Observable enabled flag of the generate control.
    pub fn gate(&self) -> TriggerGate {
        self.gate.clone()
    }

    /// Prompt text held for the generate control; used by [`Composer::generate`] when it is
    /// called with a blank prompt.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the held prompt text.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Record where the surface sits on screen, for pointer conversion.
    pub fn set_surface_origin(&mut self, origin: Point) {
        self.controller.set_surface_origin(origin);
    }

    /// Decode and install the base raster, resize the surface to its bounded display size and
    /// render. On decode failure nothing changes.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn load_base(&mut self, bytes: &[u8]) -> ComposeResult<PixelSize> {
        let base = self.decoder.decode(bytes)?;
        let size = fit_within(base.size(), self.config.bounds);
        tracing::debug!(
            width = base.width,
            height = base.height,
            display_width = size.width,
            display_height = size.height,
            "base loaded"
        );
        self.compositor.resize(size);
        self.base = Some(base);
        self.render();
        Ok(size)
    }

    /// Decode and install the component raster, centered over the surface at the current
    /// scale. On decode failure nothing changes.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn load_component(&mut self, bytes: &[u8]) -> ComposeResult<PixelSize> {
        let component = self.decoder.decode(bytes)?;
        let size = component.size();
        let centered = self
            .transform
            .centered_position(self.placement_area(), size);
        self.transform.set_position(centered);
        self.component = Some(component);
        self.render();
        Ok(size)
    }

    /// Place the component's footprint top-left at `position` (surface space).
    pub fn set_position(&mut self, position: Point) -> ComposeResult<()> {
        finite("x", position.x)?;
        finite("y", position.y)?;
        self.transform.set_position(position);
        self.render();
        Ok(())
    }

    /// Set component opacity from a percentage; clamped to `0..=100`.
    pub fn set_opacity_percent(&mut self, percent: f64) -> ComposeResult<()> {
        let percent = finite("opacity", percent)?;
        self.transform.set_opacity((percent / 100.0) as f32);
        self.render();
        Ok(())
    }

    /// Set component scale from a percentage.
    ///
    /// Non-positive values are ignored and `Ok(false)` is returned.
    pub fn set_scale_percent(&mut self, percent: f64) -> ComposeResult<bool> {
        let percent = finite("scale", percent)?;
        if !self.transform.set_scale(percent / 100.0) {
            tracing::debug!(percent, "non-positive scale ignored");
            return Ok(false);
        }
        self.render();
        Ok(true)
    }

    /// Set component rotation in whole degrees, clockwise.
    pub fn set_rotation_degrees(&mut self, degrees: i32) {
        self.transform.set_rotation_degrees(f64::from(degrees));
        self.render();
    }

    /// Set the blend operator by name. Unknown names leave the mode unchanged.
    pub fn set_blend_mode(&mut self, name: &str) -> ComposeResult<BlendMode> {
        let mode: BlendMode = name.parse()?;
        self.transform.set_blend(mode);
        self.render();
        Ok(mode)
    }

    /// Restore default controls, clear the prompt and re-center the component.
    #[tracing::instrument(skip(self))]
    pub fn reset(&mut self) {
        self.transform.reset(Point::ORIGIN);
        if let Some(size) = self.component.as_ref().map(RasterHandle::size) {
            let centered = self
                .transform
                .centered_position(self.placement_area(), size);
            self.transform.set_position(centered);
        }
        self.prompt.clear();
        self.render();
    }

    /// Feed a pointer event; redraws when the component moved.
    pub fn pointer(&mut self, event: PointerEvent) -> Vec<Action> {
        let component = self.component.as_ref().map(RasterHandle::size);
        let actions = self
            .controller
            .handle(event, &mut self.transform, component);
        if actions.contains(&Action::RenderNeeded) {
            self.render();
        }
        actions
    }

    /// Redraw base and component into the surface. Without a base this is a no-op.
    pub fn render(&mut self) {
        let Some(base) = self.base.as_ref() else {
            tracing::debug!("render skipped: no base loaded");
            return;
        };
        self.compositor
            .render(base, self.component.as_ref(), &self.transform);
    }

    /// Run the post-effect over the composite and capture the result as a [`Preview`].
    ///
    /// A blank `prompt` falls back to the held one ([`Composer::set_prompt`]); a non-blank one
    /// becomes the held prompt. The prompt is validated before anything else, so blank text
    /// in both places is a [`ComposeError::Validation`]. The effect works on a copy of the
    /// surface which is committed only on success; on failure the surface is unchanged and a
    /// [`ComposeError::Processing`] is returned. The gate is disabled for the duration of the
    /// call and re-enabled on every exit path.
    #[tracing::instrument(skip(self))]
    pub async fn generate(&mut self, prompt: &str) -> ComposeResult<Preview> {
        let requested = if prompt.trim().is_empty() {
            self.prompt.as_str()
        } else {
            prompt
        };
        let prompt = validate_prompt(requested)?.to_owned();
        self.prompt.clone_from(&prompt);
        let mut snapshot = self
            .compositor
            .surface()
            .cloned()
            .ok_or_else(|| ComposeError::state("no composite to process: load a base first"))?;
        let _guard = self
            .gate
            .try_acquire()
            .ok_or_else(|| ComposeError::state("generation already in progress"))?;

        if let Err(err) = self.effect.apply(&mut snapshot, &prompt).await {
            tracing::warn!(error = %err, "post-effect failed; surface left unchanged");
            return Err(match err {
                ComposeError::Processing(_) => err,
                other => ComposeError::processing(other.to_string()),
            });
        }

        self.compositor.replace_surface(snapshot)?;
        let surface = self
            .compositor
            .surface()
            .ok_or_else(|| ComposeError::state("surface released during generation"))?;
        Preview::capture(surface)
    }

    /// Encode the current surface as PNG.
    #[tracing::instrument(skip(self))]
    pub fn export_png(&self) -> ComposeResult<Vec<u8>> {
        if self.base.is_none() {
            return Err(ComposeError::state("no image loaded"));
        }
        let surface = self
            .compositor
            .surface()
            .ok_or_else(|| ComposeError::state("no surface to export"))?;
        surface.encode_png()
    }

    /// Download name for an export taken at `unix_millis`.
    pub fn export_file_name(unix_millis: u128) -> String {
        format!("composite-image-{unix_millis}.png")
    }

    /// Area the component is centered in: the surface, or the display bounds before a base
    /// establishes one.
    fn placement_area(&self) -> PixelSize {
        self.compositor
            .surface()
            .map(Surface::size)
            .unwrap_or_else(|| self.config.bounds.as_size())
    }
}

fn finite(what: &str, value: f64) -> ComposeResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ComposeError::validation(format!(
            "{what} must be a finite number, got {value}"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/composer.rs"]
mod tests;

//! layercomp is an interactive two-layer raster compositor.
//!
//! A *base* image establishes the output surface; a *component* image is placed over it with a
//! position, uniform scale, clockwise rotation about its visual center, global opacity and one
//! of the standard separable blend modes. A pointer-driven drag moves the component, an
//! asynchronous post-effect can process the finished composite, and the result exports as PNG.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: bytes -> [`RasterHandle`] (premultiplied RGBA8) via a [`RasterDecoder`].
//! 2. **Fit**: the base's intrinsic size is bounded by [`DisplayBounds`] ([`fit_within`]).
//! 3. **Render**: [`Compositor::render`] stretches the base over the [`Surface`] and draws the
//!    component through the affine from [`TransformModel::render_affine`].
//! 4. **Interact**: [`InteractionController`] turns [`PointerEvent`]s into position updates.
//! 5. **Post-process / export**: [`PostEffect`] over a snapshot, then PNG encode.
//!
//! [`Composer`] wires all of the above into one session.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Premultiplied RGBA8** everywhere except PNG output, which is straight alpha.
//! - **No partial failures**: a failed decode or post-effect leaves the session as it was.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod composition;
mod effects;
mod foundation;
mod interaction;
mod layout;
mod render;
mod session;
mod transform;

pub use assets::decode::{ImageDecoder, RasterDecoder, RasterHandle, decode_raster};
pub use composition::blend::{BlendKernel, BlendMode};
pub use effects::post::{PostEffect, SoftLightWash, TriggerGate, TriggerGuard, validate_prompt};
pub use foundation::config::{ComposerConfig, DisplayBounds, WashConfig};
pub use foundation::core::{Affine, PixelSize, Point, Rect, Rgba8, Size, Vec2};
pub use foundation::error::{ComposeError, ComposeResult};
pub use interaction::controller::{
    Action, Cursor, InputState, InteractionController, PointerEvent, PointerKind,
};
pub use layout::fit::fit_within;
pub use render::compositor::{Compositor, DrawState};
pub use render::raster::PremulRgba8;
pub use render::surface::Surface;
pub use session::composer::{Composer, Preview};
pub use transform::model::{Footprint, TransformModel};

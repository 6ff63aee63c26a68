//! Pointer gesture state machine: drag-to-move for the component raster.
//!
//! The controller consumes normalized [`PointerEvent`]s in screen space, converts them to
//! surface space through the surface's on-screen origin, and mutates only the position of the
//! [`TransformModel`]. Everything it wants the host to do comes back as [`Action`]s.

use crate::foundation::core::{PixelSize, Point, Vec2};
use crate::transform::model::TransformModel;

/// Kind of a normalized pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
    /// Pointer left the surface.
    Leave,
}

/// A pointer event in screen coordinates, independent of any windowing toolkit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,
    /// Where, in screen space.
    pub screen: Point,
}

impl PointerEvent {
    /// Build an event.
    pub fn new(kind: PointerKind, screen: Point) -> Self {
        Self { kind, screen }
    }
}

/// Pointer affordance the host should display over the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    /// Hovering; the component can be moved.
    #[default]
    Move,
    /// A drag is in progress.
    Grabbing,
}

/// Side effects requested by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Change the pointer affordance.
    SetCursor(Cursor),
    /// The transform changed; the composite must be redrawn.
    RenderNeeded,
}

/// Gesture state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The component follows the pointer.
    Dragging {
        /// Pointer position relative to the footprint's top-left at grab time.
        grab_offset: Vec2,
    },
}

/// Drag-to-move controller.
#[derive(Clone, Copy, Debug, Default)]
pub struct InteractionController {
    state: InputState,
    cursor: Cursor,
    surface_origin: Point,
}

impl InteractionController {
    /// Idle controller with the surface at the screen origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture state.
    pub fn state(&self) -> InputState {
        self.state
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InputState::Dragging { .. })
    }

    /// Current pointer affordance.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Top-left of the surface's on-screen bounding rectangle.
    pub fn surface_origin(&self) -> Point {
        self.surface_origin
    }

    /// Update the on-screen position of the surface (after layout or scroll).
    pub fn set_surface_origin(&mut self, origin: Point) {
        self.surface_origin = origin;
    }

    /// Screen to surface-local coordinates.
    pub fn to_local(&self, screen: Point) -> Point {
        (screen - self.surface_origin).to_point()
    }

    /// Abandon any gesture without emitting actions.
    pub fn cancel(&mut self) {
        self.state = InputState::Idle;
        self.cursor = Cursor::Move;
    }

    /// Feed one event.
    ///
    /// `component` is the intrinsic size of the loaded component, or `None` when nothing is
    /// loaded (pointer-down is then ignored).
    pub fn handle(
        &mut self,
        event: PointerEvent,
        transform: &mut TransformModel,
        component: Option<PixelSize>,
    ) -> Vec<Action> {
        let local = self.to_local(event.screen);
        match (self.state, event.kind) {
            (InputState::Idle, PointerKind::Down) => {
                let Some(size) = component else {
                    tracing::debug!("pointer down ignored: no component loaded");
                    return Vec::new();
                };
                let footprint = transform.footprint(size);
                if !footprint.contains(local) {
                    return Vec::new();
                }
                let grab_offset = local - footprint.top_left();
                self.state = InputState::Dragging { grab_offset };
                self.cursor = Cursor::Grabbing;
                tracing::debug!(x = local.x, y = local.y, "drag start");
                vec![Action::SetCursor(Cursor::Grabbing)]
            }
            (InputState::Dragging { grab_offset }, PointerKind::Move) => {
                transform.set_position(local - grab_offset);
                vec![Action::RenderNeeded]
            }
            (InputState::Dragging { .. }, PointerKind::Up | PointerKind::Leave) => {
                self.state = InputState::Idle;
                self.cursor = Cursor::Move;
                tracing::debug!("drag end");
                vec![Action::SetCursor(Cursor::Move)]
            }
            // A second press while dragging keeps the first grab.
            (InputState::Dragging { .. }, PointerKind::Down) => Vec::new(),
            (InputState::Idle, PointerKind::Move | PointerKind::Up | PointerKind::Leave) => {
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/controller.rs"]
mod tests;

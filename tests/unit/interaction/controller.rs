use super::*;

const COMPONENT: PixelSize = PixelSize {
    width: 20,
    height: 10,
};

fn ev(kind: PointerKind, x: f64, y: f64) -> PointerEvent {
    PointerEvent::new(kind, Point::new(x, y))
}

fn model_at(x: f64, y: f64) -> TransformModel {
    let mut t = TransformModel::default();
    t.set_position(Point::new(x, y));
    t
}

#[test]
fn starts_idle_with_move_cursor() {
    let c = InteractionController::new();
    assert_eq!(c.state(), InputState::Idle);
    assert_eq!(c.cursor(), Cursor::Move);
    assert!(!c.is_dragging());
}

#[test]
fn down_without_component_is_ignored() {
    let mut c = InteractionController::new();
    let mut t = model_at(0.0, 0.0);
    let actions = c.handle(ev(PointerKind::Down, 1.0, 1.0), &mut t, None);
    assert!(actions.is_empty());
    assert_eq!(c.state(), InputState::Idle);
}

#[test]
fn down_outside_footprint_is_ignored() {
    let mut c = InteractionController::new();
    let mut t = model_at(10.0, 10.0);
    let actions = c.handle(ev(PointerKind::Down, 31.0, 15.0), &mut t, Some(COMPONENT));
    assert!(actions.is_empty());
    assert!(!c.is_dragging());
}

#[test]
fn drag_sequence_moves_by_grab_offset() {
    let mut c = InteractionController::new();
    let mut t = model_at(10.0, 10.0);

    let actions = c.handle(ev(PointerKind::Down, 15.0, 12.0), &mut t, Some(COMPONENT));
    assert_eq!(actions, vec![Action::SetCursor(Cursor::Grabbing)]);
    assert_eq!(
        c.state(),
        InputState::Dragging {
            grab_offset: Vec2::new(5.0, 2.0)
        }
    );
    assert_eq!(c.cursor(), Cursor::Grabbing);

    let actions = c.handle(ev(PointerKind::Move, 40.0, 50.0), &mut t, Some(COMPONENT));
    assert_eq!(actions, vec![Action::RenderNeeded]);
    // Q - (P - (10, 10))
    assert_eq!(t.position(), Point::new(35.0, 48.0));

    let actions = c.handle(ev(PointerKind::Up, 40.0, 50.0), &mut t, Some(COMPONENT));
    assert_eq!(actions, vec![Action::SetCursor(Cursor::Move)]);
    assert!(!c.is_dragging());
    assert_eq!(c.cursor(), Cursor::Move);
}

#[test]
fn grab_on_exact_corners_is_allowed() {
    let mut c = InteractionController::new();
    let mut t = model_at(10.0, 10.0);
    c.handle(ev(PointerKind::Down, 30.0, 20.0), &mut t, Some(COMPONENT));
    assert!(c.is_dragging());
}

#[test]
fn leave_ends_the_drag() {
    let mut c = InteractionController::new();
    let mut t = model_at(0.0, 0.0);
    c.handle(ev(PointerKind::Down, 1.0, 1.0), &mut t, Some(COMPONENT));
    let actions = c.handle(ev(PointerKind::Leave, 500.0, 500.0), &mut t, Some(COMPONENT));
    assert_eq!(actions, vec![Action::SetCursor(Cursor::Move)]);
    assert_eq!(t.position(), Point::ORIGIN);

    let actions = c.handle(ev(PointerKind::Move, 5.0, 5.0), &mut t, Some(COMPONENT));
    assert!(actions.is_empty());
    assert_eq!(t.position(), Point::ORIGIN);
}

#[test]
fn idle_move_and_up_are_noops() {
    let mut c = InteractionController::new();
    let mut t = model_at(3.0, 4.0);
    assert!(c.handle(ev(PointerKind::Move, 5.0, 5.0), &mut t, Some(COMPONENT)).is_empty());
    assert!(c.handle(ev(PointerKind::Up, 5.0, 5.0), &mut t, Some(COMPONENT)).is_empty());
    assert_eq!(t.position(), Point::new(3.0, 4.0));
}

#[test]
fn screen_points_are_converted_through_the_surface_origin() {
    let mut c = InteractionController::new();
    c.set_surface_origin(Point::new(100.0, 50.0));
    let mut t = model_at(10.0, 10.0);

    // Screen (105, 55) is local (5, 5): outside the footprint.
    c.handle(ev(PointerKind::Down, 105.0, 55.0), &mut t, Some(COMPONENT));
    assert!(!c.is_dragging());

    // Screen (115, 65) is local (15, 15): inside.
    c.handle(ev(PointerKind::Down, 115.0, 65.0), &mut t, Some(COMPONENT));
    assert!(c.is_dragging());
    c.handle(ev(PointerKind::Move, 125.0, 65.0), &mut t, Some(COMPONENT));
    assert_eq!(t.position(), Point::new(20.0, 10.0));
}

#[test]
fn drag_only_touches_position() {
    let mut c = InteractionController::new();
    let mut t = model_at(0.0, 0.0);
    t.set_scale(2.0);
    t.set_rotation_degrees(15.0);
    t.set_opacity(0.4);
    c.handle(ev(PointerKind::Down, 1.0, 1.0), &mut t, Some(COMPONENT));
    c.handle(ev(PointerKind::Move, 9.0, 9.0), &mut t, Some(COMPONENT));
    assert_eq!(t.scale(), 2.0);
    assert_eq!(t.rotation_degrees(), 15.0);
    assert_eq!(t.opacity(), 0.4);
    assert_eq!(t.position(), Point::new(8.0, 8.0));
}

#[test]
fn cancel_returns_to_idle() {
    let mut c = InteractionController::new();
    let mut t = model_at(0.0, 0.0);
    c.handle(ev(PointerKind::Down, 1.0, 1.0), &mut t, Some(COMPONENT));
    c.cancel();
    assert_eq!(c.state(), InputState::Idle);
    assert_eq!(c.cursor(), Cursor::Move);
}

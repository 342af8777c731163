use popup_wm::input::PointerEvent;
use popup_wm::window::{DragSurface, HitPart};
use popup_wm::{Bounds, Position, Size, WindowId, WindowManager};

fn measured() -> WindowManager {
    let mut wm = WindowManager::default();
    wm.set_canvas(Bounds::new(Position::default(), Size::new(2000.0, 1000.0)));
    wm.set_viewport(Size::new(2000.0, 1000.0));
    wm
}

fn click(wm: &mut WindowManager, at: Position) {
    wm.handle_pointer(PointerEvent::down(at.x, at.y));
    wm.handle_pointer(PointerEvent::up(at.x, at.y));
}

#[test]
fn header_drag_is_path_independent() {
    let mut wm = measured();
    let id = wm.open_segment(); // at (275, 135)
    assert!(wm.handle_pointer(PointerEvent::down(300.0, 140.0)));
    assert_eq!(wm.drag_target().map(|t| t.surface), Some(DragSurface::Window));
    for (x, y) in [(900.0, 20.0), (-40.0, 700.0), (333.0, 333.0), (350.0, 190.0)] {
        assert!(wm.handle_pointer(PointerEvent::moved(x, y)));
    }
    assert!(wm.handle_pointer(PointerEvent::up(350.0, 190.0)));
    assert!(!wm.is_dragging());
    assert_eq!(
        wm.window(id).and_then(|w| w.position()),
        Some(Position::new(325.0, 185.0))
    );
}

#[test]
fn close_button_acts_on_release() {
    let mut wm = measured();
    let a = wm.open_new_persona(); // at (325, 185)
    let close = Position::new(325.0 + 1450.0 - 10.0, 190.0);
    assert_eq!(wm.hit_test(close).map(|hit| hit.part), Some(HitPart::Close));

    // pressing then sliding off the button cancels
    wm.handle_pointer(PointerEvent::down(close.x, close.y));
    wm.handle_pointer(PointerEvent::up(400.0, 600.0));
    assert!(wm.window(a).is_some());

    click(&mut wm, close);
    assert!(wm.window(a).is_none());
    assert_eq!(wm.topmost(), None);
}

#[test]
fn minimize_button_then_dock_click_restores() {
    let mut wm = measured();
    let a = wm.open_new_persona();
    let minimize = Position::new(325.0 + 1450.0 - 40.0, 190.0);
    click(&mut wm, minimize);
    assert!(wm.window(a).is_some_and(|w| w.is_minimized()));

    let bar = wm.dock_bars()[0].bounds;
    let on_bar = bar.origin.offset(5.0, 5.0);
    assert_eq!(wm.hit_test(on_bar).map(|hit| hit.part), Some(HitPart::DockBar));
    click(&mut wm, on_bar);
    assert!(wm.window(a).is_some_and(|w| !w.is_minimized()));
    assert_eq!(wm.topmost(), Some(a));
}

#[test]
fn dragging_a_dock_bar_keeps_it_minimized() {
    let mut wm = measured();
    let a = wm.open_new_persona();
    wm.minimize(a);
    let start = wm.dock_bars()[0].bounds.origin;
    let grab = start.offset(5.0, 5.0);

    wm.handle_pointer(PointerEvent::down(grab.x, grab.y));
    wm.handle_pointer(PointerEvent::moved(grab.x - 200.0, grab.y - 30.0));
    wm.handle_pointer(PointerEvent::up(grab.x - 200.0, grab.y - 30.0));

    assert!(wm.window(a).is_some_and(|w| w.is_minimized()));
    assert_eq!(
        wm.window(a).and_then(|w| w.minimized_position()),
        Some(start.offset(-200.0, -30.0))
    );
}

#[test]
fn body_click_raises_without_dragging() {
    let mut wm = measured();
    let a = wm.open_new_persona(); // (325, 185)
    let _b = wm.open_new_persona(); // (375, 235)
    // covered only by `a`
    assert!(wm.handle_pointer(PointerEvent::down(340.0, 220.0)));
    assert_eq!(wm.topmost(), Some(a));
    assert!(!wm.is_dragging());
    assert!(!wm.handle_pointer(PointerEvent::moved(500.0, 500.0)));
    assert!(!wm.handle_pointer(PointerEvent::up(500.0, 500.0)));
}

#[test]
fn pointer_on_empty_backdrop_is_not_consumed() {
    let mut wm = measured();
    wm.open_segment();
    assert!(!wm.handle_pointer(PointerEvent::down(5.0, 5.0)));
    assert!(!wm.handle_pointer(PointerEvent::up(5.0, 5.0)));
    assert!(wm.text_selection_enabled());
}

#[test]
fn drag_toggles_text_selection_once() {
    let mut wm = measured();
    wm.open_segment();
    wm.handle_pointer(PointerEvent::down(300.0, 140.0));
    assert_eq!(wm.take_text_selection_change(), Some(false));
    wm.handle_pointer(PointerEvent::moved(310.0, 140.0));
    assert_eq!(wm.take_text_selection_change(), None);
    wm.handle_pointer(PointerEvent::up(310.0, 140.0));
    assert_eq!(wm.take_text_selection_change(), Some(true));
    assert_eq!(wm.topmost(), Some(WindowId::Segment));
}

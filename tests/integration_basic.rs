use popup_wm::{Bounds, Position, Size, WindowId, WindowManager, WmEvent};

fn measured() -> WindowManager {
    let mut wm = WindowManager::default();
    wm.set_canvas(Bounds::new(Position::default(), Size::new(2000.0, 1000.0)));
    wm.set_viewport(Size::new(2000.0, 1000.0));
    wm
}

fn pos(wm: &WindowManager, id: WindowId) -> Option<Position> {
    wm.window(id).and_then(|w| w.position())
}

#[test]
fn persona_ids_are_never_reused() {
    let mut wm = measured();
    let a = wm.open_new_persona();
    let b = wm.open_new_persona();
    wm.close_window(a);
    wm.close_window(b);
    let c = wm.open_new_persona();
    assert_eq!(a, WindowId::Persona(1));
    assert_eq!(b, WindowId::Persona(2));
    assert_eq!(c, WindowId::Persona(3));
    assert_eq!(c.to_string(), "persona-3");
    assert_eq!("persona-3".parse::<WindowId>().unwrap(), c);
}

#[test]
fn segment_is_a_singleton() {
    let mut wm = measured();
    assert_eq!(wm.open_segment(), WindowId::Segment);
    wm.minimize(WindowId::Segment);
    // reopening a minimized Segment brings it back instead of duplicating
    wm.open_segment();
    assert_eq!(wm.registry().len(), 1);
    assert!(wm.window(WindowId::Segment).is_some_and(|w| !w.is_minimized()));
    assert_eq!(
        wm.take_events(),
        vec![
            WmEvent::Opened(WindowId::Segment),
            WmEvent::Minimized(WindowId::Segment),
            WmEvent::Restored(WindowId::Segment),
        ]
    );
}

#[test]
fn cascade_follows_live_personas() {
    let mut wm = measured();
    let a = wm.open_new_persona();
    let b = wm.open_new_persona();
    assert_eq!(pos(&wm, a), Some(Position::new(325.0, 185.0)));
    assert_eq!(pos(&wm, b), Some(Position::new(375.0, 235.0)));
    wm.close_window(a);
    // b is now the only live Persona, so the next one takes the second step
    let c = wm.open_new_persona();
    assert_eq!(pos(&wm, c), Some(Position::new(375.0, 235.0)));
    assert_eq!(pos(&wm, b), Some(Position::new(375.0, 235.0)));
}

#[test]
fn newest_window_is_focused() {
    let mut wm = measured();
    assert_eq!(wm.topmost(), None);
    wm.open_segment();
    assert_eq!(wm.topmost(), Some(WindowId::Segment));
    let a = wm.open_new_persona();
    assert_eq!(wm.topmost(), Some(a));
    let focused: Vec<WindowId> = wm
        .paint_order()
        .into_iter()
        .filter(|item| item.focused)
        .map(|item| item.id)
        .collect();
    assert_eq!(focused, vec![a]);
    assert_eq!(wm.window_title(a).as_deref(), Some("Persona 1"));
    assert_eq!(wm.window_title(WindowId::Segment).as_deref(), Some("Segment"));
}

#[test]
fn minimized_windows_leave_paint_order_for_the_dock() {
    let mut wm = measured();
    wm.open_segment();
    let a = wm.open_new_persona();
    let b = wm.open_new_persona();
    wm.minimize(WindowId::Segment);
    wm.minimize(b);
    wm.minimize(a);

    let painted: Vec<WindowId> = wm.paint_order().iter().map(|item| item.id).collect();
    assert!(painted.is_empty());

    let base_x = (2000.0 - 320.0) / 2.0;
    let bars: Vec<(WindowId, f64)> = wm
        .dock_bars()
        .iter()
        .map(|bar| (bar.id, bar.bounds.origin.x))
        .collect();
    assert_eq!(
        bars,
        vec![
            (WindowId::Segment, base_x),
            (a, base_x + 700.0),
            (b, base_x + 350.0),
        ]
    );
}

#[test]
fn backdrop_drop_reaches_subscribers() {
    let mut wm = measured();
    wm.open_new_persona();
    wm.take_events();
    assert!(wm.on_backdrop_drop(r#"{"kind":"persona","id":"p-42"}"#));
    assert!(!wm.on_backdrop_drop(""));
    let events = wm.take_events();
    assert_eq!(events.len(), 1);
    let WmEvent::ItemDeleted(item) = &events[0] else {
        panic!("expected a deletion, got {events:?}");
    };
    assert_eq!(item["id"], "p-42");
}

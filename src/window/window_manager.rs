use std::mem;

use super::{
    DragController, DragRelease, DragSurface, DragTarget, Window, WindowId, WindowKind,
    WindowRegistry, ZOrderStack,
};
use crate::config::WmConfig;
use crate::events::{WmEvent, parse_drop_payload};
use crate::input::{PointerEvent, PointerKind};
use crate::layout::{Bounds, Position, Size, cascade_offset, centered_position, docked_position};
use crate::state::UiState;

/// Region of a window (or its dock bar) under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Header,
    Minimize,
    Close,
    Body,
    DockBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub id: WindowId,
    pub part: HitPart,
}

/// An open window ready to be drawn. `bounds` is in viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintItem {
    pub id: WindowId,
    pub title: String,
    pub bounds: Bounds,
    pub z_index: i32,
    pub focused: bool,
}

/// A minimized window's bar in the dock, in viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct DockBar {
    pub id: WindowId,
    pub title: String,
    pub bounds: Bounds,
}

/// Owner of every floating window: lifecycle, stacking, dragging and
/// placement.
///
/// All operations are synchronous and total. Ids that are not open are
/// ignored rather than reported. After every mutation the manager re-runs
/// [`WindowManager::resolve_pending_placements`], so a window becomes
/// placeable as soon as the host has reported the measurements it needs.
#[derive(Debug)]
pub struct WindowManager {
    config: WmConfig,
    registry: WindowRegistry,
    z_order: ZOrderStack,
    drag: DragController,
    ui: UiState,
    canvas: Option<Bounds>,
    viewport: Option<Size>,
    // header button pressed but not yet released
    pressed: Option<Hit>,
    events: Vec<WmEvent>,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(WmConfig::default())
    }
}

impl WindowManager {
    pub fn new(config: WmConfig) -> Self {
        Self {
            config,
            registry: WindowRegistry::new(),
            // the Segment slot exists before the window is ever opened
            z_order: ZOrderStack::with_ids([WindowId::Segment]),
            drag: DragController::new(),
            ui: UiState::new(),
            canvas: None,
            viewport: None,
            pressed: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    /// Report where the main canvas sits inside the viewport and how big it
    /// is. A degenerate size counts as "not measured yet".
    pub fn set_canvas(&mut self, canvas: Bounds) {
        self.canvas = canvas.size.is_positive().then_some(canvas);
        self.resolve_pending_placements();
    }

    /// Report the size of the viewport the dock is anchored to.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport.is_positive().then_some(viewport);
        self.resolve_pending_placements();
    }

    pub fn canvas(&self) -> Option<Bounds> {
        self.canvas
    }

    pub fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    /// Show the Segment window, creating it on first use.
    ///
    /// Opening it again keeps its position; a minimized Segment is restored.
    pub fn open_segment(&mut self) -> WindowId {
        let id = WindowId::Segment;
        if self.registry.create_segment() {
            tracing::debug!(window_id = %id, "opened window");
            self.events.push(WmEvent::Opened(id));
            self.z_order.bring_to_front(id);
            self.resolve_pending_placements();
        } else {
            self.restore(id);
        }
        id
    }

    pub fn open_new_persona(&mut self) -> WindowId {
        let id = self.registry.create_persona();
        tracing::debug!(window_id = %id, "opened window");
        self.events.push(WmEvent::Opened(id));
        self.z_order.bring_to_front(id);
        self.resolve_pending_placements();
        id
    }

    pub fn close_window(&mut self, id: WindowId) {
        if self.registry.close(id).is_none() {
            tracing::debug!(window_id = %id, "close ignored: window not open");
            return;
        }
        tracing::debug!(window_id = %id, "closing window");
        self.z_order.remove(id);
        if self.drag.abandon_if_targets(id) {
            self.ui.set_text_selection_enabled(true);
        }
        if self.pressed.is_some_and(|hit| hit.id == id) {
            self.pressed = None;
        }
        self.events.push(WmEvent::Closed(id));
        self.resolve_pending_placements();
    }

    pub fn minimize(&mut self, id: WindowId) {
        let Some(window) = self.registry.get(id) else {
            tracing::debug!(window_id = %id, "minimize ignored: window not open");
            return;
        };
        if window.is_minimized() {
            return;
        }
        // a remembered dock spot taken over by another bar is given up
        let displaced = window.minimized_position().is_some_and(|spot| {
            self.registry.iter().any(|other| {
                other.id() != id
                    && other.is_minimized()
                    && other.minimized_position() == Some(spot)
            })
        });
        if displaced {
            self.registry.clear_minimized_position(id);
        }
        self.registry.set_minimized(id, true);
        if self.drag.target() == Some(DragTarget::window(id)) {
            self.drag.abandon_if_targets(id);
            self.ui.set_text_selection_enabled(true);
        }
        tracing::debug!(window_id = %id, "minimized window");
        self.events.push(WmEvent::Minimized(id));
        self.resolve_pending_placements();
    }

    /// Un-minimize `id` and raise it. Raising applies even when the window
    /// was not minimized.
    pub fn restore(&mut self, id: WindowId) {
        let Some(window) = self.registry.get(id) else {
            tracing::debug!(window_id = %id, "restore ignored: window not open");
            return;
        };
        if window.is_minimized() {
            self.registry.set_minimized(id, false);
            if self.drag.target() == Some(DragTarget::dock_bar(id)) {
                self.drag.abandon_if_targets(id);
                self.ui.set_text_selection_enabled(true);
            }
            tracing::debug!(window_id = %id, "restored window");
            self.events.push(WmEvent::Restored(id));
        }
        self.z_order.bring_to_front(id);
        self.resolve_pending_placements();
    }

    pub fn bring_to_front(&mut self, id: WindowId) {
        if self.registry.contains(id) {
            self.z_order.bring_to_front(id);
        }
    }

    /// Grab an open window by its header. Refused while the window is
    /// minimized or has not been placed yet.
    pub fn on_header_pointer_down(&mut self, id: WindowId, pointer: Position) -> bool {
        let Some(element) = self
            .registry
            .get(id)
            .filter(|window| !window.is_minimized())
            .and_then(Window::position)
        else {
            return false;
        };
        self.z_order.bring_to_front(id);
        self.begin_drag(DragTarget::window(id), pointer, element);
        true
    }

    /// Grab a minimized window's dock bar.
    pub fn on_dock_pointer_down(&mut self, id: WindowId, pointer: Position) -> bool {
        let Some(element) = self
            .registry
            .get(id)
            .filter(|window| window.is_minimized())
            .and_then(Window::minimized_position)
        else {
            return false;
        };
        self.begin_drag(DragTarget::dock_bar(id), pointer, element);
        true
    }

    fn begin_drag(&mut self, target: DragTarget, pointer: Position, element: Position) {
        tracing::debug!(window_id = %target.id, surface = ?target.surface, "drag started");
        self.drag.begin(target, pointer, element);
        self.ui.set_text_selection_enabled(false);
    }

    /// Feed a pointer sample to the active drag. Returns `false` when idle.
    pub fn on_pointer_move(&mut self, pointer: Position) -> bool {
        let Some((target, position)) = self.drag.update(pointer) else {
            return false;
        };
        tracing::trace!(window_id = %target.id, x = position.x, y = position.y, "drag move");
        match target.surface {
            DragSurface::Window => self.registry.set_position(target.id, position),
            DragSurface::DockBar => self.registry.set_minimized_position(target.id, position),
        };
        true
    }

    /// End the active drag, wherever the pointer is.
    pub fn on_pointer_up(&mut self) -> Option<DragRelease> {
        let release = self.drag.end()?;
        self.ui.set_text_selection_enabled(true);
        tracing::debug!(window_id = %release.target.id, moved = release.moved, "drag ended");
        Some(release)
    }

    /// Route a raw pointer event through hit testing.
    ///
    /// - down on a header grabs the window, on a dock bar grabs the bar;
    /// - down anywhere on a window raises it;
    /// - header buttons act on release over the same button;
    /// - a dock bar released without moving is restored.
    ///
    /// Returns whether the event was consumed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event.kind {
            PointerKind::Down => {
                self.pressed = None;
                let Some(hit) = self.hit_test(event.position) else {
                    return false;
                };
                match hit.part {
                    HitPart::Header => self.on_header_pointer_down(hit.id, event.position),
                    HitPart::DockBar => self.on_dock_pointer_down(hit.id, event.position),
                    HitPart::Body => {
                        self.bring_to_front(hit.id);
                        true
                    }
                    HitPart::Minimize | HitPart::Close => {
                        self.bring_to_front(hit.id);
                        self.pressed = Some(hit);
                        true
                    }
                }
            }
            PointerKind::Move => self.on_pointer_move(event.position),
            PointerKind::Up => {
                if let Some(release) = self.on_pointer_up() {
                    if release.target.surface == DragSurface::DockBar && !release.moved {
                        self.restore(release.target.id);
                    }
                    return true;
                }
                let Some(pressed) = self.pressed.take() else {
                    return false;
                };
                if self.hit_test(event.position) == Some(pressed) {
                    match pressed.part {
                        HitPart::Minimize => self.minimize(pressed.id),
                        HitPart::Close => self.close_window(pressed.id),
                        HitPart::Header | HitPart::Body | HitPart::DockBar => {}
                    }
                }
                true
            }
        }
    }

    /// Topmost window region under `pointer` (viewport coordinates).
    ///
    /// Dock bars paint above every window, so they are tested first.
    pub fn hit_test(&self, pointer: Position) -> Option<Hit> {
        if let Some(bar) = self
            .dock_bars()
            .into_iter()
            .rev()
            .find(|bar| bar.bounds.contains(pointer))
        {
            return Some(Hit {
                id: bar.id,
                part: HitPart::DockBar,
            });
        }
        let canvas = self.canvas?;
        let local = canvas.localize(pointer);
        self.z_order.iter().find_map(|id| {
            let window = self.registry.get(id)?;
            if window.is_minimized() {
                return None;
            }
            let rect = Bounds::new(window.position()?, self.config.window_size);
            rect.contains(local).then(|| Hit {
                id,
                part: self.window_part(rect, local),
            })
        })
    }

    fn window_part(&self, rect: Bounds, local: Position) -> HitPart {
        if local.y >= rect.origin.y + self.config.header_height {
            return HitPart::Body;
        }
        let right = rect.right();
        let button = self.config.button_width;
        if local.x >= right - button {
            HitPart::Close
        } else if local.x >= right - 2.0 * button {
            HitPart::Minimize
        } else {
            HitPart::Header
        }
    }

    /// Give every window still waiting for a position one, as far as the
    /// current measurements allow.
    ///
    /// Windows are centered on the canvas; Persona windows cascade by their
    /// ordinal among live Personas. Minimized windows get a dock slot the
    /// first time they are minimized: slot 0 belongs to Segment, Personas
    /// take the lowest slot from 1 up that no docked bar is sitting on.
    pub fn resolve_pending_placements(&mut self) {
        let mut placements: Vec<(WindowId, Position)> = Vec::new();
        if let Some(canvas) = self.canvas {
            for window in self.registry.iter().filter(|w| !w.is_placed()) {
                let offset = match window.kind() {
                    WindowKind::Segment => 0.0,
                    WindowKind::Persona => cascade_offset(
                        self.registry.persona_ordinal(window.id()).unwrap_or(0),
                        self.config.cascade_step,
                    ),
                };
                let position = centered_position(canvas.size, self.config.window_size, offset);
                placements.push((window.id(), position));
            }
        }
        for (id, position) in placements {
            tracing::debug!(window_id = %id, x = position.x, y = position.y, "placed window");
            self.registry.set_position(id, position);
        }

        let mut docked: Vec<(WindowId, Position)> = Vec::new();
        if let Some(viewport) = self.viewport {
            let slot_position = |slot: usize| {
                docked_position(
                    viewport,
                    self.config.dock_bar_size,
                    slot,
                    self.config.dock_gap,
                    self.config.dock_margin,
                )
            };
            // bars currently on screen; new bars skip their slots
            let mut occupied: Vec<Position> = self
                .registry
                .iter()
                .filter(|w| w.is_minimized())
                .filter_map(Window::minimized_position)
                .collect();
            for window in self
                .registry
                .iter()
                .filter(|w| w.is_minimized() && w.minimized_position().is_none())
            {
                let position = match window.kind() {
                    WindowKind::Segment => slot_position(0),
                    WindowKind::Persona => (1..)
                        .map(slot_position)
                        .find(|candidate| !occupied.contains(candidate))
                        .unwrap_or_else(|| slot_position(1)),
                };
                occupied.push(position);
                docked.push((window.id(), position));
            }
        }
        for (id, position) in docked {
            tracing::debug!(window_id = %id, x = position.x, y = position.y, "docked window");
            self.registry.set_minimized_position(id, position);
        }
    }

    /// Broadcast a drag-and-drop payload released on the backdrop.
    ///
    /// The backdrop only exists while some window is open. Malformed payloads
    /// are logged and dropped. Returns whether an event was emitted.
    pub fn on_backdrop_drop(&mut self, payload: &str) -> bool {
        if self.registry.is_empty() {
            tracing::debug!("drop ignored: no window open");
            return false;
        }
        match parse_drop_payload(payload) {
            Ok(item) => {
                tracing::debug!(%item, "item dropped on backdrop");
                self.events.push(WmEvent::ItemDeleted(item));
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed drop payload");
                false
            }
        }
    }

    pub fn take_events(&mut self) -> Vec<WmEvent> {
        mem::take(&mut self.events)
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.registry.get(id)
    }

    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.registry.iter()
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn z_order(&self) -> &ZOrderStack {
        &self.z_order
    }

    pub fn window_title(&self, id: WindowId) -> Option<String> {
        self.registry.get(id).map(Window::title)
    }

    /// Paint layer of an open window.
    pub fn z_index(&self, id: WindowId) -> Option<i32> {
        if !self.registry.contains(id) {
            return None;
        }
        self.z_order.z_index(id, self.config.base_z)
    }

    /// Highest open, non-minimized window in the stack: the one that has
    /// focus. Stack entries for windows that are not open (the Segment slot)
    /// or sit in the dock are skipped.
    pub fn topmost(&self) -> Option<WindowId> {
        self.z_order.iter().find(|id| {
            self.registry
                .get(*id)
                .is_some_and(|window| !window.is_minimized())
        })
    }

    /// Whether a pointer-down could start a drag on `id` right now.
    pub fn is_draggable(&self, id: WindowId) -> bool {
        self.registry.get(id).is_some_and(|window| {
            if window.is_minimized() {
                window.minimized_position().is_some()
            } else {
                window.is_placed()
            }
        })
    }

    /// Whether `id` should be drawn as an open window.
    pub fn is_paintable(&self, id: WindowId) -> bool {
        self.canvas.is_some()
            && self
                .registry
                .get(id)
                .is_some_and(|window| !window.is_minimized() && window.is_placed())
    }

    /// Open, placed windows, bottom-most first.
    pub fn paint_order(&self) -> Vec<PaintItem> {
        let Some(canvas) = self.canvas else {
            return Vec::new();
        };
        let focused = self.topmost();
        self.z_order
            .iter()
            .rev()
            .filter_map(|id| {
                let window = self.registry.get(id)?;
                if window.is_minimized() {
                    return None;
                }
                let position = window.position()?;
                Some(PaintItem {
                    id,
                    title: window.title(),
                    bounds: Bounds::new(
                        position.offset(canvas.origin.x, canvas.origin.y),
                        self.config.window_size,
                    ),
                    z_index: self.z_index(id)?,
                    focused: focused == Some(id),
                })
            })
            .collect()
    }

    /// Docked bars in creation order.
    pub fn dock_bars(&self) -> Vec<DockBar> {
        self.registry
            .iter()
            .filter(|window| window.is_minimized())
            .filter_map(|window| {
                Some(DockBar {
                    id: window.id(),
                    title: window.title(),
                    bounds: Bounds::new(window.minimized_position()?, self.config.dock_bar_size),
                })
            })
            .collect()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag_target(&self) -> Option<DragTarget> {
        self.drag.target()
    }

    pub fn text_selection_enabled(&self) -> bool {
        self.ui.text_selection_enabled()
    }

    pub fn take_text_selection_change(&mut self) -> Option<bool> {
        self.ui.take_text_selection_change()
    }
}

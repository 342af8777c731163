use std::collections::BTreeMap;

use super::{Window, WindowId, WindowKind};
use crate::layout::Position;

/// Owner of every live window.
///
/// Iteration order is creation order: the Segment window first, then
/// Persona windows by sequence number. Operations on absent ids are no-ops.
#[derive(Debug, Clone)]
pub struct WindowRegistry {
    windows: BTreeMap<WindowId, Window>,
    next_persona_seq: u64,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self {
            windows: BTreeMap::new(),
            next_persona_seq: 1,
        }
    }

    /// Create the Segment window unless it already exists.
    ///
    /// Returns `false` when it was already open; its placement is left alone.
    pub fn create_segment(&mut self) -> bool {
        if self.windows.contains_key(&WindowId::Segment) {
            return false;
        }
        self.windows
            .insert(WindowId::Segment, Window::new(WindowId::Segment));
        true
    }

    pub fn create_persona(&mut self) -> WindowId {
        let seq = self.next_persona_seq;
        self.next_persona_seq = seq.saturating_add(1);
        let id = WindowId::Persona(seq);
        self.windows.insert(id, Window::new(id));
        id
    }

    pub fn close(&mut self, id: WindowId) -> Option<Window> {
        self.windows.remove(&id)
    }

    pub fn set_minimized(&mut self, id: WindowId, value: bool) -> bool {
        self.update(id, |window| window.minimized = value)
    }

    pub fn set_position(&mut self, id: WindowId, position: Position) -> bool {
        self.update(id, |window| window.position = Some(position))
    }

    pub fn set_minimized_position(&mut self, id: WindowId, position: Position) -> bool {
        self.update(id, |window| window.minimized_position = Some(position))
    }

    /// Forget the dock spot so the next placement pass picks a fresh slot.
    pub fn clear_minimized_position(&mut self, id: WindowId) -> bool {
        self.update(id, |window| window.minimized_position = None)
    }

    fn update(&mut self, id: WindowId, f: impl FnOnce(&mut Window)) -> bool {
        match self.windows.get_mut(&id) {
            Some(window) => {
                f(window);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.windows.values()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Index of `id` among the live Persona windows, oldest first.
    pub fn persona_ordinal(&self, id: WindowId) -> Option<usize> {
        self.personas().position(|window| window.id == id)
    }

    pub fn minimized_ids(&self) -> Vec<WindowId> {
        self.windows
            .values()
            .filter(|window| window.minimized)
            .map(|window| window.id)
            .collect()
    }

    fn personas(&self) -> impl Iterator<Item = &Window> {
        self.windows
            .values()
            .filter(|window| window.kind() == WindowKind::Persona)
    }
}

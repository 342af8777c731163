use super::WindowId;

/// Lowest paint layer handed out. Windows deeper in the stack than `base_z`
/// allows all share it.
const MIN_Z: i32 = 1;

/// Paint and interaction order of windows, topmost first.
///
/// Holds ids only; the registry owns the windows themselves. Each id appears
/// at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZOrderStack {
    order: Vec<WindowId>,
}

impl ZOrderStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: impl IntoIterator<Item = WindowId>) -> Self {
        let mut stack = Self::new();
        // insert in reverse so the first id ends up on top
        let ids: Vec<WindowId> = ids.into_iter().collect();
        for id in ids.into_iter().rev() {
            stack.bring_to_front(id);
        }
        stack
    }

    /// Move `id` to the head, keeping everyone else's relative order.
    pub fn bring_to_front(&mut self, id: WindowId) {
        self.remove(id);
        self.order.insert(0, id);
    }

    pub fn remove(&mut self, id: WindowId) -> bool {
        let before = self.order.len();
        self.order.retain(|x| *x != id);
        self.order.len() != before
    }

    pub fn head(&self) -> Option<WindowId> {
        self.order.first().copied()
    }

    pub fn index_of(&self, id: WindowId) -> Option<usize> {
        self.order.iter().position(|x| *x == id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.order.contains(&id)
    }

    /// Topmost first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = WindowId> + '_ {
        self.order.iter().copied()
    }

    pub fn as_slice(&self) -> &[WindowId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Numeric paint layer for `id`: `base_z` for the head, decreasing by one
    /// per position below it.
    pub fn z_index(&self, id: WindowId, base_z: i32) -> Option<i32> {
        let idx = i32::try_from(self.index_of(id)?).unwrap_or(i32::MAX);
        Some(base_z.saturating_sub(idx).max(MIN_Z))
    }
}

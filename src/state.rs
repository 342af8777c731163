/// Global UI side effects owned by the window manager.
///
/// Text selection is suppressed while a drag is in flight so sweeping the
/// pointer across content does not highlight it. The host applies the change
/// once per transition by draining `take_text_selection_change`.
#[derive(Debug, Clone, Copy)]
pub struct UiState {
    text_selection_enabled: bool,
    text_selection_dirty: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            text_selection_enabled: true,
            text_selection_dirty: false,
        }
    }

    pub fn text_selection_enabled(&self) -> bool {
        self.text_selection_enabled
    }

    pub fn set_text_selection_enabled(&mut self, enabled: bool) {
        if self.text_selection_enabled == enabled {
            return;
        }
        self.text_selection_enabled = enabled;
        self.text_selection_dirty = !self.text_selection_dirty;
    }

    pub fn take_text_selection_change(&mut self) -> Option<bool> {
        if self.text_selection_dirty {
            self.text_selection_dirty = false;
            Some(self.text_selection_enabled)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_toggle_and_take_change() {
        let mut s = UiState::new();
        assert!(s.text_selection_enabled());
        s.set_text_selection_enabled(true);
        // no change -> None
        assert!(s.take_text_selection_change().is_none());
        s.set_text_selection_enabled(false);
        assert_eq!(s.take_text_selection_change(), Some(false));
        // consumed
        assert!(s.take_text_selection_change().is_none());
    }

    #[test]
    fn round_trip_before_drain_reports_nothing() {
        let mut s = UiState::new();
        s.set_text_selection_enabled(false);
        s.set_text_selection_enabled(true);
        assert!(s.take_text_selection_change().is_none());
        assert!(s.text_selection_enabled());
    }
}

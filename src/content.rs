//! Content collaborators: the views mounted inside each window's body.
//!
//! The window manager never looks inside a view. A view gets the id of the
//! window hosting it, draws into the body area, and may ask for a new Persona
//! window through its [`ContentContext`]; the host forwards those requests to
//! the manager.

use std::collections::BTreeMap;
use std::fmt;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::events::WmEvent;
use crate::window::{WindowId, WindowManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRequest {
    OpenNewPersona,
}

/// Per-call context handed to a view.
#[derive(Debug, Clone)]
pub struct ContentContext {
    id: WindowId,
    focused: bool,
    requests: Vec<ContentRequest>,
}

impl ContentContext {
    pub fn new(id: WindowId, focused: bool) -> Self {
        Self {
            id,
            focused,
            requests: Vec::new(),
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Ask the host to open another Persona window.
    pub fn open_new_persona(&mut self) {
        self.requests.push(ContentRequest::OpenNewPersona);
    }

    pub fn take_requests(&mut self) -> Vec<ContentRequest> {
        std::mem::take(&mut self.requests)
    }
}

pub trait WindowContent {
    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, ctx: &ContentContext);

    fn handle_key(&mut self, _key: &KeyEvent, _ctx: &mut ContentContext) -> bool {
        false
    }
}

type ContentFactory = Box<dyn Fn(WindowId) -> Box<dyn WindowContent>>;

/// Mounts and unmounts one view per open window, following the manager's
/// lifecycle events.
pub struct ContentHost {
    views: BTreeMap<WindowId, Box<dyn WindowContent>>,
    factory: ContentFactory,
}

impl fmt::Debug for ContentHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentHost")
            .field("mounted", &self.views.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ContentHost {
    pub fn new(factory: impl Fn(WindowId) -> Box<dyn WindowContent> + 'static) -> Self {
        Self {
            views: BTreeMap::new(),
            factory: Box::new(factory),
        }
    }

    pub fn sync(&mut self, events: &[WmEvent]) {
        for event in events {
            match event {
                WmEvent::Opened(id) => {
                    self.views.insert(*id, (self.factory)(*id));
                }
                WmEvent::Closed(id) => {
                    self.views.remove(id);
                }
                WmEvent::Minimized(_) | WmEvent::Restored(_) | WmEvent::ItemDeleted(_) => {}
            }
        }
    }

    pub fn is_mounted(&self, id: WindowId) -> bool {
        self.views.contains_key(&id)
    }

    pub fn render(&mut self, frame: &mut Frame<'_>, id: WindowId, area: Rect, focused: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if let Some(view) = self.views.get_mut(&id) {
            view.render(frame, area, &ContentContext::new(id, focused));
        }
    }

    /// Deliver a key to the view in `id` and carry out whatever it requested.
    /// Returns whether the view consumed the key.
    pub fn handle_key(&mut self, wm: &mut WindowManager, id: WindowId, key: &KeyEvent) -> bool {
        let Some(view) = self.views.get_mut(&id) else {
            return false;
        };
        let mut ctx = ContentContext::new(id, true);
        let consumed = view.handle_key(key, &mut ctx);
        for request in ctx.take_requests() {
            match request {
                ContentRequest::OpenNewPersona => {
                    wm.open_new_persona();
                }
            }
        }
        consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    struct Spawner;

    impl WindowContent for Spawner {
        fn render(&mut self, _frame: &mut Frame<'_>, _area: Rect, _ctx: &ContentContext) {}

        fn handle_key(&mut self, key: &KeyEvent, ctx: &mut ContentContext) -> bool {
            if key.code == KeyCode::Char('n') {
                ctx.open_new_persona();
                return true;
            }
            false
        }
    }

    #[test]
    fn host_follows_lifecycle_events() {
        let mut wm = WindowManager::default();
        let mut host = ContentHost::new(|_| Box::new(Spawner));
        let a = wm.open_new_persona();
        host.sync(&wm.take_events());
        assert!(host.is_mounted(a));
        wm.close_window(a);
        host.sync(&wm.take_events());
        assert!(!host.is_mounted(a));
    }

    #[test]
    fn view_can_request_new_persona() {
        let mut wm = WindowManager::default();
        let mut host = ContentHost::new(|_| Box::new(Spawner));
        let a = wm.open_new_persona();
        host.sync(&wm.take_events());

        let key = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        assert!(host.handle_key(&mut wm, a, &key));
        assert_eq!(wm.registry().len(), 2);
        assert_eq!(wm.topmost(), Some(WindowId::Persona(2)));

        let other = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert!(!host.handle_key(&mut wm, a, &other));
        assert!(!host.handle_key(&mut wm, WindowId::Segment, &key));
    }
}

//! Notifications emitted by the window manager for decoupled listeners.
//!
//! The manager queues events as they happen; the host drains them with
//! `WindowManager::take_events` once per event-loop turn and forwards them to
//! whoever cares (content views, the data layer behind drop-to-delete).

use serde_json::Value;
use thiserror::Error;

use crate::window::WindowId;

#[derive(Debug, Clone, PartialEq)]
pub enum WmEvent {
    Opened(WindowId),
    Closed(WindowId),
    Minimized(WindowId),
    Restored(WindowId),
    /// A dragged item was released on the backdrop. Broadcast, not targeted;
    /// the payload is whatever JSON the drag source attached.
    ItemDeleted(Value),
}

#[derive(Debug, Error)]
pub enum DropError {
    #[error("drop payload is empty")]
    Empty,
    #[error("drop payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parse an opaque drag-and-drop payload.
pub fn parse_drop_payload(payload: &str) -> Result<Value, DropError> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err(DropError::Empty);
    }
    Ok(serde_json::from_str(trimmed)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_object_payload() {
        let value = parse_drop_payload(r#" {"kind":"persona","id":42} "#).unwrap();
        assert_eq!(value, json!({"kind": "persona", "id": 42}));
    }

    #[test]
    fn scalar_payloads_are_accepted() {
        assert_eq!(parse_drop_payload("\"row-7\"").unwrap(), json!("row-7"));
    }

    #[test]
    fn rejects_empty_and_malformed() {
        assert!(matches!(parse_drop_payload("   "), Err(DropError::Empty)));
        assert!(matches!(
            parse_drop_payload("{id: 1"),
            Err(DropError::Malformed(_))
        ));
    }
}

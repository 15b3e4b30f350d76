//! Pointer cursor icons.

use serde::{Deserialize, Serialize};

/// Cursor icon to display for a region of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorIcon {
    /// Default arrow cursor (non-interactive areas).
    #[default]
    #[serde(alias = "default")]
    Arrow,
    /// Pointer/hand cursor for clickable elements.
    Pointer,
    /// Move cursor shown while a panel is dragged.
    Move,
    /// Horizontal resize cursor for splitters.
    ColResize,
    /// Vertical resize cursor for splitters.
    RowResize,
    /// Drop is not allowed here.
    NotAllowed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_arrow() {
        assert_eq!(CursorIcon::default(), CursorIcon::Arrow);
    }

    #[test]
    fn test_deserialize_accepts_default_alias() {
        let cursor: CursorIcon = serde_json::from_str("\"default\"").unwrap();
        assert_eq!(cursor, CursorIcon::Arrow);
        let cursor: CursorIcon = serde_json::from_str("\"col_resize\"").unwrap();
        assert_eq!(cursor, CursorIcon::ColResize);
    }
}

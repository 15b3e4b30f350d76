//! Popup menu configuration.

use flexdock_surface::{CursorIcon, Size};
use serde::Deserialize;

use crate::error::PopupError;

/// Layout path of the list element.
pub const LAYOUT_PATH: &str = "/popup-menu";

/// Appearance and stacking settings for popup menus.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PopupConfig {
    /// Cursor shown over the glass while a popup is open.
    pub glass_cursor: CursorIcon,

    /// Stacking level of the popup container. Must sit above the glass.
    pub z_index: i32,

    /// Height of one item row.
    pub item_height: f32,

    /// Width of the menu.
    pub menu_width: f32,

    /// Space between the list edge and the first/last row.
    pub list_padding: f32,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            glass_cursor: CursorIcon::Arrow,
            z_index: 1002,
            item_height: 24.0,
            menu_width: 160.0,
            list_padding: 2.0,
        }
    }
}

impl PopupConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, PopupError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Size of a menu holding `item_count` rows.
    pub fn menu_size(&self, item_count: usize) -> Size {
        Size::new(
            self.menu_width,
            item_count as f32 * self.item_height + self.list_padding * 2.0,
        )
    }
}

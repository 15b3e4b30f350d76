//! flexdock-popup: contextual popup menus for the docking layout
//!
//! A popup is a small floating list opened from a trigger control (for
//! example the tab overflow button). It is anchored to the layout corner
//! nearest the trigger, takes the drag-and-drop glass as a modal backdrop,
//! and closes on the first outside press or on selection.
//!
//! # Usage
//!
//! ```ignore
//! use flexdock_popup::{show_popup, MenuItem, PopupContext, PopupRequest};
//!
//! let ctx = PopupContext::new(drag_drop);
//! let items = hidden_tabs.iter().map(|(i, tab)| MenuItem::new(*i, tab.clone())).collect();
//! show_popup(&ctx, layout_root, overflow_button, PopupRequest::new(items, |item| {
//!     model.select_tab(item.index);
//! }))?;
//! ```

pub mod classes;
pub mod config;
pub mod error;
pub mod item;
pub mod item_list;
pub mod popup;
pub mod position;


pub use classes::{ClassNameMapper, POPUP_MENU, POPUP_MENU_CONTAINER, POPUP_MENU_ITEM};
pub use config::{LAYOUT_PATH, PopupConfig};
pub use error::PopupError;
pub use item::{MenuItem, PopupNode};
pub use item_list::{ItemClickHandler, RenderedList, render_item_list, row_layout_path};
pub use popup::{PopupContext, PopupMenu, PopupPhase, PopupRequest, show_popup};
pub use position::{Horizontal, PopupAnchor, Vertical, compute_anchor};

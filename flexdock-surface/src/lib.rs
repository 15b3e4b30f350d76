//! flexdock-surface: headless layout surface
//!
//! The pieces of the host UI that transient overlays talk to:
//! - a retained element tree (`Document`) with geometry, presentation
//!   attributes and bubbling pointer dispatch
//! - scoped listener registration (`Subscription`)
//! - the drag-and-drop glass overlay (`DragDrop`)
//!
//! Everything is single-threaded and synchronous. Handlers run inside
//! `Document::dispatch` and may mutate the tree they are dispatched on.

// Core primitives
pub mod primitives;
pub mod element_id;
pub mod cursor;
pub mod event;
pub mod error;

// Element tree and input dispatch
pub mod document;

// Glass overlay owned by drag and drop
pub mod drag_drop;

// Re-export core types
pub use primitives::{Point, Rect, Size};
pub use element_id::{ElementId, ListenerId};
pub use cursor::CursorIcon;
pub use event::{EventKind, ListenerTarget, MouseButton, PointerEvent};
pub use error::SurfaceError;
pub use document::{Content, Document, Handler, StyleOffsets, Subscription};
pub use drag_drop::{DragDrop, DragDropConfig, GLASS_CLASS};

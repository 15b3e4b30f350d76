//! Drag and drop glass overlay.
//!
//! The glass is a transparent element covering the whole viewport, stacked
//! above the layout. While it is up, underlying layout controls cannot be
//! hit and the cursor shows the glass override. Popups and drag operations
//! borrow it for their lifetime; only one holder may have it at a time.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;

use crate::cursor::CursorIcon;
use crate::document::{Document, Subscription};
use crate::element_id::ElementId;
use crate::error::SurfaceError;
use crate::event::{EventKind, ListenerTarget};

/// Class name given to the glass element.
pub const GLASS_CLASS: &str = "flexdock__drag_glass";

/// Glass overlay settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DragDropConfig {
    /// Stacking level of the glass. Overlays that must stay clickable above
    /// it use a higher z-index.
    pub glass_z_index: i32,
}

impl Default for DragDropConfig {
    fn default() -> Self {
        Self { glass_z_index: 998 }
    }
}

#[derive(Default)]
struct GlassState {
    element: Option<ElementId>,
    subscription: Option<Subscription>,
    dismiss: Option<Box<dyn FnOnce()>>,
    cursor_override: Option<CursorIcon>,
}

/// Owner of the shared glass overlay for one document.
///
/// Cloning yields another handle to the same glass.
#[derive(Clone)]
pub struct DragDrop {
    document: Document,
    config: DragDropConfig,
    glass: Rc<RefCell<GlassState>>,
}

impl DragDrop {
    pub fn new(document: Document) -> Self {
        Self::with_config(document, DragDropConfig::default())
    }

    pub fn with_config(document: Document, config: DragDropConfig) -> Self {
        Self {
            document,
            config,
            glass: Rc::new(RefCell::new(GlassState::default())),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &DragDropConfig {
        &self.config
    }

    /// Install the glass. The first primary-button press on it runs
    /// `on_dismiss`; the caller then removes the glass with `hide_glass`.
    ///
    /// Fails with `GlassAlreadyActive` while another holder has it.
    pub fn add_glass(&self, on_dismiss: impl FnOnce() + 'static) -> Result<(), SurfaceError> {
        if self.is_glass_active() {
            tracing::warn!("glass requested while already active");
            return Err(SurfaceError::GlassAlreadyActive);
        }

        let doc = &self.document;
        let element = doc.create_element();
        doc.set_class_name(element, GLASS_CLASS)?;
        doc.set_bounds(element, doc.viewport())?;
        doc.set_z_index(element, self.config.glass_z_index)?;
        doc.append_child(doc.body(), element)?;

        let glass = Rc::downgrade(&self.glass);
        let subscription = doc.add_listener(
            ListenerTarget::Element(element),
            EventKind::PointerDown,
            move |event| {
                if !event.button.is_primary() {
                    return;
                }
                let Some(glass) = glass.upgrade() else {
                    return;
                };
                let dismiss = glass.borrow_mut().dismiss.take();
                if let Some(dismiss) = dismiss {
                    tracing::debug!("glass dismissed");
                    dismiss();
                }
            },
        );

        let mut state = self.glass.borrow_mut();
        state.element = Some(element);
        state.subscription = Some(subscription);
        state.dismiss = Some(Box::new(on_dismiss));
        state.cursor_override = None;
        tracing::debug!(%element, "glass added");
        Ok(())
    }

    /// Cursor shown while the glass is up.
    pub fn set_glass_cursor_override(&self, cursor: CursorIcon) {
        self.glass.borrow_mut().cursor_override = Some(cursor);
    }

    /// Remove the glass, its listener, the pending dismiss callback and the
    /// cursor override. Does nothing when no glass is up.
    pub fn hide_glass(&self) {
        let state = std::mem::take(&mut *self.glass.borrow_mut());
        let Some(element) = state.element else {
            return;
        };
        let doc = &self.document;
        doc.remove_child(doc.body(), element);
        doc.unmount(element);
        tracing::debug!(%element, "glass hidden");
        // Subscription and dismiss callback drop here, outside any borrow.
        drop(state);
    }

    pub fn is_glass_active(&self) -> bool {
        self.glass.borrow().element.is_some()
    }

    pub fn glass_element(&self) -> Option<ElementId> {
        self.glass.borrow().element
    }

    /// Effective cursor override, `None` when no glass is up.
    pub fn glass_cursor(&self) -> Option<CursorIcon> {
        let state = self.glass.borrow();
        state
            .element
            .map(|_| state.cursor_override.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;
    use crate::primitives::{Point, Rect};
    use std::cell::Cell;

    fn setup() -> (Document, DragDrop) {
        let doc = Document::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        let dd = DragDrop::new(doc.clone());
        (doc, dd)
    }

    #[test]
    fn test_add_glass_covers_viewport() {
        let (doc, dd) = setup();
        dd.add_glass(|| {}).unwrap();

        let glass = dd.glass_element().unwrap();
        assert!(doc.is_attached(glass));
        assert_eq!(doc.class_name(glass).as_deref(), Some(GLASS_CLASS));
        assert_eq!(doc.bounding_rect(glass).unwrap(), doc.viewport());
        assert_eq!(doc.hit_test(Point::new(400.0, 300.0)), Some(glass));
    }

    #[test]
    fn test_second_glass_is_rejected() {
        let (_doc, dd) = setup();
        dd.add_glass(|| {}).unwrap();
        assert_eq!(dd.add_glass(|| {}), Err(SurfaceError::GlassAlreadyActive));
        assert!(dd.is_glass_active());
    }

    #[test]
    fn test_primary_press_dismisses_once() {
        let (doc, dd) = setup();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        dd.add_glass(move || c.set(c.get() + 1)).unwrap();

        doc.pointer_down(Point::new(10.0, 10.0), MouseButton::Left);
        doc.pointer_down(Point::new(10.0, 10.0), MouseButton::Left);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_secondary_press_does_not_dismiss() {
        let (doc, dd) = setup();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        dd.add_glass(move || c.set(c.get() + 1)).unwrap();

        doc.pointer_down(Point::new(10.0, 10.0), MouseButton::Right);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_hide_glass_clears_everything() {
        let (doc, dd) = setup();
        dd.add_glass(|| {}).unwrap();
        dd.set_glass_cursor_override(CursorIcon::Move);
        let glass = dd.glass_element().unwrap();
        assert_eq!(dd.glass_cursor(), Some(CursorIcon::Move));

        dd.hide_glass();
        assert!(!dd.is_glass_active());
        assert!(!doc.exists(glass));
        assert_eq!(dd.glass_cursor(), None);
        assert_eq!(doc.total_listener_count(), 0);
    }

    #[test]
    fn test_hide_glass_when_inactive_is_noop() {
        let (_doc, dd) = setup();
        dd.hide_glass();
        dd.hide_glass();
        assert!(!dd.is_glass_active());
    }

    #[test]
    fn test_glass_can_be_reacquired_after_hide() {
        let (_doc, dd) = setup();
        dd.add_glass(|| {}).unwrap();
        dd.hide_glass();
        assert!(dd.add_glass(|| {}).is_ok());
    }

    #[test]
    fn test_dismiss_may_hide_glass_reentrantly() {
        let (doc, dd) = setup();
        let inner = dd.clone();
        dd.add_glass(move || inner.hide_glass()).unwrap();

        doc.pointer_down(Point::new(1.0, 1.0), MouseButton::Left);
        assert!(!dd.is_glass_active());
    }

    #[test]
    fn test_cursor_defaults_to_arrow() {
        let (_doc, dd) = setup();
        dd.add_glass(|| {}).unwrap();
        assert_eq!(dd.glass_cursor(), Some(CursorIcon::Arrow));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: DragDropConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DragDropConfig::default());
        let config: DragDropConfig = serde_json::from_str(r#"{"glass_z_index": 5}"#).unwrap();
        assert_eq!(config.glass_z_index, 5);
    }
}

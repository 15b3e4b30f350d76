//! Pointer events
//!
//! Provides the `PointerEvent` handed to listeners during dispatch. Events
//! bubble from the hit element up through its ancestors to the document;
//! a listener calls `stop_propagation()` to end the walk after the current
//! node's listeners have run.

use std::cell::Cell;

use crate::element_id::ElementId;
use crate::primitives::Point;

/// Mouse button types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

impl MouseButton {
    /// The primary button (left for the default pointer mapping).
    pub fn is_primary(&self) -> bool {
        matches!(self, MouseButton::Left)
    }
}

/// Kinds of pointer events a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Button pressed.
    PointerDown,
    /// Press and release on the same element.
    Click,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The document itself, reached last while bubbling.
    Document,
    /// A specific element.
    Element(ElementId),
}

/// A pointer event being dispatched through the element tree.
#[derive(Debug)]
pub struct PointerEvent {
    pub kind: EventKind,
    pub button: MouseButton,
    pub position: Point,

    /// The deepest element under the pointer, `None` if only the document was hit.
    pub target: Option<ElementId>,

    current_target: Cell<ListenerTarget>,
    propagation_stopped: Cell<bool>,
}

impl PointerEvent {
    pub fn new(kind: EventKind, button: MouseButton, position: Point, target: Option<ElementId>) -> Self {
        Self {
            kind,
            button,
            position,
            target,
            current_target: Cell::new(ListenerTarget::Document),
            propagation_stopped: Cell::new(false),
        }
    }

    /// Stop the event from reaching ancestors of the current node.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    /// The node whose listeners are currently running.
    pub fn current_target(&self) -> ListenerTarget {
        self.current_target.get()
    }

    pub(crate) fn set_current_target(&self, target: ListenerTarget) {
        self.current_target.set(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_propagation_sets_flag() {
        let event = PointerEvent::new(EventKind::Click, MouseButton::Left, Point::new(0.0, 0.0), None);
        assert!(!event.is_propagation_stopped());
        event.stop_propagation();
        assert!(event.is_propagation_stopped());
    }

    #[test]
    fn test_primary_button() {
        assert!(MouseButton::Left.is_primary());
        assert!(!MouseButton::Right.is_primary());
        assert!(!MouseButton::Other(9).is_primary());
    }

    #[test]
    fn test_current_target_defaults_to_document() {
        let event = PointerEvent::new(EventKind::PointerDown, MouseButton::Left, Point::new(0.0, 0.0), None);
        assert_eq!(event.current_target(), ListenerTarget::Document);
    }
}

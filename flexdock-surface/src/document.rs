//! Headless Document
//!
//! A retained element tree standing in for the host UI surface. Each element
//! carries the presentation attributes the layout library cares about (class
//! name, tooltip, content, layout path, style offsets) plus explicit bounds
//! used for hit-testing.
//!
//! # Dispatch
//!
//! Pointer input is hit-tested against attached elements (highest z-index
//! wins, later paint order breaks ties) and then bubbles:
//!
//! ```text
//! target -> parent -> ... -> body -> document
//! ```
//!
//! Handlers are cloned out of the registry before they run, so a handler may
//! freely remove elements or listeners. A listener removed mid-dispatch is
//! not invoked afterwards.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::element_id::{ElementId, ListenerId};
use crate::error::SurfaceError;
use crate::event::{EventKind, ListenerTarget, MouseButton, PointerEvent};
use crate::primitives::{Point, Rect};

/// Displayable content of an element.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    /// Named icon glyph, rendered by the host theme.
    Icon(String),
    /// Several fragments laid out inline.
    Group(Vec<Content>),
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    /// Flatten to plain text, dropping icons.
    pub fn plain_text(&self) -> String {
        match self {
            Content::Empty | Content::Icon(_) => String::new(),
            Content::Text(s) => s.clone(),
            Content::Group(parts) => parts.iter().map(Content::plain_text).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Content::Empty => true,
            Content::Text(s) => s.is_empty(),
            Content::Icon(_) => false,
            Content::Group(parts) => parts.iter().all(Content::is_empty),
        }
    }
}

/// Absolute-position offsets relative to the parent, CSS style.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StyleOffsets {
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
}

/// Event handler stored in the registry.
pub type Handler = Rc<dyn Fn(&PointerEvent)>;

#[derive(Debug, Default)]
struct ElementData {
    class_name: String,
    title: Option<String>,
    content: Content,
    layout_path: Option<String>,
    offsets: StyleOffsets,
    bounds: Rect,
    z_index: Option<i32>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

struct Listener {
    id: ListenerId,
    target: ListenerTarget,
    kind: EventKind,
    handler: Handler,
}

struct DocumentState {
    viewport: Rect,
    body: ElementId,
    elements: HashMap<ElementId, ElementData>,
    listeners: Vec<Listener>,
}

impl DocumentState {
    fn element(&self, id: ElementId) -> Result<&ElementData, SurfaceError> {
        self.elements.get(&id).ok_or(SurfaceError::UnknownElement(id))
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut ElementData, SurfaceError> {
        self.elements.get_mut(&id).ok_or(SurfaceError::UnknownElement(id))
    }

    fn is_attached(&self, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == self.body {
                return true;
            }
            current = self.elements.get(&cur).and_then(|e| e.parent);
        }
        false
    }

    fn detach(&mut self, child: ElementId) {
        let parent = self.elements.get_mut(&child).and_then(|e| e.parent.take());
        if let Some(parent) = parent {
            if let Some(p) = self.elements.get_mut(&parent) {
                p.children.retain(|c| *c != child);
            }
        }
    }

    /// Attached elements in paint order with their effective z-index.
    fn paint_order(&self) -> Vec<(ElementId, i32)> {
        let mut out = Vec::new();
        let mut stack = vec![(self.body, 0)];
        while let Some((id, inherited_z)) = stack.pop() {
            let Some(el) = self.elements.get(&id) else {
                continue;
            };
            let z = el.z_index.unwrap_or(inherited_z);
            out.push((id, z));
            for child in el.children.iter().rev() {
                stack.push((*child, z));
            }
        }
        out
    }
}

/// Shared handle to a document. Cloning yields another handle to the same tree.
#[derive(Clone)]
pub struct Document {
    state: Rc<RefCell<DocumentState>>,
}

impl Document {
    /// Create a document whose body fills `viewport`.
    pub fn new(viewport: Rect) -> Self {
        let body = ElementId::new();
        let mut elements = HashMap::new();
        elements.insert(
            body,
            ElementData {
                bounds: viewport,
                ..Default::default()
            },
        );
        Self {
            state: Rc::new(RefCell::new(DocumentState {
                viewport,
                body,
                elements,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn body(&self) -> ElementId {
        self.state.borrow().body
    }

    pub fn viewport(&self) -> Rect {
        self.state.borrow().viewport
    }

    // -------------------------------------------------------------------------
    // Tree structure
    // -------------------------------------------------------------------------

    /// Create a detached element owned by this document.
    pub fn create_element(&self) -> ElementId {
        let id = ElementId::new();
        self.state.borrow_mut().elements.insert(id, ElementData::default());
        id
    }

    /// Append `child` as the last child of `parent`, moving it if already parented.
    pub fn append_child(&self, parent: ElementId, child: ElementId) -> Result<(), SurfaceError> {
        let mut state = self.state.borrow_mut();
        state.element(parent)?;
        state.element(child)?;
        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == child {
                return Err(SurfaceError::InvalidHierarchy(child));
            }
            ancestor = state.elements.get(&id).and_then(|e| e.parent);
        }
        state.detach(child);
        state.element_mut(child)?.parent = Some(parent);
        state.element_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Detach `child` from `parent`.
    ///
    /// Returns `false` without touching anything when `child` is not (or no
    /// longer) a child of `parent`.
    pub fn remove_child(&self, parent: ElementId, child: ElementId) -> bool {
        let mut state = self.state.borrow_mut();
        let is_child = state
            .elements
            .get(&child)
            .is_some_and(|e| e.parent == Some(parent));
        if is_child {
            state.detach(child);
        }
        is_child
    }

    /// Drop an element and its whole subtree, including listeners bound to them.
    ///
    /// Returns the number of elements removed. Unknown ids remove nothing.
    pub fn unmount(&self, root: ElementId) -> usize {
        let removed_listeners: Vec<Listener>;
        let count;
        {
            let mut state = self.state.borrow_mut();
            if root == state.body || !state.elements.contains_key(&root) {
                return 0;
            }
            state.detach(root);

            let mut doomed = Vec::new();
            let mut stack = vec![root];
            while let Some(id) = stack.pop() {
                if let Some(el) = state.elements.remove(&id) {
                    stack.extend(el.children);
                    doomed.push(id);
                }
            }
            count = doomed.len();

            let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.listeners)
                .into_iter()
                .partition(|l| matches!(l.target, ListenerTarget::Element(id) if doomed.contains(&id)));
            state.listeners = kept;
            removed_listeners = gone;
        }
        // Handlers may own subscriptions; drop them outside the borrow.
        drop(removed_listeners);
        count
    }

    pub fn exists(&self, id: ElementId) -> bool {
        self.state.borrow().elements.contains_key(&id)
    }

    /// Whether `id` is connected to the body.
    pub fn is_attached(&self, id: ElementId) -> bool {
        self.state.borrow().is_attached(id)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.state.borrow().elements.get(&id).and_then(|e| e.parent)
    }

    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.state
            .borrow()
            .elements
            .get(&id)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    pub fn set_class_name(&self, id: ElementId, class_name: impl Into<String>) -> Result<(), SurfaceError> {
        self.state.borrow_mut().element_mut(id)?.class_name = class_name.into();
        Ok(())
    }

    pub fn class_name(&self, id: ElementId) -> Option<String> {
        self.state.borrow().elements.get(&id).map(|e| e.class_name.clone())
    }

    /// Set the tooltip text.
    pub fn set_title(&self, id: ElementId, title: impl Into<String>) -> Result<(), SurfaceError> {
        self.state.borrow_mut().element_mut(id)?.title = Some(title.into());
        Ok(())
    }

    pub fn title(&self, id: ElementId) -> Option<String> {
        self.state.borrow().elements.get(&id).and_then(|e| e.title.clone())
    }

    pub fn set_content(&self, id: ElementId, content: Content) -> Result<(), SurfaceError> {
        self.state.borrow_mut().element_mut(id)?.content = content;
        Ok(())
    }

    pub fn content(&self, id: ElementId) -> Option<Content> {
        self.state.borrow().elements.get(&id).map(|e| e.content.clone())
    }

    pub fn set_layout_path(&self, id: ElementId, path: impl Into<String>) -> Result<(), SurfaceError> {
        self.state.borrow_mut().element_mut(id)?.layout_path = Some(path.into());
        Ok(())
    }

    pub fn layout_path(&self, id: ElementId) -> Option<String> {
        self.state.borrow().elements.get(&id).and_then(|e| e.layout_path.clone())
    }

    /// Find an attached element by its layout path.
    pub fn find_by_layout_path(&self, path: &str) -> Option<ElementId> {
        let state = self.state.borrow();
        state
            .paint_order()
            .into_iter()
            .map(|(id, _)| id)
            .find(|id| {
                state
                    .elements
                    .get(id)
                    .and_then(|e| e.layout_path.as_deref())
                    == Some(path)
            })
    }

    pub fn set_offsets(&self, id: ElementId, offsets: StyleOffsets) -> Result<(), SurfaceError> {
        self.state.borrow_mut().element_mut(id)?.offsets = offsets;
        Ok(())
    }

    pub fn offsets(&self, id: ElementId) -> Option<StyleOffsets> {
        self.state.borrow().elements.get(&id).map(|e| e.offsets)
    }

    pub fn set_z_index(&self, id: ElementId, z_index: i32) -> Result<(), SurfaceError> {
        self.state.borrow_mut().element_mut(id)?.z_index = Some(z_index);
        Ok(())
    }

    pub fn set_bounds(&self, id: ElementId, bounds: Rect) -> Result<(), SurfaceError> {
        self.state.borrow_mut().element_mut(id)?.bounds = bounds;
        Ok(())
    }

    /// Viewport-relative bounds of an element.
    pub fn bounding_rect(&self, id: ElementId) -> Result<Rect, SurfaceError> {
        Ok(self.state.borrow().element(id)?.bounds)
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a handler. The listener lives until the returned
    /// `Subscription` is released or dropped, or its element is unmounted.
    pub fn add_listener(
        &self,
        target: ListenerTarget,
        kind: EventKind,
        handler: impl Fn(&PointerEvent) + 'static,
    ) -> Subscription {
        let id = ListenerId::new();
        self.state.borrow_mut().listeners.push(Listener {
            id,
            target,
            kind,
            handler: Rc::new(handler),
        });
        tracing::trace!(?id, ?target, ?kind, "listener added");
        Subscription {
            state: Rc::downgrade(&self.state),
            id: Some(id),
        }
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        remove_listener(&self.state, id)
    }

    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.state.borrow().listeners.iter().any(|l| l.id == id)
    }

    /// Number of listeners bound to `target`.
    pub fn listener_count(&self, target: ListenerTarget) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.target == target)
            .count()
    }

    pub fn total_listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Deepest attached element under `point`, topmost by z-index then paint order.
    pub fn hit_test(&self, point: Point) -> Option<ElementId> {
        let state = self.state.borrow();
        state
            .paint_order()
            .into_iter()
            .enumerate()
            .filter(|(_, (id, _))| {
                state
                    .elements
                    .get(id)
                    .is_some_and(|e| e.bounds.contains(point))
            })
            .max_by_key(|(order, (_, z))| (*z, *order))
            .map(|(_, (id, _))| id)
    }

    /// Simulate a button press at `point`.
    pub fn pointer_down(&self, point: Point, button: MouseButton) -> PointerEvent {
        let target = self.hit_test(point);
        let event = PointerEvent::new(EventKind::PointerDown, button, point, target);
        self.dispatch(&event);
        event
    }

    /// Simulate press + release at `point`.
    ///
    /// The click is delivered to the pressed element only if it is still
    /// attached after the pointer-down handlers ran. Non-primary buttons
    /// only produce the pointer-down.
    pub fn click(&self, point: Point, button: MouseButton) {
        let down = self.pointer_down(point, button);
        if !button.is_primary() {
            return;
        }
        let target = match down.target {
            Some(id) if self.is_attached(id) => Some(id),
            Some(_) => return,
            None => None,
        };
        let event = PointerEvent::new(EventKind::Click, button, point, target);
        self.dispatch(&event);
    }

    /// Bubble `event` from its target up to the document.
    pub fn dispatch(&self, event: &PointerEvent) {
        let path = self.propagation_path(event.target);
        tracing::trace!(kind = ?event.kind, target = ?event.target, depth = path.len(), "dispatch");

        for node in path {
            event.set_current_target(node);
            let handlers: Vec<(ListenerId, Handler)> = self
                .state
                .borrow()
                .listeners
                .iter()
                .filter(|l| l.target == node && l.kind == event.kind)
                .map(|l| (l.id, l.handler.clone()))
                .collect();

            for (id, handler) in handlers {
                if self.has_listener(id) {
                    handler(event);
                }
            }

            if event.is_propagation_stopped() {
                break;
            }
        }
    }

    fn propagation_path(&self, target: Option<ElementId>) -> Vec<ListenerTarget> {
        let state = self.state.borrow();
        let mut path = Vec::new();
        let mut current = target;
        while let Some(id) = current {
            path.push(ListenerTarget::Element(id));
            current = state.elements.get(&id).and_then(|e| e.parent);
        }
        path.push(ListenerTarget::Document);
        path
    }
}

fn remove_listener(state: &Rc<RefCell<DocumentState>>, id: ListenerId) -> bool {
    let removed = {
        let mut state = state.borrow_mut();
        let pos = state.listeners.iter().position(|l| l.id == id);
        pos.map(|pos| state.listeners.remove(pos))
    };
    let found = removed.is_some();
    drop(removed);
    if found {
        tracing::trace!(?id, "listener removed");
    }
    found
}

/// Scoped registration of a listener.
///
/// Releasing (explicitly or on drop) removes the listener exactly once.
/// A subscription does not keep its document alive.
pub struct Subscription {
    state: Weak<RefCell<DocumentState>>,
    id: Option<ListenerId>,
}

impl Subscription {
    pub fn id(&self) -> Option<ListenerId> {
        self.id
    }

    /// Whether this subscription still owns a registered listener.
    pub fn is_active(&self) -> bool {
        match (self.id, self.state.upgrade()) {
            (Some(id), Some(state)) => state.borrow().listeners.iter().any(|l| l.id == id),
            _ => false,
        }
    }

    /// Remove the listener now. Returns `true` only the first time it removes something.
    pub fn release(&mut self) -> bool {
        let Some(id) = self.id.take() else {
            return false;
        };
        match self.state.upgrade() {
            Some(state) => remove_listener(&state, id),
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

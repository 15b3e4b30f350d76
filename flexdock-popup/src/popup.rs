//! Popup lifecycle.
//!
//! `show_popup` builds the container, anchors it near the trigger, takes the
//! glass, wires the dismiss listeners and renders the rows. Everything it
//! acquires is released by `PopupMenu::hide`, which runs at most once no
//! matter how many dismiss paths fire.
//!
//! ```text
//! show_popup ──> Shown ──(row click | outside press | glass press | hide())──> Hidden
//! ```
//!
//! The document and the glass hold the popup alive while it is shown, so
//! dropping the returned handle does not close it. That ownership forms a
//! cycle (document -> listener -> popup -> `DragDrop` -> document), so a
//! document dropped while a popup is still shown is leaked along with it.
//! Call `hide` before dropping the document.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use flexdock_surface::{
    Document, DragDrop, ElementId, EventKind, ListenerTarget, PointerEvent, Subscription,
    SurfaceError,
};

use crate::classes::{ClassNameMapper, POPUP_MENU_CONTAINER};
use crate::config::PopupConfig;
use crate::error::PopupError;
use crate::item::{MenuItem, PopupNode};
use crate::item_list::{ItemClickHandler, render_item_list};
use crate::position::compute_anchor;

/// Shared services a popup needs: the glass owner and appearance settings.
#[derive(Clone)]
pub struct PopupContext {
    drag_drop: DragDrop,
    config: PopupConfig,
}

impl PopupContext {
    pub fn new(drag_drop: DragDrop) -> Self {
        Self::with_config(drag_drop, PopupConfig::default())
    }

    pub fn with_config(drag_drop: DragDrop, config: PopupConfig) -> Self {
        Self { drag_drop, config }
    }

    pub fn document(&self) -> &Document {
        self.drag_drop.document()
    }

    pub fn drag_drop(&self) -> &DragDrop {
        &self.drag_drop
    }

    pub fn config(&self) -> &PopupConfig {
        &self.config
    }
}

/// What to show and whom to tell.
pub struct PopupRequest<N> {
    items: Vec<MenuItem<N>>,
    on_select: Rc<dyn Fn(&MenuItem<N>)>,
    on_hide: Option<Box<dyn FnOnce()>>,
    class_name_mapper: ClassNameMapper,
}

impl<N: PopupNode + 'static> PopupRequest<N> {
    pub fn new(items: Vec<MenuItem<N>>, on_select: impl Fn(&MenuItem<N>) + 'static) -> Self {
        Self {
            items,
            on_select: Rc::new(on_select),
            on_hide: None,
            class_name_mapper: ClassNameMapper::default(),
        }
    }

    /// Called once after the popup is torn down, whatever closed it.
    pub fn on_hide(mut self, on_hide: impl FnOnce() + 'static) -> Self {
        self.on_hide = Some(Box::new(on_hide));
        self
    }

    pub fn class_name_mapper(mut self, mapper: ClassNameMapper) -> Self {
        self.class_name_mapper = mapper;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupPhase {
    Shown,
    Hidden,
}

struct PopupInner {
    drag_drop: DragDrop,
    layout_root: ElementId,
    container: ElementId,
    list: Cell<Option<ElementId>>,
    rows: RefCell<Vec<ElementId>>,
    phase: Cell<PopupPhase>,
    subscriptions: RefCell<Vec<Subscription>>,
    on_hide: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl PopupInner {
    fn document(&self) -> &Document {
        self.drag_drop.document()
    }

    fn hide(&self) {
        if self.phase.replace(PopupPhase::Hidden) == PopupPhase::Hidden {
            return;
        }

        self.drag_drop.hide_glass();

        let doc = self.document();
        if !doc.remove_child(self.layout_root, self.container) {
            tracing::debug!(container = %self.container, "popup container already detached");
        }
        doc.unmount(self.container);

        let subscriptions = std::mem::take(&mut *self.subscriptions.borrow_mut());
        drop(subscriptions);

        tracing::debug!(container = %self.container, "popup hidden");
        let on_hide = self.on_hide.borrow_mut().take();
        if let Some(on_hide) = on_hide {
            on_hide();
        }
    }

    /// Tear down a popup that never finished showing. The caller gets the
    /// error instead of a hide notification.
    fn abort(&self) {
        self.on_hide.borrow_mut().take();
        self.hide();
    }
}

/// Handle to a shown popup.
#[derive(Clone)]
pub struct PopupMenu {
    inner: Rc<PopupInner>,
}

impl PopupMenu {
    /// Tear the popup down. Safe to call any number of times.
    pub fn hide(&self) {
        self.inner.hide();
    }

    pub fn phase(&self) -> PopupPhase {
        self.inner.phase.get()
    }

    pub fn is_shown(&self) -> bool {
        self.phase() == PopupPhase::Shown
    }

    pub fn layout_root(&self) -> ElementId {
        self.inner.layout_root
    }

    /// The positioned outer element.
    pub fn container(&self) -> ElementId {
        self.inner.container
    }

    /// The list element inside the container.
    pub fn list(&self) -> Option<ElementId> {
        self.inner.list.get()
    }

    /// Row elements, in item order.
    pub fn rows(&self) -> Vec<ElementId> {
        self.inner.rows.borrow().clone()
    }
}

impl std::fmt::Debug for PopupMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopupMenu")
            .field("container", &self.inner.container)
            .field("phase", &self.inner.phase.get())
            .finish()
    }
}

/// Show a popup menu for `trigger` inside `layout_root`.
///
/// Only one popup may be open per glass owner; while one is shown this
/// returns `SurfaceError::GlassAlreadyActive` and leaves the open popup alone.
pub fn show_popup<N: PopupNode + 'static>(
    ctx: &PopupContext,
    layout_root: ElementId,
    trigger: ElementId,
    request: PopupRequest<N>,
) -> Result<PopupMenu, PopupError> {
    let doc = ctx.document();
    let config = ctx.config();
    let PopupRequest {
        items,
        on_select,
        on_hide,
        class_name_mapper: mapper,
    } = request;

    let trigger_rect = doc.bounding_rect(trigger)?;
    let root_rect = doc.bounding_rect(layout_root)?;

    let container = doc.create_element();
    doc.set_class_name(container, mapper.map(POPUP_MENU_CONTAINER))?;
    doc.set_z_index(container, config.z_index)?;

    let anchor = compute_anchor(trigger_rect, root_rect);
    doc.set_offsets(container, anchor.offsets())?;
    doc.set_bounds(container, anchor.place(root_rect, config.menu_size(items.len())))?;

    let inner = Rc::new(PopupInner {
        drag_drop: ctx.drag_drop().clone(),
        layout_root,
        container,
        list: Cell::new(None),
        rows: RefCell::new(Vec::new()),
        phase: Cell::new(PopupPhase::Shown),
        subscriptions: RefCell::new(Vec::new()),
        on_hide: RefCell::new(on_hide),
    });

    let dismiss = inner.clone();
    if let Err(err) = ctx.drag_drop().add_glass(move || dismiss.hide()) {
        doc.unmount(container);
        return Err(err.into());
    }
    ctx.drag_drop().set_glass_cursor_override(config.glass_cursor);

    if let Err(err) = mount(&inner, &items, on_select, &mapper, config) {
        inner.abort();
        return Err(err.into());
    }

    tracing::debug!(
        %container,
        ?anchor,
        items = items.len(),
        "popup shown"
    );
    Ok(PopupMenu { inner })
}

/// Attach the container, wire the dismiss listeners and render the rows.
fn mount<N: PopupNode + 'static>(
    inner: &Rc<PopupInner>,
    items: &[MenuItem<N>],
    on_select: Rc<dyn Fn(&MenuItem<N>)>,
    mapper: &ClassNameMapper,
    config: &PopupConfig,
) -> Result<(), SurfaceError> {
    let doc = inner.document();
    let container = inner.container;
    doc.append_child(inner.layout_root, container)?;

    let mut subscriptions = Vec::with_capacity(items.len() + 2);

    // Presses inside the popup must not reach the document dismiss listener.
    subscriptions.push(doc.add_listener(
        ListenerTarget::Element(container),
        EventKind::PointerDown,
        |event| event.stop_propagation(),
    ));

    let outside = inner.clone();
    subscriptions.push(doc.add_listener(
        ListenerTarget::Document,
        EventKind::PointerDown,
        move |_| outside.hide(),
    ));

    let selected = inner.clone();
    let on_item_click: ItemClickHandler<N> =
        Rc::new(move |item: &MenuItem<N>, _event: &PointerEvent| {
            if selected.phase.get() != PopupPhase::Shown {
                return;
            }
            tracing::debug!(index = item.index, "popup item selected");
            on_select(item);
            selected.hide();
        });

    let rendered = render_item_list(doc, container, items, on_item_click, mapper, config)?;
    inner.list.set(Some(rendered.list));
    *inner.rows.borrow_mut() = rendered.rows.clone();
    subscriptions.extend(rendered.into_subscriptions());

    inner.subscriptions.borrow_mut().extend(subscriptions);
    Ok(())
}

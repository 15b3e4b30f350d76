//! Item list rendering.
//!
//! One static render pass per popup: a list element plus one row per item,
//! in caller order. Rows are never updated in place; the popup is torn down
//! and rebuilt instead.

use std::rc::Rc;

use flexdock_surface::{
    Document, ElementId, EventKind, ListenerTarget, PointerEvent, Rect, Subscription, SurfaceError,
};

use crate::classes::{ClassNameMapper, POPUP_MENU, POPUP_MENU_ITEM};
use crate::config::{LAYOUT_PATH, PopupConfig};
use crate::item::{MenuItem, PopupNode};

/// Row click callback. Receives the exact item bound to the row.
pub type ItemClickHandler<N> = Rc<dyn Fn(&MenuItem<N>, &PointerEvent)>;

/// Elements and listeners created by `render_item_list`.
#[derive(Debug)]
pub struct RenderedList {
    pub list: ElementId,
    pub rows: Vec<ElementId>,
    subscriptions: Vec<Subscription>,
}

impl RenderedList {
    /// Hand over the row listeners so their lifetime follows the popup.
    pub fn into_subscriptions(self) -> Vec<Subscription> {
        self.subscriptions
    }
}

/// Layout path of row `i`.
pub fn row_layout_path(i: usize) -> String {
    format!("{}/tb{}", LAYOUT_PATH, i)
}

/// Render `items` into `container`.
///
/// Row bounds are stacked from the container's top edge, so the container
/// must already have its final bounds.
pub fn render_item_list<N: PopupNode + 'static>(
    document: &Document,
    container: ElementId,
    items: &[MenuItem<N>],
    on_item_click: ItemClickHandler<N>,
    mapper: &ClassNameMapper,
    config: &PopupConfig,
) -> Result<RenderedList, SurfaceError> {
    let bounds = document.bounding_rect(container)?;

    let list = document.create_element();
    document.set_class_name(list, mapper.map(POPUP_MENU))?;
    document.set_layout_path(list, LAYOUT_PATH)?;
    document.set_bounds(list, bounds)?;
    document.append_child(container, list)?;

    let mut rows = Vec::with_capacity(items.len());
    let mut subscriptions = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        let row = document.create_element();
        document.set_class_name(row, mapper.map(POPUP_MENU_ITEM))?;
        document.set_layout_path(row, row_layout_path(i))?;
        document.set_title(row, item.node.help_text())?;
        document.set_content(row, item.node.rendered_name())?;
        document.set_bounds(
            row,
            Rect::new(
                bounds.x,
                bounds.y + config.list_padding + i as f32 * config.item_height,
                bounds.width,
                config.item_height,
            ),
        )?;
        document.append_child(list, row)?;

        let item = item.clone();
        let on_click = on_item_click.clone();
        subscriptions.push(document.add_listener(
            ListenerTarget::Element(row),
            EventKind::Click,
            move |event| {
                on_click(&item, event);
                event.stop_propagation();
            },
        ));
        rows.push(row);
    }

    tracing::trace!(%list, rows = rows.len(), "item list rendered");
    Ok(RenderedList {
        list,
        rows,
        subscriptions,
    })
}

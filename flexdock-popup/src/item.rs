//! Menu items and the node view they display.

use std::rc::Rc;

use flexdock_surface::Content;

/// Read-only view of a layout node shown in a popup row.
pub trait PopupNode {
    /// Tooltip text.
    fn help_text(&self) -> String;

    /// Label rendered in the row. May be rich (icon + text).
    fn rendered_name(&self) -> Content;
}

/// One selectable entry.
///
/// `index` is chosen by the caller (e.g. the tab's position in its tabset)
/// and need not be contiguous.
#[derive(Debug)]
pub struct MenuItem<N> {
    pub index: usize,
    pub node: Rc<N>,
}

impl<N> MenuItem<N> {
    pub fn new(index: usize, node: Rc<N>) -> Self {
        Self { index, node }
    }

    /// Whether two items refer to the same node.
    pub fn same_node(&self, other: &MenuItem<N>) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl<N> Clone for MenuItem<N> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            node: self.node.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl PopupNode for Named {
        fn help_text(&self) -> String {
            format!("{} help", self.0)
        }

        fn rendered_name(&self) -> Content {
            Content::text(self.0)
        }
    }

    #[test]
    fn test_clone_shares_node() {
        let item = MenuItem::new(3, Rc::new(Named("Files")));
        let copy = item.clone();
        assert_eq!(copy.index, 3);
        assert!(item.same_node(&copy));
    }

    #[test]
    fn test_distinct_nodes_are_not_same() {
        let a = MenuItem::new(0, Rc::new(Named("A")));
        let b = MenuItem::new(0, Rc::new(Named("A")));
        assert!(!a.same_node(&b));
        assert_eq!(a.node.help_text(), "A help");
        assert_eq!(a.node.rendered_name().plain_text(), "A");
    }
}

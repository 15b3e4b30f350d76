//! Popup anchoring.
//!
//! The popup is not rendered yet when its position is chosen, so the anchor
//! is picked from the trigger alone: whichever half of the layout the
//! trigger's leading edge sits in decides which container edge the popup is
//! pinned to. The popup then grows away from the trigger into the larger
//! free area.

use flexdock_surface::{Rect, Size, StyleOffsets};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Top,
    Bottom,
}

/// Which container edges the popup is pinned to, and how far in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupAnchor {
    pub horizontal: Horizontal,
    pub horizontal_offset: f32,
    pub vertical: Vertical,
    pub vertical_offset: f32,
}

/// Choose the anchor corner for a popup opened from `trigger` inside `container`.
///
/// A trigger exactly on a midpoint anchors left/top.
pub fn compute_anchor(trigger: Rect, container: Rect) -> PopupAnchor {
    let (horizontal, horizontal_offset) =
        if trigger.left() < container.left() + container.width / 2.0 {
            (Horizontal::Left, trigger.left() - container.left())
        } else {
            (Horizontal::Right, container.right() - trigger.right())
        };

    let (vertical, vertical_offset) = if trigger.top() < container.top() + container.height / 2.0 {
        (Vertical::Top, trigger.top() - container.top())
    } else {
        (Vertical::Bottom, container.bottom() - trigger.bottom())
    };

    PopupAnchor {
        horizontal,
        horizontal_offset,
        vertical,
        vertical_offset,
    }
}

impl PopupAnchor {
    /// Offsets as absolute-position style, one horizontal and one vertical edge set.
    pub fn offsets(&self) -> StyleOffsets {
        let mut offsets = StyleOffsets::default();
        match self.horizontal {
            Horizontal::Left => offsets.left = Some(self.horizontal_offset),
            Horizontal::Right => offsets.right = Some(self.horizontal_offset),
        }
        match self.vertical {
            Vertical::Top => offsets.top = Some(self.vertical_offset),
            Vertical::Bottom => offsets.bottom = Some(self.vertical_offset),
        }
        offsets
    }

    /// Resolve to viewport bounds for a popup of `size` inside `container`.
    pub fn place(&self, container: Rect, size: Size) -> Rect {
        let x = match self.horizontal {
            Horizontal::Left => container.left() + self.horizontal_offset,
            Horizontal::Right => container.right() - self.horizontal_offset - size.width,
        };
        let y = match self.vertical {
            Vertical::Top => container.top() + self.vertical_offset,
            Vertical::Bottom => container.bottom() - self.vertical_offset - size.height,
        };
        Rect::new(x, y, size.width, size.height)
    }
}

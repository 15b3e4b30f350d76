//! Default class tokens and the caller-supplied class name mapper.

use std::fmt;
use std::rc::Rc;

/// Outer positioned wrapper.
pub const POPUP_MENU_CONTAINER: &str = "flexdock__popup_menu_container";
/// List wrapper inside the container.
pub const POPUP_MENU: &str = "flexdock__popup_menu";
/// One selectable row.
pub const POPUP_MENU_ITEM: &str = "flexdock__popup_menu_item";

/// Maps a default class token to the class actually applied.
///
/// Lets hosts swap in their own theme classes for any subset of tokens.
#[derive(Clone)]
pub struct ClassNameMapper(Rc<dyn Fn(&str) -> String>);

impl ClassNameMapper {
    pub fn new(f: impl Fn(&str) -> String + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Leaves every token unchanged.
    pub fn identity() -> Self {
        Self::new(|class: &str| class.to_owned())
    }

    pub fn map(&self, default_class: &str) -> String {
        (self.0)(default_class)
    }
}

impl Default for ClassNameMapper {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for ClassNameMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClassNameMapper(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapper() {
        let mapper = ClassNameMapper::default();
        assert_eq!(mapper.map(POPUP_MENU_ITEM), POPUP_MENU_ITEM);
    }

    #[test]
    fn test_mapper_can_remap_subset() {
        let mapper = ClassNameMapper::new(|class| {
            if class == POPUP_MENU {
                "my-menu".to_string()
            } else {
                class.to_string()
            }
        });
        assert_eq!(mapper.map(POPUP_MENU), "my-menu");
        assert_eq!(mapper.map(POPUP_MENU_CONTAINER), POPUP_MENU_CONTAINER);
    }

    #[test]
    fn test_tokens_are_distinct() {
        assert_ne!(POPUP_MENU_CONTAINER, POPUP_MENU);
        assert_ne!(POPUP_MENU, POPUP_MENU_ITEM);
    }
}

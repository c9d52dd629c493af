//! Single open-menu tracking for a table.

use super::{MenuAnchor, Rect, position_menu};

/// Where a click landed, as far as menus are concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget<K> {
    /// The menu trigger of a row.
    Trigger(K),
    /// Inside the open menu of a row.
    Menu(K),
    /// Anywhere else.
    Outside,
}

/// The currently open menu.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenMenu<K> {
    pub row: K,
    pub anchor: MenuAnchor,
}

/// Owns the one open action menu of a table.
///
/// Opening a menu closes any other. Positions are computed when a menu
/// opens and not tracked afterwards.
#[derive(Debug, Clone)]
pub struct MenuController<K> {
    open: Option<OpenMenu<K>>,
    menu_height: f64,
    gap: f64,
}

impl<K: Clone + PartialEq> MenuController<K> {
    /// Create a controller for menus of the given estimated height.
    pub fn new(menu_height: f64, gap: f64) -> Self {
        Self {
            open: None,
            menu_height,
            gap,
        }
    }

    /// The open menu, if any.
    pub fn current(&self) -> Option<&OpenMenu<K>> {
        self.open.as_ref()
    }

    /// Whether `row`'s menu is open.
    pub fn is_open(&self, row: &K) -> bool {
        self.open.as_ref().is_some_and(|m| &m.row == row)
    }

    /// Open `row`'s menu next to its trigger, closing any other menu.
    pub fn open(&mut self, row: K, trigger: &Rect, viewport_height: f64) -> MenuAnchor {
        let anchor = position_menu(trigger, viewport_height, self.menu_height, self.gap);
        self.open = Some(OpenMenu { row, anchor });
        anchor
    }

    /// Trigger click: close `row`'s menu if it is open, open it otherwise.
    /// Returns the anchor when the menu ends up open.
    pub fn toggle(&mut self, row: K, trigger: &Rect, viewport_height: f64) -> Option<MenuAnchor> {
        if self.is_open(&row) {
            self.open = None;
            None
        } else {
            Some(self.open(row, trigger, viewport_height))
        }
    }

    /// Close whatever is open. Returns true if a menu was open.
    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    /// Document-level click handler.
    ///
    /// Clicks on the open menu or its own trigger keep it open; any other
    /// click closes it. Returns true if a menu was closed.
    pub fn handle_click(&mut self, target: &ClickTarget<K>) -> bool {
        let keep = match (target, &self.open) {
            (_, None) => return false,
            (ClickTarget::Trigger(row) | ClickTarget::Menu(row), Some(open)) => *row == open.row,
            (ClickTarget::Outside, Some(_)) => false,
        };
        if keep { false } else { self.close() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger() -> Rect {
        Rect::new(10.0, 100.0, 24.0, 24.0)
    }

    #[test]
    fn test_opening_second_closes_first() {
        let mut menus = MenuController::new(120.0, 4.0);
        menus.open(1u32, &trigger(), 800.0);
        menus.open(2u32, &trigger(), 800.0);
        assert!(!menus.is_open(&1));
        assert!(menus.is_open(&2));
    }

    #[test]
    fn test_toggle_same_row_closes() {
        let mut menus = MenuController::new(120.0, 4.0);
        assert!(menus.toggle(1u32, &trigger(), 800.0).is_some());
        assert!(menus.toggle(1u32, &trigger(), 800.0).is_none());
        assert!(menus.current().is_none());
    }

    #[test]
    fn test_outside_click_closes() {
        let mut menus = MenuController::new(120.0, 4.0);
        menus.open(1u32, &trigger(), 800.0);
        assert!(!menus.handle_click(&ClickTarget::Menu(1)));
        assert!(!menus.handle_click(&ClickTarget::Trigger(1)));
        assert!(menus.is_open(&1));
        assert!(menus.handle_click(&ClickTarget::Outside));
        assert!(menus.current().is_none());
        assert!(!menus.handle_click(&ClickTarget::Outside));
    }

    #[test]
    fn test_click_on_other_row_closes() {
        let mut menus = MenuController::new(120.0, 4.0);
        menus.open(1u32, &trigger(), 800.0);
        assert!(menus.handle_click(&ClickTarget::Trigger(2)));
    }
}

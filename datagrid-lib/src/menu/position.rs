//! Viewport-aware menu placement.

/// An axis-aligned rectangle in viewport coordinates (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Which side of the trigger the menu opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Above,
    Below,
}

/// Where to put the menu's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuAnchor {
    pub top: f64,
    pub left: f64,
    pub placement: Placement,
}

/// Place a menu of estimated height `menu_height` next to `trigger`.
///
/// Opens below the trigger, `gap` pixels down, when the space under the
/// trigger fits the menu. Otherwise the menu's bottom edge sits on the
/// trigger's top edge. The left edge always lines up with the trigger.
pub fn position_menu(trigger: &Rect, viewport_height: f64, menu_height: f64, gap: f64) -> MenuAnchor {
    let space_below = viewport_height - trigger.bottom();
    if space_below < menu_height {
        MenuAnchor {
            top: trigger.top - menu_height,
            left: trigger.left,
            placement: Placement::Above,
        }
    } else {
        MenuAnchor {
            top: trigger.bottom() + gap,
            left: trigger.left,
            placement: Placement::Below,
        }
    }
}

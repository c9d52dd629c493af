//! Floating per-row action menus.
//!
//! [`position_menu`] decides where a menu opens. [`MenuController`] is the
//! single owner of "which menu is open" for a whole table, so one click
//! handler serves every row instead of each menu listening on its own.

mod controller;
mod position;

pub use controller::{ClickTarget, MenuController, OpenMenu};
pub use position::{MenuAnchor, Placement, Rect, position_menu};

//! Cell rendering strategies.
//!
//! The engine never draws anything itself. A column's renderer turns a cell
//! value into a [`Renderable`], and the host UI layer decides how that looks.

use serde::Serialize;

use crate::model::CellValue;

/// Visual emphasis shared by badges and action buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Default,
    Primary,
    Danger,
    Success,
    Warning,
}

/// Framework-free description of what a cell should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Renderable {
    /// Nothing.
    Empty,
    /// Plain text.
    Text { text: String },
    /// A short label with emphasis, e.g. a status pill.
    Badge { label: String, variant: Variant },
    /// A link to another screen or URL.
    Link { label: String, href: String },
    /// A number the host formats itself.
    Number { value: f64, precision: u8 },
    /// Anything else, interpreted by the host.
    Custom { data: serde_json::Value },
}

impl Renderable {
    /// Creates a text renderable.
    pub fn text(text: impl Into<String>) -> Self {
        Renderable::Text { text: text.into() }
    }

    /// Creates a badge renderable.
    pub fn badge(label: impl Into<String>, variant: Variant) -> Self {
        Renderable::Badge {
            label: label.into(),
            variant,
        }
    }

    /// Creates a link renderable.
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Renderable::Link {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// Strategy turning a cell value into a [`Renderable`].
///
/// Any `Fn(&CellValue, &R) -> Renderable` closure is a renderer.
pub trait CellRenderer<R>: Send + Sync {
    fn render(&self, value: &CellValue, row: &R) -> Renderable;
}

impl<R, F> CellRenderer<R> for F
where
    F: Fn(&CellValue, &R) -> Renderable + Send + Sync,
{
    fn render(&self, value: &CellValue, row: &R) -> Renderable {
        self(value, row)
    }
}

/// Default renderer: the value's display text, or nothing for null.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl<R> CellRenderer<R> for TextRenderer {
    fn render(&self, value: &CellValue, _row: &R) -> Renderable {
        if value.is_null() {
            Renderable::Empty
        } else {
            Renderable::text(value.display())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_renderer() {
        let r = TextRenderer;
        assert_eq!(
            CellRenderer::<()>::render(&r, &CellValue::from("Acme"), &()),
            Renderable::text("Acme")
        );
        assert_eq!(
            CellRenderer::<()>::render(&r, &CellValue::Null, &()),
            Renderable::Empty
        );
    }

    #[test]
    fn test_closure_renderer() {
        let status = |value: &CellValue, _row: &()| match value {
            CellValue::Bool(true) => Renderable::badge("Active", Variant::Success),
            _ => Renderable::badge("Inactive", Variant::Warning),
        };
        assert_eq!(
            status.render(&CellValue::Bool(true), &()),
            Renderable::badge("Active", Variant::Success)
        );
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(Renderable::badge("New", Variant::Primary)).unwrap();
        assert_eq!(json["kind"], "badge");
        assert_eq!(json["variant"], "primary");
    }
}

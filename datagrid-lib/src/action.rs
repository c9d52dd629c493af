//! Row-scoped actions shown in a row's action menu.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::column::Variant;
use crate::model::GridRow;

type Predicate<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

enum Callback<R> {
    Sync(Arc<dyn Fn(&R) + Send + Sync>),
    Async(Arc<dyn Fn(&R) -> BoxFuture<'static, ()> + Send + Sync>),
}

impl<R> Clone for Callback<R> {
    fn clone(&self) -> Self {
        match self {
            Callback::Sync(f) => Callback::Sync(Arc::clone(f)),
            Callback::Async(f) => Callback::Async(Arc::clone(f)),
        }
    }
}

/// One entry of a row's action menu (view, edit, delete, convert...).
///
/// # Example
///
/// ```ignore
/// let delete = ActionDescriptor::new_async("delete", "Delete", move |lead: &Lead| {
///     let api = api.clone();
///     let id = lead.id;
///     async move { api.delete_lead(id).await }
/// })
/// .variant(Variant::Danger)
/// .disabled_when(|lead: &Lead| lead.converted);
/// ```
pub struct ActionDescriptor<R: GridRow> {
    pub id: String,
    pub label: String,
    pub variant: Variant,
    callback: Callback<R>,
    hidden: Option<Predicate<R>>,
    disabled: Option<Predicate<R>>,
}

impl<R: GridRow> ActionDescriptor<R> {
    /// Action with a synchronous callback.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        on_invoke: impl Fn(&R) + Send + Sync + 'static,
    ) -> Self {
        Self::with_callback(id, label, Callback::Sync(Arc::new(on_invoke)))
    }

    /// Action whose callback returns a future.
    pub fn new_async<F, Fut>(id: impl Into<String>, label: impl Into<String>, on_invoke: F) -> Self
    where
        F: Fn(&R) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let callback = Callback::Async(Arc::new(move |row: &R| on_invoke(row).boxed()));
        Self::with_callback(id, label, callback)
    }

    fn with_callback(id: impl Into<String>, label: impl Into<String>, callback: Callback<R>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            variant: Variant::Default,
            callback,
            hidden: None,
            disabled: None,
        }
    }

    /// Set the visual variant.
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Hide the action for rows matching the predicate.
    pub fn hidden_when(mut self, f: impl Fn(&R) -> bool + Send + Sync + 'static) -> Self {
        self.hidden = Some(Arc::new(f));
        self
    }

    /// Disable the action for rows matching the predicate.
    pub fn disabled_when(mut self, f: impl Fn(&R) -> bool + Send + Sync + 'static) -> Self {
        self.disabled = Some(Arc::new(f));
        self
    }

    pub fn is_hidden(&self, row: &R) -> bool {
        self.hidden.as_ref().is_some_and(|f| f(row))
    }

    pub fn is_disabled(&self, row: &R) -> bool {
        self.disabled.as_ref().is_some_and(|f| f(row))
    }

    /// Run the callback unless the action is hidden or disabled for `row`.
    /// Returns true if it ran.
    pub async fn invoke(&self, row: &R) -> bool {
        if self.is_hidden(row) || self.is_disabled(row) {
            log::debug!("action {} not available for row {}", self.id, row.id());
            return false;
        }
        match &self.callback {
            Callback::Sync(f) => f(row),
            Callback::Async(f) => f(row).await,
        }
        true
    }
}

impl<R: GridRow> Clone for ActionDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            variant: self.variant,
            callback: self.callback.clone(),
            hidden: self.hidden.clone(),
            disabled: self.disabled.clone(),
        }
    }
}

impl<R: GridRow> fmt::Debug for ActionDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

/// The actions to list in `row`'s menu, in declaration order.
pub fn visible_actions<'a, R: GridRow>(
    actions: &'a [ActionDescriptor<R>],
    row: &R,
) -> Vec<&'a ActionDescriptor<R>> {
    actions.iter().filter(|a| !a.is_hidden(row)).collect()
}

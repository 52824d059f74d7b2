use crate::error::{GateError, StoreError};
use crate::form::FormSpec;
use crate::types::PersistedChoice;

/// The visible part of the gate.
///
/// Implemented over the real DOM on the web, and by `MemoryView` for headless
/// use. The engine is the only caller; nothing else may change visibility.
pub trait GateView {
    /// Render the form into the form holder and wire its submit control back
    /// to the engine. The submit control must not navigate or reload.
    ///
    /// An error here aborts initialisation: a gate without a usable form
    /// cannot be answered.
    fn render_form(&mut self, form: &FormSpec) -> Result<(), GateError>;

    /// Show or hide the whole gate container.
    fn set_visible(&mut self, visible: bool);

    /// Replace the content of the gate's message area.
    fn set_message(&mut self, text: &str);
}

/// Where a remembered decision lives between page loads.
///
/// Reads are synchronous. A store that cannot persist (cookies disabled)
/// should accept writes silently and keep answering `None`.
pub trait ChoiceStore {
    fn read(&self) -> Option<PersistedChoice>;

    fn write(&mut self, choice: &PersistedChoice) -> Result<(), StoreError>;

    /// Expire any remembered decision.
    fn clear(&mut self) -> Result<(), StoreError>;
}

impl<T: GateView + ?Sized> GateView for &mut T {
    fn render_form(&mut self, form: &FormSpec) -> Result<(), GateError> {
        (**self).render_form(form)
    }

    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible)
    }

    fn set_message(&mut self, text: &str) {
        (**self).set_message(text)
    }
}

impl<T: ChoiceStore + ?Sized> ChoiceStore for &mut T {
    fn read(&self) -> Option<PersistedChoice> {
        (**self).read()
    }

    fn write(&mut self, choice: &PersistedChoice) -> Result<(), StoreError> {
        (**self).write(choice)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

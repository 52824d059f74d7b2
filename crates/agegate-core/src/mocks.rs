use std::collections::BTreeMap;

use tracing::debug;

use crate::cookie;
use crate::error::{GateError, StoreError};
use crate::form::FormSpec;
use crate::traits::{ChoiceStore, GateView};
use crate::types::PersistedChoice;

/// Headless view for tests and the CLI.
///
/// Records what the engine asked for: the rendered form, gate visibility and
/// the message text. Starts visible with an empty message area, like the
/// stock page markup.
#[derive(Clone, Debug)]
pub struct MemoryView {
    form: Option<FormSpec>,
    render_count: usize,
    visible: bool,
    message: Option<String>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self {
            form: None,
            render_count: 0,
            visible: true,
            message: None,
        }
    }

    pub fn form(&self) -> Option<&FormSpec> {
        self.form.as_ref()
    }

    /// How many times a form was appended to the holder.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Default for MemoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl GateView for MemoryView {
    fn render_form(&mut self, form: &FormSpec) -> Result<(), GateError> {
        self.form = Some(form.clone());
        self.render_count += 1;
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_message(&mut self, text: &str) {
        self.message = Some(text.to_string());
    }
}

/// In-memory cookie jar with `document.cookie` semantics.
///
/// A disabled jar models a browser with cookies turned off: assignments are
/// dropped without error and the header is always empty.
#[derive(Clone, Debug, Default)]
pub struct MemoryCookieJar {
    cookies: BTreeMap<String, String>,
    disabled: bool,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disabled() -> Self {
        Self {
            cookies: BTreeMap::new(),
            disabled: true,
        }
    }

    /// Current `document.cookie` header.
    pub fn header(&self) -> String {
        self.cookies
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Apply a `document.cookie = ...` assignment.
    pub fn assign(&mut self, assignment: &str) {
        if self.disabled {
            debug!("Cookie jar disabled, dropping assignment");
            return;
        }
        if let Some((name, value, expired)) = cookie::parse_assignment(assignment) {
            if expired {
                self.cookies.remove(&name);
            } else {
                self.cookies.insert(name, value);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl ChoiceStore for MemoryCookieJar {
    fn read(&self) -> Option<PersistedChoice> {
        cookie::choice_from_header(&self.header())
    }

    fn write(&mut self, choice: &PersistedChoice) -> Result<(), StoreError> {
        self.assign(&cookie::encode_assignment(choice));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.assign(cookie::EXPIRE_ASSIGNMENT);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EligibilityDecision;

    #[test]
    fn jar_keeps_unrelated_cookies() {
        let mut jar = MemoryCookieJar::new();
        jar.assign("theme=dark");
        jar.write(&PersistedChoice::new(true)).unwrap();
        assert_eq!(jar.header(), "is_of_age=true; theme=dark");
        assert_eq!(
            jar.read().map(|c| c.decision()),
            Some(EligibilityDecision::Eligible)
        );
    }

    #[test]
    fn jar_overwrites_and_clears() {
        let mut jar = MemoryCookieJar::new();
        jar.write(&PersistedChoice::new(true)).unwrap();
        jar.write(&PersistedChoice::new(false)).unwrap();
        assert_eq!(jar.header(), "is_of_age=false");

        jar.clear().unwrap();
        assert!(jar.is_empty());
        assert!(jar.read().is_none());
    }

    #[test]
    fn disabled_jar_drops_writes_silently() {
        let mut jar = MemoryCookieJar::disabled();
        assert!(jar.write(&PersistedChoice::new(true)).is_ok());
        assert!(jar.read().is_none());
        assert_eq!(jar.header(), "");
    }

    #[test]
    fn view_starts_visible_and_records_calls() {
        let mut view = MemoryView::new();
        assert!(view.is_visible());
        assert!(view.message().is_none());

        view.set_message("no");
        view.set_visible(false);
        assert_eq!(view.message(), Some("no"));
        assert!(!view.is_visible());
        assert_eq!(view.render_count(), 0);
    }
}

//! `document.cookie`-backed [`ChoiceStore`].

use agegate_core::{cookie, ChoiceStore, GateError, PersistedChoice, StoreError};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlDocument};

pub struct DocumentCookieStore {
    document: HtmlDocument,
}

impl DocumentCookieStore {
    pub fn new(document: &Document) -> Result<Self, GateError> {
        let document = document
            .clone()
            .dyn_into::<HtmlDocument>()
            .map_err(|_| GateError::Dom("document is not an HTML document".into()))?;
        Ok(Self { document })
    }

    fn assign(&self, assignment: &str) -> Result<(), StoreError> {
        self.document
            .set_cookie(assignment)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}

impl ChoiceStore for DocumentCookieStore {
    fn read(&self) -> Option<PersistedChoice> {
        match self.document.cookie() {
            Ok(header) => cookie::choice_from_header(&header),
            Err(e) => {
                warn!(error = ?e, "Cookies unreadable, treating as no remembered decision");
                None
            }
        }
    }

    fn write(&mut self, choice: &PersistedChoice) -> Result<(), StoreError> {
        self.assign(&cookie::encode_assignment(choice))
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.assign(cookie::EXPIRE_ASSIGNMENT)
    }
}

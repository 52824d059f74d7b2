//! Browser adapter for the age gate.
//!
//! Binds [`agegate_core::AgeGate`] to the host page: the gate container and
//! form holder are looked up by id, the decision lives in `document.cookie`,
//! and the generated submit control is wired back to the engine.
//!
//! Built with the `auto-init` feature (the shipped bundle) the gate mounts
//! itself with default configuration once the DOM is ready. Without it, hosts
//! call `init(age)` or `initWithConfig(json)` themselves.

pub mod logging;
pub mod store;
pub mod view;

use std::cell::RefCell;
use std::rc::Rc;

use agegate_core::{AgeGate, GateConfig, GateError, SystemClock};
use tracing::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event};

pub use store::DocumentCookieStore;
pub use view::{DomView, FormControls};

/// The engine as mounted in a browser page.
pub type WebGate = AgeGate<DomView, DocumentCookieStore, SystemClock>;

pub(crate) fn dom_error(e: JsValue) -> GateError {
    GateError::Dom(format!("{:?}", e))
}

fn document() -> Result<Document, GateError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| GateError::Dom("no window.document available".into()))
}

/// Mount the gate on the current page.
///
/// Fails when an anchor element is missing; that is an integration error in
/// the host page and nothing is rendered.
pub fn mount(config: GateConfig) -> Result<Rc<RefCell<WebGate>>, GateError> {
    let document = document()?;
    let view = DomView::locate(&document, &config.anchors)?;
    let store = DocumentCookieStore::new(&document)?;

    let gate = Rc::new(RefCell::new(AgeGate::initialize(
        config,
        view,
        store,
        SystemClock,
    )?));
    wire_submit(&gate)?;

    info!(state = %gate.borrow().state(), "Age gate mounted");
    Ok(gate)
}

/// Route clicks on the generated submit control to [`AgeGate::submit`].
fn wire_submit(gate: &Rc<RefCell<WebGate>>) -> Result<(), GateError> {
    let controls = match gate.borrow().view().controls() {
        Some(controls) => controls.clone(),
        None => return Ok(()),
    };

    let handler_gate = Rc::clone(gate);
    let handler_controls = controls.clone();
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();

        let mut gate = handler_gate.borrow_mut();
        let selection = match gate.form() {
            Some(form) => form.selection_from_values(
                Some(&handler_controls.month.value()),
                Some(&handler_controls.year.value()),
            ),
            None => return,
        };
        let remember = handler_controls.remember.checked();
        gate.submit(selection, remember);
    });

    controls
        .submit
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(dom_error)?;
    // The listener lives as long as the page.
    on_click.forget();
    Ok(())
}

fn report(e: &GateError) {
    error!(error = %e, "Age gate failed to initialise");
    web_sys::console::error_1(&JsValue::from_str(&format!("[ageGate]: {}", e)));
}

fn mount_or_report(config: GateConfig) -> Result<(), JsError> {
    match mount(config) {
        Ok(_) => Ok(()),
        Err(e) => {
            report(&e);
            Err(JsError::from(e))
        }
    }
}

/// Mount with the default configuration, optionally overriding the minimum age.
#[wasm_bindgen]
pub fn init(minimum_age: Option<u32>) -> Result<(), JsError> {
    logging::install();
    let config = match minimum_age {
        Some(age) => GateConfig::with_minimum_age(age),
        None => GateConfig::default(),
    };
    mount_or_report(config)
}

/// Mount with a JSON configuration (same keys as the file configuration).
#[wasm_bindgen(js_name = initWithConfig)]
pub fn init_with_config(json: &str) -> Result<(), JsError> {
    logging::install();
    let config: GateConfig = serde_json::from_str(json)?;
    mount_or_report(config)
}

#[cfg(feature = "auto-init")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logging::install();
    let document = document().map_err(|e| JsValue::from_str(&e.to_string()))?;

    if document.ready_state() != "loading" {
        return mount_or_report(GateConfig::default()).map_err(JsValue::from);
    }

    // Errors are already on the console; nothing catches a throw from an event listener.
    let on_ready = Closure::once_into_js(move || {
        let _ = mount_or_report(GateConfig::default());
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
}

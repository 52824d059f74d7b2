//! DOM-backed [`GateView`].

use agegate_core::{AnchorIds, FormSpec, GateError, GateView, SelectSpec};
use tracing::{debug, error};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlFormElement, HtmlInputElement, HtmlLabelElement, HtmlOptionElement,
    HtmlSelectElement,
};

use crate::dom_error;

/// Handles to the generated form controls.
#[derive(Clone, Debug)]
pub struct FormControls {
    pub month: HtmlSelectElement,
    pub year: HtmlSelectElement,
    pub remember: HtmlInputElement,
    pub submit: HtmlInputElement,
}

/// Gate view over the host page's anchor elements.
pub struct DomView {
    document: Document,
    gate: Element,
    form_holder: Element,
    message: Element,
    hidden_class: String,
    controls: Option<FormControls>,
}

impl DomView {
    /// Look up the anchors. Fails if any of them is missing from the page.
    pub fn locate(document: &Document, anchors: &AnchorIds) -> Result<Self, GateError> {
        let gate = document
            .get_element_by_id(&anchors.gate_id)
            .ok_or_else(|| GateError::MissingAnchor(format!("#{}", anchors.gate_id)))?;
        let form_holder = document
            .get_element_by_id(&anchors.form_holder_id)
            .ok_or_else(|| GateError::MissingAnchor(format!("#{}", anchors.form_holder_id)))?;
        let message = gate
            .query_selector(&anchors.message_selector)
            .map_err(dom_error)?
            .ok_or_else(|| {
                GateError::MissingAnchor(format!(
                    "#{} {}",
                    anchors.gate_id, anchors.message_selector
                ))
            })?;

        Ok(Self {
            document: document.clone(),
            gate,
            form_holder,
            message,
            hidden_class: anchors.hidden_class.clone(),
            controls: None,
        })
    }

    /// Controls of the rendered form, once [`GateView::render_form`] has run.
    pub fn controls(&self) -> Option<&FormControls> {
        self.controls.as_ref()
    }

    fn create<T: JsCast>(&self, tag: &str) -> Result<T, JsValue> {
        self.document
            .create_element(tag)?
            .dyn_into::<T>()
            .map_err(|el| JsValue::from_str(&format!("<{}> has unexpected type: {:?}", tag, el)))
    }

    fn build_select(&self, spec: &SelectSpec) -> Result<HtmlSelectElement, JsValue> {
        let select: HtmlSelectElement = self.create("select")?;
        select.set_name(&spec.name);
        select.set_class_name(&spec.class_name);
        for option in &spec.options {
            let el = HtmlOptionElement::new_with_text_and_value(
                &option.label,
                &option.value.to_string(),
            )?;
            select.append_child(&el)?;
        }
        Ok(select)
    }

    fn build(&self, spec: &FormSpec) -> Result<FormControls, JsValue> {
        let fragment = self.document.create_document_fragment();

        let form: HtmlFormElement = self.create("form")?;
        form.set_id(&spec.form_id);

        let month = self.build_select(&spec.month)?;
        let year = self.build_select(&spec.year)?;

        let remember: HtmlInputElement = self.create("input")?;
        remember.set_type("checkbox");
        remember.set_name(&spec.remember.name);
        remember.set_id(&spec.remember.name);
        remember.set_checked(spec.remember.checked);

        let label: HtmlLabelElement = self.create("label")?;
        label.set_html_for(&spec.remember.name);
        label.set_text_content(Some(&spec.remember.label));

        // type=button so a click never submits the form or reloads the page.
        let submit: HtmlInputElement = self.create("input")?;
        submit.set_type("button");
        submit.set_value(&spec.submit_label);

        form.append_child(&month)?;
        form.append_child(&year)?;
        form.append_child(&remember)?;
        form.append_child(&label)?;
        form.append_child(&submit)?;
        fragment.append_child(&form)?;
        self.form_holder.append_child(&fragment)?;

        Ok(FormControls {
            month,
            year,
            remember,
            submit,
        })
    }
}

impl GateView for DomView {
    fn render_form(&mut self, form: &FormSpec) -> Result<(), GateError> {
        let controls = self.build(form).map_err(|e| {
            error!(error = ?e, "Failed to build age gate form");
            dom_error(e)
        })?;
        debug!(form_id = %form.form_id, "Form appended to holder");
        self.controls = Some(controls);
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        let classes = self.gate.class_list();
        let result = if visible {
            classes.remove_1(&self.hidden_class)
        } else {
            classes.add_1(&self.hidden_class)
        };
        if let Err(e) = result {
            error!(error = ?e, "Failed to toggle gate visibility");
        }
    }

    fn set_message(&mut self, text: &str) {
        self.message.set_text_content(Some(text));
    }
}

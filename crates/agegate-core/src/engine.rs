use chrono::Datelike;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{GateConfig, DENIAL_MESSAGE};
use crate::eligibility;
use crate::error::GateError;
use crate::form::{self, FormSpec};
use crate::traits::{ChoiceStore, GateView};
use crate::types::{EligibilityDecision, FormSelection, GateState, PersistedChoice};

/// The age gate for one page load.
///
/// Owns the view and store it was initialised with. All visibility changes go
/// through [`AgeGate::apply`], so the gate is hidden exactly when the current
/// decision is `Eligible`.
///
/// ```text
/// INIT ─ remembered eligible ──▶ HIDDEN (terminal, no form)
/// INIT ─ remembered ineligible ─▶ DENIED_SHOWN (form rendered)
/// INIT ─ nothing remembered ────▶ AWAITING_INPUT (form rendered)
/// AWAITING_INPUT | DENIED_SHOWN ─ submit ─▶ HIDDEN | DENIED_SHOWN
/// ```
pub struct AgeGate<V, S, C = SystemClock> {
    config: GateConfig,
    view: V,
    store: S,
    clock: C,
    current_year: i32,
    form: Option<FormSpec>,
    decision: EligibilityDecision,
    state: GateState,
}

impl<V, S, C> AgeGate<V, S, C>
where
    V: GateView,
    S: ChoiceStore,
    C: Clock,
{
    /// Attach the gate to a page.
    ///
    /// A remembered eligible decision hides the gate and stops here without
    /// rendering a form. A remembered ineligible decision shows the denial
    /// message and still renders the form so a different birthdate can be
    /// entered. With nothing remembered the gate stays visible and the form is
    /// rendered.
    pub fn initialize(config: GateConfig, view: V, store: S, clock: C) -> Result<Self, GateError> {
        config.validate()?;

        info!(
            minimum_age = config.minimum_age,
            oldest_plausible_age = config.oldest_plausible_age,
            "Age gate initialising"
        );

        let current_year = clock.today().year();
        let mut gate = Self {
            config,
            view,
            store,
            clock,
            current_year,
            form: None,
            decision: EligibilityDecision::Unknown,
            state: GateState::AwaitingInput,
        };

        match gate.store.read() {
            Some(choice) if choice.decision().is_eligible() => {
                gate.apply(choice.decision());
                info!("Remembered eligible visitor, gate hidden");
                return Ok(gate);
            }
            Some(choice) => {
                info!("Remembered ineligible visitor, showing denial");
                gate.apply(choice.decision());
            }
            None => {
                debug!("No remembered decision");
            }
        }

        let form = form::build_form(&gate.config, gate.current_year);
        gate.view.render_form(&form)?;
        debug!(years = form.year.options.len(), "Form rendered");
        gate.form = Some(form);

        Ok(gate)
    }

    /// Whether a visitor born in `month`/`year` meets the minimum age today.
    pub fn is_eligible(&self, month: i32, year: i32) -> bool {
        eligibility::is_eligible(&self.config, month, year, self.clock.today())
    }

    /// Handle one form submission.
    ///
    /// With `remember` the decision is written to the store, read back, and
    /// the read-back value is displayed. Without it the store is left alone and
    /// the decision is displayed directly. Both paths give the same view for
    /// the current page; they differ only in whether the next load asks again.
    ///
    /// Ignored once the gate is hidden, or when no form was rendered.
    pub fn submit(&mut self, selection: FormSelection, remember: bool) -> GateState {
        if self.state.is_terminal() || self.form.is_none() {
            debug!(state = %self.state, "Submission ignored");
            return self.state;
        }

        let eligible = self.is_eligible(selection.month, selection.year);
        let decision = EligibilityDecision::from_eligible(eligible);

        debug!(
            month = selection.month,
            year = selection.year,
            remember,
            decision = %decision,
            "Form submitted"
        );

        if remember {
            if let Err(e) = self.store.write(&PersistedChoice::new(eligible)) {
                warn!(error = %e, "Failed to persist decision");
            }
            match self.store.read() {
                Some(stored) => self.apply(stored.decision()),
                None => {
                    warn!("Persisted decision not readable, applying for this page only");
                    self.apply(decision);
                }
            }
        } else {
            self.apply(decision);
        }

        self.state
    }

    /// Expire the remembered decision. Leaves the current view untouched.
    pub fn forget(&mut self) -> Result<(), GateError> {
        info!("Clearing remembered decision");
        self.store.clear()?;
        Ok(())
    }

    fn apply(&mut self, decision: EligibilityDecision) {
        self.decision = decision;
        match decision {
            EligibilityDecision::Eligible => {
                self.view.set_visible(false);
                self.state = GateState::Hidden;
            }
            EligibilityDecision::Ineligible => {
                self.view.set_message(DENIAL_MESSAGE);
                self.state = GateState::DeniedShown;
            }
            EligibilityDecision::Unknown => {}
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn decision(&self) -> EligibilityDecision {
        self.decision
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Form rendered at initialisation, if any.
    pub fn form(&self) -> Option<&FormSpec> {
        self.form.as_ref()
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (V, S) {
        (self.view, self.store)
    }
}

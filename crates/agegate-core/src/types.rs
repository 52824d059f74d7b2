use serde::{Deserialize, Serialize};

/// Outcome of comparing a declared birth month/year against the minimum age.
///
/// Produced once per submission and replaced, never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityDecision {
    Unknown,
    Eligible,
    Ineligible,
}

impl EligibilityDecision {
    pub fn from_eligible(eligible: bool) -> Self {
        if eligible {
            Self::Eligible
        } else {
            Self::Ineligible
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }
}

impl std::fmt::Display for EligibilityDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Eligible => write!(f, "eligible"),
            Self::Ineligible => write!(f, "ineligible"),
        }
    }
}

/// A remembered decision, stored client-side across page loads.
///
/// Only ever holds `Eligible` or `Ineligible`; the constructor takes a bool so
/// `Unknown` cannot be persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersistedChoice {
    decision: EligibilityDecision,
    remember: bool,
}

impl PersistedChoice {
    pub fn new(eligible: bool) -> Self {
        Self {
            decision: EligibilityDecision::from_eligible(eligible),
            remember: true,
        }
    }

    pub fn decision(&self) -> EligibilityDecision {
        self.decision
    }

    pub fn remember(&self) -> bool {
        self.remember
    }
}

/// Month/year as chosen in the form. `month` is zero-based (January = 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSelection {
    pub month: i32,
    pub year: i32,
}

impl FormSelection {
    pub fn new(month: i32, year: i32) -> Self {
        Self { month, year }
    }
}

/// Where the gate stands within one page load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// No decision yet; the form is waiting for a submission.
    AwaitingInput,
    /// Visitor was judged ineligible; denial message shown, form still active.
    DeniedShown,
    /// Visitor was judged eligible; the gate is hidden. Terminal.
    Hidden,
}

impl GateState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GateState::Hidden)
    }
}

impl std::fmt::Display for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateState::AwaitingInput => write!(f, "awaiting_input"),
            GateState::DeniedShown => write!(f, "denied_shown"),
            GateState::Hidden => write!(f, "hidden"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_choice_never_unknown() {
        assert_eq!(
            PersistedChoice::new(true).decision(),
            EligibilityDecision::Eligible
        );
        assert_eq!(
            PersistedChoice::new(false).decision(),
            EligibilityDecision::Ineligible
        );
        assert!(PersistedChoice::new(false).remember());
    }

    #[test]
    fn gate_state_serializes_snake_case() {
        let json = serde_json::to_string(&GateState::DeniedShown).unwrap();
        assert_eq!(json, "\"denied_shown\"");
    }
}

//! Gate configuration.
//!
//! Immutable for the lifetime of one page load. Defaults match the stock page
//! markup (`#age-gate`, `#age-gate-form-holder`, `#age-gate div.footer`).

use serde::{Deserialize, Serialize};

use crate::error::GateError;

/// Name of the cookie holding a remembered decision.
pub const COOKIE_NAME: &str = "is_of_age";

/// Text placed in the gate's message area when a visitor is denied.
pub const DENIAL_MESSAGE: &str = "I AM NOT OF LEGAL DRINKING AGE";

/// Environment prefix read by [`GateConfig::load`].
pub const ENV_PREFIX: &str = "AGEGATE";

/// Largest accepted `oldest_plausible_age`; the year selector holds one option per year.
pub const MAX_OLDEST_PLAUSIBLE_AGE: u32 = 200;

/// Main gate configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Minimum age in whole years (default: 21)
    #[serde(default = "default_minimum_age")]
    pub minimum_age: u32,

    /// How far back the year selector reaches (default: 116)
    #[serde(default = "default_oldest_plausible_age")]
    pub oldest_plausible_age: u32,

    /// Host page anchors
    #[serde(default)]
    pub anchors: AnchorIds,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            minimum_age: default_minimum_age(),
            oldest_plausible_age: default_oldest_plausible_age(),
            anchors: AnchorIds::default(),
        }
    }
}

/// Identifiers of the pre-existing elements the gate attaches to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorIds {
    /// Gate container, hidden as a whole once the visitor is allowed in
    #[serde(default = "default_gate_id")]
    pub gate_id: String,

    /// Element the generated form is appended to
    #[serde(default = "default_form_holder_id")]
    pub form_holder_id: String,

    /// Selector (relative to the gate container) of the message area
    #[serde(default = "default_message_selector")]
    pub message_selector: String,

    /// Class added to the gate container to hide it
    #[serde(default = "default_hidden_class")]
    pub hidden_class: String,
}

impl Default for AnchorIds {
    fn default() -> Self {
        Self {
            gate_id: default_gate_id(),
            form_holder_id: default_form_holder_id(),
            message_selector: default_message_selector(),
            hidden_class: default_hidden_class(),
        }
    }
}

fn default_minimum_age() -> u32 {
    21
}

fn default_oldest_plausible_age() -> u32 {
    116
}

fn default_gate_id() -> String {
    "age-gate".to_string()
}

fn default_form_holder_id() -> String {
    "age-gate-form-holder".to_string()
}

fn default_message_selector() -> String {
    "div.footer".to_string()
}

fn default_hidden_class() -> String {
    "hide".to_string()
}

impl GateConfig {
    /// Default configuration with a different minimum age.
    pub fn with_minimum_age(minimum_age: u32) -> Self {
        Self {
            minimum_age,
            ..Default::default()
        }
    }

    /// Reject configurations that cannot be attached to a page.
    pub fn validate(&self) -> Result<(), GateError> {
        if self.oldest_plausible_age > MAX_OLDEST_PLAUSIBLE_AGE {
            return Err(GateError::InvalidConfig(format!(
                "oldest_plausible_age {} exceeds {}",
                self.oldest_plausible_age, MAX_OLDEST_PLAUSIBLE_AGE
            )));
        }

        let anchors = &self.anchors;
        for (field, value) in [
            ("anchors.gate_id", &anchors.gate_id),
            ("anchors.form_holder_id", &anchors.form_holder_id),
            ("anchors.message_selector", &anchors.message_selector),
            ("anchors.hidden_class", &anchors.hidden_class),
        ] {
            if value.trim().is_empty() {
                return Err(GateError::InvalidConfig(format!("{} must not be empty", field)));
            }
        }
        Ok(())
    }

    /// Load configuration: defaults, then an optional file, then `AGEGATE_*`
    /// environment variables (`__` separates nested keys).
    #[cfg(feature = "loader")]
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&GateConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

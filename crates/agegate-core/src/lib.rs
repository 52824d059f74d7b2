//! Age gate verification engine.
//!
//! Collects a birth month/year, decides whether the visitor meets a minimum
//! age, and optionally remembers the decision in the `is_of_age` cookie so the
//! question is not repeated on every visit. The check is advisory; nothing here
//! is a security boundary.
//!
//! ## Pieces
//!
//! - [`AgeGate`] — per-page-load state machine (awaiting input, denied, hidden)
//! - [`eligibility`] — the month-granular date rule
//! - [`form`] — the month/year/remember form description
//! - [`cookie`] — `document.cookie` codec
//! - [`GateView`] / [`ChoiceStore`] / [`Clock`] — host capabilities, with
//!   in-memory implementations in [`mocks`]

pub mod clock;
pub mod config;
pub mod cookie;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod form;
pub mod mocks;
pub mod traits;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AnchorIds, GateConfig, COOKIE_NAME, DENIAL_MESSAGE};
pub use eligibility::is_eligible;
pub use engine::AgeGate;
pub use error::{GateError, StoreError};
pub use form::{build_form, CheckboxSpec, FormSpec, SelectOption, SelectSpec, MONTH_NAMES};
pub use mocks::{MemoryCookieJar, MemoryView};
pub use traits::{ChoiceStore, GateView};
pub use types::{EligibilityDecision, FormSelection, GateState, PersistedChoice};

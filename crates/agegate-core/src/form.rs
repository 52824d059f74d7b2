//! Date-entry form description.
//!
//! The engine never touches markup directly: it builds a [`FormSpec`] and hands
//! it to a [`GateView`](crate::traits::GateView), which renders it and routes the
//! submit control back to [`AgeGate::submit`](crate::engine::AgeGate::submit).

use serde::{Deserialize, Serialize};

use crate::config::GateConfig;
use crate::types::FormSelection;

pub const FORM_ID: &str = "age-gate-form";
pub const REMEMBER_LABEL: &str = "Remember Me";
pub const SUBMIT_LABEL: &str = "Enter";

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One `<option>` of a selector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: i32,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectSpec {
    pub name: String,
    pub class_name: String,
    pub options: Vec<SelectOption>,
}

impl SelectSpec {
    /// Value of the top option, used when nothing is chosen.
    pub fn first_value(&self) -> Option<i32> {
        self.options.first().map(|o| o.value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxSpec {
    pub name: String,
    pub label: String,
    pub checked: bool,
}

/// Everything a view needs to render the form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSpec {
    pub form_id: String,
    pub month: SelectSpec,
    pub year: SelectSpec,
    pub remember: CheckboxSpec,
    pub submit_label: String,
}

/// Build the form for a page load in `current_year`.
///
/// Months run January..December with values 0..11. Years run from
/// `current_year` down to `current_year - oldest_plausible_age`, inclusive,
/// with value equal to label. Nothing is validated here.
pub fn build_form(config: &GateConfig, current_year: i32) -> FormSpec {
    let months = MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| SelectOption {
            value: i as i32,
            label: (*name).to_string(),
        })
        .collect();

    let span = i32::try_from(config.oldest_plausible_age).unwrap_or(i32::MAX);
    let oldest_year = current_year.saturating_sub(span);
    let years = (oldest_year..=current_year)
        .rev()
        .map(|y| SelectOption {
            value: y,
            label: y.to_string(),
        })
        .collect();

    FormSpec {
        form_id: FORM_ID.to_string(),
        month: SelectSpec {
            name: "month".to_string(),
            class_name: "month".to_string(),
            options: months,
        },
        year: SelectSpec {
            name: "year".to_string(),
            class_name: "year".to_string(),
            options: years,
        },
        remember: CheckboxSpec {
            name: "remember".to_string(),
            label: REMEMBER_LABEL.to_string(),
            checked: false,
        },
        submit_label: SUBMIT_LABEL.to_string(),
    }
}

impl FormSpec {
    /// Selection a visitor gets by never touching either selector.
    pub fn default_selection(&self) -> FormSelection {
        FormSelection::new(
            self.month.first_value().unwrap_or(0),
            self.year.first_value().unwrap_or(0),
        )
    }

    /// Turn raw selector values into a selection.
    ///
    /// Missing, empty or unparsable values fall back to the selector's first
    /// option, so a submission is never rejected. Parsed values are not
    /// checked against the offered options.
    pub fn selection_from_values(
        &self,
        month_raw: Option<&str>,
        year_raw: Option<&str>,
    ) -> FormSelection {
        let fallback = self.default_selection();
        FormSelection::new(
            parse_or(month_raw, fallback.month),
            parse_or(year_raw, fallback.year),
        )
    }
}

fn parse_or(raw: Option<&str>, fallback: i32) -> i32 {
    raw.and_then(|v| v.trim().parse::<i32>().ok())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_in_calendar_order() {
        let form = build_form(&GateConfig::default(), 2024);
        assert_eq!(form.month.options.len(), 12);
        for (i, option) in form.month.options.iter().enumerate() {
            assert_eq!(option.value, i as i32);
            assert_eq!(option.label, MONTH_NAMES[i]);
        }
        assert_eq!(form.month.options[0].label, "January");
        assert_eq!(form.month.options[11].label, "December");
    }

    #[test]
    fn years_descend_from_current() {
        let form = build_form(&GateConfig::default(), 2024);
        let years = &form.year.options;
        assert_eq!(years.len(), 117);
        assert_eq!(years[0].value, 2024);
        assert_eq!(years[116].value, 1908);
        assert!(years.windows(2).all(|w| w[0].value == w[1].value + 1));
        assert!(years.iter().all(|o| o.label == o.value.to_string()));
    }

    #[test]
    fn zero_span_gives_single_year() {
        let config = GateConfig {
            oldest_plausible_age: 0,
            ..Default::default()
        };
        let form = build_form(&config, 2024);
        assert_eq!(form.year.options.len(), 1);
    }

    #[test]
    fn remember_unchecked_by_default() {
        let form = build_form(&GateConfig::default(), 2024);
        assert!(!form.remember.checked);
        assert_eq!(form.remember.label, "Remember Me");
        assert_eq!(form.submit_label, "Enter");
        assert_eq!(form.form_id, "age-gate-form");
    }

    #[test]
    fn unchosen_selectors_fall_back_to_top_option() {
        let form = build_form(&GateConfig::default(), 2024);
        assert_eq!(form.default_selection(), FormSelection::new(0, 2024));
        assert_eq!(
            form.selection_from_values(None, Some("")),
            FormSelection::new(0, 2024)
        );
        assert_eq!(
            form.selection_from_values(Some("abc"), Some("1990")),
            FormSelection::new(0, 1990)
        );
    }

    #[test]
    fn parsed_values_are_not_clamped() {
        let form = build_form(&GateConfig::default(), 2024);
        assert_eq!(
            form.selection_from_values(Some(" 14 "), Some("-5")),
            FormSelection::new(14, -5)
        );
    }
}

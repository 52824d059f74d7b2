//! Date-based eligibility rule.
//!
//! The "legal date" is the first day of `month` in year `year + minimum_age`.
//! A visitor is eligible when that date is on or before today. Day of birth is
//! never collected, so anyone turning the minimum age during the current month
//! counts as eligible from the first of that month.

use chrono::{Datelike, NaiveDate};

use crate::config::GateConfig;

/// Year and zero-based month of the legal date, with month overflow carried
/// into the year (month 12 is January of the next year, month -1 is December
/// of the previous one).
///
/// Computed in `i64` so that no `i32` input can overflow.
pub fn legal_year_month(minimum_age: u32, month: i32, year: i32) -> (i64, i64) {
    let total = (i64::from(year) + i64::from(minimum_age)) * 12 + i64::from(month);
    (total.div_euclid(12), total.rem_euclid(12))
}

/// Whether a visitor born in `month`/`year` has reached `config.minimum_age`
/// as of `today`.
///
/// Total over all integer inputs: out-of-range values give a deterministic
/// answer instead of an error.
pub fn is_eligible(config: &GateConfig, month: i32, year: i32, today: NaiveDate) -> bool {
    let (legal_year, legal_month) = legal_year_month(config.minimum_age, month, year);
    let current = (i64::from(today.year()), i64::from(today.month0()));

    // The legal date is the 1st, which never falls after any day of the same month.
    (legal_year, legal_month) <= current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june_15_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn same_month_counts_from_the_first() {
        let config = GateConfig::default();
        assert!(is_eligible(&config, 5, 2003, june_15_2024()));
    }

    #[test]
    fn next_month_is_too_late() {
        let config = GateConfig::default();
        assert!(!is_eligible(&config, 6, 2003, june_15_2024()));
    }

    #[test]
    fn first_of_month_is_inclusive() {
        let config = GateConfig::default();
        let first = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(is_eligible(&config, 5, 2003, first));

        let last_of_may = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        assert!(!is_eligible(&config, 5, 2003, last_of_may));
    }

    #[test]
    fn zero_minimum_age_admits_anyone_already_born() {
        let config = GateConfig::with_minimum_age(0);
        assert!(is_eligible(&config, 5, 2024, june_15_2024()));
        assert!(!is_eligible(&config, 6, 2024, june_15_2024()));
    }

    #[test]
    fn month_overflow_rolls_into_year() {
        assert_eq!(legal_year_month(21, 12, 2002), (2024, 0));
        assert_eq!(legal_year_month(21, -1, 2003), (2023, 11));
        assert_eq!(legal_year_month(0, 25, 2000), (2002, 1));
    }

    #[test]
    fn extreme_inputs_do_not_panic() {
        let config = GateConfig::with_minimum_age(u32::MAX);
        let today = june_15_2024();
        assert!(!is_eligible(&config, i32::MAX, i32::MAX, today));
        assert!(is_eligible(&GateConfig::default(), i32::MIN, i32::MIN, today));
    }
}

use chrono::{Local, NaiveDate};

/// Source of "today" for eligibility checks.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host (the browser's date on wasm).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Pinned date, for tests and for replaying a visit on a given day.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// Returns `None` when the date does not exist.
    pub fn ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

use analytics::calendar::{days_in_month, month_name, week_days};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CalendarMode {
    #[default]
    Month,
    Week,
}

/// Which month (or week) the calendar shows.
///
/// `prev` and `next` always move by one calendar month. The day of month is
/// clamped, so Jan 31 steps to Feb 29 in a leap year rather than spilling
/// into March.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    mode: CalendarMode,
    reference: NaiveDate,
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mode: CalendarMode::Month,
            reference: today,
        }
    }

    pub fn mode(&self) -> CalendarMode { self.mode }

    pub fn reference(&self) -> NaiveDate { self.reference }

    pub fn set_mode(&mut self, mode: CalendarMode) { self.mode = mode; }

    pub fn prev(&mut self) {
        if let Some(date) = self.reference.checked_sub_months(Months::new(1)) {
            self.reference = date;
        }
    }

    pub fn next(&mut self) {
        if let Some(date) = self.reference.checked_add_months(Months::new(1)) {
            self.reference = date;
        }
    }

    /// Jumps back to `today`, keeping the mode.
    pub fn today(&mut self, today: NaiveDate) { self.reference = today; }

    pub fn year(&self) -> i32 { self.reference.year() }

    pub fn month(&self) -> u32 { self.reference.month() }

    /// Heading such as "March 2024".
    pub fn title(&self) -> String {
        let name = month_name(self.month()).unwrap_or_default();
        format!("{name} {}", self.year())
    }

    pub fn month_grid(&self) -> Vec<Option<u32>> {
        days_in_month(self.year(), self.month())
    }

    pub fn week(&self) -> [NaiveDate; 7] { week_days(self.reference) }
}

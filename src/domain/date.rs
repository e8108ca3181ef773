use chrono::{Local, NaiveDate};

use crate::app::{JournalError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a calendar date as the zero-padded `YYYY-MM-DD` entry key.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| JournalError::InvalidInput(format!("Invalid date '{}', expected YYYY-MM-DD", s)))
}

/// Source of "today". Entry keys are always local calendar dates.
pub trait Clock {
    fn today(&self) -> NaiveDate;

    fn today_key(&self) -> String {
        format_date(self.today())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

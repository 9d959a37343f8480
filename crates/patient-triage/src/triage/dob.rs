use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::Serialize;

/// Day-month-year with zero-padded day and month, e.g. `01-01-2024`.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[1-9]|[12][0-9]|3[01])-(0[1-9]|1[0-2])-[0-9]{4}$")
        .expect("date pattern compiles")
});

const DATE_FORMAT: &str = "%d-%m-%Y";
const MAX_PLAUSIBLE_AGE: i32 = 130;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("'{value}' is not a valid dd-mm-yyyy date")]
    Format { value: String },
    #[error("age {age} is outside the plausible range 1..=130")]
    Range { age: i32 },
}

/// Whole years of age, always in `1..=130`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Age(u8);

impl Age {
    pub fn new(years: i32) -> Result<Self, DateError> {
        if years <= 0 || years > MAX_PLAUSIBLE_AGE {
            return Err(DateError::Range { age: years });
        }
        // Bounded above by 130, so the cast is lossless.
        Ok(Self(years as u8))
    }

    pub const fn years(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a `dd-mm-yyyy` date, rejecting both malformed text and
/// impossible calendar dates such as `31-02-2020`.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateError> {
    if !DATE_PATTERN.is_match(text) {
        return Err(DateError::Format {
            value: text.to_string(),
        });
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| DateError::Format {
        value: text.to_string(),
    })
}

/// Age in completed years on `today`.
pub fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate) -> Result<Age, DateError> {
    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    Age::new(years)
}

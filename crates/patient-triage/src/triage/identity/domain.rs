use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::triage::dob::Age;

static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{9}$").expect("identifier pattern compiles"));

/// Nine-digit patient number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Returns `None` unless `raw` is exactly nine ASCII digits.
    pub fn parse(raw: &str) -> Option<Self> {
        IDENTIFIER_PATTERN
            .is_match(raw)
            .then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity fields exactly as the caller typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityInput {
    pub identifier: String,
    pub surname: String,
    pub date_of_birth: String,
}

impl IdentityInput {
    pub fn new(
        identifier: impl Into<String>,
        surname: impl Into<String>,
        date_of_birth: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            surname: surname.into(),
            date_of_birth: date_of_birth.into(),
        }
    }

    /// Labels of the fields left blank, in prompt order.
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("identifier", &self.identifier),
            ("surname", &self.surname),
            ("date of birth", &self.date_of_birth),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(label, _)| label)
        .collect()
    }
}

/// Patient record as served by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// `"Last,First"`.
    pub name: String,
    pub born: String,
}

impl PatientRecord {
    /// The family-name half of `name`; `None` unless there is exactly one comma.
    pub fn surname(&self) -> Option<&str> {
        let mut parts = self.name.split(',');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(last), Some(_first), None) => Some(last),
            _ => None,
        }
    }
}

/// Which corroborating field disagreed with the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    DateOfBirth,
    Surname,
}

impl MismatchKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::DateOfBirth => "date of birth",
            Self::Surname => "surname",
        }
    }
}

/// A caller whose identity has been corroborated and who is old enough to
/// use the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedPatient {
    pub identifier: Identifier,
    pub date_of_birth: NaiveDate,
    pub age: Age,
}

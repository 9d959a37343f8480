use chrono::NaiveDate;
use tracing::debug;

use super::domain::{Identifier, IdentityInput, MismatchKind, VerifiedPatient};
use super::lookup::{IdentityLookup, LookupError};
use crate::triage::dob::{self, DateError};

/// Youngest age allowed to use the questionnaire.
pub const DEFAULT_MINIMUM_AGE: u8 = 16;

/// Gatekeeper that corroborates caller-supplied identity with the record
/// held by the identity service.
pub struct IdentityValidator<L> {
    lookup: L,
    minimum_age: u8,
}

impl<L: IdentityLookup> IdentityValidator<L> {
    pub fn new(lookup: L) -> Self {
        Self::with_minimum_age(lookup, DEFAULT_MINIMUM_AGE)
    }

    pub fn with_minimum_age(lookup: L, minimum_age: u8) -> Self {
        Self {
            lookup,
            minimum_age,
        }
    }

    /// Runs every identity check in order and stops at the first failure.
    pub fn validate(
        &self,
        input: &IdentityInput,
        today: NaiveDate,
    ) -> Result<VerifiedPatient, IdentityError> {
        let blank = input.blank_fields();
        if !blank.is_empty() {
            return Err(IdentityError::MissingFields { fields: blank });
        }

        let identifier = Identifier::parse(&input.identifier).ok_or_else(|| {
            IdentityError::InvalidIdentifier {
                value: input.identifier.clone(),
            }
        })?;

        let supplied_dob =
            dob::parse_date(&input.date_of_birth).map_err(IdentityError::InvalidDateOfBirth)?;

        let record = self.lookup.lookup(&identifier).map_err(|err| match err {
            LookupError::MalformedRecord { reason } => IdentityError::RecordParse {
                identifier: identifier.to_string(),
                reason,
            },
            other => IdentityError::Lookup(other),
        })?;
        debug!(%identifier, "found patient record");

        let recorded_surname = record.surname().ok_or_else(|| IdentityError::RecordParse {
            identifier: identifier.to_string(),
            reason: format!("name '{}' is not in 'Last,First' form", record.name),
        })?;
        let recorded_dob =
            dob::parse_date(&record.born).map_err(|err| IdentityError::RecordParse {
                identifier: identifier.to_string(),
                reason: err.to_string(),
            })?;

        if supplied_dob != recorded_dob {
            return Err(IdentityError::Mismatch {
                identifier: identifier.to_string(),
                kind: MismatchKind::DateOfBirth,
            });
        }

        if input.surname != recorded_surname {
            return Err(IdentityError::Mismatch {
                identifier: identifier.to_string(),
                kind: MismatchKind::Surname,
            });
        }

        let age = dob::age_in_years(recorded_dob, today).map_err(IdentityError::Age)?;
        if age.years() < self.minimum_age {
            return Err(IdentityError::Ineligible {
                age: age.years(),
                minimum: self.minimum_age,
            });
        }

        Ok(VerifiedPatient {
            identifier,
            date_of_birth: recorded_dob,
            age,
        })
    }
}

/// Why a caller could not be verified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("missing required field(s): {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },
    #[error("identifier '{value}' must be exactly 9 digits")]
    InvalidIdentifier { value: String },
    #[error("date of birth rejected: {0}")]
    InvalidDateOfBirth(#[source] DateError),
    #[error("identity lookup failed: {0}")]
    Lookup(#[source] LookupError),
    #[error("could not parse record for {identifier}: {reason}")]
    RecordParse { identifier: String, reason: String },
    #[error("{} does not match the record for {identifier}", .kind.label())]
    Mismatch {
        identifier: String,
        kind: MismatchKind,
    },
    #[error("implausible age: {0}")]
    Age(#[source] DateError),
    #[error("patient aged {age} is under the minimum age of {minimum}")]
    Ineligible { age: u8, minimum: u8 },
}

impl IdentityError {
    pub fn user_message(&self) -> &'static str {
        match self {
            IdentityError::MissingFields { .. } => {
                "Please enter your NHS number, surname and date of birth."
            }
            IdentityError::InvalidIdentifier { .. } => "Your NHS number must be 9 digits.",
            IdentityError::InvalidDateOfBirth(_) => {
                "Please enter your date of birth as dd-mm-yyyy."
            }
            IdentityError::Lookup(LookupError::NotFound { .. })
            | IdentityError::Mismatch { .. } => "Your details could not be found!",
            IdentityError::Ineligible { .. } => "You are not eligible for this service.",
            IdentityError::Lookup(_) | IdentityError::RecordParse { .. } | IdentityError::Age(_) => {
                "An error occurred while checking your details, please try again later."
            }
        }
    }
}

use std::cell::Cell;
use std::collections::HashMap;
use std::io;

use chrono::NaiveDate;

use crate::triage::dob::Age;
use crate::triage::identity::{
    Identifier, IdentityInput, IdentityLookup, IdentityValidator, LookupError, PatientRecord,
};
use crate::triage::questionnaire::{Question, QuestionnaireConfig};
use crate::triage::scoring::AnswerSource;

pub(super) const IDENTIFIER: &str = "123456789";

/// In-memory identity service that counts how often it is consulted.
#[derive(Default)]
pub(super) struct StubLookup {
    records: HashMap<String, Result<PatientRecord, LookupError>>,
    calls: Cell<usize>,
}

impl StubLookup {
    pub(super) fn with_record(identifier: &str, name: &str, born: &str) -> Self {
        Self::default().respond(
            identifier,
            Ok(PatientRecord {
                name: name.to_string(),
                born: born.to_string(),
            }),
        )
    }

    pub(super) fn respond(
        mut self,
        identifier: &str,
        response: Result<PatientRecord, LookupError>,
    ) -> Self {
        self.records.insert(identifier.to_string(), response);
        self
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl IdentityLookup for StubLookup {
    fn lookup(&self, identifier: &Identifier) -> Result<PatientRecord, LookupError> {
        self.calls.set(self.calls.get() + 1);
        self.records
            .get(identifier.as_str())
            .cloned()
            .unwrap_or_else(|| {
                Err(LookupError::NotFound {
                    identifier: identifier.to_string(),
                })
            })
    }
}

/// Answer source that records which questions were asked.
pub(super) struct RecordingAnswers {
    pub(super) answer: &'static str,
    pub(super) asked: Vec<String>,
}

impl RecordingAnswers {
    pub(super) fn always(answer: &'static str) -> Self {
        Self {
            answer,
            asked: Vec::new(),
        }
    }
}

impl AnswerSource for RecordingAnswers {
    fn next_answer(&mut self, key: &str, _question: &Question) -> io::Result<String> {
        self.asked.push(key.to_string());
        Ok(self.answer.to_string())
    }
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

pub(super) fn age(years: i32) -> Age {
    Age::new(years).expect("valid age")
}

pub(super) fn smith_lookup() -> StubLookup {
    StubLookup::with_record(IDENTIFIER, "Smith,John", "01-01-1980")
}

pub(super) fn smith_input() -> IdentityInput {
    IdentityInput::new(IDENTIFIER, "Smith", "01-01-1980")
}

pub(super) fn validator(lookup: &StubLookup) -> IdentityValidator<&StubLookup> {
    IdentityValidator::new(lookup)
}

pub(super) fn smoking_config() -> QuestionnaireConfig {
    config(
        r#"
        [questions.smoke]
        text = "Do you smoke?"
        points = { Yes = 3, No = 0 }

        [scoring.AGE]
        "16-39" = { smoke = 1 }
        "40-65" = { smoke = 3 }
        "65+" = { smoke = 4 }
        "#,
    )
}

/// Three questions whose weights differ per bracket.
pub(super) fn lifestyle_config() -> QuestionnaireConfig {
    config(
        r#"
        [questions.smoke]
        text = "Do you smoke?"
        points = { Yes = 1, No = 0 }

        [questions.drink]
        text = "Do you drink more than 14 units a week?"
        points = { Yes = 1, No = 0 }

        [questions.exercise]
        text = "Do you exercise twice a week?"
        points = { Yes = 0, No = 1 }

        [scoring.AGE]
        "15-40" = { smoke = 1, drink = 2, exercise = 1 }
        "39-65" = { smoke = 2, drink = 2, exercise = 3 }
        "64+" = { smoke = 3, drink = 3, exercise = 2 }
        "#,
    )
}

pub(super) fn config(raw: &str) -> QuestionnaireConfig {
    QuestionnaireConfig::from_toml_str(raw).expect("test config parses")
}

//! Identity-gated triage questionnaire: date handling, identity checks,
//! question configuration, scoring and the final recommendation.

pub mod decision;
pub mod dob;
pub mod identity;
pub mod prompt;
pub mod questionnaire;
pub mod scoring;
pub mod session;

#[cfg(test)]
mod tests;

pub use decision::{Decision, DecisionRule};
pub use dob::{age_in_years, parse_date, Age, DateError};
pub use identity::{
    HttpIdentityLookup, IdentityError, IdentityInput, IdentityLookup, IdentityValidator,
    Identifier, LookupError, MismatchKind, PatientRecord, VerifiedPatient,
};
pub use prompt::Prompter;
pub use questionnaire::{
    AgeBracket, AgeBracketTable, AnswerPoints, BracketRange, Question, QuestionnaireConfig,
    QuestionnaireError,
};
pub use scoring::{
    Answer, AnswerSource, CannedAnswers, KeyedAnswers, ScoreCard, ScoreComponent, ScoringEngine,
    ScoringError,
};
pub use session::{TriageError, TriageOutcome, TriageSession};

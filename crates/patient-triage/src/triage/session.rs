use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info};

use super::decision::{Decision, DecisionRule};
use super::dob::Age;
use super::identity::{
    Identifier, IdentityError, IdentityInput, IdentityLookup, IdentityValidator,
};
use super::questionnaire::QuestionnaireConfig;
use super::scoring::{AnswerSource, ScoreCard, ScoringEngine, ScoringError};

/// One respondent's pass through identity checks, questions, and decision.
pub struct TriageSession<'a, L> {
    validator: IdentityValidator<L>,
    engine: ScoringEngine<'a>,
    rule: DecisionRule,
}

impl<'a, L: IdentityLookup> TriageSession<'a, L> {
    pub fn new(
        validator: IdentityValidator<L>,
        questionnaire: &'a QuestionnaireConfig,
        rule: DecisionRule,
    ) -> Self {
        Self {
            validator,
            engine: ScoringEngine::new(questionnaire),
            rule,
        }
    }

    /// Verifies the caller before any question is asked, then scores and
    /// decides. Failures are logged here, once, and returned.
    pub fn run<S>(
        &self,
        input: &IdentityInput,
        today: NaiveDate,
        answers: &mut S,
    ) -> Result<TriageOutcome, TriageError>
    where
        S: AnswerSource + ?Sized,
    {
        let outcome = self.run_inner(input, today, answers);
        match &outcome {
            Ok(outcome) => info!(
                identifier = %outcome.identifier,
                age = %outcome.age,
                score = outcome.score.total,
                decision = ?outcome.decision,
                "triage complete"
            ),
            Err(err) => error!(
                identifier = %input.identifier,
                error = %err,
                "triage run aborted"
            ),
        }
        outcome
    }

    fn run_inner<S>(
        &self,
        input: &IdentityInput,
        today: NaiveDate,
        answers: &mut S,
    ) -> Result<TriageOutcome, TriageError>
    where
        S: AnswerSource + ?Sized,
    {
        let patient = self.validator.validate(input, today)?;
        let score = self.engine.score(patient.age, answers)?;
        let decision = self.rule.decide(score.total);

        Ok(TriageOutcome {
            identifier: patient.identifier,
            age: patient.age,
            score,
            decision,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriageOutcome {
    pub identifier: Identifier,
    pub age: Age,
    pub score: ScoreCard,
    pub decision: Decision,
}

impl TriageOutcome {
    pub fn message(&self) -> &'static str {
        self.decision.message()
    }
}

/// Terminal failure of a triage run.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

impl TriageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            TriageError::Identity(err) => err.user_message(),
            TriageError::Scoring(err) => err.user_message(),
        }
    }
}

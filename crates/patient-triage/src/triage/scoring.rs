use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::io;

use serde::Serialize;
use tracing::debug;

use super::dob::Age;
use super::questionnaire::{Question, QuestionnaireConfig};

/// Normalized yes/no response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Case-insensitive parse of a raw response. Surrounding whitespace is
    /// significant; the prompt layer strips line endings.
    pub fn parse(raw: &str) -> Result<Self, AnswerError> {
        if raw.is_empty() {
            return Err(AnswerError::Empty);
        }
        match raw.to_lowercase().as_str() {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            _ => Err(AnswerError::Invalid),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerError {
    Empty,
    Invalid,
}

/// Supplies one raw response per question, in the order asked.
pub trait AnswerSource {
    fn next_answer(&mut self, key: &str, question: &Question) -> io::Result<String>;
}

/// Pre-collected responses consumed front to back.
#[derive(Debug, Clone, Default)]
pub struct CannedAnswers {
    answers: VecDeque<String>,
}

impl CannedAnswers {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl AnswerSource for CannedAnswers {
    fn next_answer(&mut self, key: &str, _question: &Question) -> io::Result<String> {
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no answer left for question '{key}'"),
            )
        })
    }
}

/// Responses looked up by question key, independent of question order.
#[derive(Debug, Clone, Default)]
pub struct KeyedAnswers {
    answers: HashMap<String, String>,
}

impl KeyedAnswers {
    pub fn new<I, K, V>(answers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            answers: answers
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl AnswerSource for KeyedAnswers {
    fn next_answer(&mut self, key: &str, _question: &Question) -> io::Result<String> {
        self.answers.get(key).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no answer recorded for question '{key}'"),
            )
        })
    }
}

/// One question's contribution to the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub question: String,
    pub answer: Answer,
    /// Label of the bracket the weight came from; `None` when the answer
    /// carried no points.
    pub bracket: Option<String>,
    pub points: u32,
}

/// Final score with the per-question trail that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreCard {
    pub total: u32,
    pub components: Vec<ScoreComponent>,
}

impl ScoreCard {
    fn with(mut self, component: ScoreComponent) -> Result<Self, ScoringError> {
        self.total = self
            .total
            .checked_add(component.points)
            .ok_or_else(|| ScoringError::ScoreOverflow {
                question: component.question.clone(),
            })?;
        self.components.push(component);
        Ok(self)
    }
}

/// Stateless scorer over a borrowed question configuration.
pub struct ScoringEngine<'a> {
    config: &'a QuestionnaireConfig,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(config: &'a QuestionnaireConfig) -> Self {
        Self { config }
    }

    /// Asks every question in configuration order and folds the weights
    /// into a score card. The first failure aborts the run.
    pub fn score<S>(&self, age: Age, answers: &mut S) -> Result<ScoreCard, ScoringError>
    where
        S: AnswerSource + ?Sized,
    {
        self.config
            .questions()
            .try_fold(ScoreCard::default(), |card, (key, question)| {
                let raw = answers
                    .next_answer(key, question)
                    .map_err(|source| ScoringError::AnswerSource {
                        question: key.to_string(),
                        source,
                    })?;
                let answer = Answer::parse(&raw).map_err(|err| match err {
                    AnswerError::Empty => ScoringError::EmptyAnswer {
                        question: key.to_string(),
                    },
                    AnswerError::Invalid => ScoringError::InvalidAnswer {
                        question: key.to_string(),
                        value: raw.clone(),
                    },
                })?;

                let component = self.component(key, question, answer, age)?;
                let card = card.with(component)?;
                debug!(question = key, total = card.total, "score updated");
                Ok(card)
            })
    }

    /// Resolves the contribution of a single answer.
    pub fn component(
        &self,
        key: &str,
        question: &Question,
        answer: Answer,
        age: Age,
    ) -> Result<ScoreComponent, ScoringError> {
        if question.points.for_answer(answer) == 0 {
            debug!(question = key, %answer, "no points for answer, skipping");
            return Ok(ScoreComponent {
                question: key.to_string(),
                answer,
                bracket: None,
                points: 0,
            });
        }

        let bracket = self
            .config
            .brackets()
            .resolve(age)
            .ok_or(ScoringError::NoBracketMatch { age: age.years() })?;
        let points = bracket
            .weight(key)
            .ok_or_else(|| ScoringError::MissingWeight {
                bracket: bracket.label.clone(),
                question: key.to_string(),
            })?;

        Ok(ScoreComponent {
            question: key.to_string(),
            answer,
            bracket: Some(bracket.label.clone()),
            points,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("could not read an answer to '{question}': {source}")]
    AnswerSource {
        question: String,
        #[source]
        source: io::Error,
    },
    #[error("no answer given to '{question}'")]
    EmptyAnswer { question: String },
    #[error("answer '{value}' to '{question}' must be yes or no")]
    InvalidAnswer { question: String, value: String },
    #[error("age {age} does not fall in any configured age bracket")]
    NoBracketMatch { age: u8 },
    #[error("age bracket '{bracket}' has no weight for question '{question}'")]
    MissingWeight { bracket: String, question: String },
    #[error("score overflowed while adding the weight for '{question}'")]
    ScoreOverflow { question: String },
}

impl ScoringError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ScoringError::EmptyAnswer { .. } => "You have to enter text!",
            ScoringError::InvalidAnswer { .. } => "Expected either 'Yes' or 'No'!",
            ScoringError::AnswerSource { .. }
            | ScoringError::NoBracketMatch { .. }
            | ScoringError::MissingWeight { .. }
            | ScoringError::ScoreOverflow { .. } => {
                "An error occurred while scoring your answers, please phone the practice."
            }
        }
    }
}

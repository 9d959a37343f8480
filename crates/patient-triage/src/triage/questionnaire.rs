use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::dob::Age;
use super::scoring::Answer;

/// Question set plus the age-bracketed weight table, loaded once per run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionnaireConfig {
    questions: IndexMap<String, Question>,
    scoring: ScoringTables,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct ScoringTables {
    #[serde(rename = "AGE")]
    age: AgeBracketTable,
}

impl QuestionnaireConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, QuestionnaireError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| QuestionnaireError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, &path.display().to_string())
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, QuestionnaireError> {
        Self::parse(raw, "inline document")
    }

    fn parse(raw: &str, origin: &str) -> Result<Self, QuestionnaireError> {
        toml::from_str(raw).map_err(|source| QuestionnaireError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Questions in document order.
    pub fn questions(&self) -> impl Iterator<Item = (&str, &Question)> + '_ {
        self.questions
            .iter()
            .map(|(key, question)| (key.as_str(), question))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn brackets(&self) -> &AgeBracketTable {
        &self.scoring.age
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub points: AnswerPoints,
}

/// Gate values per answer; zero means the answer never adds to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPoints {
    #[serde(rename = "Yes")]
    pub yes: u32,
    #[serde(rename = "No")]
    pub no: u32,
}

impl AnswerPoints {
    pub const fn for_answer(self, answer: Answer) -> u32 {
        match answer {
            Answer::Yes => self.yes,
            Answer::No => self.no,
        }
    }
}

/// Ordered bracket table; the first bracket containing an age wins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "IndexMap<String, IndexMap<String, u32>>")]
pub struct AgeBracketTable {
    brackets: Vec<AgeBracket>,
}

impl AgeBracketTable {
    pub fn resolve(&self, age: Age) -> Option<&AgeBracket> {
        self.brackets.iter().find(|bracket| bracket.range.contains(age))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgeBracket> + '_ {
        self.brackets.iter()
    }
}

impl TryFrom<IndexMap<String, IndexMap<String, u32>>> for AgeBracketTable {
    type Error = InvalidBracketLabel;

    fn try_from(table: IndexMap<String, IndexMap<String, u32>>) -> Result<Self, Self::Error> {
        let brackets = table
            .into_iter()
            .map(|(label, weights)| {
                let range = BracketRange::parse(&label)?;
                Ok(AgeBracket {
                    label,
                    range,
                    weights,
                })
            })
            .collect::<Result<Vec<_>, InvalidBracketLabel>>()?;
        Ok(Self { brackets })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeBracket {
    pub label: String,
    pub range: BracketRange,
    weights: IndexMap<String, u32>,
}

impl AgeBracket {
    pub fn weight(&self, question_key: &str) -> Option<u32> {
        self.weights.get(question_key).copied()
    }
}

/// Age predicate behind a bracket label. Both forms compare strictly:
/// `"65+"` is `age > 65` and `"16-39"` is `16 < age < 39`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketRange {
    Above(u32),
    Between { lower: u32, upper: u32 },
}

impl BracketRange {
    pub fn parse(label: &str) -> Result<Self, InvalidBracketLabel> {
        let invalid = || InvalidBracketLabel {
            label: label.to_string(),
        };
        let bound = |raw: &str| {
            let raw = raw.trim();
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            raw.parse::<u32>().map_err(|_| invalid())
        };

        let parts: Vec<&str> = label.split('-').collect();
        match parts.as_slice() {
            [open] => {
                let open = open.trim();
                bound(open.strip_suffix('+').unwrap_or(open)).map(Self::Above)
            }
            [lower, upper] if upper.trim().is_empty() => bound(*lower).map(Self::Above),
            [lower, upper] => Ok(Self::Between {
                lower: bound(*lower)?,
                upper: bound(*upper)?,
            }),
            _ => Err(invalid()),
        }
    }

    pub fn contains(self, age: Age) -> bool {
        let age = u32::from(age.years());
        match self {
            Self::Above(lower) => age > lower,
            Self::Between { lower, upper } => age > lower && age < upper,
        }
    }
}

impl fmt::Display for BracketRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Above(lower) => write!(f, "over {lower}"),
            Self::Between { lower, upper } => write!(f, "over {lower} and under {upper}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("age bracket label '{label}' must look like 'lo-hi' or 'N+'")]
pub struct InvalidBracketLabel {
    pub label: String,
}

#[derive(Debug, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("failed to read question configuration {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid question configuration in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
}

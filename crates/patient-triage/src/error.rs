use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::triage::questionnaire::QuestionnaireError;
use crate::triage::session::TriageError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Questionnaire(QuestionnaireError),
    HttpClient(reqwest::Error),
    Triage(TriageError),
}

impl AppError {
    /// Text safe to show the respondent; internal failures stay generic.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Triage(err) => err.user_message().to_string(),
            other => format!("An error occurred! {other}"),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Questionnaire(err) => write!(f, "question configuration error: {}", err),
            AppError::HttpClient(err) => write!(f, "identity client error: {}", err),
            AppError::Triage(err) => write!(f, "triage error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Questionnaire(err) => Some(err),
            AppError::HttpClient(err) => Some(err),
            AppError::Triage(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<QuestionnaireError> for AppError {
    fn from(value: QuestionnaireError) -> Self {
        Self::Questionnaire(value)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(value: reqwest::Error) -> Self {
        Self::HttpClient(value)
    }
}

impl From<TriageError> for AppError {
    fn from(value: TriageError) -> Self {
        Self::Triage(value)
    }
}

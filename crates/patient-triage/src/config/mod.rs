use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::triage::decision::DEFAULT_DECISION_THRESHOLD;
use crate::triage::identity::DEFAULT_MINIMUM_AGE;

const DEFAULT_IDENTITY_URL: &str = "https://al-tech-test-apim.azure-api.net/tech-test/t2/patients";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for a triage run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub identity: IdentityServiceConfig,
    pub questionnaire: QuestionnaireSource,
    pub policy: TriagePolicy,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url =
            env::var("APP_IDENTITY_URL").unwrap_or_else(|_| DEFAULT_IDENTITY_URL.to_string());
        let api_key = non_empty_var("APP_IDENTITY_API_KEY");
        let path = non_empty_var("APP_QUESTION_CONFIG").map(PathBuf::from);

        let minimum_age = parse_var("APP_MIN_AGE", DEFAULT_MINIMUM_AGE)?;
        let decision_threshold = parse_var("APP_DECISION_THRESHOLD", DEFAULT_DECISION_THRESHOLD)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            identity: IdentityServiceConfig { base_url, api_key },
            questionnaire: QuestionnaireSource { path },
            policy: TriagePolicy {
                minimum_age,
                decision_threshold,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Location and credentials of the remote patient-record service.
#[derive(Debug, Clone)]
pub struct IdentityServiceConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl IdentityServiceConfig {
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::MissingVar("APP_IDENTITY_API_KEY"))
    }
}

/// Where the question configuration document lives.
#[derive(Debug, Clone)]
pub struct QuestionnaireSource {
    pub path: Option<PathBuf>,
}

impl QuestionnaireSource {
    /// Prefers an explicit override (e.g. a CLI flag) over the environment.
    pub fn resolve(&self, override_path: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        override_path
            .or_else(|| self.path.clone())
            .ok_or(ConfigError::MissingVar("APP_QUESTION_CONFIG"))
    }
}

/// Fixed eligibility and decision constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriagePolicy {
    pub minimum_age: u8,
    pub decision_threshold: u32,
}

impl Default for TriagePolicy {
    fn default() -> Self {
        Self {
            minimum_age: DEFAULT_MINIMUM_AGE,
            decision_threshold: DEFAULT_DECISION_THRESHOLD,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidNumber { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVar(name) => write!(f, "{name} must be set"),
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be a non-negative integer, found '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

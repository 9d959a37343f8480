use chrono::{Local, NaiveDate};
use clap::Args;
use patient_triage::config::AppConfig;
use patient_triage::error::AppError;
use patient_triage::telemetry;
use patient_triage::triage::{
    DecisionRule, HttpIdentityLookup, IdentityValidator, Prompter, QuestionnaireConfig,
    TriageOutcome, TriageSession,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct StartArgs {
    /// Question configuration file (overrides APP_QUESTION_CONFIG)
    #[arg(long)]
    pub(crate) questions: Option<PathBuf>,
    /// Evaluation date for age calculation (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the outcome as JSON instead of the patient-facing message
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn run_start(args: StartArgs) -> Result<(), AppError> {
    let StartArgs {
        questions,
        today,
        json,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let questionnaire_path = config.questionnaire.resolve(questions)?;
    let questionnaire = QuestionnaireConfig::from_path(&questionnaire_path)?;
    info!(
        path = %questionnaire_path.display(),
        questions = questionnaire.len(),
        "question configuration loaded"
    );

    let lookup = HttpIdentityLookup::new(
        config.identity.base_url.as_str(),
        config.identity.api_key()?,
    )?;
    let session = TriageSession::new(
        IdentityValidator::with_minimum_age(lookup, config.policy.minimum_age),
        &questionnaire,
        DecisionRule::new(config.policy.decision_threshold),
    );

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let identity = prompter.identity_input()?;
    let outcome = session.run(&identity, today, &mut prompter)?;

    render_outcome(&outcome, json)
}

fn render_outcome(outcome: &TriageOutcome, json: bool) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    if json {
        let body = serde_json::to_string_pretty(outcome)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        writeln!(stdout, "{body}")?;
    } else {
        writeln!(stdout, "{}", outcome.message())?;
    }
    Ok(())
}

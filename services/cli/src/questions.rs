use clap::Args;
use patient_triage::config::AppConfig;
use patient_triage::error::AppError;
use patient_triage::triage::QuestionnaireConfig;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct QuestionsArgs {
    /// Question configuration file (overrides APP_QUESTION_CONFIG)
    #[arg(long)]
    pub(crate) questions: Option<PathBuf>,
}

pub(crate) fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let path = config.questionnaire.resolve(args.questions)?;
    let questionnaire = QuestionnaireConfig::from_path(&path)?;

    print!("{}", render_questionnaire(&questionnaire));
    Ok(())
}

fn render_questionnaire(questionnaire: &QuestionnaireConfig) -> String {
    let mut out = String::from("Questions\n");
    for (key, question) in questionnaire.questions() {
        out.push_str(&format!(
            "- {key}: {} (Yes {}, No {})\n",
            question.text, question.points.yes, question.points.no
        ));
    }

    out.push_str("\nAge brackets (first match wins)\n");
    for bracket in questionnaire.brackets().iter() {
        let weights: Vec<String> = questionnaire
            .questions()
            .map(|(key, _)| match bracket.weight(key) {
                Some(weight) => format!("{key}={weight}"),
                None => format!("{key}=missing"),
            })
            .collect();
        out.push_str(&format!(
            "- {} [{}]: {}\n",
            bracket.label,
            bracket.range,
            weights.join(", ")
        ));
    }
    out
}

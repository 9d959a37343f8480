use crate::questions::{run_questions, QuestionsArgs};
use crate::start::{run_start, StartArgs};
use clap::{Parser, Subcommand};
use patient_triage::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Patient Triage",
    about = "Verify a patient's identity and run the self-triage questionnaire",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an interactive triage session (default command)
    Start(StartArgs),
    /// Print the configured questions and age brackets
    Questions(QuestionsArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Start(StartArgs::default()));

    match command {
        Command::Start(args) => run_start(args),
        Command::Questions(args) => run_questions(args),
    }
}

mod cli;
mod questions;
mod start;

use patient_triage::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}

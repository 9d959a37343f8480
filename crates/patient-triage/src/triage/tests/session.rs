use std::io::Cursor;

use super::common::*;
use crate::triage::decision::{Decision, DecisionRule};
use crate::triage::identity::{IdentityError, IdentityInput};
use crate::triage::prompt::Prompter;
use crate::triage::scoring::{CannedAnswers, ScoringError};
use crate::triage::session::{TriageError, TriageSession};

#[test]
fn smoker_at_forty_four_is_deferred() {
    let lookup = smith_lookup();
    let config = smoking_config();
    let session = TriageSession::new(validator(&lookup), &config, DecisionRule::default());

    let outcome = session
        .run(&smith_input(), today(), &mut CannedAnswers::new(["yes"]))
        .expect("triage completes");

    assert_eq!(outcome.age.years(), 44);
    assert_eq!(outcome.score.total, 3);
    assert_eq!(outcome.decision, Decision::Defer);
    assert!(outcome.message().contains("we don't need to see you"));
}

#[test]
fn high_scores_are_referred() {
    let lookup = StubLookup::with_record(IDENTIFIER, "Smith,John", "01-01-1950");
    let config = lifestyle_config();
    let session = TriageSession::new(validator(&lookup), &config, DecisionRule::default());
    let input = IdentityInput::new(IDENTIFIER, "Smith", "01-01-1950");

    let outcome = session
        .run(&input, today(), &mut CannedAnswers::new(["yes", "yes", "no"]))
        .expect("triage completes");

    assert_eq!(outcome.score.total, 3 + 3 + 2);
    assert_eq!(outcome.decision, Decision::Refer);
    assert!(outcome.message().contains("book an appointment"));
}

#[test]
fn failed_identity_asks_no_questions() {
    let lookup = smith_lookup();
    let config = lifestyle_config();
    let session = TriageSession::new(validator(&lookup), &config, DecisionRule::default());
    let mut answers = RecordingAnswers::always("yes");
    let input = IdentityInput::new(IDENTIFIER, "Smyth", "01-01-1980");

    let err = session
        .run(&input, today(), &mut answers)
        .expect_err("surname differs");

    assert!(matches!(
        err,
        TriageError::Identity(IdentityError::Mismatch { .. })
    ));
    assert!(answers.asked.is_empty());
    assert_eq!(err.user_message(), "Your details could not be found!");
}

#[test]
fn scoring_failure_yields_no_decision() {
    let lookup = smith_lookup();
    let config = smoking_config();
    let session = TriageSession::new(validator(&lookup), &config, DecisionRule::default());

    let err = session
        .run(&smith_input(), today(), &mut CannedAnswers::new(["maybe"]))
        .expect_err("invalid answer");

    assert!(matches!(
        err,
        TriageError::Scoring(ScoringError::InvalidAnswer { .. })
    ));
    assert_eq!(err.user_message(), "Expected either 'Yes' or 'No'!");
}

#[test]
fn interactive_prompter_drives_a_full_run() {
    let lookup = smith_lookup();
    let config = lifestyle_config();
    let session = TriageSession::new(validator(&lookup), &config, DecisionRule::new(2));
    let script = "123456789\nSmith\n01-01-1980\nYes\nno\nNO\n";
    let mut prompter = Prompter::new(Cursor::new(script), Vec::new());

    let input = prompter.identity_input().expect("identity read");
    let outcome = session
        .run(&input, today(), &mut prompter)
        .expect("triage completes");

    // 44 falls in "39-65": smoke 2, exercise 3.
    assert_eq!(outcome.score.total, 5);
    assert_eq!(outcome.decision, Decision::Refer);

    let (_, output) = prompter.into_inner();
    let transcript = String::from_utf8(output).expect("utf-8 output");
    assert!(transcript.contains("Do you smoke?"));
    assert!(transcript.contains("Do you exercise twice a week?"));
}

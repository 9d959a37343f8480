use serde::Serialize;

/// Scores above this recommend an appointment.
pub const DEFAULT_DECISION_THRESHOLD: u32 = 3;

/// Outcome of a completed questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Self-care; no appointment needed.
    Defer,
    /// Book an appointment.
    Refer,
}

impl Decision {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Defer => "Thank you for answering our questions, we don't need to see you at this time. Keep up the good work!",
            Self::Refer => "We think there are some simple things you could do to improve your quality of life, please phone to book an appointment.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionRule {
    threshold: u32,
}

impl DecisionRule {
    pub const fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub const fn decide(self, score: u32) -> Decision {
        if score <= self.threshold {
            Decision::Defer
        } else {
            Decision::Refer
        }
    }
}

impl Default for DecisionRule {
    fn default() -> Self {
        Self::new(DEFAULT_DECISION_THRESHOLD)
    }
}

//! Patient self-triage.
//!
//! Verifies a caller against a remote patient-record service, then scores a
//! yes/no questionnaire with age-bracketed weights and turns the total into a
//! self-care or book-an-appointment recommendation.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod triage;

//! Caller identity verification against the remote patient-record service.

mod domain;
mod http;
mod lookup;
mod validator;

pub use domain::{Identifier, IdentityInput, MismatchKind, PatientRecord, VerifiedPatient};
pub use http::{HttpIdentityLookup, SUBSCRIPTION_KEY_HEADER};
pub use lookup::{IdentityLookup, LookupError};
pub use validator::{IdentityError, IdentityValidator, DEFAULT_MINIMUM_AGE};

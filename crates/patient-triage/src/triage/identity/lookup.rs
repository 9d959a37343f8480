use super::domain::{Identifier, PatientRecord};

/// Capability to fetch the patient record for an identifier.
pub trait IdentityLookup {
    fn lookup(&self, identifier: &Identifier) -> Result<PatientRecord, LookupError>;
}

impl<T: IdentityLookup + ?Sized> IdentityLookup for &T {
    fn lookup(&self, identifier: &Identifier) -> Result<PatientRecord, LookupError> {
        (**self).lookup(identifier)
    }
}

/// Failure reported by an [`IdentityLookup`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no patient record for {identifier}")]
    NotFound { identifier: String },
    #[error("identity service answered {status}: {body}")]
    Service { status: u16, body: String },
    #[error("identity service unreachable: {reason}")]
    Transport { reason: String },
    #[error("identity service returned an unreadable record: {reason}")]
    MalformedRecord { reason: String },
}

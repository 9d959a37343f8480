use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

use super::domain::{Identifier, PatientRecord};
use super::lookup::{IdentityLookup, LookupError};

pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Blocking client for `GET {base_url}/{identifier}`.
#[derive(Debug, Clone)]
pub struct HttpIdentityLookup {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpIdentityLookup {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("patient-triage/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn record_url(&self, identifier: &Identifier) -> String {
        format!("{}/{}", self.base_url, identifier)
    }
}

impl IdentityLookup for HttpIdentityLookup {
    fn lookup(&self, identifier: &Identifier) -> Result<PatientRecord, LookupError> {
        let url = self.record_url(identifier);
        debug!(%url, "requesting patient record");

        let response = self
            .client
            .get(&url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .send()
            .map_err(|err| LookupError::Transport {
                reason: err.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound {
                identifier: identifier.to_string(),
            });
        }

        let body = response.text().map_err(|err| LookupError::Transport {
            reason: err.to_string(),
        })?;

        if status != StatusCode::OK {
            return Err(LookupError::Service {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|err| LookupError::MalformedRecord {
            reason: err.to_string(),
        })
    }
}

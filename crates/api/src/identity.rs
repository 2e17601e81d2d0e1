//! OPass-backed [`IdentityProvider`].

use async_trait::async_trait;
use quest_core::identity::{ExternalIdentity, IdentityError, IdentityProvider};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StatusResponse {
    user_id: String,
}

/// Resolves attendee tokens against `{base_url}/status?token=...`.
#[derive(Debug, Clone)]
pub struct OpassIdentityProvider {
    client: reqwest::Client,
    base_url: String,
}

impl OpassIdentityProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for OpassIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<ExternalIdentity, IdentityError> {
        let response = self
            .client
            .get(format!("{}/status", self.base_url))
            .query(&[("token", token)])
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(IdentityError::Unavailable(format!("status {status}")));
        }
        if !status.is_success() {
            return Err(IdentityError::InvalidToken);
        }

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;
        if body.user_id.trim().is_empty() {
            return Err(IdentityError::InvalidToken);
        }

        Ok(ExternalIdentity {
            user_id: body.user_id,
        })
    }
}

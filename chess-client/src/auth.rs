//! Auth service client
//!
//! The auth service is an external collaborator. This client only checks
//! that the stored token still identifies a logged-in user; it never
//! creates or refreshes sessions.

use std::time::Duration;

use anyhow::Context;
use tracing::debug;

use crate::error::{Result, SyncError};

/// Request timeout for auth checks
const AUTH_TIMEOUT_SECS: u64 = 5;

/// Verifies bearer tokens against the auth service
pub struct AuthClient {
    base_url: String,
    client: reqwest::Client,
}

impl AuthClient {
    /// Create a client for the given auth base URL
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(AUTH_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Check that the token is accepted by the auth service
    ///
    /// An empty token short-circuits without a request. An unreachable auth
    /// service counts as not logged in, not as a coordinator outage.
    pub async fn verify(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(SyncError::AuthRequired);
        }

        let url = format!("{}/auth/me", self.base_url);
        let response = match self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!("Auth service unreachable: {}", e);
                return Err(SyncError::AuthRequired);
            }
        };

        if response.status().is_success() {
            Ok(())
        } else {
            debug!("Auth check rejected: {}", response.status());
            Err(SyncError::AuthRequired)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_token_short_circuits() {
        // The base URL is never contacted for an empty token
        let auth = AuthClient::new("http://127.0.0.1:1/api").unwrap();
        let result = auth.verify("").await;
        assert!(matches!(result, Err(SyncError::AuthRequired)));
    }

    #[tokio::test]
    async fn test_unreachable_auth_counts_as_logged_out() {
        let auth = AuthClient::new("http://127.0.0.1:1/api").unwrap();
        let result = auth.verify("token").await;
        assert!(matches!(result, Err(SyncError::AuthRequired)));
    }
}

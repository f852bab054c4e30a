//! Auth endpoint client.
//!
//! Login and signup exchange credentials for a bearer token; the token is
//! persisted under its stable key and the user's identity is decoded
//! client-side from the token claims. Remote logout is best-effort: the
//! session store resets local state whether or not the backend heard us.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use taskdeck_core::error::{Result, TaskdeckError};
use taskdeck_core::prefs::PreferenceStore;
use taskdeck_core::session::{AuthGateway, UserIdentity};

use crate::config::ApiConfig;
use crate::http::{network_error, operation_error};
use crate::token::identity_from_token;

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client for the login/signup/logout endpoints.
pub struct AuthApi {
    client: Client,
    config: ApiConfig,
    prefs: Arc<dyn PreferenceStore>,
}

impl AuthApi {
    /// Creates a new client.
    pub fn new(config: ApiConfig, prefs: Arc<dyn PreferenceStore>) -> Self {
        Self {
            client: Client::new(),
            config,
            prefs,
        }
    }

    /// Exchanges credentials for a session.
    ///
    /// On success the token is persisted and the decoded identity is
    /// returned for the session store to adopt.
    ///
    /// # Errors
    ///
    /// - `Validation` for empty email or password (no request dispatched)
    /// - `Network` for transport failures
    /// - `Operation` when the backend rejects the credentials; the backend
    ///   message ("Incorrect email or password") is carried for inline
    ///   display
    pub async fn login(&self, email: &str, password: &str) -> Result<UserIdentity> {
        self.exchange_credentials("/login", email, password).await
    }

    /// Registers a new account; the backend signs the user in immediately
    /// with the same token shape as login.
    pub async fn signup(&self, email: &str, password: &str) -> Result<UserIdentity> {
        self.exchange_credentials("/signup", email, password).await
    }

    async fn exchange_credentials(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity> {
        if email.trim().is_empty() {
            return Err(TaskdeckError::validation("Email cannot be empty"));
        }
        if password.is_empty() {
            return Err(TaskdeckError::validation("Password cannot be empty"));
        }

        let response = self
            .client
            .post(self.config.url(path))
            .json(&CredentialsRequest { email, password })
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|e| network_error("Auth request failed", e))?;

        if !response.status().is_success() {
            return Err(operation_error(response).await);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| network_error("Failed to parse token response", e))?;

        self.prefs.set_access_token(&token.access_token)?;
        Ok(identity_from_token(&token.access_token, email))
    }
}

#[async_trait]
impl AuthGateway for AuthApi {
    /// Asks the backend to invalidate the session.
    ///
    /// Failures are logged and swallowed: token removal on the client is
    /// what actually signs the user out.
    async fn logout(&self) -> Result<()> {
        let mut request = self
            .client
            .post(self.config.url("/logout"))
            .timeout(self.config.request_timeout);

        if let Some(token) = self.prefs.access_token() {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) if !response.status().is_success() => {
                tracing::warn!("Remote logout rejected (status: {})", response.status());
            }
            Err(e) => {
                tracing::warn!("Remote logout failed: {}", e);
            }
            Ok(_) => {}
        }

        Ok(())
    }
}

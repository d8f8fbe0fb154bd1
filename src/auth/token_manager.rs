// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Token refresh against the OAuth token endpoint.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::auth::credential::{Credential, SharedCredential};
use crate::auth::token_store::{PersistedTokens, TokenStore};
use crate::error::{ConfigError, Error, RefreshError, TransportError};

/// Exchanges a refresh token for a new access token.
///
/// Owns its own HTTP client: the token endpoint lives on a different host
/// than the device API and tolerates a longer timeout. Concurrent refresh
/// attempts are not coalesced; the library assumes at most one in-flight
/// request per credential.
#[derive(Debug)]
pub struct TokenManager {
    client: Client,
    auth_url: String,
    credential: SharedCredential,
    store: Option<Arc<dyn TokenStore>>,
}

/// Successful token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

impl TokenManager {
    /// Creates a token manager for the given endpoint and shared credential.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(
        auth_url: impl Into<String>,
        refresh_timeout: Duration,
        credential: SharedCredential,
        store: Option<Arc<dyn TokenStore>>,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(refresh_timeout)
            .build()
            .map_err(TransportError::Http)?;

        Ok(Self {
            client,
            auth_url: auth_url.into().trim_end_matches('/').to_string(),
            credential,
            store,
        })
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// On success the shared credential is updated in place (access token,
    /// and refresh token when the endpoint rotated it) and the new pair is
    /// handed to the injected [`TokenStore`], best-effort. A failed refresh
    /// is surfaced and never retried here.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRefreshToken`] for a static credential,
    /// [`RefreshError::Rejected`] when the endpoint answers non-200, and
    /// [`RefreshError::MissingAccessToken`] when a 200 body lacks a token.
    pub async fn refresh(&self) -> Result<(), Error> {
        let (refresh_token, client_id, client_secret) = {
            match &*self.credential.read() {
                Credential::Static { .. } => {
                    return Err(ConfigError::MissingRefreshToken.into());
                }
                Credential::Refreshable {
                    refresh_token,
                    client_id,
                    client_secret,
                    ..
                } => (
                    refresh_token.clone(),
                    client_id.clone(),
                    client_secret.clone(),
                ),
            }
        };

        tracing::debug!(url = %self.auth_url, "refreshing access token");

        let response = self
            .client
            .post(format!("{}/oauth/token", self.auth_url))
            .basic_auth(&client_id, Some(&client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(TransportError::Http)?;

        let code = response.status().as_u16();
        let body = response.text().await.map_err(TransportError::Http)?;

        if code != 200 {
            tracing::warn!(code, "token endpoint rejected refresh");
            return Err(RefreshError::Rejected { code, body }.into());
        }

        let tokens: TokenResponse =
            serde_json::from_str(&body).map_err(|_| RefreshError::MissingAccessToken)?;
        let Some(access_token) = tokens.access_token else {
            return Err(RefreshError::MissingAccessToken.into());
        };

        let persisted = {
            let mut credential = self.credential.write();
            credential.apply_refresh(access_token, tokens.refresh_token);
            PersistedTokens {
                access_token: credential.bearer().to_string(),
                refresh_token: credential.refresh_token().unwrap_or_default().to_string(),
                refreshed_at: Utc::now(),
            }
        };

        tracing::debug!("access token refreshed");

        if let Some(store) = &self.store {
            if let Err(err) = store.save(&persisted) {
                tracing::warn!(error = %err, "failed to persist refreshed tokens");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_for(credential: Credential) -> TokenManager {
        TokenManager::new(
            "https://auth.invalid",
            Duration::from_secs(10),
            credential.into_shared(),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn refresh_requires_refresh_token() {
        let manager = manager_for(
            Credential::personal("6f2a79d7-4e08-47a1-8e1b-9c2d53f01a44").unwrap(),
        );
        let err = manager.refresh().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingRefreshToken)
        ));
    }

    #[test]
    fn auth_url_trailing_slash_is_trimmed() {
        let manager = TokenManager::new(
            "https://auth.example.com/",
            Duration::from_secs(10),
            Credential::oauth("a", "r", "i", "s").unwrap().into_shared(),
            None,
        )
        .unwrap();
        assert_eq!(manager.auth_url, "https://auth.example.com");
    }
}

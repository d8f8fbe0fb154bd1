// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authenticated HTTP transport for the SmartThings API.
//!
//! The transport applies the fixed header set (bearer credential, content
//! type, versioned accept header), wraps command bodies into the platform's
//! command envelope, and reports every response as a `(status, body)` pair
//! without erroring on non-2xx codes -- callers branch on the numeric
//! status. A 401 against a refreshable credential triggers one token
//! refresh and one retry of the identical request; if the refresh fails,
//! the original 401 is returned so the caller sees the primary failure.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, header, redirect};
use serde::Serialize;
use serde_json::Value;

pub use reqwest::Method;

use crate::auth::{SharedCredential, TokenManager, TokenStore};
use crate::error::{Error, TransportError};

/// Production device API host.
pub const DEFAULT_API_URL: &str = "https://api.smartthings.com";

/// Production OAuth token endpoint host.
pub const DEFAULT_AUTH_URL: &str = "https://auth-global.api.smartthings.com";

/// Versioned media type the platform expects in the `Accept` header.
pub const ACCEPT_HEADER: &str = "application/vnd.smartthings+json;v=20170916";

// ============================================================================
// ApiConfig
// ============================================================================

/// Connection parameters for the transport.
///
/// Defaults target the production hosts; the URL setters exist for tests
/// and region overrides. Timeouts are short by design to bound tail latency
/// against the remote service.
///
/// # Examples
///
/// ```
/// use smartthings_lib::transport::ApiConfig;
/// use std::time::Duration;
///
/// let config = ApiConfig::new()
///     .with_api_url("https://api.smartthings.com")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    api_url: String,
    auth_url: String,
    timeout: Duration,
    refresh_timeout: Duration,
}

impl ApiConfig {
    /// Default request timeout for device API calls.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
    /// Default timeout for the token refresh call.
    pub const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration targeting the production hosts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            refresh_timeout: Self::DEFAULT_REFRESH_TIMEOUT,
        }
    }

    /// Sets the device API base URL.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Sets the OAuth token endpoint base URL.
    #[must_use]
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Sets the device API request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the token refresh timeout.
    #[must_use]
    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    /// Returns the device API base URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the token endpoint base URL.
    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Returns the device API request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the token refresh timeout.
    #[must_use]
    pub fn refresh_timeout(&self) -> Duration {
        self.refresh_timeout
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// ApiResponse
// ============================================================================

/// Decoded result of one API call.
///
/// Non-2xx responses are values, not errors: the numeric status is always
/// present so callers can branch. An undecodable body is reported as
/// `Value::Null`.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub code: u16,
    /// Decoded JSON body, `Null` when the body was empty or not JSON.
    pub body: Value,
}

impl ApiResponse {
    /// Returns whether the call completed with HTTP 200.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == 200
    }

    /// Returns whether a command response reports the command as accepted.
    ///
    /// Success means HTTP 200 *and* the first entry of `results` carrying
    /// status `"ACCEPTED"`. Anything else -- other statuses, missing
    /// results, non-200 codes -- is a logical failure.
    #[must_use]
    pub fn command_accepted(&self) -> bool {
        self.code == 200 && self.body["results"][0]["status"] == "ACCEPTED"
    }

    /// Decodes the body into a typed structure.
    ///
    /// # Errors
    ///
    /// Returns error if the body does not match the target shape.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.body.clone())
    }
}

// ============================================================================
// CommandRequest
// ============================================================================

/// A capability command before envelope wrapping.
///
/// # Examples
///
/// ```
/// use smartthings_lib::transport::CommandRequest;
///
/// let cmd = CommandRequest::new("audioVolume", "setVolume").with_arguments(vec![25.into()]);
/// assert_eq!(cmd.capability(), "audioVolume");
/// ```
#[derive(Debug, Clone)]
pub struct CommandRequest {
    capability: String,
    command: String,
    arguments: Vec<Value>,
}

impl CommandRequest {
    /// Creates a command with no arguments.
    #[must_use]
    pub fn new(capability: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
            command: command.into(),
            arguments: Vec::new(),
        }
    }

    /// Sets the command arguments.
    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<Value>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Returns the capability id.
    #[must_use]
    pub fn capability(&self) -> &str {
        &self.capability
    }

    /// Returns the command name.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    fn envelope(&self) -> CommandEnvelope<'_> {
        CommandEnvelope {
            commands: [EnvelopeEntry {
                component: "main",
                capability: &self.capability,
                command: &self.command,
                arguments: &self.arguments,
            }],
        }
    }
}

/// The platform's command envelope. Only the `main` component is targeted.
#[derive(Debug, Serialize)]
struct CommandEnvelope<'a> {
    commands: [EnvelopeEntry<'a>; 1],
}

#[derive(Debug, Serialize)]
struct EnvelopeEntry<'a> {
    component: &'static str,
    capability: &'a str,
    command: &'a str,
    arguments: &'a [Value],
}

// ============================================================================
// Transport
// ============================================================================

/// Issues authenticated calls against the device API.
///
/// Holds the shared credential and a [`TokenManager`]; on a 401 with a
/// refreshable credential it refreshes once and retries the identical
/// request once.
#[derive(Debug)]
pub struct Transport {
    client: Client,
    api_url: String,
    credential: SharedCredential,
    tokens: TokenManager,
}

impl Transport {
    /// Creates a transport from a configuration and a shared credential.
    ///
    /// # Errors
    ///
    /// Returns error if an HTTP client cannot be created.
    pub fn new(
        config: &ApiConfig,
        credential: SharedCredential,
        store: Option<Arc<dyn TokenStore>>,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .redirect(redirect_policy())
            .build()
            .map_err(TransportError::Http)?;

        let tokens = TokenManager::new(
            config.auth_url(),
            config.refresh_timeout(),
            Arc::clone(&credential),
            store,
        )?;

        Ok(Self {
            client,
            api_url: config.api_url().trim_end_matches('/').to_string(),
            credential,
            tokens,
        })
    }

    /// Returns a handle to the shared credential.
    #[must_use]
    pub fn credential(&self) -> &SharedCredential {
        &self.credential
    }

    /// Forces a token refresh, outside of the automatic 401 handling.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`TokenManager::refresh`].
    pub async fn refresh_tokens(&self) -> Result<(), Error> {
        self.tokens.refresh().await
    }

    /// Issues one authenticated call.
    ///
    /// `command` bodies are wrapped into the platform's command envelope.
    /// Non-2xx statuses are returned as values. On a 401 with a refreshable
    /// credential the token is refreshed and the request re-issued exactly
    /// once; a failed refresh is logged and the original 401 returned.
    ///
    /// # Errors
    ///
    /// Returns error only when the HTTP request itself fails (connection,
    /// timeout), never for a platform-level status code.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        command: Option<&CommandRequest>,
    ) -> Result<ApiResponse, TransportError> {
        let response = self.execute(method.clone(), path, command).await?;

        if response.code == 401 && self.credential.read().can_refresh() {
            match self.tokens.refresh().await {
                Ok(()) => return self.execute(method, path, command).await,
                Err(err) => {
                    tracing::warn!(error = %err, "token refresh failed; keeping original response");
                }
            }
        }

        Ok(response)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        command: Option<&CommandRequest>,
    ) -> Result<ApiResponse, TransportError> {
        let url = format!("{}/{}", self.api_url, path.trim_start_matches('/'));
        let bearer = self.credential.read().bearer().to_string();

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(bearer)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, ACCEPT_HEADER);

        if let Some(command) = command {
            request = request.json(&command.envelope());
        }

        tracing::debug!(url = %url, "sending API request");

        let response = request.send().await.map_err(TransportError::Http)?;
        let code = response.status().as_u16();
        let text = response.text().await.map_err(TransportError::Http)?;
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        tracing::debug!(code, "received API response");

        Ok(ApiResponse { code, body })
    }
}

/// Allows at most two redirects, HTTPS targets only.
fn redirect_policy() -> redirect::Policy {
    redirect::Policy::custom(|attempt| {
        if attempt.previous().len() > 2 || attempt.url().scheme() != "https" {
            attempt.stop()
        } else {
            attempt.follow()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_defaults() {
        let config = ApiConfig::new();
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.auth_url(), DEFAULT_AUTH_URL);
        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert_eq!(config.refresh_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn config_overrides() {
        let config = ApiConfig::new()
            .with_api_url("http://127.0.0.1:9000")
            .with_auth_url("http://127.0.0.1:9001")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.api_url(), "http://127.0.0.1:9000");
        assert_eq!(config.auth_url(), "http://127.0.0.1:9001");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn command_envelope_shape() {
        let cmd = CommandRequest::new("switch", "on");
        let body = serde_json::to_value(cmd.envelope()).unwrap();
        assert_eq!(
            body,
            json!({
                "commands": [{
                    "component": "main",
                    "capability": "switch",
                    "command": "on",
                    "arguments": []
                }]
            })
        );
    }

    #[test]
    fn command_envelope_with_arguments() {
        let cmd = CommandRequest::new("audioVolume", "setVolume").with_arguments(vec![25.into()]);
        let body = serde_json::to_value(cmd.envelope()).unwrap();
        assert_eq!(body["commands"][0]["arguments"], json!([25]));
    }

    #[test]
    fn command_accepted_requires_200_and_accepted() {
        let accepted = ApiResponse {
            code: 200,
            body: json!({"results": [{"status": "ACCEPTED"}]}),
        };
        assert!(accepted.command_accepted());

        let rejected = ApiResponse {
            code: 200,
            body: json!({"results": [{"status": "FAILED"}]}),
        };
        assert!(!rejected.command_accepted());

        let wrong_code = ApiResponse {
            code: 409,
            body: json!({"results": [{"status": "ACCEPTED"}]}),
        };
        assert!(!wrong_code.command_accepted());

        let empty = ApiResponse {
            code: 200,
            body: Value::Null,
        };
        assert!(!empty.command_accepted());
    }
}

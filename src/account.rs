// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Account-level entry point.
//!
//! [`SmartThings`] owns one transport and the account-wide descriptor
//! cache. Construct it through [`SmartThings::builder`]; every device
//! handle it produces carries an explicit reference to the same transport,
//! so two accounts with different credentials coexist in one process.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Deserialize;

use crate::auth::{Credential, TokenStore};
use crate::classify::classify;
use crate::device::ClassifiedDevice;
use crate::error::{ConfigError, Error, Result};
use crate::location::Locations;
use crate::model::DeviceDescriptor;
use crate::transport::{ApiConfig, Method, Transport};

/// Device listing query: AND capability matching plus inline statuses to
/// seed each device's status cache.
const LISTING_QUERY: &str = "capabilitiesMode=and&includeStatus=true";

#[derive(Debug, Deserialize)]
struct DeviceListing {
    #[serde(default)]
    items: Vec<DeviceDescriptor>,
}

// ============================================================================
// SmartThings
// ============================================================================

/// An authenticated SmartThings account.
///
/// # Examples
///
/// ```no_run
/// use smartthings_lib::{DeviceControl, SmartThings};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let account = SmartThings::builder()
///     .personal_token("6f2a79d7-4e08-47a1-8e1b-9c2d53f01a44")
///     .build()?;
///
/// for device in account.devices(false).await? {
///     println!("{}: {:?}", device.device_id(), device.kind());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SmartThings {
    transport: Arc<Transport>,
    descriptors: Mutex<Option<Vec<DeviceDescriptor>>>,
}

impl SmartThings {
    /// Starts building an account handle.
    #[must_use]
    pub fn builder() -> SmartThingsBuilder {
        SmartThingsBuilder::new()
    }

    /// Returns the raw device descriptors, fetching from the platform when
    /// the cache is empty or `update` is requested.
    ///
    /// # Errors
    ///
    /// Returns error if the listing had to be fetched and the fetch failed
    /// or the platform answered non-200.
    pub async fn device_descriptors(&self, update: bool) -> Result<Vec<DeviceDescriptor>> {
        if !update {
            if let Some(cached) = self.descriptors.lock().clone() {
                return Ok(cached);
            }
        }

        let path = format!("devices?{LISTING_QUERY}");
        let response = self.transport.call(Method::GET, &path, None).await?;
        if !response.is_ok() {
            return Err(Error::from_status(response.code));
        }

        let listing: DeviceListing = response.decode()?;
        tracing::debug!(count = listing.items.len(), "listed account devices");
        *self.descriptors.lock() = Some(listing.items.clone());
        Ok(listing.items)
    }

    /// Lists the account's devices, classified into typed variants.
    ///
    /// The inline statuses from the listing seed each device's status
    /// cache, so classification normally costs no extra round trips.
    ///
    /// # Errors
    ///
    /// Returns error if the listing fetch failed; classification itself
    /// never errors.
    pub async fn devices(&self, update: bool) -> Result<Vec<ClassifiedDevice>> {
        let descriptors = self.device_descriptors(update).await?;
        let mut devices = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            devices.push(classify(Arc::clone(&self.transport), descriptor).await);
        }
        Ok(devices)
    }

    /// Fetches and classifies one device by id.
    ///
    /// # Errors
    ///
    /// Returns error if the device fetch failed or the platform answered
    /// non-200 (404 for an unknown id).
    pub async fn device_by_id(&self, device_id: &str) -> Result<ClassifiedDevice> {
        let path = format!(
            "devices/{}?{LISTING_QUERY}",
            urlencoding::encode(device_id)
        );
        let response = self.transport.call(Method::GET, &path, None).await?;
        if !response.is_ok() {
            return Err(Error::from_status(response.code));
        }

        let descriptor: DeviceDescriptor = response.decode()?;
        Ok(classify(Arc::clone(&self.transport), descriptor).await)
    }

    /// Returns a handle to one location's metadata and rooms.
    #[must_use]
    pub fn location(&self, location_id: impl Into<String>) -> Locations {
        Locations::new(Arc::clone(&self.transport), location_id.into())
    }

    /// Forces a token refresh, outside of the automatic 401 handling.
    ///
    /// # Errors
    ///
    /// Fails on a static credential or a rejected refresh.
    pub async fn refresh_tokens(&self) -> Result<()> {
        self.transport.refresh_tokens().await
    }

    /// Returns the bearer token currently in use.
    ///
    /// After a refresh this reflects the rotated token, which callers
    /// persisting tokens themselves (without a [`TokenStore`]) read back.
    #[must_use]
    pub fn access_token(&self) -> String {
        self.transport.credential().read().bearer().to_string()
    }
}

// ============================================================================
// SmartThingsBuilder
// ============================================================================

/// Builder for [`SmartThings`].
///
/// Exactly one credential mode must be configured: a personal access token,
/// or an OAuth token pair with client credentials.
#[derive(Debug, Default)]
pub struct SmartThingsBuilder {
    personal_token: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    store: Option<Arc<dyn TokenStore>>,
    config: ApiConfig,
}

impl SmartThingsBuilder {
    #[must_use]
    fn new() -> Self {
        Self {
            config: ApiConfig::new(),
            ..Self::default()
        }
    }

    /// Authenticates with a personal access token (a GUID).
    #[must_use]
    pub fn personal_token(mut self, token: impl Into<String>) -> Self {
        self.personal_token = Some(token.into());
        self
    }

    /// Authenticates with an OAuth access/refresh token pair.
    #[must_use]
    pub fn oauth_tokens(
        mut self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        self.access_token = Some(access_token.into());
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Sets the OAuth client credentials used during token refresh.
    #[must_use]
    pub fn client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Installs a sink that receives rotated tokens after each refresh.
    #[must_use]
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Overrides the device API base URL.
    #[must_use]
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_api_url(url);
        self
    }

    /// Overrides the OAuth token endpoint base URL.
    #[must_use]
    pub fn auth_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_auth_url(url);
        self
    }

    /// Overrides the device API request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Overrides the token refresh timeout.
    #[must_use]
    pub fn refresh_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_refresh_timeout(timeout);
        self
    }

    /// Validates the configuration and builds the account handle.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when no credential was configured, the
    /// personal token is not a GUID, or the OAuth configuration is missing
    /// the refresh token or client credentials.
    pub fn build(self) -> Result<SmartThings> {
        let credential = self.credential()?;
        let transport = Transport::new(&self.config, credential.into_shared(), self.store)?;
        Ok(SmartThings {
            transport: Arc::new(transport),
            descriptors: Mutex::new(None),
        })
    }

    fn credential(&self) -> Result<Credential> {
        if let Some(token) = &self.personal_token {
            return Ok(Credential::personal(token)?);
        }

        if let Some(access_token) = &self.access_token {
            let refresh_token = self
                .refresh_token
                .as_deref()
                .filter(|t| !t.is_empty())
                .ok_or(ConfigError::MissingRefreshToken)?;
            let (client_id, client_secret) = self
                .client_id
                .as_deref()
                .zip(self.client_secret.as_deref())
                .ok_or(ConfigError::MissingClientCredentials)?;
            return Ok(Credential::oauth(
                access_token,
                refresh_token,
                client_id,
                client_secret,
            )?);
        }

        Err(ConfigError::MissingCredential.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAT: &str = "6f2a79d7-4e08-47a1-8e1b-9c2d53f01a44";

    #[test]
    fn builds_with_personal_token() {
        assert!(SmartThings::builder().personal_token(PAT).build().is_ok());
    }

    #[test]
    fn rejects_missing_credential() {
        let err = SmartThings::builder().build().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingCredential)
        ));
    }

    #[test]
    fn rejects_invalid_personal_token() {
        let err = SmartThings::builder()
            .personal_token("not-a-guid")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidToken)));
    }

    #[test]
    fn rejects_oauth_without_client_credentials() {
        let err = SmartThings::builder()
            .oauth_tokens("access", "refresh")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingClientCredentials)
        ));
    }

    #[test]
    fn rejects_oauth_with_empty_refresh_token() {
        let err = SmartThings::builder()
            .oauth_tokens("access", "")
            .client_credentials("id", "secret")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingRefreshToken)
        ));
    }

    #[test]
    fn builds_with_full_oauth_configuration() {
        let account = SmartThings::builder()
            .oauth_tokens("access", "refresh")
            .client_credentials("id", "secret")
            .build()
            .unwrap();
        assert_eq!(account.access_token(), "access");
    }
}

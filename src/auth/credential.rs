// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bearer credentials for the SmartThings API.

use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::ConfigError;

/// A bearer credential, shared between the transport and the token manager.
///
/// Refreshing replaces the token fields in place, so every holder of the
/// same `SharedCredential` sees the new tokens immediately.
pub type SharedCredential = Arc<RwLock<Credential>>;

/// The bearer credential presented on every authenticated call.
///
/// # Examples
///
/// ```
/// use smartthings_lib::Credential;
///
/// // Personal access tokens are GUIDs and are validated up front.
/// let pat = Credential::personal("6f2a79d7-4e08-47a1-8e1b-9c2d53f01a44").unwrap();
/// assert!(!pat.can_refresh());
///
/// let oauth = Credential::oauth("access", "refresh", "client-id", "client-secret").unwrap();
/// assert!(oauth.can_refresh());
/// ```
#[derive(Debug, Clone)]
pub enum Credential {
    /// A long-lived personal access token. No refresh path.
    Static {
        /// The bearer token.
        token: String,
    },

    /// An OAuth access/refresh pair with the client credentials needed to
    /// exchange the refresh token at the token endpoint.
    Refreshable {
        /// The short-lived bearer token.
        access_token: String,
        /// The longer-lived secret exchanged for a new access token.
        refresh_token: String,
        /// OAuth client id, used as the Basic-auth user on refresh.
        client_id: String,
        /// OAuth client secret, used as the Basic-auth password on refresh.
        client_secret: String,
    },
}

impl Credential {
    /// Creates a static credential from a personal access token.
    ///
    /// The platform issues PATs as GUIDs; anything else is rejected early
    /// so a typo fails at construction instead of as a 401 later. Braces
    /// around the GUID are tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidToken`] if the token is not a GUID.
    pub fn personal(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        let trimmed = token.trim_start_matches('{').trim_end_matches('}');
        if Uuid::parse_str(trimmed).is_err() {
            return Err(ConfigError::InvalidToken);
        }
        Ok(Self::Static { token })
    }

    /// Creates a refreshable credential from an OAuth token pair and the
    /// client credentials for the refresh flow.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any required part is empty.
    pub fn oauth(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let access_token = access_token.into();
        let refresh_token = refresh_token.into();
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if access_token.is_empty() || refresh_token.is_empty() {
            return Err(ConfigError::MissingRefreshToken);
        }
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(ConfigError::MissingClientCredentials);
        }

        Ok(Self::Refreshable {
            access_token,
            refresh_token,
            client_id,
            client_secret,
        })
    }

    /// Wraps this credential for sharing between transport and token manager.
    #[must_use]
    pub fn into_shared(self) -> SharedCredential {
        Arc::new(RwLock::new(self))
    }

    /// Returns the token presented in the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> &str {
        match self {
            Self::Static { token } => token,
            Self::Refreshable { access_token, .. } => access_token,
        }
    }

    /// Returns whether an expired access token can be refreshed.
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        matches!(self, Self::Refreshable { .. })
    }

    /// Returns the refresh token, if this credential has one.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        match self {
            Self::Static { .. } => None,
            Self::Refreshable { refresh_token, .. } => Some(refresh_token),
        }
    }

    /// Replaces the access token (and the refresh token when the endpoint
    /// rotated it) after a successful refresh.
    ///
    /// No-op on a static credential.
    pub(crate) fn apply_refresh(&mut self, new_access: String, rotated_refresh: Option<String>) {
        if let Self::Refreshable {
            access_token,
            refresh_token,
            ..
        } = self
        {
            *access_token = new_access;
            if let Some(rotated) = rotated_refresh {
                *refresh_token = rotated;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAT: &str = "6f2a79d7-4e08-47a1-8e1b-9c2d53f01a44";

    #[test]
    fn personal_token_valid_guid() {
        let cred = Credential::personal(PAT).unwrap();
        assert_eq!(cred.bearer(), PAT);
        assert!(!cred.can_refresh());
        assert!(cred.refresh_token().is_none());
    }

    #[test]
    fn personal_token_braced_guid() {
        let braced = format!("{{{PAT}}}");
        assert!(Credential::personal(braced).is_ok());
    }

    #[test]
    fn personal_token_rejects_non_guid() {
        assert_eq!(
            Credential::personal("not-a-token").unwrap_err(),
            ConfigError::InvalidToken
        );
        assert_eq!(
            Credential::personal("").unwrap_err(),
            ConfigError::InvalidToken
        );
    }

    #[test]
    fn oauth_credential_is_refreshable() {
        let cred = Credential::oauth("acc", "ref", "id", "secret").unwrap();
        assert!(cred.can_refresh());
        assert_eq!(cred.bearer(), "acc");
        assert_eq!(cred.refresh_token(), Some("ref"));
    }

    #[test]
    fn oauth_credential_requires_all_parts() {
        assert_eq!(
            Credential::oauth("acc", "", "id", "secret").unwrap_err(),
            ConfigError::MissingRefreshToken
        );
        assert_eq!(
            Credential::oauth("acc", "ref", "", "secret").unwrap_err(),
            ConfigError::MissingClientCredentials
        );
    }

    #[test]
    fn apply_refresh_replaces_tokens_in_place() {
        let mut cred = Credential::oauth("old-access", "old-refresh", "id", "secret").unwrap();
        cred.apply_refresh("new-access".to_string(), Some("new-refresh".to_string()));
        assert_eq!(cred.bearer(), "new-access");
        assert_eq!(cred.refresh_token(), Some("new-refresh"));
    }

    #[test]
    fn apply_refresh_keeps_refresh_token_when_not_rotated() {
        let mut cred = Credential::oauth("old-access", "old-refresh", "id", "secret").unwrap();
        cred.apply_refresh("new-access".to_string(), None);
        assert_eq!(cred.refresh_token(), Some("old-refresh"));
    }

    #[test]
    fn shared_credential_refresh_is_visible_to_clones() {
        let shared = Credential::oauth("a", "r", "i", "s").unwrap().into_shared();
        let other = Arc::clone(&shared);
        shared.write().apply_refresh("b".to_string(), None);
        assert_eq!(other.read().bearer(), "b");
    }
}

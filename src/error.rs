// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the SmartThings library.
//!
//! This module provides the error hierarchy for failures across the library:
//! credential configuration, token refresh, HTTP transport, and response
//! decoding. Logical command failures (the platform answering but not
//! accepting a command) are deliberately *not* errors; commands return
//! `Ok(false)` instead so callers always check the outcome.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Credential or builder configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The platform rejected the bearer credential and no refresh path
    /// was available (or the refresh itself failed). Carries the HTTP
    /// status code of the original failing call.
    #[error("authorization expired: HTTP {code}")]
    AuthExpired {
        /// HTTP status code of the rejected call.
        code: u16,
    },

    /// The platform returned a non-2xx, non-401 response.
    #[error("platform error: HTTP {code} - {reason}")]
    Platform {
        /// HTTP status code returned by the platform.
        code: u16,
        /// Human-readable reason derived from [`reason_for_code`].
        reason: &'static str,
    },

    /// The token refresh endpoint rejected a refresh attempt.
    #[error("token refresh failed: {0}")]
    Refresh(#[from] RefreshError),

    /// The HTTP request itself failed (connection, timeout, invalid URL).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A platform response could not be decoded into the expected shape.
    #[error("unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Error {
    /// Maps an unexpected HTTP status to the matching error variant.
    ///
    /// 401 becomes [`Error::AuthExpired`]; everything else becomes
    /// [`Error::Platform`] with a reason from the static code table.
    #[must_use]
    pub fn from_status(code: u16) -> Self {
        if code == 401 {
            Self::AuthExpired { code }
        } else {
            Self::Platform {
                code,
                reason: reason_for_code(code),
            }
        }
    }
}

/// Errors related to credential and builder configuration.
///
/// These are fatal and surfaced immediately at construction time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A personal access token is not a valid GUID.
    #[error("invalid personal access token (expected a GUID)")]
    InvalidToken,

    /// OAuth mode requires both an access and a refresh token.
    #[error("no refresh token available")]
    MissingRefreshToken,

    /// OAuth mode requires client id and secret for the refresh flow.
    #[error("missing client credentials for token refresh")]
    MissingClientCredentials,

    /// The builder was given no credential at all.
    #[error("no credential configured")]
    MissingCredential,
}

/// Errors from the token refresh endpoint.
///
/// A failed refresh is surfaced to the caller, never retried automatically:
/// retrying indefinitely risks hammering the token endpoint.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The token endpoint answered with a non-200 status.
    #[error("token endpoint returned HTTP {code}: {body}")]
    Rejected {
        /// HTTP status code from the token endpoint.
        code: u16,
        /// Raw response body, for operator diagnosis.
        body: String,
    },

    /// The token endpoint answered 200 but without an `access_token`.
    #[error("token endpoint response is missing access_token")]
    MissingAccessToken,
}

/// Errors from the HTTP layer itself.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request failed before a status code was produced.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A configured base URL could not be used to build a request.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the human-readable reason for an HTTP status code.
///
/// Only the small set of codes the platform actually emits is mapped;
/// anything else falls back to `"Unknown error"`.
#[must_use]
pub fn reason_for_code(code: u16) -> &'static str {
    match code {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "Unknown error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_table_known_codes() {
        assert_eq!(reason_for_code(200), "OK");
        assert_eq!(reason_for_code(401), "Unauthorized");
        assert_eq!(reason_for_code(404), "Not Found");
        assert_eq!(reason_for_code(500), "Internal Server Error");
    }

    #[test]
    fn reason_table_unknown_code() {
        assert_eq!(reason_for_code(418), "Unknown error");
        assert_eq!(reason_for_code(502), "Unknown error");
    }

    #[test]
    fn from_status_maps_401_to_auth_expired() {
        assert!(matches!(
            Error::from_status(401),
            Error::AuthExpired { code: 401 }
        ));
    }

    #[test]
    fn from_status_maps_other_codes_to_platform() {
        match Error::from_status(403) {
            Error::Platform { code, reason } => {
                assert_eq!(code, 403);
                assert_eq!(reason, "Forbidden");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn config_error_display() {
        assert_eq!(
            ConfigError::MissingRefreshToken.to_string(),
            "no refresh token available"
        );
    }

    #[test]
    fn refresh_error_display() {
        let err = RefreshError::Rejected {
            code: 400,
            body: "invalid_grant".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "token endpoint returned HTTP 400: invalid_grant"
        );
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Injected persistence for refreshed tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The token state handed to a [`TokenStore`] after a successful refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedTokens {
    /// The new access token.
    pub access_token: String,
    /// The current refresh token (rotated or carried over).
    pub refresh_token: String,
    /// When the refresh happened.
    pub refreshed_at: DateTime<Utc>,
}

/// Persistence collaborator for refreshed tokens.
///
/// The library never stores tokens itself; after a successful refresh it
/// hands the new pair to the injected store. Persistence is best-effort:
/// a failing store is logged and does not fail the refresh, since the
/// in-memory credential is already updated.
pub trait TokenStore: Send + Sync {
    /// Saves the refreshed token pair.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the tokens could not be written. The error
    /// is logged by the caller, never surfaced.
    fn save(&self, tokens: &PersistedTokens) -> std::io::Result<()>;
}

impl std::fmt::Debug for dyn TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenStore")
    }
}

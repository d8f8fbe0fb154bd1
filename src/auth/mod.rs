// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Credential handling and token lifecycle management.
//!
//! Two authentication modes exist:
//!
//! - **Static**: a personal access token (a platform-issued GUID). There is
//!   no refresh path; an expired token is a terminal failure.
//! - **Refreshable**: an OAuth access/refresh token pair plus client
//!   credentials. On an authorization failure the access token is exchanged
//!   once via the token endpoint and the failed call is retried.
//!
//! The credential is shared by reference between the transport and the
//! [`TokenManager`] so a refresh performed for one call is visible to every
//! subsequent call.

mod credential;
mod token_manager;
mod token_store;

pub use credential::{Credential, SharedCredential};
pub use token_manager::TokenManager;
pub use token_store::{PersistedTokens, TokenStore};

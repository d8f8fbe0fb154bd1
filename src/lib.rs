// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client library for the SmartThings device API.
//!
//! Authenticates with a personal access token or an OAuth token pair,
//! lists an account's devices, classifies each one into a typed variant
//! (TV, lock, garage door, dimmer, outlet, thermostat, sensors), and
//! drives them through the platform's capability/command protocol.
//!
//! # Quick start
//!
//! ```no_run
//! use smartthings_lib::{ClassifiedDevice, DeviceControl, SmartThings};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let account = SmartThings::builder()
//!     .personal_token("6f2a79d7-4e08-47a1-8e1b-9c2d53f01a44")
//!     .build()?;
//!
//! for device in account.devices(false).await? {
//!     match &device {
//!         ClassifiedDevice::Tv(tv) => {
//!             println!("TV {} playing: {}", tv.device_id(), tv.playback_status().await);
//!         }
//!         ClassifiedDevice::Lock(lock) => {
//!             println!("Lock {} is {}", lock.device_id(), lock.state().await);
//!         }
//!         other => println!("{}: {:?}", other.device_id(), other.kind()),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # OAuth with automatic refresh
//!
//! With an OAuth credential the transport refreshes an expired access
//! token on a 401 and retries the request once. A [`TokenStore`] receives
//! the rotated tokens so they survive the process:
//!
//! ```no_run
//! use std::sync::Arc;
//! use smartthings_lib::{PersistedTokens, SmartThings, TokenStore};
//!
//! #[derive(Debug)]
//! struct FileStore;
//!
//! impl TokenStore for FileStore {
//!     fn save(&self, tokens: &PersistedTokens) -> std::io::Result<()> {
//!         std::fs::write("tokens.json", serde_json::to_vec(tokens)?)
//!     }
//! }
//!
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let account = SmartThings::builder()
//!     .oauth_tokens("access-token", "refresh-token")
//!     .client_credentials("client-id", "client-secret")
//!     .token_store(Arc::new(FileStore))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod auth;
pub mod classify;
pub mod device;
pub mod error;
pub mod location;
pub mod model;
pub mod transport;

pub use account::{SmartThings, SmartThingsBuilder};
pub use auth::{Credential, PersistedTokens, TokenStore};
pub use classify::classify;
pub use device::{
    ClassifiedDevice, DeviceControl, DeviceKind, Dimmer, GarageDoor, Generic, Interface,
    Levelable, Lock, Lockable, Outlet, Readable, TempHumiditySensor, Thermostat,
    ThermostatSensor, Tristate, Tv, Writable,
};
pub use error::{ConfigError, Error, Result};
pub use location::{Location, Locations, Room};
pub use model::{DeviceDescriptor, Measurement, StatusSnapshot};
pub use transport::ApiConfig;

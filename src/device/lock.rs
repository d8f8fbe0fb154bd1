// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smart lock.

use crate::device::{DeviceControl, DeviceCore, Interface, Lockable, Readable, Tristate, Writable};
use crate::error::Result;
use crate::transport::CommandRequest;

/// A cloud-connected smart lock.
///
/// State reads come from the cached status snapshot; `is_locked` and the
/// health check issue live capability reads because a stale answer for a
/// lock is worse than a round trip.
#[derive(Debug)]
pub struct Lock {
    core: DeviceCore,
}

impl Lock {
    /// Interfaces declared by this variant.
    pub const INTERFACES: &'static [Interface] = &[
        Interface::Readable,
        Interface::Writable,
        Interface::Lockable,
    ];

    #[must_use]
    pub(crate) fn new(core: DeviceCore) -> Self {
        Self { core }
    }

    /// Locks the device.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn lock_door(&self) -> Result<bool> {
        self.core.execute(CommandRequest::new("lock", "lock")).await
    }

    /// Unlocks the device.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn unlock_door(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("lock", "unlock"))
            .await
    }

    /// Returns the lock state from the cached snapshot: `"locked"`,
    /// `"unlocked"`, or `"unknown"` when the cache has no reading.
    pub async fn state(&self) -> String {
        self.core
            .status(false)
            .await
            .and_then(|s| s.value_str("lock", "lock").map(ToString::to_string))
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Returns the battery percentage from the cached snapshot, `0` when
    /// unreported.
    pub async fn battery_level(&self) -> u8 {
        let level = self
            .core
            .status(false)
            .await
            .and_then(|s| s.value("battery", "battery")?.as_u64());
        level.and_then(|l| u8::try_from(l).ok()).unwrap_or(0)
    }

    /// Returns whether the platform currently sees the lock online.
    ///
    /// This is a live health-check read, not a cache lookup.
    pub async fn is_online(&self) -> bool {
        self.core
            .attribute_string("healthCheck", "DeviceWatch-DeviceStatus")
            .await
            == "online"
    }

    /// Asks the device to re-report its state to the platform.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn refresh(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("refresh", "refresh"))
            .await
    }

    /// Applies a lock/unlock value by synonym.
    ///
    /// Recognizes `lock`/`locked`/`on`/`1`/`true` and
    /// `unlock`/`unlocked`/`off`/`0`/`false`; anything else is `Ok(false)`
    /// with no network call.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn set_state(&self, value: &str) -> Result<bool> {
        match value.to_ascii_lowercase().as_str() {
            "lock" | "locked" | "on" | "1" | "true" => self.lock_door().await,
            "unlock" | "unlocked" | "off" | "0" | "false" => self.unlock_door().await,
            other => {
                tracing::warn!(device = %self.device_id(), value = other, "unrecognized lock value");
                Ok(false)
            }
        }
    }
}

impl DeviceControl for Lock {
    fn core(&self) -> &DeviceCore {
        &self.core
    }
}

impl Readable for Lock {
    async fn read_value(&self) -> String {
        self.state().await
    }
}

impl Writable for Lock {
    async fn write_value(&self, value: &str) -> Result<bool> {
        self.set_state(value).await
    }
}

impl Lockable for Lock {
    async fn lock(&self) -> Result<bool> {
        self.lock_door().await
    }

    async fn unlock(&self) -> Result<bool> {
        self.unlock_door().await
    }

    async fn is_locked(&self) -> Tristate {
        self.core
            .attribute_tristate("lock", "lock", "locked", "unlocked")
            .await
    }
}

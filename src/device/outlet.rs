// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plain on/off outlet.

use crate::device::{DeviceControl, DeviceCore, Interface, Readable, Writable};
use crate::error::Result;

/// A switchable outlet with no level control.
///
/// The primary readable value comes from the cached status snapshot, not a
/// live read: an outlet listing renders from the seeded cache without a
/// network round trip per device.
#[derive(Debug)]
pub struct Outlet {
    core: DeviceCore,
}

impl Outlet {
    /// Interfaces declared by this variant.
    pub const INTERFACES: &'static [Interface] = &[Interface::Readable, Interface::Writable];

    #[must_use]
    pub(crate) fn new(core: DeviceCore) -> Self {
        Self { core }
    }

    /// Returns the switch value from the cached snapshot, empty when the
    /// cache has no reading.
    pub async fn cached_switch_state(&self) -> String {
        self.core
            .status(false)
            .await
            .and_then(|s| s.value_str("switch", "switch").map(ToString::to_string))
            .unwrap_or_default()
    }

    /// Applies an on/off value.
    ///
    /// Recognizes `on`/`off` (any case); anything else is `Ok(false)` with
    /// no network call.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn set_switch(&self, value: &str) -> Result<bool> {
        match value.to_ascii_lowercase().as_str() {
            "on" | "1" | "true" => self.power_on().await,
            "off" | "0" | "false" => self.power_off().await,
            other => {
                tracing::warn!(device = %self.device_id(), value = other, "unrecognized switch value");
                Ok(false)
            }
        }
    }
}

impl DeviceControl for Outlet {
    fn core(&self) -> &DeviceCore {
        &self.core
    }
}

impl Readable for Outlet {
    async fn read_value(&self) -> String {
        self.cached_switch_state().await
    }
}

impl Writable for Outlet {
    async fn write_value(&self, value: &str) -> Result<bool> {
        self.set_switch(value).await
    }
}

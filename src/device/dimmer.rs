// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimmable switch.

use crate::device::{DeviceControl, DeviceCore, Interface, Levelable, Readable, Writable};
use crate::error::Result;
use crate::transport::CommandRequest;

/// An outlet with a 0-100 brightness level on top.
#[derive(Debug)]
pub struct Dimmer {
    core: DeviceCore,
}

impl Dimmer {
    /// Interfaces declared by this variant.
    pub const INTERFACES: &'static [Interface] = &[
        Interface::Readable,
        Interface::Writable,
        Interface::Levelable,
    ];

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

    /// Returns the brightness level from the cached snapshot.
    pub async fn brightness(&self) -> Option<u8> {
        let snapshot = self.core.status(false).await?;
        let level = snapshot.value("switchLevel", "level")?.as_u64()?;
        u8::try_from(level).ok()
    }

    /// Sets the brightness level.
    ///
    /// Levels above 100 are rejected locally as `Ok(false)` without a
    /// network call.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn set_brightness(&self, level: u8) -> Result<bool> {
        if level > 100 {
            tracing::warn!(device = %self.device_id(), level, "brightness out of range");
            return Ok(false);
        }
        self.core
            .execute(
                CommandRequest::new("switchLevel", "setLevel")
                    .with_arguments(vec![u64::from(level).into()]),
            )
            .await
    }
}

impl DeviceControl for Dimmer {
    fn core(&self) -> &DeviceCore {
        &self.core
    }
}

impl Readable for Dimmer {
    async fn read_value(&self) -> String {
        self.cached_switch_state().await
    }
}

impl Writable for Dimmer {
    async fn write_value(&self, value: &str) -> Result<bool> {
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

impl Levelable for Dimmer {
    async fn level(&self) -> Option<u8> {
        self.brightness().await
    }

    async fn set_level(&self, level: u8) -> Result<bool> {
        self.set_brightness(level).await
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Garage door opener.

use crate::device::{DeviceControl, DeviceCore, Interface, Readable, Tristate, Writable};
use crate::error::Result;
use crate::transport::CommandRequest;

/// A garage door opener driven through the `doorControl` capability.
///
/// The shared power operations are remapped: turning the device "on" opens
/// the door and "off" closes it, so a door behaves like any other device in
/// bulk operations.
#[derive(Debug)]
pub struct GarageDoor {
    core: DeviceCore,
}

impl GarageDoor {
    /// Interfaces declared by this variant.
    pub const INTERFACES: &'static [Interface] = &[Interface::Readable, Interface::Writable];

    #[must_use]
    pub(crate) fn new(core: DeviceCore) -> Self {
        Self { core }
    }

    /// Opens the door.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn open(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("doorControl", "open"))
            .await
    }

    /// Closes the door.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn close(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("doorControl", "close"))
            .await
    }

    /// Returns the door state from the cached snapshot (`"open"`,
    /// `"closed"`, `"opening"`, ...), empty when the cache has no reading.
    pub async fn door_state(&self) -> String {
        self.core
            .status(false)
            .await
            .and_then(|s| s.value_str("doorControl", "door").map(ToString::to_string))
            .unwrap_or_default()
    }

    /// Returns whether the door is open, from a live read.
    ///
    /// Transitional states (`"opening"`, `"closing"`) are
    /// [`Tristate::Indeterminate`].
    pub async fn is_open(&self) -> Tristate {
        self.core
            .attribute_tristate("doorControl", "door", "open", "closed")
            .await
    }

    /// Applies an open/close value by synonym.
    ///
    /// Recognizes `on`/`open` and `off`/`close`/`closed`; anything else is
    /// `Ok(false)` with no network call.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn set_state(&self, value: &str) -> Result<bool> {
        match value.to_ascii_lowercase().as_str() {
            "on" | "open" | "1" | "true" => self.open().await,
            "off" | "close" | "closed" | "0" | "false" => self.close().await,
            other => {
                tracing::warn!(device = %self.device_id(), value = other, "unrecognized door value");
                Ok(false)
            }
        }
    }
}

impl DeviceControl for GarageDoor {
    fn core(&self) -> &DeviceCore {
        &self.core
    }

    async fn power_on(&self) -> Result<bool> {
        self.open().await
    }

    async fn power_off(&self) -> Result<bool> {
        self.close().await
    }
}

impl Readable for GarageDoor {
    async fn read_value(&self) -> String {
        self.door_state().await
    }
}

impl Writable for GarageDoor {
    async fn write_value(&self, value: &str) -> Result<bool> {
        self.set_state(value).await
    }
}

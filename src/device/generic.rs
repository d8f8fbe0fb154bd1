// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fallback for devices no classifier rule recognized.

use crate::device::{DeviceControl, DeviceCore, Interface};

/// A device the classifier could not place.
///
/// Exposes only the shared control surface; useful to identify and inspect
/// a device before teaching the classifier about it.
#[derive(Debug)]
pub struct Generic {
    core: DeviceCore,
}

impl Generic {
    /// Interfaces declared by this variant.
    pub const INTERFACES: &'static [Interface] = &[];

    #[must_use]
    pub(crate) fn new(core: DeviceCore) -> Self {
        Self { core }
    }
}

impl DeviceControl for Generic {
    fn core(&self) -> &DeviceCore {
        &self.core
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw platform data structures.
//!
//! [`DeviceDescriptor`] is the platform's metadata record for a device and
//! the source of truth for classification; it is never mutated.
//! [`StatusSnapshot`] is the per-device capability status map, lazily
//! populated and refreshed on demand.

mod descriptor;
mod status;

pub use descriptor::{CapabilityRef, Category, Component, DeviceDescriptor};
pub use status::{AttributeState, CapabilityStatus, DeviceStatusResponse, Measurement, StatusSnapshot};

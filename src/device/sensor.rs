// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostats and environmental sensors.
//!
//! All three variants read from the cached status snapshot; none issue a
//! live read per query. A whole-home sensor sweep therefore costs at most
//! one status fetch per device, usually zero when the listing seeded the
//! caches.

use crate::device::{DeviceControl, DeviceCore, Interface, Readable};
use crate::model::Measurement;

/// An ecobee thermostat head unit.
#[derive(Debug)]
pub struct Thermostat {
    core: DeviceCore,
}

impl Thermostat {
    /// Interfaces declared by this variant.
    pub const INTERFACES: &'static [Interface] = &[Interface::Readable];

    #[must_use]
    pub(crate) fn new(core: DeviceCore) -> Self {
        Self { core }
    }

    /// Returns the ambient temperature from the cached snapshot.
    pub async fn temperature(&self) -> Option<Measurement> {
        let snapshot = self.core.status(false).await?;
        snapshot.measurement("temperatureMeasurement", "temperature")
    }
}

impl DeviceControl for Thermostat {
    fn core(&self) -> &DeviceCore {
        &self.core
    }
}

impl Readable for Thermostat {
    async fn read_value(&self) -> String {
        self.temperature()
            .await
            .map(|m| m.to_string())
            .unwrap_or_default()
    }
}

/// A remote thermostat sensor paired to an ecobee head unit.
#[derive(Debug)]
pub struct ThermostatSensor {
    core: DeviceCore,
}

impl ThermostatSensor {
    /// Interfaces declared by this variant.
    pub const INTERFACES: &'static [Interface] = &[Interface::Readable];

    #[must_use]
    pub(crate) fn new(core: DeviceCore) -> Self {
        Self { core }
    }

    /// Returns the sensed temperature from the cached snapshot.
    pub async fn temperature(&self) -> Option<Measurement> {
        let snapshot = self.core.status(false).await?;
        snapshot.measurement("temperatureMeasurement", "temperature")
    }
}

impl DeviceControl for ThermostatSensor {
    fn core(&self) -> &DeviceCore {
        &self.core
    }
}

impl Readable for ThermostatSensor {
    async fn read_value(&self) -> String {
        self.temperature()
            .await
            .map(|m| m.to_string())
            .unwrap_or_default()
    }
}

/// A standalone temperature/humidity sensor.
#[derive(Debug)]
pub struct TempHumiditySensor {
    core: DeviceCore,
}

impl TempHumiditySensor {
    /// Interfaces declared by this variant.
    pub const INTERFACES: &'static [Interface] = &[Interface::Readable];

    #[must_use]
    pub(crate) fn new(core: DeviceCore) -> Self {
        Self { core }
    }

    /// Returns the temperature from the cached snapshot.
    pub async fn temperature(&self) -> Option<Measurement> {
        let snapshot = self.core.status(false).await?;
        snapshot.measurement("temperatureMeasurement", "temperature")
    }

    /// Returns the relative humidity from the cached snapshot.
    pub async fn humidity(&self) -> Option<Measurement> {
        let snapshot = self.core.status(false).await?;
        snapshot.measurement("relativeHumidityMeasurement", "humidity")
    }
}

impl DeviceControl for TempHumiditySensor {
    fn core(&self) -> &DeviceCore {
        &self.core
    }
}

impl Readable for TempHumiditySensor {
    async fn read_value(&self) -> String {
        self.temperature()
            .await
            .map(|m| m.to_string())
            .unwrap_or_default()
    }
}

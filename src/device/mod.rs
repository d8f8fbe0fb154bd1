// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed device variants over the capability/command protocol.
//!
//! Every variant is a thin newtype around [`DeviceCore`], which owns the
//! device id, an explicit transport handle, and the two lazy caches
//! (descriptor and status snapshot). Shared operations are default methods
//! on [`DeviceControl`]; variant-specific operations live on the variant
//! types. [`ClassifiedDevice`] is the closed union the classifier produces,
//! and callers pattern-match on it (or on the declared [`Interface`] set)
//! instead of probing for operations.

mod dimmer;
mod garage_door;
mod generic;
mod lock;
mod outlet;
mod sensor;
mod tv;

pub use dimmer::Dimmer;
pub use garage_door::GarageDoor;
pub use generic::Generic;
pub use lock::Lock;
pub use outlet::Outlet;
pub use sensor::{TempHumiditySensor, Thermostat, ThermostatSensor};
pub use tv::Tv;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::model::{CapabilityStatus, DeviceDescriptor, DeviceStatusResponse, StatusSnapshot};
use crate::transport::{CommandRequest, Method, Transport};

// ============================================================================
// Tristate
// ============================================================================

/// Projection of a two-valued status string into a checked boolean.
///
/// The platform reports states as strings (`"on"`/`"off"`,
/// `"locked"`/`"unlocked"`). Firmware variance and transient states
/// (`"opening"`) produce values outside the expected pair; those map to
/// [`Tristate::Indeterminate`], which is a real third state, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tristate {
    /// The value matched the truthy side of the pair.
    True,
    /// The value matched the falsy side of the pair.
    False,
    /// The value was missing or outside the expected pair.
    Indeterminate,
}

impl Tristate {
    /// Projects a status value against a truthy/falsy pair.
    #[must_use]
    pub fn project(value: Option<&str>, truthy: &str, falsy: &str) -> Self {
        match value {
            Some(v) if v == truthy => Self::True,
            Some(v) if v == falsy => Self::False,
            _ => Self::Indeterminate,
        }
    }

    /// Returns `Some(bool)` for the determinate states.
    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Indeterminate => None,
        }
    }

    /// Returns whether the state is [`Tristate::True`].
    #[must_use]
    pub fn is_true(self) -> bool {
        self == Self::True
    }
}

// ============================================================================
// Interface
// ============================================================================

/// Capability interfaces a device variant declares.
///
/// Callers deciding output shape for listings match on this declared set
/// instead of probing whether an operation exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface {
    /// Exposes a primary readable value ([`Readable`]).
    Readable,
    /// Accepts a primary written value ([`Writable`]).
    Writable,
    /// Exposes a 0-100 level ([`Levelable`]).
    Levelable,
    /// Exposes lock/unlock ([`Lockable`]).
    Lockable,
}

// ============================================================================
// DeviceCore
// ============================================================================

/// Shared state and protocol plumbing behind every device variant.
///
/// Holds an explicit handle to the transport it was constructed with --
/// there is no ambient session. The descriptor and status caches both
/// start from whatever the listing descriptor carried and only go back
/// through a fetch on an empty cache or an explicit refresh.
#[derive(Debug)]
pub struct DeviceCore {
    device_id: String,
    transport: Arc<Transport>,
    descriptor: Mutex<Option<DeviceDescriptor>>,
    status: Mutex<Option<StatusSnapshot>>,
}

impl DeviceCore {
    /// Creates a core from a listing descriptor, seeding the status cache
    /// from the descriptor's inline capability statuses.
    #[must_use]
    pub fn new(transport: Arc<Transport>, descriptor: DeviceDescriptor) -> Self {
        let seeded = descriptor.inline_status();
        let status = if seeded.is_empty() { None } else { Some(seeded) };
        Self {
            device_id: descriptor.device_id.clone(),
            transport,
            descriptor: Mutex::new(Some(descriptor)),
            status: Mutex::new(status),
        }
    }

    /// Returns the device id.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the transport this device was constructed with.
    #[must_use]
    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    fn encoded_id(&self) -> String {
        urlencoding::encode(&self.device_id).into_owned()
    }

    /// Returns the device descriptor, fetching it when the cache is empty
    /// or `update` is requested.
    ///
    /// # Errors
    ///
    /// Unlike status reads, descriptor fetch failures are explicit errors:
    /// the caller asked for metadata and must know it is missing.
    pub async fn info(&self, update: bool) -> Result<DeviceDescriptor> {
        if !update {
            if let Some(cached) = self.descriptor.lock().clone() {
                return Ok(cached);
            }
        }

        let path = format!("devices/{}", self.encoded_id());
        let response = self.transport.call(Method::GET, &path, None).await?;
        if !response.is_ok() {
            return Err(Error::from_status(response.code));
        }

        let descriptor: DeviceDescriptor = response.decode()?;
        *self.descriptor.lock() = Some(descriptor.clone());
        Ok(descriptor)
    }

    /// Returns the capability status snapshot, fetching it when the cache
    /// is empty or `update` is requested.
    ///
    /// Reads never error: on a failed or malformed fetch the previous
    /// cache (or `None` when the device was never read) is returned, so
    /// one bad device cannot break a listing. The cache is only replaced
    /// on a successful fetch.
    pub async fn status(&self, update: bool) -> Option<StatusSnapshot> {
        if !update {
            let cached = self.status.lock().clone();
            if let Some(snapshot) = cached {
                if !snapshot.is_empty() {
                    return Some(snapshot);
                }
            }
        }

        match self.fetch_status().await {
            Some(snapshot) => {
                *self.status.lock() = Some(snapshot.clone());
                Some(snapshot)
            }
            None => self.status.lock().clone(),
        }
    }

    async fn fetch_status(&self) -> Option<StatusSnapshot> {
        let path = format!("devices/{}/status", self.encoded_id());
        let response = self.transport.call(Method::GET, &path, None).await.ok()?;
        if !response.is_ok() {
            tracing::debug!(code = response.code, device = %self.device_id, "status fetch failed");
            return None;
        }
        response
            .decode::<DeviceStatusResponse>()
            .ok()?
            .into_main()
    }

    /// Issues one capability command against the main component.
    ///
    /// Returns `Ok(true)` iff the platform answered 200 with the command
    /// accepted; any other platform answer is `Ok(false)`. The status
    /// cache is left untouched -- callers wanting post-command state must
    /// request a fresh read.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request itself fails.
    pub async fn execute(&self, request: CommandRequest) -> Result<bool> {
        let path = format!("devices/{}/commands", self.encoded_id());
        let response = self
            .transport
            .call(Method::POST, &path, Some(&request))
            .await?;
        Ok(response.command_accepted())
    }

    /// Fetches one capability's live status from the platform.
    ///
    /// Returns `None` on any failure; telemetry readers degrade instead of
    /// erroring on partial platform responses.
    pub async fn capability_status(&self, capability: &str) -> Option<CapabilityStatus> {
        let path = format!(
            "devices/{}/components/main/capabilities/{}/status",
            self.encoded_id(),
            urlencoding::encode(capability)
        );
        let response = self.transport.call(Method::GET, &path, None).await.ok()?;
        if !response.is_ok() {
            return None;
        }
        response.decode().ok()
    }

    /// Projects one attribute of a live capability read into a string.
    ///
    /// Missing or non-string values yield an empty string.
    pub async fn attribute_string(&self, capability: &str, attribute: &str) -> String {
        self.capability_status(capability)
            .await
            .and_then(|status| {
                status
                    .get(attribute)
                    .and_then(|state| state.value.as_str().map(ToString::to_string))
            })
            .unwrap_or_default()
    }

    /// Projects one attribute of a live capability read against a
    /// two-valued pair.
    pub async fn attribute_tristate(
        &self,
        capability: &str,
        attribute: &str,
        truthy: &str,
        falsy: &str,
    ) -> Tristate {
        let status = self.capability_status(capability).await;
        let value = status
            .as_ref()
            .and_then(|s| s.get(attribute))
            .and_then(|state| state.value.as_str());
        Tristate::project(value, truthy, falsy)
    }
}

// ============================================================================
// DeviceControl
// ============================================================================

/// Operations shared by every device variant.
///
/// Default methods over [`DeviceCore`]; variants override where their
/// semantics differ (a garage door remaps power onto open/close).
#[allow(async_fn_in_trait)]
pub trait DeviceControl {
    /// Returns the shared device core.
    fn core(&self) -> &DeviceCore;

    /// Returns the device id.
    fn device_id(&self) -> &str {
        self.core().device_id()
    }

    /// Returns the device descriptor (cached unless `update`).
    ///
    /// # Errors
    ///
    /// Returns error if the descriptor had to be fetched and the fetch
    /// failed.
    async fn info(&self, update: bool) -> Result<DeviceDescriptor> {
        self.core().info(update).await
    }

    /// Returns the capability status snapshot (cached unless `update`).
    async fn status(&self, update: bool) -> Option<StatusSnapshot> {
        self.core().status(update).await
    }

    /// Turns the device on.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    async fn power_on(&self) -> Result<bool> {
        self.core().execute(CommandRequest::new("switch", "on")).await
    }

    /// Turns the device off.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    async fn power_off(&self) -> Result<bool> {
        self.core()
            .execute(CommandRequest::new("switch", "off"))
            .await
    }

    /// Returns the raw switch state (`"on"`, `"off"`, or empty).
    async fn switch_state(&self) -> String {
        self.core().attribute_string("switch", "switch").await
    }

    /// Returns whether the device is on.
    async fn is_on(&self) -> Tristate {
        self.core()
            .attribute_tristate("switch", "switch", "on", "off")
            .await
    }

    /// Returns the firmware version reported by the device, empty when
    /// unavailable.
    async fn firmware_version(&self) -> String {
        self.core()
            .attribute_string("samsungvd.firmwareVersion", "firmwareVersion")
            .await
    }
}

// ============================================================================
// Capability interfaces
// ============================================================================

/// A variant exposing a primary readable value (switch state, door state,
/// lock state, temperature).
#[allow(async_fn_in_trait)]
pub trait Readable: DeviceControl {
    /// Returns the primary value rendered as a string, empty when
    /// unavailable.
    async fn read_value(&self) -> String;
}

/// A variant accepting a primary written value.
#[allow(async_fn_in_trait)]
pub trait Writable: DeviceControl {
    /// Applies a value to the device's primary control.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails; an unaccepted or
    /// unrecognized value is `Ok(false)`.
    async fn write_value(&self, value: &str) -> Result<bool>;
}

/// A variant exposing a 0-100 level.
#[allow(async_fn_in_trait)]
pub trait Levelable: DeviceControl {
    /// Returns the current level, when known.
    async fn level(&self) -> Option<u8>;

    /// Sets the level; values above 100 are rejected locally as
    /// `Ok(false)` without a network call.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    async fn set_level(&self, level: u8) -> Result<bool>;
}

/// A variant exposing lock/unlock.
#[allow(async_fn_in_trait)]
pub trait Lockable: DeviceControl {
    /// Locks the device.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    async fn lock(&self) -> Result<bool>;

    /// Unlocks the device.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    async fn unlock(&self) -> Result<bool>;

    /// Returns whether the device is locked.
    async fn is_locked(&self) -> Tristate;
}

// ============================================================================
// ClassifiedDevice
// ============================================================================

/// Discriminant of [`ClassifiedDevice`], for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    /// Samsung TV.
    Tv,
    /// Smart lock.
    Lock,
    /// Garage door opener.
    GarageDoor,
    /// Dimmable switch.
    Dimmer,
    /// Plain on/off outlet.
    Outlet,
    /// Thermostat with a temperature reading.
    Thermostat,
    /// Remote thermostat sensor.
    ThermostatSensor,
    /// Temperature/humidity sensor.
    TempHumiditySensor,
    /// Unrecognized device; identify/inform only.
    Generic,
}

/// The closed set of device variants the classifier produces.
///
/// Pattern-match to reach variant-specific operations; the shared
/// [`DeviceControl`] surface is available on the union directly.
#[derive(Debug)]
pub enum ClassifiedDevice {
    /// Samsung TV.
    Tv(Tv),
    /// Smart lock.
    Lock(Lock),
    /// Garage door opener.
    GarageDoor(GarageDoor),
    /// Dimmable switch.
    Dimmer(Dimmer),
    /// Plain on/off outlet.
    Outlet(Outlet),
    /// Thermostat with a temperature reading.
    Thermostat(Thermostat),
    /// Remote thermostat sensor.
    ThermostatSensor(ThermostatSensor),
    /// Temperature/humidity sensor.
    TempHumiditySensor(TempHumiditySensor),
    /// Unrecognized device; identify/inform only.
    Generic(Generic),
}

impl ClassifiedDevice {
    /// Returns the variant discriminant.
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::Tv(_) => DeviceKind::Tv,
            Self::Lock(_) => DeviceKind::Lock,
            Self::GarageDoor(_) => DeviceKind::GarageDoor,
            Self::Dimmer(_) => DeviceKind::Dimmer,
            Self::Outlet(_) => DeviceKind::Outlet,
            Self::Thermostat(_) => DeviceKind::Thermostat,
            Self::ThermostatSensor(_) => DeviceKind::ThermostatSensor,
            Self::TempHumiditySensor(_) => DeviceKind::TempHumiditySensor,
            Self::Generic(_) => DeviceKind::Generic,
        }
    }

    /// Returns the capability interfaces this variant declares.
    #[must_use]
    pub fn interfaces(&self) -> &'static [Interface] {
        match self {
            Self::Tv(_) => Tv::INTERFACES,
            Self::Lock(_) => Lock::INTERFACES,
            Self::GarageDoor(_) => GarageDoor::INTERFACES,
            Self::Dimmer(_) => Dimmer::INTERFACES,
            Self::Outlet(_) => Outlet::INTERFACES,
            Self::Thermostat(_) => Thermostat::INTERFACES,
            Self::ThermostatSensor(_) => ThermostatSensor::INTERFACES,
            Self::TempHumiditySensor(_) => TempHumiditySensor::INTERFACES,
            Self::Generic(_) => Generic::INTERFACES,
        }
    }

    /// Returns whether the variant declares the given interface.
    #[must_use]
    pub fn implements(&self, interface: Interface) -> bool {
        self.interfaces().contains(&interface)
    }
}

impl DeviceControl for ClassifiedDevice {
    fn core(&self) -> &DeviceCore {
        match self {
            Self::Tv(d) => d.core(),
            Self::Lock(d) => d.core(),
            Self::GarageDoor(d) => d.core(),
            Self::Dimmer(d) => d.core(),
            Self::Outlet(d) => d.core(),
            Self::Thermostat(d) => d.core(),
            Self::ThermostatSensor(d) => d.core(),
            Self::TempHumiditySensor(d) => d.core(),
            Self::Generic(d) => d.core(),
        }
    }
}

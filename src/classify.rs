// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device classification.
//!
//! Maps a raw [`DeviceDescriptor`] onto one [`ClassifiedDevice`] variant
//! through an ordered rule chain: first identity rules on descriptor
//! metadata (manufacturer signatures, capability declarations, product
//! names), then a fallback on the capability status snapshot for devices
//! with generic metadata. Rule order is a contract -- a Tedee lock also
//! exposes `doorControl` and must not classify as a garage door.

use std::sync::Arc;

use crate::device::{
    ClassifiedDevice, DeviceCore, Dimmer, GarageDoor, Generic, Lock, Outlet, TempHumiditySensor,
    Thermostat, ThermostatSensor, Tv,
};
use crate::model::DeviceDescriptor;
use crate::transport::Transport;

const LOCK_MANUFACTURER: &str = "Tedee";
const LOCK_INTEGRATION_TYPE: &str = "VIPER";
const LOCK_MODEL_MARKER: &str = "tedee";
const LOCK_PRESENTATION_MARKER: &str = "c2c-lock";

const DOOR_CONTROL_CAPABILITY: &str = "doorControl";
const GARAGE_DOOR_OCF_TYPE: &str = "oic.d.garagedoor";
const GARAGE_DOOR_CATEGORY: &str = "GarageDoor";

const TV_PRODUCT_NAME: &str = "Samsung OCF TV";
const SENSOR_PRODUCT_NAME: &str = "ecobee Sensor";
const THERMOSTAT_FAMILY: &str = "ecobee Thermostat";

/// Classifies one device.
///
/// Descriptor rules run first and need no network. The snapshot fallback
/// reads the device's status cache, which the listing usually seeded; only
/// a device listed without inline statuses costs a status fetch here.
pub async fn classify(transport: Arc<Transport>, descriptor: DeviceDescriptor) -> ClassifiedDevice {
    if matches_lock_signature(&descriptor) {
        return ClassifiedDevice::Lock(Lock::new(DeviceCore::new(transport, descriptor)));
    }

    if matches_garage_door_signature(&descriptor) {
        return ClassifiedDevice::GarageDoor(GarageDoor::new(DeviceCore::new(
            transport, descriptor,
        )));
    }

    if descriptor.name == TV_PRODUCT_NAME {
        return ClassifiedDevice::Tv(Tv::new(DeviceCore::new(transport, descriptor)));
    }

    if descriptor.name == SENSOR_PRODUCT_NAME {
        return ClassifiedDevice::ThermostatSensor(ThermostatSensor::new(DeviceCore::new(
            transport, descriptor,
        )));
    }

    if descriptor.name.contains(THERMOSTAT_FAMILY) {
        return ClassifiedDevice::Thermostat(Thermostat::new(DeviceCore::new(
            transport, descriptor,
        )));
    }

    classify_by_status(DeviceCore::new(transport, descriptor)).await
}

async fn classify_by_status(core: DeviceCore) -> ClassifiedDevice {
    let Some(snapshot) = core.status(false).await else {
        tracing::debug!(device = %core.device_id(), "no status available; classifying as generic");
        return ClassifiedDevice::Generic(Generic::new(core));
    };

    if snapshot
        .attribute("temperatureMeasurement", "temperature")
        .is_some()
    {
        return ClassifiedDevice::TempHumiditySensor(TempHumiditySensor::new(core));
    }

    if snapshot.attribute("switch", "switch").is_some() {
        if snapshot.attribute("switchLevel", "level").is_some() {
            return ClassifiedDevice::Dimmer(Dimmer::new(core));
        }
        return ClassifiedDevice::Outlet(Outlet::new(core));
    }

    ClassifiedDevice::Generic(Generic::new(core))
}

fn matches_lock_signature(descriptor: &DeviceDescriptor) -> bool {
    let viper_tedee = descriptor.device_manufacturer_code.as_deref() == Some(LOCK_MANUFACTURER)
        && descriptor.integration_type.as_deref() == Some(LOCK_INTEGRATION_TYPE);

    let model_marker = descriptor
        .device_model
        .as_deref()
        .is_some_and(|m| m.to_ascii_lowercase().contains(LOCK_MODEL_MARKER));

    let presentation_marker = descriptor
        .presentation_id
        .as_deref()
        .is_some_and(|p| p.contains(LOCK_PRESENTATION_MARKER));

    viper_tedee || model_marker || presentation_marker
}

fn matches_garage_door_signature(descriptor: &DeviceDescriptor) -> bool {
    descriptor.declares_capability(DOOR_CONTROL_CAPABILITY)
        || descriptor.ocf_device_type.as_deref() == Some(GARAGE_DOOR_OCF_TYPE)
        || descriptor.has_category(GARAGE_DOOR_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credential;
    use crate::device::DeviceKind;
    use crate::transport::ApiConfig;
    use serde_json::json;

    fn transport() -> Arc<Transport> {
        let credential = Credential::personal("3161f3fc-2a71-4a01-a601-5a3361d4b618")
            .unwrap()
            .into_shared();
        Arc::new(Transport::new(&ApiConfig::new(), credential, None).unwrap())
    }

    fn descriptor(value: serde_json::Value) -> DeviceDescriptor {
        serde_json::from_value(value).unwrap()
    }

    async fn kind_of(value: serde_json::Value) -> DeviceKind {
        classify(transport(), descriptor(value)).await.kind()
    }

    #[tokio::test]
    async fn tedee_viper_signature_is_lock() {
        let kind = kind_of(json!({
            "deviceId": "d",
            "name": "Lock",
            "deviceManufacturerCode": "Tedee",
            "type": "VIPER"
        }))
        .await;
        assert_eq!(kind, DeviceKind::Lock);
    }

    #[tokio::test]
    async fn tedee_model_marker_is_lock_case_insensitive() {
        let kind = kind_of(json!({
            "deviceId": "d",
            "name": "Lock",
            "deviceModel": "Tedee PRO"
        }))
        .await;
        assert_eq!(kind, DeviceKind::Lock);
    }

    #[tokio::test]
    async fn presentation_marker_is_lock() {
        let kind = kind_of(json!({
            "deviceId": "d",
            "name": "Lock",
            "presentationId": "ST_c2c-lock-1"
        }))
        .await;
        assert_eq!(kind, DeviceKind::Lock);
    }

    #[tokio::test]
    async fn lock_signature_wins_over_door_control() {
        // Tedee locks expose doorControl too; the lock rule runs first.
        let kind = kind_of(json!({
            "deviceId": "d",
            "name": "Lock",
            "deviceManufacturerCode": "Tedee",
            "type": "VIPER",
            "components": [{
                "id": "main",
                "capabilities": [{"id": "doorControl"}]
            }]
        }))
        .await;
        assert_eq!(kind, DeviceKind::Lock);
    }

    #[tokio::test]
    async fn door_control_capability_is_garage_door() {
        let kind = kind_of(json!({
            "deviceId": "d",
            "name": "Opener",
            "components": [{
                "id": "main",
                "capabilities": [{"id": "doorControl"}]
            }]
        }))
        .await;
        assert_eq!(kind, DeviceKind::GarageDoor);
    }

    #[tokio::test]
    async fn ocf_type_is_garage_door() {
        let kind = kind_of(json!({
            "deviceId": "d",
            "name": "Opener",
            "ocfDeviceType": "oic.d.garagedoor"
        }))
        .await;
        assert_eq!(kind, DeviceKind::GarageDoor);
    }

    #[tokio::test]
    async fn category_is_garage_door() {
        let kind = kind_of(json!({
            "deviceId": "d",
            "name": "Opener",
            "components": [{
                "id": "main",
                "capabilities": [],
                "categories": [{"name": "GarageDoor"}]
            }]
        }))
        .await;
        assert_eq!(kind, DeviceKind::GarageDoor);
    }

    #[tokio::test]
    async fn samsung_product_name_is_tv() {
        let kind = kind_of(json!({"deviceId": "d", "name": "Samsung OCF TV"})).await;
        assert_eq!(kind, DeviceKind::Tv);
    }

    #[tokio::test]
    async fn ecobee_names_split_sensor_and_thermostat() {
        let sensor = kind_of(json!({"deviceId": "d", "name": "ecobee Sensor"})).await;
        assert_eq!(sensor, DeviceKind::ThermostatSensor);

        let thermostat =
            kind_of(json!({"deviceId": "d", "name": "My ecobee Thermostat v2"})).await;
        assert_eq!(thermostat, DeviceKind::Thermostat);
    }

    #[tokio::test]
    async fn temperature_status_is_temp_humidity_sensor() {
        let kind = kind_of(json!({
            "deviceId": "d",
            "name": "Multipurpose Sensor",
            "components": [{
                "id": "main",
                "capabilities": [{
                    "id": "temperatureMeasurement",
                    "status": {"temperature": {"value": 71.0, "unit": "F"}}
                }]
            }]
        }))
        .await;
        assert_eq!(kind, DeviceKind::TempHumiditySensor);
    }

    #[tokio::test]
    async fn switch_with_level_is_dimmer() {
        let kind = kind_of(json!({
            "deviceId": "d",
            "name": "Smart Bulb",
            "components": [{
                "id": "main",
                "capabilities": [
                    {"id": "switch", "status": {"switch": {"value": "on"}}},
                    {"id": "switchLevel", "status": {"level": {"value": 60}}}
                ]
            }]
        }))
        .await;
        assert_eq!(kind, DeviceKind::Dimmer);
    }

    #[tokio::test]
    async fn switch_without_level_is_outlet() {
        let kind = kind_of(json!({
            "deviceId": "d",
            "name": "Smart Plug",
            "components": [{
                "id": "main",
                "capabilities": [
                    {"id": "switch", "status": {"switch": {"value": "off"}}}
                ]
            }]
        }))
        .await;
        assert_eq!(kind, DeviceKind::Outlet);
    }

    #[tokio::test]
    async fn temperature_wins_over_switch_in_status_fallback() {
        let kind = kind_of(json!({
            "deviceId": "d",
            "name": "Combo",
            "components": [{
                "id": "main",
                "capabilities": [
                    {"id": "switch", "status": {"switch": {"value": "on"}}},
                    {
                        "id": "temperatureMeasurement",
                        "status": {"temperature": {"value": 70, "unit": "F"}}
                    }
                ]
            }]
        }))
        .await;
        assert_eq!(kind, DeviceKind::TempHumiditySensor);
    }
}

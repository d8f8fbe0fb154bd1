// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The platform's device metadata record.

use serde::{Deserialize, Serialize};

use crate::model::status::{CapabilityStatus, StatusSnapshot};

/// Raw device descriptor as returned by `GET /devices`.
///
/// Immutable source of truth for classification. Listing with
/// `includeStatus=true` embeds each capability's last-known status inline,
/// which seeds the device's status cache without an extra round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescriptor {
    /// Unique device id.
    pub device_id: String,

    /// Platform product name (e.g. `"Samsung OCF TV"`), distinct from the
    /// user-assigned label.
    #[serde(default)]
    pub name: String,

    /// User-assigned display name.
    #[serde(default)]
    pub label: Option<String>,

    /// Manufacturer code, set for cloud-to-cloud integrations.
    #[serde(default)]
    pub device_manufacturer_code: Option<String>,

    /// Integration type (e.g. `"VIPER"` for cloud-to-cloud).
    #[serde(default, rename = "type")]
    pub integration_type: Option<String>,

    /// Manufacturer model string.
    #[serde(default)]
    pub device_model: Option<String>,

    /// Presentation id, used by some integrations to mark device families.
    #[serde(default)]
    pub presentation_id: Option<String>,

    /// OCF ontology device type (e.g. `"oic.d.garagedoor"`).
    #[serde(default)]
    pub ocf_device_type: Option<String>,

    /// Sub-addressable components; this library only targets the first
    /// (`main`) component.
    #[serde(default)]
    pub components: Vec<Component>,
}

impl DeviceDescriptor {
    /// Returns the user-facing name: the label when set, else the product
    /// name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Returns the `main` component, falling back to the first listed
    /// component when none carries that id.
    #[must_use]
    pub fn main_component(&self) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.id == "main")
            .or_else(|| self.components.first())
    }

    /// Returns whether the main component declares the given capability.
    #[must_use]
    pub fn declares_capability(&self, capability_id: &str) -> bool {
        self.main_component()
            .is_some_and(|c| c.capabilities.iter().any(|cap| cap.id == capability_id))
    }

    /// Returns whether the main component carries the given category name.
    #[must_use]
    pub fn has_category(&self, name: &str) -> bool {
        self.main_component()
            .is_some_and(|c| c.categories.iter().any(|cat| cat.name == name))
    }

    /// Collects the inline capability statuses into a snapshot.
    ///
    /// Empty when the descriptor was fetched without `includeStatus=true`.
    #[must_use]
    pub fn inline_status(&self) -> StatusSnapshot {
        let mut snapshot = StatusSnapshot::default();
        if let Some(component) = self.main_component() {
            for capability in &component.capabilities {
                if let Some(status) = &capability.status {
                    snapshot.insert(capability.id.clone(), status.clone());
                }
            }
        }
        snapshot
    }
}

/// A sub-addressable part of a device exposing capabilities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Component id (`"main"` for the primary component).
    #[serde(default)]
    pub id: String,

    /// Capabilities declared by this component.
    #[serde(default)]
    pub capabilities: Vec<CapabilityRef>,

    /// Platform-assigned categories (e.g. `"GarageDoor"`).
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// A declared capability, with its inline status when listed with
/// `includeStatus=true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityRef {
    /// Capability id (e.g. `"switch"`, `"doorControl"`).
    pub id: String,

    /// Last-known status, attribute name to value/unit pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CapabilityStatus>,
}

/// A category assigned to a component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    /// Category name.
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(value: serde_json::Value) -> DeviceDescriptor {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_platform_listing_entry() {
        let d = descriptor(json!({
            "deviceId": "device-1",
            "name": "Samsung OCF TV",
            "label": "Living Room TV",
            "deviceManufacturerCode": "Samsung Electronics",
            "type": "OCF",
            "components": [{
                "id": "main",
                "capabilities": [
                    {"id": "switch", "status": {"switch": {"value": "on"}}},
                    {"id": "audioVolume"}
                ],
                "categories": [{"name": "Television"}]
            }]
        }));

        assert_eq!(d.device_id, "device-1");
        assert_eq!(d.display_name(), "Living Room TV");
        assert!(d.declares_capability("switch"));
        assert!(d.declares_capability("audioVolume"));
        assert!(!d.declares_capability("doorControl"));
        assert!(d.has_category("Television"));
    }

    #[test]
    fn display_name_falls_back_to_product_name() {
        let d = descriptor(json!({"deviceId": "d", "name": "ecobee Sensor"}));
        assert_eq!(d.display_name(), "ecobee Sensor");
    }

    #[test]
    fn main_component_found_by_id_regardless_of_order() {
        let d = descriptor(json!({
            "deviceId": "d",
            "components": [
                {"id": "secondary", "capabilities": [{"id": "battery"}]},
                {"id": "main", "capabilities": [{"id": "switch"}]}
            ]
        }));

        assert_eq!(d.main_component().unwrap().id, "main");
        assert!(d.declares_capability("switch"));
        assert!(!d.declares_capability("battery"));
    }

    #[test]
    fn main_component_falls_back_to_first_without_the_id() {
        let d = descriptor(json!({
            "deviceId": "d",
            "components": [{"id": "only", "capabilities": [{"id": "switch"}]}]
        }));
        assert_eq!(d.main_component().unwrap().id, "only");
    }

    #[test]
    fn inline_status_collects_capability_statuses() {
        let d = descriptor(json!({
            "deviceId": "d",
            "components": [{
                "id": "main",
                "capabilities": [
                    {"id": "switch", "status": {"switch": {"value": "off"}}},
                    {"id": "refresh"}
                ]
            }]
        }));

        let snapshot = d.inline_status();
        assert_eq!(snapshot.value_str("switch", "switch"), Some("off"));
        assert!(!snapshot.has_capability("refresh"));
    }

    #[test]
    fn inline_status_empty_without_statuses() {
        let d = descriptor(json!({"deviceId": "d", "name": "Thing"}));
        assert!(d.inline_status().is_empty());
    }
}

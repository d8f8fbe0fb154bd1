// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capability status types.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One attribute's reported state: a value plus an optional unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeState {
    /// Reported value; `Null` when the platform has no reading.
    #[serde(default)]
    pub value: Value,

    /// Unit of measure (e.g. `"F"`, `"%"`), when the attribute has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Status of one capability: attribute name to [`AttributeState`].
pub type CapabilityStatus = HashMap<String, AttributeState>;

/// Per-device capability status map, keyed by capability id.
///
/// Once populated the snapshot is treated as authoritative until an
/// explicit refresh; mutating commands do not invalidate it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusSnapshot(HashMap<String, CapabilityStatus>);

impl StatusSnapshot {
    /// Returns whether the snapshot holds no capability at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the status of one capability.
    #[must_use]
    pub fn capability(&self, capability_id: &str) -> Option<&CapabilityStatus> {
        self.0.get(capability_id)
    }

    /// Returns whether the snapshot carries the given capability.
    #[must_use]
    pub fn has_capability(&self, capability_id: &str) -> bool {
        self.0.contains_key(capability_id)
    }

    /// Returns one attribute's state.
    #[must_use]
    pub fn attribute(&self, capability_id: &str, attribute: &str) -> Option<&AttributeState> {
        self.capability(capability_id)?.get(attribute)
    }

    /// Returns one attribute's value, `None` when absent or `Null`.
    #[must_use]
    pub fn value(&self, capability_id: &str, attribute: &str) -> Option<&Value> {
        let value = &self.attribute(capability_id, attribute)?.value;
        if value.is_null() { None } else { Some(value) }
    }

    /// Returns one attribute's value as a string slice.
    #[must_use]
    pub fn value_str(&self, capability_id: &str, attribute: &str) -> Option<&str> {
        self.value(capability_id, attribute)?.as_str()
    }

    /// Projects one attribute into a value+unit measurement.
    #[must_use]
    pub fn measurement(&self, capability_id: &str, attribute: &str) -> Option<Measurement> {
        let state = self.attribute(capability_id, attribute)?;
        Some(Measurement {
            value: state.value.as_f64()?,
            unit: state.unit.clone(),
        })
    }

    /// Iterates over the capability ids present in the snapshot.
    pub fn capabilities(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub(crate) fn insert(&mut self, capability_id: String, status: CapabilityStatus) {
        let _ = self.0.insert(capability_id, status);
    }
}

/// A numeric reading paired with its unit, e.g. a temperature of `72 F`.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// The numeric reading.
    pub value: f64,
    /// Unit as reported by the platform.
    pub unit: Option<String>,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{}{unit}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

/// Response shape of `GET /devices/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceStatusResponse {
    /// Component id to capability status map.
    #[serde(default)]
    pub components: HashMap<String, StatusSnapshot>,
}

impl DeviceStatusResponse {
    /// Extracts the `main` component's snapshot, when present.
    #[must_use]
    pub fn into_main(mut self) -> Option<StatusSnapshot> {
        self.components.remove("main")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: serde_json::Value) -> StatusSnapshot {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn attribute_lookup() {
        let s = snapshot(json!({
            "switch": {"switch": {"value": "on"}},
            "switchLevel": {"level": {"value": 40}}
        }));

        assert!(s.has_capability("switch"));
        assert_eq!(s.value_str("switch", "switch"), Some("on"));
        assert_eq!(s.value("switchLevel", "level"), Some(&json!(40)));
        assert!(s.value("switch", "missing").is_none());
        assert!(s.value_str("switchLevel", "level").is_none());
    }

    #[test]
    fn null_values_read_as_absent() {
        let s = snapshot(json!({"doorControl": {"door": {"value": null}}}));
        assert!(s.attribute("doorControl", "door").is_some());
        assert!(s.value("doorControl", "door").is_none());
    }

    #[test]
    fn measurement_with_unit() {
        let s = snapshot(json!({
            "temperatureMeasurement": {"temperature": {"value": 72.5, "unit": "F"}}
        }));
        let m = s.measurement("temperatureMeasurement", "temperature").unwrap();
        assert!((m.value - 72.5).abs() < f64::EPSILON);
        assert_eq!(m.unit.as_deref(), Some("F"));
        assert_eq!(m.to_string(), "72.5F");
    }

    #[test]
    fn measurement_renders_integers_without_decimals() {
        let s = snapshot(json!({
            "temperatureMeasurement": {"temperature": {"value": 72, "unit": "F"}}
        }));
        assert_eq!(
            s.measurement("temperatureMeasurement", "temperature")
                .unwrap()
                .to_string(),
            "72F"
        );
    }

    #[test]
    fn status_response_extracts_main_component() {
        let response: DeviceStatusResponse = serde_json::from_value(json!({
            "components": {
                "main": {"switch": {"switch": {"value": "off"}}}
            }
        }))
        .unwrap();

        let main = response.into_main().unwrap();
        assert_eq!(main.value_str("switch", "switch"), Some("off"));
    }

    #[test]
    fn status_response_without_main_component() {
        let response: DeviceStatusResponse =
            serde_json::from_value(json!({"components": {}})).unwrap();
        assert!(response.into_main().is_none());
    }
}

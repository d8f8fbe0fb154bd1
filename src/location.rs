// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Location metadata and rooms.
//!
//! Read-only views over the platform's location API. Like status reads,
//! these degrade on failure (`None` / empty) instead of erroring; location
//! data is decorative next to device control.

use std::sync::Arc;

use serde::Deserialize;

use crate::transport::{Method, Transport};

/// Handle to one location's metadata and rooms.
#[derive(Debug)]
pub struct Locations {
    transport: Arc<Transport>,
    location_id: String,
}

impl Locations {
    #[must_use]
    pub(crate) fn new(transport: Arc<Transport>, location_id: String) -> Self {
        Self {
            transport,
            location_id,
        }
    }

    /// Returns the location id this handle targets.
    #[must_use]
    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    fn encoded_id(&self) -> String {
        urlencoding::encode(&self.location_id).into_owned()
    }

    /// Fetches the location's metadata, `None` on any failure.
    pub async fn info(&self) -> Option<Location> {
        let path = format!("locations/{}", self.encoded_id());
        let response = self.transport.call(Method::GET, &path, None).await.ok()?;
        if !response.is_ok() {
            tracing::debug!(code = response.code, "location fetch failed");
            return None;
        }
        response.decode().ok()
    }

    /// Fetches the location's rooms, empty on any failure.
    pub async fn rooms(&self) -> Vec<Room> {
        let path = format!("locations/{}/rooms", self.encoded_id());
        let Ok(response) = self.transport.call(Method::GET, &path, None).await else {
            return Vec::new();
        };
        if !response.is_ok() {
            return Vec::new();
        }
        response
            .decode::<RoomListing>()
            .map(|listing| listing.items)
            .unwrap_or_default()
    }

    /// Fetches one room by id, `None` on any failure.
    pub async fn room(&self, room_id: &str) -> Option<Room> {
        let path = format!(
            "locations/{}/rooms/{}",
            self.encoded_id(),
            urlencoding::encode(room_id)
        );
        let response = self.transport.call(Method::GET, &path, None).await.ok()?;
        if !response.is_ok() {
            return None;
        }
        response.decode().ok()
    }
}

#[derive(Debug, Deserialize)]
struct RoomListing {
    #[serde(default)]
    items: Vec<Room>,
}

/// A location's metadata record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Unique location id.
    pub location_id: String,

    /// User-assigned location name.
    #[serde(default)]
    pub name: String,

    /// ISO country code.
    #[serde(default)]
    pub country_code: Option<String>,

    /// Preferred temperature scale (`"F"` or `"C"`).
    #[serde(default)]
    pub temperature_scale: Option<String>,

    /// IANA time zone id.
    #[serde(default)]
    pub time_zone_id: Option<String>,
}

/// A room within a location.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique room id.
    pub room_id: String,

    /// Owning location id.
    #[serde(default)]
    pub location_id: Option<String>,

    /// User-assigned room name.
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_location_record() {
        let location: Location = serde_json::from_value(json!({
            "locationId": "loc-1",
            "name": "Home",
            "countryCode": "USA",
            "temperatureScale": "F",
            "timeZoneId": "America/New_York"
        }))
        .unwrap();

        assert_eq!(location.location_id, "loc-1");
        assert_eq!(location.name, "Home");
        assert_eq!(location.temperature_scale.as_deref(), Some("F"));
    }

    #[test]
    fn decodes_room_listing() {
        let listing: RoomListing = serde_json::from_value(json!({
            "items": [
                {"roomId": "r-1", "locationId": "loc-1", "name": "Kitchen"},
                {"roomId": "r-2", "name": "Garage"}
            ]
        }))
        .unwrap();

        assert_eq!(listing.items.len(), 2);
        assert_eq!(listing.items[0].name, "Kitchen");
        assert!(listing.items[1].location_id.is_none());
    }

    #[test]
    fn room_listing_defaults_to_empty() {
        let listing: RoomListing = serde_json::from_value(json!({})).unwrap();
        assert!(listing.items.is_empty());
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Samsung TV.
//!
//! The widest capability surface of any variant: volume, mute, channels,
//! input sources, media playback and track control, plus the
//! Samsung-specific picture and sound mode capabilities. Argument range
//! checks happen locally and report `Ok(false)` without touching the
//! network, matching how the platform itself reports a rejected command.

use serde_json::Value;

use crate::device::{DeviceControl, DeviceCore, Interface, Tristate};
use crate::error::Result;
use crate::transport::CommandRequest;

/// A Samsung OCF television.
#[derive(Debug)]
pub struct Tv {
    core: DeviceCore,
}

impl Tv {
    /// Interfaces declared by this variant.
    pub const INTERFACES: &'static [Interface] = &[];

    #[must_use]
    pub(crate) fn new(core: DeviceCore) -> Self {
        Self { core }
    }

    // ====== volume ======

    /// Raises the volume one step.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn volume_up(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("audioVolume", "volumeUp"))
            .await
    }

    /// Lowers the volume one step.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn volume_down(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("audioVolume", "volumeDown"))
            .await
    }

    /// Sets the volume to an absolute 0-100 value.
    ///
    /// Values above 100 are rejected locally as `Ok(false)` without a
    /// network call.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn set_volume(&self, volume: u8) -> Result<bool> {
        if volume > 100 {
            tracing::warn!(device = %self.device_id(), volume, "volume out of range");
            return Ok(false);
        }
        self.core
            .execute(
                CommandRequest::new("audioVolume", "setVolume")
                    .with_arguments(vec![u64::from(volume).into()]),
            )
            .await
    }

    /// Returns the current volume from a live read.
    pub async fn volume(&self) -> Option<u8> {
        let status = self.core.capability_status("audioVolume").await?;
        let value = status.get("volume")?.value.as_u64()?;
        u8::try_from(value).ok()
    }

    // ====== mute ======

    /// Mutes the audio.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn mute(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("audioMute", "mute"))
            .await
    }

    /// Unmutes the audio.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn unmute(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("audioMute", "unmute"))
            .await
    }

    /// Returns whether the audio is muted, from a live read.
    pub async fn is_muted(&self) -> Tristate {
        self.core
            .attribute_tristate("audioMute", "mute", "muted", "unmuted")
            .await
    }

    // ====== channels ======

    /// Steps one channel up.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn channel_up(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("tvChannel", "channelUp"))
            .await
    }

    /// Steps one channel down.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn channel_down(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("tvChannel", "channelDown"))
            .await
    }

    /// Tunes to a channel number.
    ///
    /// The platform takes the channel as a string; zero is rejected
    /// locally as `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn set_channel(&self, channel: u32) -> Result<bool> {
        if channel == 0 {
            tracing::warn!(device = %self.device_id(), "channel must be positive");
            return Ok(false);
        }
        self.core
            .execute(
                CommandRequest::new("tvChannel", "setTvChannel")
                    .with_arguments(vec![channel.to_string().into()]),
            )
            .await
    }

    /// Tunes to a channel by name.
    ///
    /// Names over 255 characters are rejected locally as `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn set_channel_name(&self, name: &str) -> Result<bool> {
        if name.is_empty() || name.len() > 255 {
            tracing::warn!(device = %self.device_id(), "channel name empty or too long");
            return Ok(false);
        }
        self.core
            .execute(
                CommandRequest::new("tvChannel", "setTvChannelName")
                    .with_arguments(vec![name.into()]),
            )
            .await
    }

    /// Returns the tuned channel number as reported, empty when
    /// unavailable.
    pub async fn channel(&self) -> String {
        self.core.attribute_string("tvChannel", "tvChannel").await
    }

    /// Returns the tuned channel name, empty when unavailable.
    pub async fn channel_name(&self) -> String {
        self.core
            .attribute_string("tvChannel", "tvChannelName")
            .await
    }

    // ====== input sources ======

    /// Switches to the named input source (e.g. `"HDMI1"`).
    ///
    /// Empty names and names over 255 characters are rejected locally as
    /// `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn set_source(&self, source: &str) -> Result<bool> {
        if source.is_empty() || source.len() > 255 {
            tracing::warn!(device = %self.device_id(), "input source name empty or too long");
            return Ok(false);
        }
        self.core
            .execute(
                CommandRequest::new("mediaInputSource", "setInputSource")
                    .with_arguments(vec![source.into()]),
            )
            .await
    }

    /// Returns the input sources the TV reports as selectable.
    pub async fn sources(&self) -> Vec<String> {
        let status = self.core.capability_status("mediaInputSource").await;
        status
            .and_then(|s| {
                s.get("supportedInputSources")
                    .map(|state| string_list(&state.value))
            })
            .unwrap_or_default()
    }

    /// Returns the currently selected input source, empty when
    /// unavailable.
    pub async fn selected_source(&self) -> String {
        self.core
            .attribute_string("mediaInputSource", "inputSource")
            .await
    }

    // ====== media playback ======

    /// Starts playback.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn play(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("mediaPlayback", "play"))
            .await
    }

    /// Pauses playback.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn pause(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("mediaPlayback", "pause"))
            .await
    }

    /// Stops playback.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn stop(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("mediaPlayback", "stop"))
            .await
    }

    /// Fast-forwards playback.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn fast_forward(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("mediaPlayback", "fastForward"))
            .await
    }

    /// Rewinds playback.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn rewind(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("mediaPlayback", "rewind"))
            .await
    }

    /// Skips to the next track.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn next_track(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("mediaTrackControl", "nextTrack"))
            .await
    }

    /// Skips to the previous track.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn previous_track(&self) -> Result<bool> {
        self.core
            .execute(CommandRequest::new("mediaTrackControl", "previousTrack"))
            .await
    }

    /// Returns the playback status (`"playing"`, `"paused"`, ...), empty
    /// when unavailable.
    pub async fn playback_status(&self) -> String {
        self.core
            .attribute_string("mediaPlayback", "playbackStatus")
            .await
    }

    // ====== picture and sound modes ======

    /// Returns the active picture mode name, empty when unavailable.
    pub async fn picture_mode(&self) -> String {
        self.core
            .attribute_string("custom.picturemode", "pictureMode")
            .await
    }

    /// Selects a picture mode by 1-based position in the TV's supported
    /// mode list.
    ///
    /// The supported list comes from the cached snapshot; an index outside
    /// it is rejected locally as `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn set_picture_mode(&self, index: usize) -> Result<bool> {
        let modes = self
            .supported_modes("custom.picturemode", "supportedPictureModes")
            .await;
        let Some(mode) = index.checked_sub(1).and_then(|i| modes.get(i)) else {
            tracing::warn!(device = %self.device_id(), index, "picture mode index out of range");
            return Ok(false);
        };
        self.core
            .execute(
                CommandRequest::new("custom.picturemode", "setPictureMode")
                    .with_arguments(vec![mode.as_str().into()]),
            )
            .await
    }

    /// Returns the active sound mode name, empty when unavailable.
    pub async fn sound_mode(&self) -> String {
        self.core
            .attribute_string("custom.soundmode", "soundMode")
            .await
    }

    /// Selects a sound mode by 1-based position in the TV's supported
    /// mode list.
    ///
    /// # Errors
    ///
    /// Returns error when the HTTP request fails.
    pub async fn set_sound_mode(&self, index: usize) -> Result<bool> {
        let modes = self
            .supported_modes("custom.soundmode", "supportedSoundModes")
            .await;
        let Some(mode) = index.checked_sub(1).and_then(|i| modes.get(i)) else {
            tracing::warn!(device = %self.device_id(), index, "sound mode index out of range");
            return Ok(false);
        };
        self.core
            .execute(
                CommandRequest::new("custom.soundmode", "setSoundMode")
                    .with_arguments(vec![mode.as_str().into()]),
            )
            .await
    }

    async fn supported_modes(&self, capability: &str, attribute: &str) -> Vec<String> {
        if let Some(snapshot) = self.core.status(false).await {
            if let Some(value) = snapshot.value(capability, attribute) {
                return string_list(value);
            }
        }
        // The seeded cache may predate the capability; fall back to a live
        // read before declaring the list empty.
        self.core
            .capability_status(capability)
            .await
            .and_then(|s| s.get(attribute).map(|state| string_list(&state.value)))
            .unwrap_or_default()
    }
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(ToString::to_string))
                .collect()
        })
        .unwrap_or_default()
}

impl DeviceControl for Tv {
    fn core(&self) -> &DeviceCore {
        &self.core
    }
}

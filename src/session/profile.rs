//! Audio session configuration value types
//!
//! A profile is built once at track construction and never mutated; one
//! profile may be shared between tracks.

use serde::{Deserialize, Serialize};

/// Audio session category (what the session is used for)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudioCategory {
    Playback,
    Record,
    PlayAndRecord,
}

/// Audio session mode (how routing and processing are tuned)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudioMode {
    Default,
    VoiceChat,
    VideoChat,
}

/// Category routing options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOptions {
    pub duck_others: bool,
    pub mix_with_others: bool,
    pub default_to_speaker: bool,
}

/// Audio-processing constraints applied when creating an audio source
///
/// All five flags are permanently enabled in this layer; the default value
/// is the only one ever used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioProcessingConstraints {
    pub echo_cancellation: bool,
    pub auto_gain_control: bool,
    pub noise_suppression: bool,
    pub typing_noise_detection: bool,
    pub highpass_filter: bool,
}

impl Default for AudioProcessingConstraints {
    fn default() -> Self {
        Self {
            echo_cancellation: true,
            auto_gain_control: true,
            noise_suppression: true,
            typing_noise_detection: true,
            highpass_filter: true,
        }
    }
}

/// Immutable device audio session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSessionProfile {
    pub category: AudioCategory,
    pub mode: AudioMode,
    pub options: CategoryOptions,
    pub processing: AudioProcessingConstraints,
}

impl AudioSessionProfile {
    /// Profile for two-way video calls: play-and-record, video chat mode,
    /// ducking other audio while active.
    pub fn video_chat() -> Self {
        Self {
            category: AudioCategory::PlayAndRecord,
            mode: AudioMode::VideoChat,
            options: CategoryOptions {
                duck_others: true,
                mix_with_others: false,
                default_to_speaker: false,
            },
            processing: AudioProcessingConstraints::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_chat_profile_shape() {
        let profile = AudioSessionProfile::video_chat();
        assert_eq!(profile.category, AudioCategory::PlayAndRecord);
        assert_eq!(profile.mode, AudioMode::VideoChat);
        assert!(profile.options.duck_others);
    }

    #[test]
    fn test_processing_constraints_all_enabled_by_default() {
        let c = AudioProcessingConstraints::default();
        assert!(
            c.echo_cancellation
                && c.auto_gain_control
                && c.noise_suppression
                && c.typing_noise_detection
                && c.highpass_filter,
            "every processing flag must be enabled"
        );
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let json = serde_json::to_value(AudioSessionProfile::video_chat()).unwrap();
        assert_eq!(json["category"], "playAndRecord");
        assert_eq!(json["mode"], "videoChat");
        assert_eq!(json["processing"]["echoCancellation"], true);
    }
}

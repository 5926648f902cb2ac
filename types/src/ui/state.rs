//! Settings and render snapshots for the profile widgets.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_volume() -> f32 {
    0.5
}

/// Mute and volume settings handed to an audio controller.
///
/// Each controller gets its own copy; there is no process-wide mute flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Gate new sound-effect playback (clicks, boot loop, level-up).
    #[serde(default)]
    pub sfx_muted: bool,
    /// Gate new background-music playback.
    #[serde(default)]
    pub music_muted: bool,
    #[serde(default = "default_volume")]
    pub volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sfx_muted: false,
            music_muted: false,
            volume: default_volume(),
        }
    }
}

impl AudioSettings {
    /// Volume clamped to `[0, 1]`; NaN counts as silent.
    #[must_use]
    pub fn clamped_volume(&self) -> f32 {
        if self.volume.is_nan() {
            0.0
        } else {
            self.volume.clamp(0.0, 1.0)
        }
    }
}

/// Boot phase of the profile. Terminal once `Awakened`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AwakeningState {
    #[default]
    Booting,
    Awakened,
}

/// Glyph shown next to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Icon {
    #[default]
    System,
    LevelUp,
    Warning,
    /// Icon asset looked up by name by the renderer.
    Named(String),
}

/// What the notification slot shows right now.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationState {
    pub visible: bool,
    pub message: String,
    pub icon: Icon,
    /// Session clock reading when the message was shown.
    pub since: Duration,
}

impl NotificationState {
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            visible: false,
            message: String::new(),
            icon: Icon::default(),
            since: Duration::ZERO,
        }
    }
}

/// Severity of a toast; selects its colour and glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
    #[default]
    Info,
}

impl ToastLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    /// Active slide, always `< len` of the owning carousel.
    pub index: usize,
    /// Starts `true`; latches to `false` on the first manual navigation.
    pub auto_playing: bool,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self {
            index: 0,
            auto_playing: true,
        }
    }
}

/// Local view of an endorsement counter, layered over the remote value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EndorsementOverlay {
    pub count: u64,
    pub endorsed: bool,
}

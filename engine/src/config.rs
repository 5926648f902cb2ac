//! `~/.awaken/config.toml`.
//!
//! ```toml
//! [audio]
//! sfx_muted = false
//! music_muted = true
//! volume = 0.4
//!
//! [awakening]
//! boot_delay_ms = 1500
//! notification_ms = 4000
//! message = "You have awakened."
//!
//! [typewriter]
//! roles = ["Backend Engineer", "Rustacean"]
//! hold_ms = 2000
//!
//! [carousel]
//! interval_ms = 6000
//!
//! [remote]
//! base_url = "https://profile.example.com/api"
//! ```
//!
//! Every section and key is optional; missing values fall back to defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

use awaken_types::ui::{AudioSettings, Icon, ToastLevel};
use awaken_types::{EffectId, NonEmptyStaticStr, NonEmptyString};

use crate::awakening::AwakeningConfig;
use crate::carousel::DEFAULT_ADVANCE_INTERVAL;
use crate::toast::DEFAULT_EXIT_DURATION;
use crate::typewriter::TypewriterConfig;

const CONFIG_ENV_VAR: &str = "AWAKEN_CONFIG";

const DEFAULT_ROLES: [NonEmptyStaticStr; 3] = [
    NonEmptyStaticStr::new("Software Engineer"),
    NonEmptyStaticStr::new("Systems Programmer"),
    NonEmptyStaticStr::new("Open Source Contributor"),
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid {field} in {}: {reason}", path.display())]
    Invalid {
        path: PathBuf,
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwakenConfig {
    #[serde(default)]
    pub audio: AudioSettings,
    pub awakening: Option<AwakeningSection>,
    pub typewriter: Option<TypewriterSection>,
    pub carousel: Option<CarouselSection>,
    pub notifications: Option<NotificationSection>,
    pub toast: Option<ToastSection>,
    pub remote: Option<RemoteSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AwakeningSection {
    pub boot_delay_ms: Option<u64>,
    pub notification_ms: Option<u64>,
    pub message: Option<NonEmptyString>,
    pub boot_sound: Option<EffectId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TypewriterSection {
    pub roles: Option<Vec<NonEmptyString>>,
    pub type_interval_ms: Option<u64>,
    pub delete_interval_ms: Option<u64>,
    pub hold_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CarouselSection {
    pub interval_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NotificationSection {
    /// Visible time for level-up notifications.
    pub level_up_ms: Option<u64>,
    pub level_up_sound: Option<EffectId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToastSection {
    pub duration_ms: Option<u64>,
    pub exit_ms: Option<u64>,
    /// Level used for endorsement confirmations. Failures stay silent.
    pub endorse_level: Option<ToastLevel>,
}

/// Endpoints of the hosted content store.
#[derive(Debug, Default, Deserialize)]
pub struct RemoteSection {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

fn millis(value: Option<u64>, default: Duration) -> Duration {
    value.map_or(default, Duration::from_millis)
}

impl AwakenConfig {
    /// Config file location: `$AWAKEN_CONFIG`, else `~/.awaken/config.toml`.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|home| home.join(".awaken").join("config.toml"))
    }

    /// Load from the default location. `Ok(None)` when no file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Load from `path`. `Ok(None)` when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate(path)?;
        Ok(Some(config))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &'static str| ConfigError::Invalid {
            path: path.to_path_buf(),
            field,
            reason,
        };
        if self
            .typewriter
            .as_ref()
            .and_then(|t| t.roles.as_ref())
            .is_some_and(Vec::is_empty)
        {
            return Err(invalid("typewriter.roles", "must list at least one role"));
        }
        if self
            .carousel
            .as_ref()
            .and_then(|c| c.interval_ms)
            .is_some_and(|ms| ms == 0)
        {
            return Err(invalid("carousel.interval_ms", "must be positive"));
        }
        if let Some(typewriter) = &self.typewriter {
            for (field, value) in [
                ("typewriter.type_interval_ms", typewriter.type_interval_ms),
                ("typewriter.delete_interval_ms", typewriter.delete_interval_ms),
                ("typewriter.hold_ms", typewriter.hold_ms),
            ] {
                if value == Some(0) {
                    return Err(invalid(field, "must be positive"));
                }
            }
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(invalid("audio.volume", "must be between 0 and 1"));
        }
        Ok(())
    }

    #[must_use]
    pub fn awakening(&self) -> AwakeningConfig {
        let defaults = AwakeningConfig::default();
        let Some(section) = &self.awakening else {
            return defaults;
        };
        AwakeningConfig {
            boot_delay: millis(section.boot_delay_ms, defaults.boot_delay),
            boot_sound: section.boot_sound.clone().unwrap_or(defaults.boot_sound),
            message: section.message.clone().unwrap_or(defaults.message),
            icon: Icon::System,
            notification_duration: millis(
                section.notification_ms,
                defaults.notification_duration,
            ),
        }
    }

    #[must_use]
    pub fn typewriter(&self) -> TypewriterConfig {
        let defaults = TypewriterConfig::default();
        let Some(section) = &self.typewriter else {
            return defaults;
        };
        TypewriterConfig {
            type_interval: millis(section.type_interval_ms, defaults.type_interval),
            delete_interval: millis(section.delete_interval_ms, defaults.delete_interval),
            hold: millis(section.hold_ms, defaults.hold),
        }
    }

    #[must_use]
    pub fn roles(&self) -> Vec<NonEmptyString> {
        self.typewriter
            .as_ref()
            .and_then(|t| t.roles.clone())
            .filter(|roles| !roles.is_empty())
            .unwrap_or_else(|| DEFAULT_ROLES.into_iter().map(NonEmptyString::from).collect())
    }

    #[must_use]
    pub fn carousel_interval(&self) -> Duration {
        millis(
            self.carousel.as_ref().and_then(|c| c.interval_ms),
            DEFAULT_ADVANCE_INTERVAL,
        )
    }

    #[must_use]
    pub fn level_up_duration(&self) -> Duration {
        millis(
            self.notifications.as_ref().and_then(|n| n.level_up_ms),
            Duration::from_millis(4_000),
        )
    }

    #[must_use]
    pub fn level_up_sound(&self) -> EffectId {
        self.notifications
            .as_ref()
            .and_then(|n| n.level_up_sound.clone())
            .unwrap_or_else(|| EffectId::new("level_up"))
    }

    #[must_use]
    pub fn toast_duration(&self) -> Duration {
        millis(
            self.toast.as_ref().and_then(|t| t.duration_ms),
            Duration::from_millis(3_000),
        )
    }

    #[must_use]
    pub fn toast_exit(&self) -> Duration {
        millis(
            self.toast.as_ref().and_then(|t| t.exit_ms),
            DEFAULT_EXIT_DURATION,
        )
    }

    #[must_use]
    pub fn endorse_toast_level(&self) -> ToastLevel {
        self.toast
            .as_ref()
            .and_then(|t| t.endorse_level)
            .unwrap_or(ToastLevel::Success)
    }

    #[must_use]
    pub fn remote_base_url(&self) -> Option<&str> {
        self.remote
            .as_ref()
            .and_then(|r| r.base_url.as_deref())
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    #[must_use]
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(
            self.remote
                .as_ref()
                .and_then(|r| r.timeout_secs)
                .unwrap_or(10),
        )
    }
}

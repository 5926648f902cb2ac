//! Sound-effect and background-music control.
//!
//! The controller gates playback requests on its own [`AudioSettings`] and
//! tracks the handles of looping effects it started. Muting only affects
//! future requests; anything already playing keeps playing.
//!
//! Playback is best-effort. Backend failures (autoplay denied, missing asset)
//! are logged and swallowed, and are never retried.

use std::collections::HashMap;

use thiserror::Error;

use awaken_types::ui::AudioSettings;
use awaken_types::{EffectId, PlaybackHandle};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("playback denied by host: {0}")]
    Denied(String),
    #[error("unknown sound effect `{0}`")]
    UnknownEffect(EffectId),
    #[error("audio output unavailable")]
    Unavailable,
}

/// Platform playback primitive.
pub trait AudioBackend {
    fn play(&mut self, effect: &EffectId, looped: bool) -> Result<PlaybackHandle, PlaybackError>;
    fn stop(&mut self, handle: PlaybackHandle);
    fn set_volume(&mut self, volume: f32);
}

/// Backend for headless use: every request succeeds and is logged.
#[derive(Debug, Default)]
pub struct TracingBackend {
    next_handle: u64,
}

impl AudioBackend for TracingBackend {
    fn play(&mut self, effect: &EffectId, looped: bool) -> Result<PlaybackHandle, PlaybackError> {
        self.next_handle += 1;
        let handle = PlaybackHandle::new(self.next_handle);
        tracing::debug!(%effect, looped, %handle, "play");
        Ok(handle)
    }

    fn stop(&mut self, handle: PlaybackHandle) {
        tracing::debug!(%handle, "stop");
    }

    fn set_volume(&mut self, volume: f32) {
        tracing::debug!(volume, "set volume");
    }
}

#[derive(Debug)]
pub struct AudioController<B> {
    backend: B,
    settings: AudioSettings,
    loops: HashMap<EffectId, PlaybackHandle>,
    music: Option<(EffectId, PlaybackHandle)>,
}

impl<B: AudioBackend> AudioController<B> {
    pub fn new(mut backend: B, settings: AudioSettings) -> Self {
        backend.set_volume(settings.clamped_volume());
        Self {
            backend,
            settings,
            loops: HashMap::new(),
            music: None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> AudioSettings {
        self.settings
    }

    pub fn set_sfx_muted(&mut self, muted: bool) {
        self.settings.sfx_muted = muted;
    }

    pub fn set_music_muted(&mut self, muted: bool) {
        self.settings.music_muted = muted;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.settings.volume = volume;
        self.backend.set_volume(self.settings.clamped_volume());
    }

    /// Fire-and-forget effect. Returns whether playback started.
    pub fn play_once(&mut self, effect: &EffectId) -> bool {
        if self.settings.sfx_muted {
            return false;
        }
        self.start(effect, false).is_some()
    }

    /// Start a looping effect unless it is already looping.
    pub fn play_loop(&mut self, effect: &EffectId) -> bool {
        if self.loops.contains_key(effect) {
            return true;
        }
        if self.settings.sfx_muted {
            return false;
        }
        match self.start(effect, true) {
            Some(handle) => {
                self.loops.insert(effect.clone(), handle);
                true
            }
            None => false,
        }
    }

    /// Stop a looping effect. Returns whether one was playing.
    pub fn stop_loop(&mut self, effect: &EffectId) -> bool {
        match self.loops.remove(effect) {
            Some(handle) => {
                self.backend.stop(handle);
                true
            }
            None => false,
        }
    }

    /// Start the background track, replacing any other track.
    pub fn play_music(&mut self, track: &EffectId) -> bool {
        if self
            .music
            .as_ref()
            .is_some_and(|(current, _)| current == track)
        {
            return true;
        }
        if self.settings.music_muted {
            return false;
        }
        self.stop_music();
        match self.start(track, true) {
            Some(handle) => {
                self.music = Some((track.clone(), handle));
                true
            }
            None => false,
        }
    }

    pub fn stop_music(&mut self) -> bool {
        match self.music.take() {
            Some((_, handle)) => {
                self.backend.stop(handle);
                true
            }
            None => false,
        }
    }

    /// Stop every loop and the background track.
    pub fn stop_all(&mut self) {
        for (_, handle) in self.loops.drain() {
            self.backend.stop(handle);
        }
        self.stop_music();
    }

    #[must_use]
    pub fn is_looping(&self, effect: &EffectId) -> bool {
        self.loops.contains_key(effect)
    }

    /// Number of live looping handles, background track included.
    #[must_use]
    pub fn active_loops(&self) -> usize {
        self.loops.len() + usize::from(self.music.is_some())
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn start(&mut self, effect: &EffectId, looped: bool) -> Option<PlaybackHandle> {
        match self.backend.play(effect, looped) {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(%effect, looped, "Playback failed: {e}");
                None
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingBackend;
    use super::{AudioController, AudioSettings};
    use awaken_types::EffectId;

    fn controller() -> AudioController<RecordingBackend> {
        AudioController::new(RecordingBackend::default(), AudioSettings::default())
    }

    #[test]
    fn sfx_mute_gates_new_playback() {
        let mut audio = controller();
        audio.set_sfx_muted(true);
        assert!(!audio.play_once(&EffectId::new("click")));
        assert!(!audio.play_loop(&EffectId::new("hum")));
        assert!(audio.backend().started.is_empty());
    }

    #[test]
    fn muting_does_not_stop_running_loop() {
        let mut audio = controller();
        let hum = EffectId::new("hum");
        assert!(audio.play_loop(&hum));
        audio.set_sfx_muted(true);
        assert!(audio.is_looping(&hum));
        assert_eq!(audio.backend().playing.len(), 1);
    }

    #[test]
    fn loop_is_started_once_and_stopped() {
        let mut audio = controller();
        let hum = EffectId::new("hum");
        assert!(audio.play_loop(&hum));
        assert!(audio.play_loop(&hum));
        assert_eq!(audio.backend().started.len(), 1);
        assert!(audio.stop_loop(&hum));
        assert!(!audio.stop_loop(&hum));
        assert_eq!(audio.active_loops(), 0);
        assert!(audio.backend().playing.is_empty());
    }

    #[test]
    fn denied_playback_degrades_silently() {
        let backend = RecordingBackend {
            deny: true,
            ..RecordingBackend::default()
        };
        let mut audio = AudioController::new(backend, AudioSettings::default());
        assert!(!audio.play_once(&EffectId::new("click")));
        assert!(!audio.play_loop(&EffectId::new("hum")));
        assert_eq!(audio.active_loops(), 0);
    }

    #[test]
    fn music_mute_is_independent_of_sfx() {
        let mut audio = controller();
        audio.set_music_muted(true);
        assert!(!audio.play_music(&EffectId::new("theme")));
        assert!(audio.play_once(&EffectId::new("click")));

        audio.set_music_muted(false);
        assert!(audio.play_music(&EffectId::new("theme")));
        assert!(audio.play_music(&EffectId::new("battle")));
        assert_eq!(audio.active_loops(), 1);
        assert_eq!(audio.backend().playing.len(), 1);
    }

    #[test]
    fn volume_is_forwarded_clamped() {
        let mut audio = controller();
        assert_eq!(audio.backend().volume, Some(0.5));
        audio.set_volume(4.0);
        assert_eq!(audio.backend().volume, Some(1.0));
    }

    #[test]
    fn stop_all_releases_every_handle() {
        let mut audio = controller();
        audio.play_loop(&EffectId::new("a"));
        audio.play_loop(&EffectId::new("b"));
        audio.play_music(&EffectId::new("theme"));
        assert_eq!(audio.active_loops(), 3);
        audio.stop_all();
        assert_eq!(audio.active_loops(), 0);
        assert!(audio.backend().playing.is_empty());
    }
}

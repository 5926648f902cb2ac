//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::collections::HashSet;
use std::time::Duration;

use awaken_engine::{
    AudioBackend, EffectId, NonEmptyString, PlaybackError, PlaybackHandle, Profile, Session,
    SessionEvent, SessionSettings,
};

pub const fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Audio backend that remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub started: Vec<(EffectId, bool)>,
    pub playing: HashSet<PlaybackHandle>,
    next: u64,
}

impl AudioBackend for RecordingAudio {
    fn play(&mut self, effect: &EffectId, looped: bool) -> Result<PlaybackHandle, PlaybackError> {
        self.next += 1;
        let handle = PlaybackHandle::new(self.next);
        self.started.push((effect.clone(), looped));
        if looped {
            self.playing.insert(handle);
        }
        Ok(handle)
    }

    fn stop(&mut self, handle: PlaybackHandle) {
        self.playing.remove(&handle);
    }

    fn set_volume(&mut self, _volume: f32) {}
}

pub fn roles(names: &[&str]) -> Vec<NonEmptyString> {
    names
        .iter()
        .map(|name| NonEmptyString::new(*name).unwrap())
        .collect()
}

pub fn mount(settings: SessionSettings, profile: Profile) -> Session<RecordingAudio> {
    Session::mount(ms(0), settings, profile, RecordingAudio::default()).unwrap()
}

pub fn role_frames(events: &[SessionEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            SessionEvent::RoleText(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

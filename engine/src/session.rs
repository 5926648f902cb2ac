//! One mounted profile: every widget state machine plus the side effects that
//! connect them.
//!
//! The session is the single writer of all component state. Mutations happen
//! synchronously; anything the presentation layer should react to is pushed to
//! an outbox and drained with [`Session::take_events`].

use std::mem::take;
use std::time::Duration;

use thiserror::Error;

use awaken_types::ui::{
    AudioSettings, AwakeningState, CarouselState, EndorsementOverlay, Icon, NotificationState,
    ToastLevel,
};
use awaken_types::{EffectId, NonEmptyString, ProgressionError, ProgressionState, SubjectId};

use crate::audio::{AudioBackend, AudioController};
use crate::awakening::{AwakeningConfig, AwakeningSequencer};
use crate::carousel::{CarouselController, CarouselError};
use crate::config::AwakenConfig;
use crate::endorsement::{EndorsementBook, MutationTicket, Settlement};
use crate::notifications::NotificationSlot;
use crate::progression::{ExperienceGain, ProgressionEngine};
use crate::remote::RemoteError;
use crate::toast::{Toast, ToastEvent};
use crate::typewriter::{TypewriterConfig, TypewriterCycler, TypewriterError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Typewriter(#[from] TypewriterError),
}

/// Content-feed values the session starts from. Opaque beyond these numbers.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub progression: ProgressionState,
    /// Number of slides in the featured-projects carousel.
    pub featured: usize,
    /// Remote endorsement counts per skill.
    pub endorsements: Vec<(SubjectId, u64)>,
}

/// Tunables for one session, usually derived from [`AwakenConfig`].
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub audio: AudioSettings,
    pub awakening: AwakeningConfig,
    pub typewriter: TypewriterConfig,
    pub roles: Vec<NonEmptyString>,
    pub carousel_interval: Duration,
    pub level_up_duration: Duration,
    pub level_up_sound: EffectId,
    pub music_track: EffectId,
    pub toast_duration: Duration,
    pub toast_exit: Duration,
    pub endorse_toast_level: ToastLevel,
}

impl From<&AwakenConfig> for SessionSettings {
    fn from(config: &AwakenConfig) -> Self {
        Self {
            audio: config.audio,
            awakening: config.awakening(),
            typewriter: config.typewriter(),
            roles: config.roles(),
            carousel_interval: config.carousel_interval(),
            level_up_duration: config.level_up_duration(),
            level_up_sound: config.level_up_sound(),
            music_track: EffectId::new("theme"),
            toast_duration: config.toast_duration(),
            toast_exit: config.toast_exit(),
            endorse_toast_level: config.endorse_toast_level(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&AwakenConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Awakened,
    NotificationShown(NotificationState),
    NotificationDismissed,
    RoleText(String),
    Carousel(CarouselState),
    ToastShown {
        message: String,
        level: ToastLevel,
    },
    Toast(ToastEvent),
    Experience(ExperienceGain),
    Endorsement {
        subject: SubjectId,
        overlay: EndorsementOverlay,
    },
    Audio(AudioSettings),
}

#[derive(Debug)]
pub struct Session<B> {
    settings: SessionSettings,
    audio: AudioController<B>,
    progression: ProgressionEngine,
    awakening: Option<AwakeningSequencer>,
    awakening_state: AwakeningState,
    notifications: NotificationSlot,
    toast: Toast,
    typewriter: TypewriterCycler,
    carousel: CarouselController,
    endorsements: EndorsementBook,
    outbox: Vec<SessionEvent>,
}

impl<B: AudioBackend> Session<B> {
    /// Mount the profile at session time `now`; the boot sequence starts immediately.
    pub fn mount(
        now: Duration,
        settings: SessionSettings,
        profile: Profile,
        backend: B,
    ) -> Result<Self, SessionError> {
        let typewriter = TypewriterCycler::new(settings.roles.clone(), settings.typewriter)?;
        let mut audio = AudioController::new(backend, settings.audio);
        let awakening = AwakeningSequencer::mount(now, settings.awakening.clone(), &mut audio);
        let carousel = CarouselController::new(now, profile.featured, settings.carousel_interval);

        let mut endorsements = EndorsementBook::new();
        for (subject, count) in profile.endorsements {
            endorsements.seed(subject, count);
        }

        tracing::info!(
            level = profile.progression.level(),
            featured = profile.featured,
            "session mounted"
        );

        Ok(Self {
            toast: Toast::new(settings.toast_exit),
            settings,
            audio,
            progression: ProgressionEngine::new(profile.progression),
            awakening: Some(awakening),
            awakening_state: AwakeningState::Booting,
            notifications: NotificationSlot::new(),
            typewriter,
            carousel,
            endorsements,
            outbox: Vec::new(),
        })
    }

    /// Run every timer due by `now` and return everything that happened.
    ///
    /// Deadlines are visited in time order, so events from different
    /// components interleave as they would have with a fine-grained clock.
    pub fn tick(&mut self, now: Duration) -> Vec<SessionEvent> {
        while let Some(due) = self.next_deadline().filter(|due| *due <= now) {
            self.advance_to(due);
        }
        self.take_events()
    }

    /// Fire everything due at `at`, the earliest pending deadline.
    fn advance_to(&mut self, at: Duration) {
        self.advance_awakening(at);

        if self.notifications.advance(at) {
            self.outbox.push(SessionEvent::NotificationDismissed);
        }
        for event in self.toast.advance(at) {
            self.outbox.push(SessionEvent::Toast(event));
        }
        for frame in self.typewriter.advance(at) {
            self.outbox.push(SessionEvent::RoleText(frame));
        }
        if !self.carousel.advance(at).is_empty()
            && let Some(state) = self.carousel.state()
        {
            self.outbox.push(SessionEvent::Carousel(state));
        }
    }

    fn advance_awakening(&mut self, now: Duration) {
        let Some(sequencer) = self.awakening.as_mut() else {
            return;
        };
        let due = sequencer.next_deadline().unwrap_or(now);
        if sequencer
            .advance(now, &mut self.audio, &mut self.notifications)
            .is_none()
        {
            return;
        }

        self.awakening_state = sequencer.state();
        self.outbox.push(SessionEvent::Awakened);
        self.outbox
            .push(SessionEvent::NotificationShown(self.notifications.state()));

        // The main UI is live from here: start the role text and the theme.
        self.typewriter.start(due);
        self.audio.play_music(&self.settings.music_track);
    }

    /// Drain pending events in the order they happened.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        take(&mut self.outbox)
    }

    /// Award experience; a level-up plays its sound and shows a notification.
    pub fn award_experience(
        &mut self,
        now: Duration,
        amount: u64,
    ) -> Result<ExperienceGain, ProgressionError> {
        let gain = self.progression.add_experience(amount)?;
        self.outbox.push(SessionEvent::Experience(gain));

        if gain.leveled_up {
            tracing::info!(
                level = gain.state.level(),
                levels = gain.levels_gained,
                "level up"
            );
            self.audio.play_once(&self.settings.level_up_sound);
            let message = format!("LEVEL UP! You reached level {}.", gain.state.level());
            if let Ok(message) = NonEmptyString::new(message) {
                self.notifications.show(
                    now,
                    message,
                    Icon::LevelUp,
                    self.settings.level_up_duration,
                );
                self.outbox
                    .push(SessionEvent::NotificationShown(self.notifications.state()));
            }
        }
        Ok(gain)
    }

    /// Optimistically endorse `subject`. `None` if it was already endorsed.
    pub fn endorse(&mut self, subject: &SubjectId) -> Option<MutationTicket> {
        let ticket = self.endorsements.endorse(subject)?;
        self.push_endorsement(subject);
        Some(ticket)
    }

    /// Apply the remote outcome of an earlier [`Session::endorse`].
    pub fn settle_endorsement(
        &mut self,
        now: Duration,
        ticket: MutationTicket,
        outcome: Result<(), RemoteError>,
    ) -> Settlement {
        let subject = ticket.subject().clone();
        let settlement = self.endorsements.settle(ticket, outcome);
        match settlement {
            Settlement::Confirmed => {
                if let Ok(message) = NonEmptyString::new(format!("Endorsed {subject}.")) {
                    self.show_toast(now, message, self.settings.endorse_toast_level);
                }
            }
            Settlement::RolledBack => self.push_endorsement(&subject),
            Settlement::Stale => {}
        }
        settlement
    }

    fn push_endorsement(&mut self, subject: &SubjectId) {
        self.outbox.push(SessionEvent::Endorsement {
            subject: subject.clone(),
            overlay: self.endorsements.overlay(subject),
        });
    }

    pub fn carousel_next(&mut self) {
        if self.carousel.next().is_some() {
            self.push_carousel();
        }
    }

    pub fn carousel_previous(&mut self) {
        if self.carousel.previous().is_some() {
            self.push_carousel();
        }
    }

    pub fn carousel_select(&mut self, index: usize) -> Result<(), CarouselError> {
        self.carousel.select_index(index)?;
        self.push_carousel();
        Ok(())
    }

    fn push_carousel(&mut self) {
        if let Some(state) = self.carousel.state() {
            self.outbox.push(SessionEvent::Carousel(state));
        }
    }

    pub fn set_sfx_muted(&mut self, muted: bool) {
        self.audio.set_sfx_muted(muted);
        self.outbox.push(SessionEvent::Audio(self.audio.settings()));
    }

    /// Muting gates future playback only; a track already playing continues.
    pub fn set_music_muted(&mut self, muted: bool) {
        self.audio.set_music_muted(muted);
        if !muted && self.awakening_state == AwakeningState::Awakened {
            self.audio.play_music(&self.settings.music_track);
        }
        self.outbox.push(SessionEvent::Audio(self.audio.settings()));
    }

    pub fn show_toast(&mut self, now: Duration, message: NonEmptyString, level: ToastLevel) {
        self.outbox.push(SessionEvent::ToastShown {
            message: message.as_str().to_string(),
            level,
        });
        self.toast
            .show(now, message, level, self.settings.toast_duration);
    }

    pub fn dismiss_toast(&mut self, now: Duration) {
        if let Some(event) = self.toast.dismiss(now) {
            self.outbox.push(SessionEvent::Toast(event));
        }
    }

    /// Earliest pending deadline across all components.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        [
            self.awakening
                .as_ref()
                .and_then(AwakeningSequencer::next_deadline),
            self.notifications.next_deadline(),
            self.toast.next_deadline(),
            self.typewriter.next_deadline(),
            self.carousel.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.awakening
            .as_ref()
            .map_or(0, AwakeningSequencer::pending_timers)
            + self.notifications.pending_timers()
            + self.toast.pending_timers()
            + self.typewriter.pending_timers()
            + self.carousel.pending_timers()
    }

    /// Tear down every timer and loop. Returns the audio controller so the
    /// caller can verify or reuse the backend.
    pub fn unmount(mut self) -> AudioController<B> {
        if let Some(sequencer) = self.awakening.take() {
            sequencer.unmount(&mut self.audio);
        }
        self.typewriter.stop();
        self.carousel.stop();
        self.notifications.hide();
        self.toast.clear();
        self.audio.stop_all();
        tracing::info!(
            pending_endorsements = self.endorsements.pending_count(),
            "session unmounted"
        );
        self.audio
    }

    #[must_use]
    pub fn awakening_state(&self) -> AwakeningState {
        self.awakening_state
    }

    #[must_use]
    pub fn progression(&self) -> ProgressionState {
        self.progression.state()
    }

    #[must_use]
    pub fn notification(&self) -> NotificationState {
        self.notifications.state()
    }

    #[must_use]
    pub fn notification_remaining(&self, now: Duration) -> f32 {
        self.notifications.remaining(now)
    }

    #[must_use]
    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    #[must_use]
    pub fn role_text(&self) -> String {
        self.typewriter.text()
    }

    #[must_use]
    pub fn carousel(&self) -> Option<CarouselState> {
        self.carousel.state()
    }

    #[must_use]
    pub fn endorsement(&self, subject: &SubjectId) -> EndorsementOverlay {
        self.endorsements.overlay(subject)
    }

    #[must_use]
    pub fn audio(&self) -> &AudioController<B> {
        &self.audio
    }
}

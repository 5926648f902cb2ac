//! One-shot boot sequence.
//!
//! A mounted sequencer starts in [`AwakeningState::Booting`]: it arms the boot
//! delay and, unless sound effects are muted, starts the boot loop. When the
//! delay fires it stops the loop, becomes [`AwakeningState::Awakened`] and
//! announces itself through the notification slot. That is the only
//! transition an instance ever makes.
//!
//! Transitions are a table over `(state, event)`; [`AwakeningSequencer`] only
//! applies the effects the table returns.

use std::time::Duration;

use awaken_types::ui::{AwakeningState, Icon};
use awaken_types::{EffectId, NonEmptyStaticStr, NonEmptyString, TimerSlot};

use crate::audio::{AudioBackend, AudioController};
use crate::notifications::NotificationSlot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwakeningConfig {
    pub boot_delay: Duration,
    pub boot_sound: EffectId,
    pub message: NonEmptyString,
    pub icon: Icon,
    pub notification_duration: Duration,
}

impl Default for AwakeningConfig {
    fn default() -> Self {
        Self {
            boot_delay: Duration::from_millis(1_500),
            boot_sound: EffectId::new("boot_loop"),
            message: NonEmptyString::from(DEFAULT_MESSAGE),
            icon: Icon::System,
            notification_duration: Duration::from_millis(4_000),
        }
    }
}

const DEFAULT_MESSAGE: NonEmptyStaticStr =
    NonEmptyStaticStr::new("You have awakened. The System is now online.");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwakeningEvent {
    BootElapsed,
    Unmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwakeningEffect {
    CancelBootDelay,
    StopBootLoop,
    Announce,
}

const NO_EFFECTS: &[AwakeningEffect] = &[];
const ON_AWAKEN: &[AwakeningEffect] = &[AwakeningEffect::StopBootLoop, AwakeningEffect::Announce];
const ON_UNMOUNT: &[AwakeningEffect] = &[
    AwakeningEffect::CancelBootDelay,
    AwakeningEffect::StopBootLoop,
];

/// Transition table.
#[must_use]
pub fn step(
    state: AwakeningState,
    event: AwakeningEvent,
) -> (AwakeningState, &'static [AwakeningEffect]) {
    use AwakeningEvent::{BootElapsed, Unmount};
    use AwakeningState::{Awakened, Booting};

    match (state, event) {
        (Booting, BootElapsed) => (Awakened, ON_AWAKEN),
        (Awakened, BootElapsed) => (Awakened, NO_EFFECTS),
        (state, Unmount) => (state, ON_UNMOUNT),
    }
}

#[derive(Debug)]
pub struct AwakeningSequencer {
    state: AwakeningState,
    config: AwakeningConfig,
    boot_delay: TimerSlot<AwakeningEvent>,
    boot_loop: Option<EffectId>,
}

impl AwakeningSequencer {
    /// Enter `Booting`: arm the delay and start the boot loop if allowed.
    pub fn mount<B: AudioBackend>(
        now: Duration,
        config: AwakeningConfig,
        audio: &mut AudioController<B>,
    ) -> Self {
        let mut boot_delay = TimerSlot::new();
        boot_delay.arm(now, config.boot_delay, AwakeningEvent::BootElapsed);

        let boot_loop = (!audio.settings().sfx_muted && audio.play_loop(&config.boot_sound))
            .then(|| config.boot_sound.clone());

        tracing::debug!(delay = ?config.boot_delay, looping = boot_loop.is_some(), "booting");
        Self {
            state: AwakeningState::Booting,
            config,
            boot_delay,
            boot_loop,
        }
    }

    #[must_use]
    pub fn state(&self) -> AwakeningState {
        self.state
    }

    /// Apply the boot delay if due. Returns the new state on transition.
    pub fn advance<B: AudioBackend>(
        &mut self,
        now: Duration,
        audio: &mut AudioController<B>,
        notifications: &mut NotificationSlot,
    ) -> Option<AwakeningState> {
        let fired = self.boot_delay.fire(now)?;
        let before = self.state;
        self.apply(fired.event, fired.due, audio, Some(notifications));
        (self.state != before).then_some(self.state)
    }

    /// Tear down: no pending delay and no boot loop survive this call.
    pub fn unmount<B: AudioBackend>(mut self, audio: &mut AudioController<B>) {
        self.apply(AwakeningEvent::Unmount, Duration::ZERO, audio, None);
    }

    fn apply<B: AudioBackend>(
        &mut self,
        event: AwakeningEvent,
        now: Duration,
        audio: &mut AudioController<B>,
        mut notifications: Option<&mut NotificationSlot>,
    ) {
        let (next, effects) = step(self.state, event);
        for effect in effects {
            match effect {
                AwakeningEffect::CancelBootDelay => {
                    self.boot_delay.cancel();
                }
                AwakeningEffect::StopBootLoop => {
                    if let Some(effect) = self.boot_loop.take() {
                        audio.stop_loop(&effect);
                    }
                }
                AwakeningEffect::Announce => {
                    if let Some(slot) = notifications.as_deref_mut() {
                        slot.show(
                            now,
                            self.config.message.clone(),
                            self.config.icon.clone(),
                            self.config.notification_duration,
                        );
                    }
                }
            }
        }
        if next != self.state {
            tracing::info!(from = ?self.state, to = ?next, "awakening transition");
        }
        self.state = next;
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.boot_delay.deadline()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.boot_delay.pending_count()
    }

    #[must_use]
    pub fn is_boot_loop_playing(&self) -> bool {
        self.boot_loop.is_some()
    }
}

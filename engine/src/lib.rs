//! State machines behind the Awaken profile UI.
//!
//! Every component runs on a virtual session clock (`Duration` since mount) and
//! owns its timers, so a caller can advance time in arbitrary jumps and get the
//! same sequence of states it would have seen tick by tick. [`Session`] wires
//! the components together; [`runtime::Runtime`] drives a session on tokio.

mod audio;
mod awakening;
mod carousel;
pub mod config;
mod endorsement;
mod feed;
mod notifications;
mod progression;
mod remote;
pub mod runtime;
mod session;
mod toast;
mod typewriter;

pub use audio::{AudioBackend, AudioController, PlaybackError, TracingBackend};
pub use awakening::{AwakeningConfig, AwakeningEffect, AwakeningEvent, AwakeningSequencer, step};
pub use carousel::{CarouselController, CarouselError, DEFAULT_ADVANCE_INTERVAL};
pub use config::{AwakenConfig, ConfigError};
pub use endorsement::{EndorsementBook, MutationTicket, Settlement};
pub use feed::PanelFeed;
pub use notifications::NotificationSlot;
pub use progression::{ExperienceGain, ProgressionEngine};
pub use remote::{EndorsementClient, HttpEndorsementClient, LocalEndorsementClient, RemoteError};
pub use session::{Profile, Session, SessionError, SessionEvent, SessionSettings};
pub use toast::{DEFAULT_EXIT_DURATION, Toast, ToastEvent};
pub use typewriter::{TypewriterConfig, TypewriterCycler, TypewriterError};

pub use awaken_types::ui::{
    AnimPhase, AudioSettings, AwakeningState, CarouselState, EffectTimer, EndorsementOverlay, Icon,
    NotificationState, ToastLevel,
};
pub use awaken_types::{
    EffectId, EmptyStringError, NonEmptyStaticStr, NonEmptyString, PlaybackHandle,
    ProgressionError, ProgressionState, SubjectId, TimerId, XP_PER_LEVEL,
};

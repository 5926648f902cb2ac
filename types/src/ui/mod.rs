//! UI state types for the presentation layer.
//!
//! Pure data types with no IO and no async. The engine owns the live
//! components; these are the settings they take and the snapshots they expose
//! for rendering.

mod animation;
mod state;

pub use animation::{AnimPhase, EffectTimer};
pub use state::{
    AudioSettings, AwakeningState, CarouselState, EndorsementOverlay, Icon, NotificationState,
    ToastLevel,
};

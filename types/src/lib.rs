//! Core domain types for Awaken.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! The engine builds its state machines on top of these; nothing here knows about
//! audio backends, HTTP, or the tokio runtime.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod ids;
mod progression;
mod timer;
pub mod ui;

pub use ids::{EffectId, PlaybackHandle, SubjectId, TimerId};
pub use progression::{ProgressionError, ProgressionState, XP_PER_LEVEL};
pub use timer::{Fired, TimerSlot};

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

// ============================================================================
// NonEmpty String Types
// ============================================================================

/// A string guaranteed to be non-empty (after trimming).
///
/// Used for anything the UI must be able to show: notification messages,
/// toast text, typewriter roles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

#[derive(Debug, Error)]
#[error("display text must not be empty")]
pub struct EmptyStringError;

impl NonEmptyString {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyStringError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptyStringError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Split into extended grapheme clusters, the unit a typewriter reveals.
    #[must_use]
    pub fn graphemes(&self) -> Vec<&str> {
        self.0.graphemes(true).collect()
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl Deref for NonEmptyString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A compile-time checked non-empty static string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonEmptyStaticStr(&'static str);

impl NonEmptyStaticStr {
    #[must_use]
    pub const fn new(value: &'static str) -> Self {
        assert!(!value.is_empty(), "NonEmptyStaticStr must not be empty");
        Self(value)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl From<NonEmptyStaticStr> for NonEmptyString {
    fn from(value: NonEmptyStaticStr) -> Self {
        Self(value.0.to_owned())
    }
}

//! End-to-end behaviour of a mounted session.

mod awakening;
mod carousel;
mod config;
mod endorsement;
mod notifications;
mod typewriter;

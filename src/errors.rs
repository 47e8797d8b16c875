//! Error types for puzzle input and playback control
//!
//! - [`InputError`]: user input rejected before any generation happens. The
//!   previously generated model stays on screen.
//! - [`PlaybackError`]: a controller transition that is not allowed from the
//!   current state. Nothing changes when one is returned.
//!
//! Invariant violations inside generators are not represented here; they are
//! bugs and panic in debug builds.

use thiserror::Error;

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid number: \"{token}\"")]
    InvalidNumber { token: String },

    #[error("Invalid target: \"{text}\"")]
    InvalidTarget { text: String },

    #[error("{what} must not be empty")]
    EmptyInput { what: &'static str },

    #[error("{what} must be between {min} and {max} (got {value})")]
    OutOfRange {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Transition not accepted in the controller's current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("pause playback before stepping")]
    WhilePlaying,

    #[error("playback is not running")]
    NotPlaying,

    #[error("playback is already running")]
    AlreadyPlaying,
}

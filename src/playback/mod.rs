//! Playback over a generated history
//!
//! [`PlaybackController`] owns a [`Timeline`] and a cursor and moves between
//! four states:
//!
//! ```text
//!            start                 last frame reached
//!   Idle ─────────────▶ Playing ─────────────────────▶ Complete
//!    ▲                  │    ▲                            │
//!    │ reset      pause │    │ start        start (rewinds to 0)
//!    │                  ▼    │                            │
//!    └──────────────── Paused ◀───────────────────────────┘
//!                              step backward
//! ```
//!
//! # Timing
//!
//! Automatic advance is a one-shot [`Alarm`]. At most one alarm is pending per
//! controller; every schedule or cancellation bumps an epoch, so an alarm
//! handed out before a `pause`, `reset`, `seek` or timeline replacement is
//! recognised as stale and ignored when it fires. Hosts either call
//! [`PlaybackControls::tick`] from their event loop or fire the alarm
//! themselves with [`PlaybackController::fire`].
//!
//! Time is passed in explicitly so the controller never reads a clock.

use crate::errors::PlaybackError;
use crate::model::Timeline;
use std::fmt;
use std::mem;
use std::time::{Duration, Instant};

/// Delay between automatic steps unless configured otherwise
pub const DEFAULT_SPEED: Duration = Duration::from_millis(1000);

/// Where playback is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Cursor at 0, nothing started yet
    Idle,
    Playing,
    Paused,
    /// Cursor at the last frame
    Complete,
}

impl PlaybackState {
    pub fn label(self) -> &'static str {
        match self {
            PlaybackState::Idle => "IDLE",
            PlaybackState::Playing => "PLAYING",
            PlaybackState::Paused => "PAUSED",
            PlaybackState::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A scheduled automatic advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alarm {
    epoch: u64,
    due: Instant,
}

impl Alarm {
    pub fn due(&self) -> Instant {
        self.due
    }
}

/// Outcome of an alarm firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fired {
    /// Cursor moved and the next alarm is scheduled
    Advanced { cursor: usize },
    /// Cursor reached the last frame
    Completed { cursor: usize },
    /// The alarm was cancelled or superseded; nothing changed
    Stale,
}

/// Cursor and play state over one timeline
#[derive(Debug, Clone)]
pub struct PlaybackController<T> {
    timeline: T,
    cursor: usize,
    state: PlaybackState,
    speed: Duration,
    epoch: u64,
    pending: Option<Alarm>,
}

impl<T: Timeline> PlaybackController<T> {
    pub fn new(timeline: T, speed: Duration) -> Self {
        PlaybackController {
            timeline,
            cursor: 0,
            state: PlaybackState::Idle,
            speed,
            epoch: 0,
            pending: None,
        }
    }

    pub fn timeline(&self) -> &T {
        &self.timeline
    }

    pub fn last_index(&self) -> usize {
        self.timeline.last_index()
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// The alarm a host should fire next, if any
    pub fn pending_alarm(&self) -> Option<Alarm> {
        self.pending
    }

    /// Reset, then swap in a freshly generated timeline.
    ///
    /// Any pending alarm is invalidated first, so nothing scheduled against
    /// the old timeline can move the cursor over the new one.
    pub fn replace(&mut self, timeline: T) -> T {
        self.reset_inner();
        let old = mem::replace(&mut self.timeline, timeline);
        tracing::trace!(frames = self.timeline.frame_count(), "timeline replaced");
        old
    }

    /// Apply a fired alarm
    pub fn fire(&mut self, alarm: Alarm, now: Instant) -> Fired {
        if self.state != PlaybackState::Playing || self.pending != Some(alarm) {
            tracing::trace!(epoch = alarm.epoch, current = self.epoch, "stale alarm ignored");
            return Fired::Stale;
        }
        self.pending = None;
        let last = self.last_index();
        if self.cursor < last {
            self.cursor += 1;
        }
        if self.cursor >= last {
            self.state = PlaybackState::Complete;
            tracing::trace!(cursor = self.cursor, "playback complete");
            Fired::Completed {
                cursor: self.cursor,
            }
        } else {
            self.schedule(now);
            Fired::Advanced {
                cursor: self.cursor,
            }
        }
    }

    fn schedule(&mut self, now: Instant) {
        self.epoch += 1;
        self.pending = Some(Alarm {
            epoch: self.epoch,
            due: now + self.speed,
        });
    }

    fn cancel(&mut self) {
        self.epoch += 1;
        if self.pending.take().is_some() {
            tracing::trace!(epoch = self.epoch, "pending alarm cancelled");
        }
    }

    fn reset_inner(&mut self) {
        self.cancel();
        self.cursor = 0;
        self.state = PlaybackState::Idle;
    }
}

/// Object-safe playback surface, so a host can drive any puzzle
pub trait PlaybackControls {
    fn state(&self) -> PlaybackState;
    fn cursor(&self) -> usize;
    fn frame_count(&self) -> usize;
    fn speed(&self) -> Duration;

    /// Begin automatic advance; from Complete this rewinds to frame 0 first
    fn start(&mut self, now: Instant) -> Result<(), PlaybackError>;
    fn pause(&mut self) -> Result<(), PlaybackError>;
    /// Start when stopped, pause when playing
    fn toggle(&mut self, now: Instant) -> Result<(), PlaybackError>;
    fn step_forward(&mut self) -> Result<usize, PlaybackError>;
    fn step_backward(&mut self) -> Result<usize, PlaybackError>;
    /// Jump to `index` (clamped), stopping automatic advance
    fn seek(&mut self, index: usize) -> usize;
    fn reset(&mut self);
    /// New delay for alarms scheduled from now on
    fn set_speed(&mut self, speed: Duration);
    /// Fire the pending alarm if it is due
    fn tick(&mut self, now: Instant) -> Option<Fired>;

    fn jump_to_start(&mut self) -> usize {
        self.seek(0)
    }

    fn jump_to_end(&mut self) -> usize {
        self.seek(usize::MAX)
    }
}

impl<T: Timeline> PlaybackControls for PlaybackController<T> {
    fn state(&self) -> PlaybackState {
        self.state
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn frame_count(&self) -> usize {
        self.timeline.frame_count()
    }

    fn speed(&self) -> Duration {
        self.speed
    }

    fn start(&mut self, now: Instant) -> Result<(), PlaybackError> {
        if self.state == PlaybackState::Playing {
            return Err(PlaybackError::AlreadyPlaying);
        }
        if self.state == PlaybackState::Complete {
            self.cursor = 0;
        }
        if self.cursor >= self.last_index() {
            self.state = PlaybackState::Complete;
            return Ok(());
        }
        self.state = PlaybackState::Playing;
        self.schedule(now);
        tracing::trace!(cursor = self.cursor, "playback started");
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        if self.state != PlaybackState::Playing {
            return Err(PlaybackError::NotPlaying);
        }
        self.cancel();
        self.state = PlaybackState::Paused;
        tracing::trace!(cursor = self.cursor, "playback paused");
        Ok(())
    }

    fn toggle(&mut self, now: Instant) -> Result<(), PlaybackError> {
        if self.state == PlaybackState::Playing {
            self.pause()
        } else {
            self.start(now)
        }
    }

    fn step_forward(&mut self) -> Result<usize, PlaybackError> {
        if self.state == PlaybackState::Playing {
            return Err(PlaybackError::WhilePlaying);
        }
        let last = self.last_index();
        if self.cursor < last {
            self.cursor += 1;
        }
        self.state = if self.cursor >= last {
            PlaybackState::Complete
        } else {
            PlaybackState::Paused
        };
        Ok(self.cursor)
    }

    fn step_backward(&mut self) -> Result<usize, PlaybackError> {
        if self.state == PlaybackState::Playing {
            return Err(PlaybackError::WhilePlaying);
        }
        if self.cursor > 0 {
            self.cursor -= 1;
            if self.state == PlaybackState::Complete {
                self.state = PlaybackState::Paused;
            }
        }
        Ok(self.cursor)
    }

    fn seek(&mut self, index: usize) -> usize {
        self.cancel();
        let last = self.last_index();
        self.cursor = index.min(last);
        self.state = if self.cursor >= last {
            PlaybackState::Complete
        } else if self.cursor == 0 && self.state == PlaybackState::Idle {
            PlaybackState::Idle
        } else {
            PlaybackState::Paused
        };
        self.cursor
    }

    fn reset(&mut self) {
        self.reset_inner();
        tracing::trace!("playback reset");
    }

    fn set_speed(&mut self, speed: Duration) {
        self.speed = speed;
    }

    fn tick(&mut self, now: Instant) -> Option<Fired> {
        match self.pending {
            Some(alarm) if alarm.due <= now => Some(self.fire(alarm, now)),
            _ => None,
        }
    }
}

//! # Introduction
//!
//! algoscope animates small algorithm puzzles. Each puzzle is solved once, up
//! front, into a complete history of narrated frames; that history is then
//! played, paused, stepped and scrubbed through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Parameters → Validation → Generator → StepModel → PlaybackController → TUI
//! ```
//!
//! 1. [`session::input`]: parses and range-checks user input. Rejected input
//!    never reaches a generator.
//! 2. [`puzzles`]: pure generators for Tower of Hanoi, Two-Sum (three
//!    algorithms), Fibonacci (three methods) and River Crossing.
//! 3. [`model`]: the immutable [`model::Frame`] and [`model::StepModel`]
//!    types every generator produces.
//! 4. [`playback`]: [`playback::PlaybackController`], the Idle / Playing /
//!    Paused / Complete state machine with a cancellable advance alarm.
//! 5. [`session`]: one owner per puzzle that regenerates and resets on every
//!    parameter change.
//! 6. [`config`] and [`logging`]: TOML settings and file-based tracing.
//! 7. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Puzzles
//!
//! Tower of Hanoi with 1 to 7 disks; Two-Sum by brute force, two pointers or
//! hash map; Fibonacci by naive recursion (n up to 8), iteration or
//! memoization (n up to 20); and the farmer, fox, hen and grain crossing.

pub mod config;
pub mod errors;
pub mod logging;
pub mod model;
pub mod playback;
pub mod puzzles;
pub mod session;
pub mod ui;

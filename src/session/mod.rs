//! Live puzzle sessions
//!
//! A session owns, for each puzzle, the validated parameters, the current
//! model and the [`PlaybackController`] walking it. Every parameter change
//! validates first, then resets the controller and swaps in a freshly
//! generated model. A rejected change leaves everything as it was.
//!
//! - [`input`]: parsing and range checks for user-supplied values
//! - [`HanoiPuzzle`], [`TwoSumPuzzle`], [`FibonacciPuzzle`], [`RiverPuzzle`]
//! - [`Puzzle`]: object-safe view used by the front end and `--narrate`
//!
//! [`PlaybackController`]: crate::playback::PlaybackController

pub mod input;

mod fibonacci;
mod hanoi;
mod river;
mod two_sum;

pub use fibonacci::FibonacciPuzzle;
pub use hanoi::HanoiPuzzle;
pub use river::RiverPuzzle;
pub use two_sum::TwoSumPuzzle;

use crate::errors::InputError;
use crate::playback::{Fired, PlaybackControls, PlaybackState};
use crate::puzzles::fibonacci::Method;
use crate::puzzles::two_sum::Algorithm;
use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Which puzzle is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PuzzleKind {
    #[default]
    Hanoi,
    TwoSum,
    Fibonacci,
    River,
}

impl PuzzleKind {
    pub const ALL: [PuzzleKind; 4] = [
        PuzzleKind::Hanoi,
        PuzzleKind::TwoSum,
        PuzzleKind::Fibonacci,
        PuzzleKind::River,
    ];

    pub fn next(self) -> Self {
        match self {
            PuzzleKind::Hanoi => PuzzleKind::TwoSum,
            PuzzleKind::TwoSum => PuzzleKind::Fibonacci,
            PuzzleKind::Fibonacci => PuzzleKind::River,
            PuzzleKind::River => PuzzleKind::Hanoi,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PuzzleKind::Hanoi => "Tower of Hanoi",
            PuzzleKind::TwoSum => "Two Sum",
            PuzzleKind::Fibonacci => "Fibonacci",
            PuzzleKind::River => "River Crossing",
        }
    }
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for PuzzleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hanoi" => Ok(PuzzleKind::Hanoi),
            "two-sum" | "twosum" => Ok(PuzzleKind::TwoSum),
            "fibonacci" | "fib" => Ok(PuzzleKind::Fibonacci),
            "river" => Ok(PuzzleKind::River),
            other => Err(format!(
                "unknown puzzle '{}' (expected hanoi, two-sum, fibonacci or river)",
                other
            )),
        }
    }
}

/// What the front end needs from any puzzle
pub trait Puzzle {
    fn kind(&self) -> PuzzleKind;

    /// Current parameters, e.g. `4 disks`
    fn summary(&self) -> String;

    /// Pseudocode the highlighted lines refer to
    fn listing(&self) -> &'static [&'static str];

    fn narration_at(&self, index: usize) -> &str;
    fn lines_at(&self, index: usize) -> &BTreeSet<usize>;

    fn controls(&self) -> &dyn PlaybackControls;
    fn controls_mut(&mut self) -> &mut dyn PlaybackControls;

    /// Grow or shrink the puzzle's size parameter, if it has one
    fn resize(&mut self, _delta: i32) -> Result<(), InputError> {
        Ok(())
    }

    /// Switch to the next algorithm or method, if there is a choice
    fn cycle_variant(&mut self) {}

    fn narration(&self) -> &str {
        self.narration_at(self.controls().cursor())
    }

    fn highlighted_lines(&self) -> &BTreeSet<usize> {
        self.lines_at(self.controls().cursor())
    }
}

/// Write every frame of `puzzle` as `index  [lines]  narration`, one per line
pub fn write_narration(puzzle: &dyn Puzzle, out: &mut dyn io::Write) -> io::Result<()> {
    writeln!(out, "{}: {}", puzzle.kind(), puzzle.summary())?;
    for index in 0..puzzle.controls().frame_count() {
        let lines: Vec<String> = puzzle
            .lines_at(index)
            .iter()
            .map(|l| l.to_string())
            .collect();
        writeln!(
            out,
            "{:>4}  [{}]  {}",
            index,
            lines.join(","),
            puzzle.narration_at(index)
        )?;
    }
    Ok(())
}

/// Settings a session starts from
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub speed: Duration,
    pub disks: u32,
    pub numbers: Vec<i32>,
    pub target: i32,
    pub algorithm: Algorithm,
    pub fibonacci_n: u32,
    pub method: Method,
}

/// Step between speed settings
pub const SPEED_STEP: Duration = Duration::from_millis(100);

/// All four puzzles, one of them active
pub struct Session {
    active: PuzzleKind,
    speed: Duration,
    pub hanoi: HanoiPuzzle,
    pub two_sum: TwoSumPuzzle,
    pub fibonacci: FibonacciPuzzle,
    pub river: RiverPuzzle,
}

impl Session {
    pub fn new(settings: &SessionSettings) -> Result<Self, InputError> {
        let speed = settings.speed;
        Ok(Session {
            active: PuzzleKind::default(),
            speed,
            hanoi: HanoiPuzzle::new(settings.disks, speed)?,
            two_sum: TwoSumPuzzle::new(
                settings.numbers.clone(),
                settings.target,
                settings.algorithm,
                speed,
            ),
            fibonacci: FibonacciPuzzle::new(settings.method, settings.fibonacci_n, speed)?,
            river: RiverPuzzle::new(speed),
        })
    }

    pub fn active(&self) -> PuzzleKind {
        self.active
    }

    /// Make `kind` active; the puzzle left behind stops playing
    pub fn select(&mut self, kind: PuzzleKind) {
        if kind == self.active {
            return;
        }
        if self.puzzle().controls().state() == PlaybackState::Playing {
            if let Err(e) = self.puzzle_mut().controls_mut().pause() {
                tracing::warn!(error = %e, "failed to pause {}", self.active);
            }
        }
        self.active = kind;
        tracing::info!(puzzle = %kind, "puzzle selected");
    }

    pub fn cycle(&mut self) {
        self.select(self.active.next());
    }

    pub fn puzzle(&self) -> &dyn Puzzle {
        match self.active {
            PuzzleKind::Hanoi => &self.hanoi,
            PuzzleKind::TwoSum => &self.two_sum,
            PuzzleKind::Fibonacci => &self.fibonacci,
            PuzzleKind::River => &self.river,
        }
    }

    pub fn puzzle_mut(&mut self) -> &mut dyn Puzzle {
        match self.active {
            PuzzleKind::Hanoi => &mut self.hanoi,
            PuzzleKind::TwoSum => &mut self.two_sum,
            PuzzleKind::Fibonacci => &mut self.fibonacci,
            PuzzleKind::River => &mut self.river,
        }
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    /// New delay for every puzzle; affects only alarms scheduled later
    pub fn set_speed(&mut self, speed: Duration) -> Result<(), InputError> {
        let ms = u64::try_from(speed.as_millis()).unwrap_or(u64::MAX);
        let speed = input::validate_speed(ms)?;
        self.speed = speed;
        self.hanoi.controls_mut().set_speed(speed);
        self.two_sum.controls_mut().set_speed(speed);
        self.fibonacci.controls_mut().set_speed(speed);
        self.river.controls_mut().set_speed(speed);
        tracing::info!(speed_ms = ms, "speed changed");
        Ok(())
    }

    /// Shorter delay, clamped to the fastest setting
    pub fn faster(&mut self) -> Duration {
        let min = Duration::from_millis(input::MIN_SPEED_MS);
        let speed = self.speed.saturating_sub(SPEED_STEP).max(min);
        if let Err(e) = self.set_speed(speed) {
            tracing::warn!(error = %e, "speed change rejected");
        }
        self.speed
    }

    /// Longer delay, clamped to the slowest setting
    pub fn slower(&mut self) -> Duration {
        let max = Duration::from_millis(input::MAX_SPEED_MS);
        let speed = (self.speed + SPEED_STEP).min(max);
        if let Err(e) = self.set_speed(speed) {
            tracing::warn!(error = %e, "speed change rejected");
        }
        self.speed
    }

    /// Advance the active puzzle if its alarm is due
    pub fn tick(&mut self, now: Instant) -> Option<Fired> {
        self.puzzle_mut().controls_mut().tick(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SessionSettings {
        SessionSettings {
            speed: Duration::from_millis(1000),
            disks: 3,
            numbers: vec![-5, 7, 0, 1, 9],
            target: 8,
            algorithm: Algorithm::BruteForce,
            fibonacci_n: 5,
            method: Method::Recursive,
        }
    }

    #[test]
    fn test_puzzle_kind_cycle_and_parse() {
        let mut kind = PuzzleKind::Hanoi;
        for _ in 0..4 {
            kind = kind.next();
        }
        assert_eq!(kind, PuzzleKind::Hanoi);
        assert_eq!("Two-Sum".parse::<PuzzleKind>(), Ok(PuzzleKind::TwoSum));
        assert!("chess".parse::<PuzzleKind>().is_err());
    }

    #[test]
    fn test_switching_pauses_previous_puzzle() {
        let mut session = Session::new(&settings()).unwrap();
        let t0 = Instant::now();
        session.puzzle_mut().controls_mut().start(t0).unwrap();
        session.select(PuzzleKind::River);
        assert_eq!(session.hanoi.controls().state(), PlaybackState::Paused);
        assert_eq!(session.puzzle().kind(), PuzzleKind::River);
        assert_eq!(session.tick(t0 + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_select_leaves_stopped_puzzles_alone() {
        let mut session = Session::new(&settings()).unwrap();
        session.select(PuzzleKind::River);
        session.puzzle_mut().controls_mut().jump_to_end();
        session.select(PuzzleKind::Hanoi);
        session.select(PuzzleKind::Fibonacci);
        assert_eq!(session.river.controls().state(), PlaybackState::Complete);
        assert_eq!(session.hanoi.controls().state(), PlaybackState::Idle);
        assert_eq!(session.hanoi.controls().cursor(), 0);
    }

    #[test]
    fn test_write_narration() {
        let mut session = Session::new(&settings()).unwrap();
        session.select(PuzzleKind::Hanoi);
        let mut out = Vec::new();
        write_narration(session.puzzle(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Tower of Hanoi: 3 disks");
        assert_eq!(lines.len(), 1 + 8);
        assert!(lines[1].starts_with("   0  [1]  3 disk(s) on rod A"));
        assert!(lines[8].ends_with("Solved!"));
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut session = Session::new(&settings()).unwrap();
        for _ in 0..20 {
            session.faster();
        }
        assert_eq!(session.speed(), Duration::from_millis(200));
        assert_eq!(session.fibonacci.controls().speed(), Duration::from_millis(200));
        for _ in 0..30 {
            session.slower();
        }
        assert_eq!(session.speed(), Duration::from_millis(2000));
        assert!(session.set_speed(Duration::from_millis(50)).is_err());
        assert_eq!(session.speed(), Duration::from_millis(2000));
    }
}

use super::{Puzzle, PuzzleKind};
use crate::model::{Frame, StepModel};
use crate::playback::{PlaybackControls, PlaybackController};
use crate::puzzles::river::{self, RiverState, LISTING};
use std::collections::BTreeSet;
use std::time::Duration;

/// River crossing; the solution is fixed, so there is nothing to configure
pub struct RiverPuzzle {
    controller: PlaybackController<StepModel<RiverState>>,
}

impl RiverPuzzle {
    pub fn new(speed: Duration) -> Self {
        RiverPuzzle {
            controller: PlaybackController::new(river::generate(), speed),
        }
    }

    pub fn model(&self) -> &StepModel<RiverState> {
        self.controller.timeline()
    }

    pub fn frame(&self) -> &Frame<RiverState> {
        self.model().at(self.controller.cursor())
    }
}

impl Puzzle for RiverPuzzle {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::River
    }

    fn summary(&self) -> String {
        "farmer, fox, hen and grain".to_string()
    }

    fn listing(&self) -> &'static [&'static str] {
        LISTING
    }

    fn narration_at(&self, index: usize) -> &str {
        self.model().at(index).narration()
    }

    fn lines_at(&self, index: usize) -> &BTreeSet<usize> {
        self.model().at(index).highlighted_lines()
    }

    fn controls(&self) -> &dyn PlaybackControls {
        &self.controller
    }

    fn controls_mut(&mut self) -> &mut dyn PlaybackControls {
        &mut self.controller
    }
}

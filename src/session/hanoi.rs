use super::input::validate_disks;
use super::{Puzzle, PuzzleKind};
use crate::errors::InputError;
use crate::model::Frame;
use crate::playback::{PlaybackControls, PlaybackController};
use crate::puzzles::hanoi::{HanoiSolution, HanoiStep, TowerProjector, TowerState, LISTING};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

/// Tower of Hanoi with a per-disk-count solution cache
pub struct HanoiPuzzle {
    cache: FxHashMap<u32, Rc<HanoiSolution>>,
    controller: PlaybackController<Rc<HanoiSolution>>,
    projector: TowerProjector,
}

impl HanoiPuzzle {
    pub fn new(disks: u32, speed: Duration) -> Result<Self, InputError> {
        let disks = validate_disks(disks)?;
        let mut cache = FxHashMap::default();
        let solution = Rc::new(HanoiSolution::new(disks));
        cache.insert(disks, Rc::clone(&solution));
        Ok(HanoiPuzzle {
            cache,
            controller: PlaybackController::new(solution, speed),
            projector: TowerProjector::new(disks),
        })
    }

    pub fn disks(&self) -> u32 {
        self.solution().disks()
    }

    pub fn solution(&self) -> &HanoiSolution {
        self.controller.timeline()
    }

    pub fn controller(&self) -> &PlaybackController<Rc<HanoiSolution>> {
        &self.controller
    }

    pub fn frame(&self) -> &Frame<HanoiStep> {
        self.solution().frame(self.controller.cursor())
    }

    /// Tower at the cursor, updated incrementally from the last call
    pub fn tower(&mut self) -> &TowerState {
        let cursor = self.controller.cursor();
        let solution = Rc::clone(self.controller.timeline());
        self.projector.seek(solution.moves(), cursor)
    }

    /// Number of disk counts solved so far
    pub fn cached_solutions(&self) -> usize {
        self.cache.len()
    }

    /// Switch to `disks` disks, reusing an earlier solution when there is one
    pub fn set_disks(&mut self, disks: u32) -> Result<(), InputError> {
        let disks = validate_disks(disks).inspect_err(|err| {
            tracing::warn!(disks, error = %err, "rejected disk count");
        })?;
        let solution = Rc::clone(
            self.cache
                .entry(disks)
                .or_insert_with(|| Rc::new(HanoiSolution::new(disks))),
        );
        self.controller.replace(solution);
        self.projector = TowerProjector::new(disks);
        tracing::info!(disks, "hanoi disk count changed");
        Ok(())
    }
}

impl Puzzle for HanoiPuzzle {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::Hanoi
    }

    fn summary(&self) -> String {
        let disks = self.disks();
        format!("{} disk{}", disks, if disks == 1 { "" } else { "s" })
    }

    fn listing(&self) -> &'static [&'static str] {
        LISTING
    }

    fn narration_at(&self, index: usize) -> &str {
        self.solution().frame(index).narration()
    }

    fn lines_at(&self, index: usize) -> &BTreeSet<usize> {
        self.solution().frame(index).highlighted_lines()
    }

    fn controls(&self) -> &dyn PlaybackControls {
        &self.controller
    }

    fn controls_mut(&mut self) -> &mut dyn PlaybackControls {
        &mut self.controller
    }

    fn resize(&mut self, delta: i32) -> Result<(), InputError> {
        let disks = self.disks().saturating_add_signed(delta);
        self.set_disks(disks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::PlaybackState;
    use std::time::Instant;

    const SPEED: Duration = Duration::from_millis(300);

    #[test]
    fn test_tower_follows_cursor() {
        let mut puzzle = HanoiPuzzle::new(3, SPEED).unwrap();
        assert_eq!(puzzle.tower().rod(0), &[3, 2, 1]);

        puzzle.controls_mut().jump_to_end();
        assert_eq!(puzzle.tower().rod(2), &[3, 2, 1]);

        puzzle.controls_mut().step_backward().unwrap();
        assert_eq!(puzzle.tower().rod(2), &[3, 2]);
        assert_eq!(puzzle.frame().payload().moves_made, 6);
    }

    #[test]
    fn test_solutions_are_cached() {
        let mut puzzle = HanoiPuzzle::new(3, SPEED).unwrap();
        puzzle.set_disks(4).unwrap();
        puzzle.set_disks(3).unwrap();
        assert_eq!(puzzle.cached_solutions(), 2);
        assert_eq!(puzzle.controls().frame_count(), 8);
    }

    #[test]
    fn test_rejected_disk_count_keeps_state() {
        let mut puzzle = HanoiPuzzle::new(7, SPEED).unwrap();
        puzzle.controls_mut().seek(10);
        assert!(puzzle.resize(1).is_err());
        assert_eq!(puzzle.disks(), 7);
        assert_eq!(puzzle.controls().cursor(), 10);
        assert_eq!(puzzle.controls().state(), PlaybackState::Paused);
    }

    #[test]
    fn test_change_while_playing_resets() {
        let t0 = Instant::now();
        let mut puzzle = HanoiPuzzle::new(3, SPEED).unwrap();
        puzzle.controls_mut().start(t0).unwrap();
        puzzle.controls_mut().tick(t0 + SPEED);
        assert_eq!(puzzle.controls().cursor(), 1);

        puzzle.resize(-1).unwrap();
        assert_eq!(puzzle.controls().state(), PlaybackState::Idle);
        assert_eq!(puzzle.controls().cursor(), 0);
        assert_eq!(puzzle.controls_mut().tick(t0 + SPEED * 4), None);
        assert_eq!(puzzle.tower().rod(0), &[2, 1]);
        assert!(puzzle.narration().starts_with("2 disk(s) on rod A"));
    }
}

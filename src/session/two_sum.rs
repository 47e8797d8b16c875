use super::input::{parse_number_list, parse_target};
use super::{Puzzle, PuzzleKind};
use crate::errors::InputError;
use crate::model::Frame;
use crate::playback::{PlaybackControls, PlaybackController};
use crate::puzzles::two_sum::{self, Algorithm, TwoSumModel, TwoSumState};
use std::collections::BTreeSet;
use std::time::Duration;

/// Two-Sum over an editable array and target
pub struct TwoSumPuzzle {
    numbers: Vec<i32>,
    controller: PlaybackController<TwoSumModel>,
}

impl TwoSumPuzzle {
    pub fn new(numbers: Vec<i32>, target: i32, algorithm: Algorithm, speed: Duration) -> Self {
        let model = two_sum::generate(algorithm, &numbers, target);
        TwoSumPuzzle {
            numbers,
            controller: PlaybackController::new(model, speed),
        }
    }

    /// Input array in its original order
    pub fn numbers(&self) -> &[i32] {
        &self.numbers
    }

    pub fn target(&self) -> i32 {
        self.model().target()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.model().algorithm()
    }

    pub fn model(&self) -> &TwoSumModel {
        self.controller.timeline()
    }

    pub fn controller(&self) -> &PlaybackController<TwoSumModel> {
        &self.controller
    }

    pub fn frame(&self) -> &Frame<TwoSumState> {
        self.model().frame(self.controller.cursor())
    }

    /// Parse both fields; nothing changes unless both are valid
    pub fn apply_input(&mut self, numbers_text: &str, target_text: &str) -> Result<(), InputError> {
        let parsed = parse_number_list(numbers_text).and_then(|numbers| {
            let target = parse_target(target_text)?;
            Ok((numbers, target))
        });
        let (numbers, target) = parsed.inspect_err(|err| {
            tracing::warn!(error = %err, "rejected two-sum input");
        })?;
        self.regenerate(numbers, target, self.algorithm());
        Ok(())
    }

    pub fn set_numbers(&mut self, text: &str) -> Result<(), InputError> {
        let numbers = parse_number_list(text).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected number list");
        })?;
        self.regenerate(numbers, self.target(), self.algorithm());
        Ok(())
    }

    pub fn set_target(&mut self, text: &str) -> Result<(), InputError> {
        let target = parse_target(text).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected target");
        })?;
        self.regenerate(self.numbers.clone(), target, self.algorithm());
        Ok(())
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.regenerate(self.numbers.clone(), self.target(), algorithm);
    }

    fn regenerate(&mut self, numbers: Vec<i32>, target: i32, algorithm: Algorithm) {
        let model = two_sum::generate(algorithm, &numbers, target);
        self.controller.replace(model);
        tracing::info!(?numbers, target, %algorithm, "two-sum parameters changed");
        self.numbers = numbers;
    }
}

impl Puzzle for TwoSumPuzzle {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::TwoSum
    }

    fn summary(&self) -> String {
        let numbers: Vec<String> = self.numbers.iter().map(|n| n.to_string()).collect();
        format!(
            "[{}] target {} ({})",
            numbers.join(", "),
            self.target(),
            self.algorithm()
        )
    }

    fn listing(&self) -> &'static [&'static str] {
        self.algorithm().listing()
    }

    fn narration_at(&self, index: usize) -> &str {
        self.model().frame(index).narration()
    }

    fn lines_at(&self, index: usize) -> &BTreeSet<usize> {
        self.model().frame(index).highlighted_lines()
    }

    fn controls(&self) -> &dyn PlaybackControls {
        &self.controller
    }

    fn controls_mut(&mut self) -> &mut dyn PlaybackControls {
        &mut self.controller
    }

    fn cycle_variant(&mut self) {
        self.set_algorithm(self.algorithm().next());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::PlaybackState;

    fn puzzle() -> TwoSumPuzzle {
        TwoSumPuzzle::new(
            vec![-5, 7, 0, 1, 9],
            8,
            Algorithm::BruteForce,
            Duration::from_millis(500),
        )
    }

    #[test]
    fn test_invalid_input_keeps_model() {
        let mut p = puzzle();
        p.controls_mut().seek(3);
        let frames = p.controls().frame_count();

        assert!(p.apply_input("1, 2, oops", "3").is_err());
        assert!(p.apply_input("1, 2", "three").is_err());
        assert!(p.set_target("").is_err());

        assert_eq!(p.numbers(), &[-5, 7, 0, 1, 9]);
        assert_eq!(p.target(), 8);
        assert_eq!(p.controls().frame_count(), frames);
        assert_eq!(p.controls().cursor(), 3);
        assert_eq!(p.controls().state(), PlaybackState::Paused);
    }

    #[test]
    fn test_apply_input_regenerates() {
        let mut p = puzzle();
        p.controls_mut().seek(2);
        p.apply_input("2 7 11 15", "9").unwrap();
        assert_eq!(p.numbers(), &[2, 7, 11, 15]);
        assert_eq!(p.controls().cursor(), 0);
        assert_eq!(p.controls().state(), PlaybackState::Idle);
        let found = p.model().outcome().unwrap();
        assert_eq!(found.indices, (0, 1));
    }

    #[test]
    fn test_cycle_algorithm_keeps_input() {
        let mut p = puzzle();
        p.cycle_variant();
        assert_eq!(p.algorithm(), Algorithm::TwoPointer);
        assert_eq!(p.model().view().values(), &[-5, 0, 1, 7, 9]);
        assert_eq!(p.numbers(), &[-5, 7, 0, 1, 9]);
        assert_eq!(p.listing(), Algorithm::TwoPointer.listing());
    }

    #[test]
    fn test_empty_list_is_accepted() {
        let mut p = puzzle();
        p.set_numbers("  ").unwrap();
        assert!(p.numbers().is_empty());
        assert!(p.model().outcome().is_none());
    }
}

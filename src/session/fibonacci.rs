use super::input::validate_fibonacci;
use super::{Puzzle, PuzzleKind};
use crate::errors::InputError;
use crate::playback::{PlaybackControls, PlaybackController};
use crate::puzzles::fibonacci::{self, FibonacciModel, FibonacciTrace, Method, NodeView};
use std::collections::BTreeSet;
use std::time::Duration;

/// Fibonacci with a selectable method
pub struct FibonacciPuzzle {
    controller: PlaybackController<FibonacciModel>,
}

impl FibonacciPuzzle {
    pub fn new(method: Method, n: u32, speed: Duration) -> Result<Self, InputError> {
        let n = validate_fibonacci(method, n)?;
        Ok(FibonacciPuzzle {
            controller: PlaybackController::new(fibonacci::generate(method, n), speed),
        })
    }

    pub fn method(&self) -> Method {
        self.model().method()
    }

    pub fn n(&self) -> u32 {
        self.model().n()
    }

    pub fn model(&self) -> &FibonacciModel {
        self.controller.timeline()
    }

    pub fn controller(&self) -> &PlaybackController<FibonacciModel> {
        &self.controller
    }

    /// Call states at the cursor; `None` unless the method is recursive
    pub fn call_states(&self) -> Option<Vec<NodeView>> {
        match self.model().trace() {
            FibonacciTrace::Recursive { tree, steps } => {
                Some(tree.fold(steps, self.controller.cursor()))
            }
            _ => None,
        }
    }

    pub fn set_n(&mut self, n: u32) -> Result<(), InputError> {
        let method = self.method();
        let n = validate_fibonacci(method, n).inspect_err(|err| {
            tracing::warn!(n, %method, error = %err, "rejected fibonacci n");
        })?;
        self.regenerate(method, n);
        Ok(())
    }

    /// Switch method, clamping `n` to the new method's cap
    pub fn set_method(&mut self, method: Method) {
        let n = self.n().min(method.max_n());
        self.regenerate(method, n);
    }

    fn regenerate(&mut self, method: Method, n: u32) {
        self.controller.replace(fibonacci::generate(method, n));
        tracing::info!(%method, n, "fibonacci parameters changed");
    }
}

impl Puzzle for FibonacciPuzzle {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::Fibonacci
    }

    fn summary(&self) -> String {
        format!("fib({}) {}", self.n(), self.method())
    }

    fn listing(&self) -> &'static [&'static str] {
        self.method().listing()
    }

    fn narration_at(&self, index: usize) -> &str {
        self.model().narration(index)
    }

    fn lines_at(&self, index: usize) -> &BTreeSet<usize> {
        self.model().highlighted_lines(index)
    }

    fn controls(&self) -> &dyn PlaybackControls {
        &self.controller
    }

    fn controls_mut(&mut self) -> &mut dyn PlaybackControls {
        &mut self.controller
    }

    fn resize(&mut self, delta: i32) -> Result<(), InputError> {
        self.set_n(self.n().saturating_add_signed(delta))
    }

    fn cycle_variant(&mut self) {
        self.set_method(self.method().next());
    }
}

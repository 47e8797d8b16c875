//! Tower of Hanoi
//!
//! - [`solve`]: canonical minimal move list by divide and conquer
//! - [`TowerState`]: three rods, disks stored bottom-to-top
//! - [`project`]: full replay of a move prefix
//! - [`TowerProjector`]: incremental replay that follows a moving cursor
//!   in either direction
//! - [`HanoiSolution`]: moves plus one narrated frame per move
//!
//! Rods are numbered 0, 1, 2 and shown as A, B, C. Disk `1` is the smallest.

use crate::model::{Frame, StepModel, Timeline};
use thiserror::Error;

pub const ROD_COUNT: usize = 3;

/// Display names for rods 0, 1, 2
pub const ROD_NAMES: [&str; ROD_COUNT] = ["A", "B", "C"];

/// Pseudocode shown next to the towers
pub const LISTING: &[&str] = &[
    "procedure hanoi(n, source, auxiliary, target):",
    "  if n == 0: return",
    "  hanoi(n - 1, source, target, auxiliary)",
    "  move disk n from source to target",
    "  hanoi(n - 1, auxiliary, source, target)",
];

/// A single disk transfer between rods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HanoiMove {
    pub from: usize,
    pub to: usize,
}

impl HanoiMove {
    pub fn new(from: usize, to: usize) -> Self {
        HanoiMove { from, to }
    }

    /// The move that undoes this one
    pub fn reversed(self) -> Self {
        HanoiMove {
            from: self.to,
            to: self.from,
        }
    }
}

/// Length of the minimal solution for `n` disks
pub fn move_count(n: u32) -> usize {
    (1usize << n) - 1
}

/// Minimal solution moving `n` disks from `source` to `target`
pub fn solve(n: u32, source: usize, auxiliary: usize, target: usize) -> Vec<HanoiMove> {
    let mut moves = Vec::with_capacity(move_count(n));
    solve_into(n, source, auxiliary, target, &mut moves);
    moves
}

fn solve_into(n: u32, source: usize, auxiliary: usize, target: usize, out: &mut Vec<HanoiMove>) {
    if n == 0 {
        return;
    }
    solve_into(n - 1, source, target, auxiliary, out);
    out.push(HanoiMove::new(source, target));
    solve_into(n - 1, auxiliary, source, target, out);
}

/// A move that breaks the rules of the puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("rod {rod} does not exist")]
    NoSuchRod { rod: usize },

    #[error("rod {rod} has no disk to move")]
    EmptyRod { rod: usize },

    #[error("disk {disk} cannot be placed on smaller disk {onto}")]
    LargerOnSmaller { disk: u32, onto: u32 },
}

/// Disks on each rod, bottom-to-top
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TowerState {
    rods: [Vec<u32>; ROD_COUNT],
}

impl TowerState {
    /// All `n` disks on rod 0, largest at the bottom
    pub fn initial(n: u32) -> Self {
        TowerState {
            rods: [(1..=n).rev().collect(), Vec::new(), Vec::new()],
        }
    }

    pub fn rod(&self, rod: usize) -> &[u32] {
        &self.rods[rod]
    }

    pub fn rods(&self) -> &[Vec<u32>; ROD_COUNT] {
        &self.rods
    }

    pub fn top(&self, rod: usize) -> Option<u32> {
        self.rods.get(rod).and_then(|r| r.last().copied())
    }

    pub fn disk_count(&self) -> usize {
        self.rods.iter().map(Vec::len).sum()
    }

    /// Every rod strictly decreasing from bottom to top
    pub fn is_ordered(&self) -> bool {
        self.rods
            .iter()
            .all(|rod| rod.windows(2).all(|pair| pair[0] > pair[1]))
    }

    /// Move the top disk of `mv.from` onto `mv.to`, returning the disk moved
    pub fn try_apply(&mut self, mv: HanoiMove) -> Result<u32, IllegalMove> {
        for rod in [mv.from, mv.to] {
            if rod >= ROD_COUNT {
                return Err(IllegalMove::NoSuchRod { rod });
            }
        }
        let disk = self
            .top(mv.from)
            .ok_or(IllegalMove::EmptyRod { rod: mv.from })?;
        if let Some(onto) = self.top(mv.to) {
            if onto < disk {
                return Err(IllegalMove::LargerOnSmaller { disk, onto });
            }
        }
        self.rods[mv.from].pop();
        self.rods[mv.to].push(disk);
        Ok(disk)
    }
}

/// Apply a move that the solver produced.
///
/// A failure means the move list is corrupt: panic in debug builds, log and
/// refuse the move otherwise.
fn apply_generated(state: &mut TowerState, mv: HanoiMove) -> Option<u32> {
    match state.try_apply(mv) {
        Ok(disk) => Some(disk),
        Err(err) => {
            if cfg!(debug_assertions) {
                panic!("illegal generated move {:?}: {}", mv, err);
            }
            tracing::error!(?mv, %err, "illegal generated move, replay stopped");
            None
        }
    }
}

/// Tower state after `moves[..up_to]` from the initial `n`-disk tower
pub fn project(n: u32, moves: &[HanoiMove], up_to: usize) -> TowerState {
    let mut state = TowerState::initial(n);
    for &mv in &moves[..up_to.min(moves.len())] {
        if apply_generated(&mut state, mv).is_none() {
            break;
        }
    }
    state
}

/// Incremental tower replay that follows a cursor.
///
/// Moving forward applies the next moves, moving backward undoes them, so
/// each step costs one disk transfer. The result always equals
/// [`project`] for the same `up_to`.
#[derive(Debug, Clone)]
pub struct TowerProjector {
    disks: u32,
    state: TowerState,
    applied: usize,
}

impl TowerProjector {
    pub fn new(disks: u32) -> Self {
        TowerProjector {
            disks,
            state: TowerState::initial(disks),
            applied: 0,
        }
    }

    pub fn disks(&self) -> u32 {
        self.disks
    }

    /// Number of moves currently applied
    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn state(&self) -> &TowerState {
        &self.state
    }

    /// Bring the towers to the state after `moves[..up_to]`
    pub fn seek(&mut self, moves: &[HanoiMove], up_to: usize) -> &TowerState {
        let up_to = up_to.min(moves.len());
        while self.applied < up_to {
            if apply_generated(&mut self.state, moves[self.applied]).is_none() {
                break;
            }
            self.applied += 1;
        }
        while self.applied > up_to {
            let mv = moves[self.applied - 1].reversed();
            if apply_generated(&mut self.state, mv).is_none() {
                break;
            }
            self.applied -= 1;
        }
        &self.state
    }
}

/// Payload of one Hanoi frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HanoiStep {
    /// Move performed to reach this frame (`None` for the initial tower)
    pub last_move: Option<HanoiMove>,
    pub disk: Option<u32>,
    pub moves_made: usize,
}

/// Complete narrated solution for one disk count
#[derive(Debug, Clone)]
pub struct HanoiSolution {
    disks: u32,
    moves: Vec<HanoiMove>,
    steps: StepModel<HanoiStep>,
}

impl HanoiSolution {
    /// Solve for `disks` disks from rod A to rod C via rod B
    pub fn new(disks: u32) -> Self {
        let moves = solve(disks, 0, 1, 2);
        let total = moves.len();
        let mut rec = StepModel::recorder();
        rec.push(
            format!(
                "{} disk(s) on rod A. Goal: move them all to rod C in {} moves.",
                disks, total
            ),
            &[1],
            HanoiStep {
                last_move: None,
                disk: None,
                moves_made: 0,
            },
        );

        let mut state = TowerState::initial(disks);
        for (i, &mv) in moves.iter().enumerate() {
            let Some(disk) = apply_generated(&mut state, mv) else {
                break;
            };
            let mut narration = format!(
                "Move {} of {}: disk {} from rod {} to rod {}.",
                i + 1,
                total,
                disk,
                ROD_NAMES[mv.from],
                ROD_NAMES[mv.to]
            );
            if i + 1 == total {
                narration.push_str(" Solved!");
            }
            rec.push(
                narration,
                &[4],
                HanoiStep {
                    last_move: Some(mv),
                    disk: Some(disk),
                    moves_made: i + 1,
                },
            );
        }

        tracing::debug!(disks, moves = total, "generated hanoi solution");
        HanoiSolution {
            disks,
            moves,
            steps: rec.finish(),
        }
    }

    pub fn disks(&self) -> u32 {
        self.disks
    }

    pub fn moves(&self) -> &[HanoiMove] {
        &self.moves
    }

    pub fn steps(&self) -> &StepModel<HanoiStep> {
        &self.steps
    }

    /// Frame at `cursor`; frame `k` is the tower after `k` moves
    pub fn frame(&self, cursor: usize) -> &Frame<HanoiStep> {
        self.steps.at(cursor)
    }
}

impl Timeline for HanoiSolution {
    fn frame_count(&self) -> usize {
        self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(moves: &[HanoiMove]) -> Vec<(usize, usize)> {
        moves.iter().map(|m| (m.from, m.to)).collect()
    }

    #[test]
    fn test_three_disk_solution() {
        let moves = solve(3, 0, 1, 2);
        assert_eq!(
            pairs(&moves),
            vec![(0, 2), (0, 1), (2, 1), (0, 2), (1, 0), (1, 2), (0, 2)]
        );

        let end = project(3, &moves, moves.len());
        assert_eq!(end.rod(2), &[3, 2, 1]);
        assert!(end.rod(0).is_empty());
        assert!(end.rod(1).is_empty());
    }

    #[test]
    fn test_zero_disks_has_no_moves() {
        assert!(solve(0, 0, 1, 2).is_empty());
        let solution = HanoiSolution::new(0);
        assert_eq!(solution.frame_count(), 1);
    }

    #[test]
    fn test_move_counts_and_size_relation() {
        for n in 1..=7 {
            let moves = solve(n, 0, 1, 2);
            assert_eq!(moves.len(), (1 << n) - 1);
            assert_eq!(moves.len(), 2 * solve(n - 1, 0, 1, 2).len() + 1);
        }
    }

    #[test]
    fn test_replay_keeps_rods_ordered() {
        for n in 1..=7 {
            let moves = solve(n, 0, 1, 2);
            let mut state = TowerState::initial(n);
            for &mv in &moves {
                assert!(state.try_apply(mv).is_ok());
                assert!(state.is_ordered());
                assert_eq!(state.disk_count(), n as usize);
            }
            assert_eq!(state.rod(2).len(), n as usize);
        }
    }

    #[test]
    fn test_illegal_moves_are_reported() {
        let mut state = TowerState::initial(2);
        assert_eq!(
            state.try_apply(HanoiMove::new(1, 2)),
            Err(IllegalMove::EmptyRod { rod: 1 })
        );
        assert_eq!(state.try_apply(HanoiMove::new(0, 1)), Ok(1));
        assert_eq!(
            state.try_apply(HanoiMove::new(0, 1)),
            Err(IllegalMove::LargerOnSmaller { disk: 2, onto: 1 })
        );
        assert_eq!(
            state.try_apply(HanoiMove::new(0, 3)),
            Err(IllegalMove::NoSuchRod { rod: 3 })
        );
        // Failed moves leave the state untouched
        assert_eq!(state.rod(0), &[2]);
        assert_eq!(state.rod(1), &[1]);
    }

    #[test]
    fn test_projector_matches_full_replay() {
        let n = 4;
        let moves = solve(n, 0, 1, 2);
        let mut projector = TowerProjector::new(n);

        let cursors = [0, 3, 15, 7, 8, 1, 0, 15, 2];
        for &cursor in &cursors {
            let incremental = projector.seek(&moves, cursor).clone();
            assert_eq!(incremental, project(n, &moves, cursor), "cursor {}", cursor);
            assert_eq!(projector.applied(), cursor);
        }
    }

    #[test]
    fn test_solution_frames_narrate_disks() {
        let solution = HanoiSolution::new(2);
        assert_eq!(solution.frame_count(), 4);
        assert_eq!(solution.frame(0).payload().moves_made, 0);

        let first = solution.frame(1);
        assert_eq!(first.payload().disk, Some(1));
        assert_eq!(first.payload().last_move, Some(HanoiMove::new(0, 1)));
        assert!(first.narration().contains("disk 1 from rod A to rod B"));
        assert!(solution.frame(3).narration().ends_with("Solved!"));
        assert!(solution.frame(3).is_highlighted(4));
    }
}

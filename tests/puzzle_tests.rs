// Integration tests for the puzzle generators

use algoscope::model::Timeline;
use algoscope::puzzles::fibonacci::{self, Method};
use algoscope::puzzles::hanoi::{self, HanoiSolution, TowerProjector, TowerState};
use algoscope::puzzles::two_sum::{self, Action, Algorithm};

/// Small deterministic generator so the array cases are reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn range(&mut self, lo: i32, hi: i32) -> i32 {
        lo + (self.next() % (hi - lo + 1) as u64) as i32
    }
}

#[test]
fn test_hanoi_replay_is_legal_for_every_size() {
    for n in 1..=7 {
        let moves = hanoi::solve(n, 0, 1, 2);
        assert_eq!(moves.len(), (1usize << n) - 1);

        let mut state = TowerState::initial(n);
        for &mv in &moves {
            state.try_apply(mv).expect("solver produced an illegal move");
            assert!(state.is_ordered());
        }
        let expected: Vec<u32> = (1..=n).rev().collect();
        assert_eq!(state.rod(2), expected.as_slice());
        assert!(state.rod(0).is_empty() && state.rod(1).is_empty());
    }
}

#[test]
fn test_hanoi_size_relation() {
    assert!(hanoi::solve(0, 0, 1, 2).is_empty());
    for n in 1..=7 {
        let smaller = hanoi::solve(n - 1, 0, 1, 2).len();
        assert_eq!(hanoi::solve(n, 0, 1, 2).len(), 2 * smaller + 1);
    }
}

#[test]
fn test_hanoi_three_disk_scenario() {
    let solution = HanoiSolution::new(3);
    let pairs: Vec<(usize, usize)> = solution.moves().iter().map(|m| (m.from, m.to)).collect();
    assert_eq!(
        pairs,
        vec![(0, 2), (0, 1), (2, 1), (0, 2), (1, 0), (1, 2), (0, 2)]
    );
    assert_eq!(solution.frame_count(), 8);

    let final_state = hanoi::project(3, solution.moves(), solution.moves().len());
    assert_eq!(final_state.rod(2), &[3, 2, 1]);
}

#[test]
fn test_incremental_projection_matches_full_replay() {
    let solution = HanoiSolution::new(5);
    let moves = solution.moves();
    let mut projector = TowerProjector::new(5);
    // forward, backward and jumping around
    for &up_to in &[0, 1, 2, 17, 31, 30, 4, 0, 31, 12] {
        let incremental = projector.seek(moves, up_to).clone();
        assert_eq!(incremental, hanoi::project(5, moves, up_to), "up_to = {}", up_to);
    }
}

#[test]
fn test_two_sum_algorithms_agree() {
    let mut rng = Lcg(7);
    for case in 0..300 {
        let len = rng.range(0, 9) as usize;
        let nums: Vec<i32> = (0..len).map(|_| rng.range(-12, 12)).collect();
        let target = rng.range(-15, 15);

        let outcomes: Vec<_> = Algorithm::ALL
            .iter()
            .map(|&alg| two_sum::generate(alg, &nums, target).outcome())
            .collect();

        let exists = outcomes[0].is_some();
        for (alg, outcome) in Algorithm::ALL.iter().zip(&outcomes) {
            assert_eq!(
                outcome.is_some(),
                exists,
                "case {}: {} disagrees on {:?} target {}",
                case,
                alg,
                nums,
                target
            );
            if let Some(pair) = outcome {
                assert_eq!(pair.sum(), i64::from(target));
                let (i, j) = pair.indices;
                assert_ne!(i, j);
                assert_eq!((nums[i], nums[j]), pair.values);
            }
        }
    }
}

#[test]
fn test_two_sum_tie_break_sample() {
    let nums = [3, 5, -4, 8, 11, 1, -1, 6];

    let brute = two_sum::generate(Algorithm::BruteForce, &nums, 10);
    let pair = brute.outcome().unwrap();
    assert_eq!(pair.indices, (4, 6));
    assert_eq!(pair.values, (11, -1));

    let hash = two_sum::generate(Algorithm::HashMap, &nums, 10);
    let pair = hash.outcome().unwrap();
    // [complement, current], detected at the index of -1
    assert_eq!(pair.values, (11, -1));
    assert_eq!(pair.indices, (4, 6));
}

#[test]
fn test_two_sum_match_frame_is_last() {
    let nums = [1, 4, 2, 3, 9, 0, 5];
    for alg in Algorithm::ALL {
        let model = two_sum::generate(alg, &nums, 5);
        let frames = model.steps().frames();
        let matched: Vec<usize> = frames
            .iter()
            .filter(|f| f.payload().matched == Some(true))
            .map(|f| f.index())
            .collect();
        assert_eq!(matched, vec![frames.len() - 1], "{}", alg);
        assert_eq!(frames[frames.len() - 1].payload().action, Action::Match);
    }
}

#[test]
fn test_two_sum_edge_inputs() {
    let cases: [(&[i32], i32, bool); 6] = [
        (&[], 0, false),
        (&[5], 10, false),
        (&[5, 5], 10, true),
        (&[-3, 3], 0, true),
        (&[1, 2, 3], 100, false),
        (&[-1, -2, -3, -4], -7, true),
    ];
    for (nums, target, found) in cases {
        for alg in Algorithm::ALL {
            let model = two_sum::generate(alg, nums, target);
            assert_eq!(model.outcome().is_some(), found, "{} {:?} {}", alg, nums, target);
            assert!(!model.steps().is_empty());
        }
    }
}

#[test]
fn test_fibonacci_methods_agree() {
    let known = [(0, 0), (1, 1), (2, 1), (5, 5), (10, 55), (20, 6765)];
    for (n, value) in known {
        assert_eq!(fibonacci::fib(n), value);
    }
    for n in 0..=20 {
        let expected = fibonacci::fib(n);
        assert_eq!(fibonacci::generate(Method::Iterative, n).result(), expected);
        assert_eq!(fibonacci::generate(Method::Memoized, n).result(), expected);
        if n <= fibonacci::MAX_N_RECURSIVE {
            assert_eq!(fibonacci::generate(Method::Recursive, n).result(), expected);
        }
    }
}

#[test]
fn test_fibonacci_base_cases_have_frames() {
    for method in Method::ALL {
        for n in [0, 1] {
            let model = fibonacci::generate(method, n);
            assert!(model.frame_count() >= 2, "{} n={}", method, n);
            assert_eq!(model.result(), u64::from(n));
        }
    }
}

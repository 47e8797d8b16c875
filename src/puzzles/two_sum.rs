//! Two-Sum step generators
//!
//! Three ways to find two entries of an array that add up to a target:
//!
//! - [`Algorithm::BruteForce`]: every pair `(i, j)`, `i < j`, in increasing
//!   `i` then `j`. The first matching pair wins and is reported as
//!   `[nums[i], nums[j]]`.
//! - [`Algorithm::TwoPointer`]: a stably sorted copy walked inward from both
//!   ends. Frames index the sorted view; [`ArrayView::original_index`] maps a
//!   sorted position back to the input.
//! - [`Algorithm::HashMap`]: one pass that remembers each value's index. A
//!   match is reported as `[complement, current]`.
//!
//! All frames of a model share one payload shape, [`TwoSumState`]. Fields an
//! algorithm does not use stay `None` or empty.
//!
//! Sums are computed in `i64` so no pair of `i32` inputs can overflow.

use crate::model::{Frame, StepModel, Timeline};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which Two-Sum strategy to animate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    #[default]
    BruteForce,
    TwoPointer,
    HashMap,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::BruteForce,
        Algorithm::TwoPointer,
        Algorithm::HashMap,
    ];

    /// Next algorithm in display order, wrapping around
    pub fn next(self) -> Self {
        match self {
            Algorithm::BruteForce => Algorithm::TwoPointer,
            Algorithm::TwoPointer => Algorithm::HashMap,
            Algorithm::HashMap => Algorithm::BruteForce,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::BruteForce => "Brute Force",
            Algorithm::TwoPointer => "Two Pointers",
            Algorithm::HashMap => "Hash Map",
        }
    }

    /// Pseudocode the frames' highlighted lines refer to
    pub fn listing(self) -> &'static [&'static str] {
        match self {
            Algorithm::BruteForce => BRUTE_FORCE_LISTING,
            Algorithm::TwoPointer => TWO_POINTER_LISTING,
            Algorithm::HashMap => HASH_MAP_LISTING,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const BRUTE_FORCE_LISTING: &[&str] = &[
    "function twoSum(array, target):",
    "  for i from 0 to length(array) - 2:",
    "    for j from i + 1 to length(array) - 1:",
    "      if array[i] + array[j] == target:",
    "        // pair found",
    "        return [array[i], array[j]]",
    "  return []",
];

pub const TWO_POINTER_LISTING: &[&str] = &[
    "function twoSum(array, target):",
    "  sort(array)",
    "  left = 0",
    "  right = length(array) - 1",
    "  while left < right:",
    "    sum = array[left] + array[right]",
    "    if sum == target:",
    "      return [array[left], array[right]]",
    "    else if sum < target:",
    "      left = left + 1",
    "    else:",
    "      right = right - 1",
    "  return []",
];

pub const HASH_MAP_LISTING: &[&str] = &[
    "function twoSum(array, target):",
    "  seen = new HashMap()",
    "  for i from 0 to length(array) - 1:",
    "    current = array[i]",
    "    complement = target - current",
    "    if complement in seen:",
    "      return [complement, current]",
    "    seen[current] = i",
    "  return []",
];

/// Named cursor into the displayed array
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pointer {
    /// Brute force outer index `i`
    First,
    /// Brute force inner index `j`
    Second,
    Left,
    Right,
    /// Hash map scan position
    Current,
    /// Hash map position of the remembered complement
    Complement,
}

impl Pointer {
    pub fn label(self) -> &'static str {
        match self {
            Pointer::First => "i",
            Pointer::Second => "j",
            Pointer::Left => "left",
            Pointer::Right => "right",
            Pointer::Current => "cur",
            Pointer::Complement => "comp",
        }
    }
}

/// What happened at a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    /// Brute force fixed the outer index
    FixFirst,
    /// Brute force compared a pair that did not match
    Compare,
    /// Two pointers placed at both ends
    InitPointers,
    AdvanceLeft,
    RetreatRight,
    /// Hash map stored the current value
    Record,
    Match,
    NoMatch,
}

/// A pair that sums to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairResult {
    /// Values in the order the algorithm reports them
    pub values: (i32, i32),
    /// Input indices of those values, in the same order
    pub indices: (usize, usize),
}

impl PairResult {
    pub fn sum(&self) -> i64 {
        i64::from(self.values.0) + i64::from(self.values.1)
    }
}

/// Payload of one Two-Sum frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoSumState {
    pub action: Action,
    /// View positions being compared
    pub compared: Option<(usize, usize)>,
    pub current_sum: Option<i64>,
    /// Named view positions to draw markers at
    pub pointers: BTreeMap<Pointer, usize>,
    /// `Some(false)` after a failed check, `Some(true)` only on the final match frame
    pub matched: Option<bool>,
    pub result: Option<PairResult>,
    /// Hash map contents, value to input index (empty for other algorithms)
    pub seen: BTreeMap<i32, usize>,
}

impl TwoSumState {
    fn new(action: Action) -> Self {
        TwoSumState {
            action,
            compared: None,
            current_sum: None,
            pointers: BTreeMap::new(),
            matched: None,
            result: None,
            seen: BTreeMap::new(),
        }
    }

    fn with_pointers(mut self, pointers: &[(Pointer, usize)]) -> Self {
        self.pointers = pointers.iter().copied().collect();
        self
    }

    fn comparing(mut self, a: usize, b: usize, sum: i64, matched: bool) -> Self {
        self.compared = Some((a, b));
        self.current_sum = Some(sum);
        self.matched = Some(matched);
        self
    }

    fn with_seen(mut self, seen: &BTreeMap<i32, usize>) -> Self {
        self.seen = seen.clone();
        self
    }
}

/// The array as the algorithm sees it.
///
/// Identity for brute force and hash map; sorted (stable) for two pointers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayView {
    values: Vec<i32>,
    original_index: Vec<usize>,
}

impl ArrayView {
    pub fn identity(nums: &[i32]) -> Self {
        ArrayView {
            values: nums.to_vec(),
            original_index: (0..nums.len()).collect(),
        }
    }

    pub fn sorted(nums: &[i32]) -> Self {
        let mut order: Vec<usize> = (0..nums.len()).collect();
        order.sort_by_key(|&i| nums[i]);
        ArrayView {
            values: order.iter().map(|&i| nums[i]).collect(),
            original_index: order,
        }
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Input index of the value at view position `position`
    pub fn original_index(&self, position: usize) -> usize {
        self.original_index[position]
    }

    pub fn permutation(&self) -> &[usize] {
        &self.original_index
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Generated history for one algorithm over one input
#[derive(Debug, Clone)]
pub struct TwoSumModel {
    algorithm: Algorithm,
    target: i32,
    view: ArrayView,
    steps: StepModel<TwoSumState>,
}

impl TwoSumModel {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn target(&self) -> i32 {
        self.target
    }

    pub fn view(&self) -> &ArrayView {
        &self.view
    }

    pub fn steps(&self) -> &StepModel<TwoSumState> {
        &self.steps
    }

    pub fn frame(&self, cursor: usize) -> &Frame<TwoSumState> {
        self.steps.at(cursor)
    }

    /// Final answer, read from the last frame
    pub fn outcome(&self) -> Option<PairResult> {
        self.steps.last().payload().result
    }
}

impl Timeline for TwoSumModel {
    fn frame_count(&self) -> usize {
        self.steps.len()
    }
}

/// Run `algorithm` over `nums` and record every step
pub fn generate(algorithm: Algorithm, nums: &[i32], target: i32) -> TwoSumModel {
    let (view, steps) = match algorithm {
        Algorithm::BruteForce => (ArrayView::identity(nums), brute_force(nums, target)),
        Algorithm::TwoPointer => {
            let view = ArrayView::sorted(nums);
            let steps = two_pointer(&view, target);
            (view, steps)
        }
        Algorithm::HashMap => (ArrayView::identity(nums), hash_map(nums, target)),
    };
    tracing::debug!(
        %algorithm,
        len = nums.len(),
        target,
        frames = steps.len(),
        "generated two-sum steps"
    );
    TwoSumModel {
        algorithm,
        target,
        view,
        steps,
    }
}

fn sum_of(a: i32, b: i32) -> i64 {
    i64::from(a) + i64::from(b)
}

/// Brute force over all pairs
pub fn brute_force(nums: &[i32], target: i32) -> StepModel<TwoSumState> {
    let mut rec = StepModel::recorder();
    rec.push(
        "Starting brute force: check every pair (i, j) with i < j.",
        &[1],
        TwoSumState::new(Action::Start),
    );

    for i in 0..nums.len().saturating_sub(1) {
        rec.push(
            format!("Outer loop: fix index {} (value {}).", i, nums[i]),
            &[2],
            TwoSumState::new(Action::FixFirst).with_pointers(&[(Pointer::First, i)]),
        );
        for j in i + 1..nums.len() {
            let sum = sum_of(nums[i], nums[j]);
            let pointers = [(Pointer::First, i), (Pointer::Second, j)];
            // the hit is shown as a comparison first; only the final frame is matched
            rec.push(
                format!(
                    "Check index {} (value {}): {} + {} = {}, target is {}.",
                    j, nums[j], nums[i], nums[j], sum, target
                ),
                &[3, 4],
                TwoSumState::new(Action::Compare)
                    .with_pointers(&pointers)
                    .comparing(i, j, sum, false),
            );
            if sum == i64::from(target) {
                let mut state = TwoSumState::new(Action::Match)
                    .with_pointers(&pointers)
                    .comparing(i, j, sum, true);
                state.result = Some(PairResult {
                    values: (nums[i], nums[j]),
                    indices: (i, j),
                });
                rec.push(
                    format!(
                        "{} + {} = {} equals target {}. Pair found: [{}, {}].",
                        nums[i], nums[j], sum, target, nums[i], nums[j]
                    ),
                    &[4, 5, 6],
                    state,
                );
                return rec.finish();
            }
        }
    }

    rec.push(
        "No pair found after checking all combinations.",
        &[7],
        TwoSumState::new(Action::NoMatch),
    );
    rec.finish()
}

/// Two pointers over an already sorted view
pub fn two_pointer(view: &ArrayView, target: i32) -> StepModel<TwoSumState> {
    let values = view.values();
    let mut rec = StepModel::recorder();
    rec.push(
        "Starting two pointers: sort the array. Original indices are kept alongside.",
        &[1, 2],
        TwoSumState::new(Action::Start),
    );

    if values.len() < 2 {
        rec.push(
            "Fewer than two elements: no pair is possible.",
            &[13],
            TwoSumState::new(Action::NoMatch),
        );
        return rec.finish();
    }

    let mut left = 0;
    let mut right = values.len() - 1;
    rec.push(
        format!(
            "Left pointer at {} (value {}), right pointer at {} (value {}).",
            left, values[left], right, values[right]
        ),
        &[3, 4],
        TwoSumState::new(Action::InitPointers)
            .with_pointers(&[(Pointer::Left, left), (Pointer::Right, right)]),
    );

    while left < right {
        let sum = sum_of(values[left], values[right]);
        let pointers = [(Pointer::Left, left), (Pointer::Right, right)];
        if sum == i64::from(target) {
            let mut state = TwoSumState::new(Action::Match)
                .with_pointers(&pointers)
                .comparing(left, right, sum, true);
            state.result = Some(PairResult {
                values: (values[left], values[right]),
                indices: (view.original_index(left), view.original_index(right)),
            });
            rec.push(
                format!(
                    "{} + {} = {} equals target {}. Pair found: [{}, {}].",
                    values[left], values[right], sum, target, values[left], values[right]
                ),
                &[5, 6, 7, 8],
                state,
            );
            return rec.finish();
        }

        let state = TwoSumState::new(if sum < i64::from(target) {
            Action::AdvanceLeft
        } else {
            Action::RetreatRight
        })
        .with_pointers(&pointers)
        .comparing(left, right, sum, false);

        if sum < i64::from(target) {
            rec.push(
                format!(
                    "{} + {} = {} < {}: move left pointer right.",
                    values[left], values[right], sum, target
                ),
                &[6, 9, 10],
                state,
            );
            left += 1;
        } else {
            rec.push(
                format!(
                    "{} + {} = {} > {}: move right pointer left.",
                    values[left], values[right], sum, target
                ),
                &[6, 11, 12],
                state,
            );
            right -= 1;
        }
    }

    rec.push(
        "Pointers met without a match. No pair found.",
        &[13],
        TwoSumState::new(Action::NoMatch),
    );
    rec.finish()
}

/// One pass remembering each value's index
pub fn hash_map(nums: &[i32], target: i32) -> StepModel<TwoSumState> {
    let mut rec = StepModel::recorder();
    let mut lookup: FxHashMap<i64, usize> = FxHashMap::default();
    let mut seen: BTreeMap<i32, usize> = BTreeMap::new();

    rec.push(
        "Starting hash map: begin with an empty map of seen values.",
        &[1, 2],
        TwoSumState::new(Action::Start),
    );

    for (i, &current) in nums.iter().enumerate() {
        let complement = i64::from(target) - i64::from(current);
        if let Some(&at) = lookup.get(&complement) {
            let complement_value = nums[at];
            let mut state = TwoSumState::new(Action::Match)
                .with_pointers(&[(Pointer::Current, i), (Pointer::Complement, at)])
                .comparing(at, i, sum_of(complement_value, current), true)
                .with_seen(&seen);
            state.result = Some(PairResult {
                values: (complement_value, current),
                indices: (at, i),
            });
            rec.push(
                format!(
                    "{} - {} = {} was seen at index {}. Pair found: [{}, {}].",
                    target, current, complement, at, complement_value, current
                ),
                &[5, 6, 7],
                state,
            );
            return rec.finish();
        }

        lookup.insert(i64::from(current), i);
        seen.insert(current, i);
        rec.push(
            format!(
                "Index {}: complement {} - {} = {} not seen yet. Remember {} at index {}.",
                i, target, current, complement, current, i
            ),
            &[3, 4, 5, 8],
            TwoSumState::new(Action::Record)
                .with_pointers(&[(Pointer::Current, i)])
                .with_seen(&seen),
        );
    }

    rec.push(
        "No pair found after scanning every number.",
        &[9],
        TwoSumState::new(Action::NoMatch).with_seen(&seen),
    );
    rec.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [i32; 8] = [3, 5, -4, 8, 11, 1, -1, 6];

    #[test]
    fn test_brute_force_reports_first_pair_in_order() {
        let model = generate(Algorithm::BruteForce, &SAMPLE, 10);
        let result = model.outcome().unwrap();
        assert_eq!(result.values, (11, -1));
        assert_eq!(result.indices, (4, 6));
    }

    #[test]
    fn test_hash_map_reports_complement_first() {
        let model = generate(Algorithm::HashMap, &SAMPLE, 10);
        let result = model.outcome().unwrap();
        assert_eq!(result.values, (11, -1));
        assert_eq!(result.indices, (4, 6));
        let last = model.steps().last().payload();
        assert_eq!(last.pointers.get(&Pointer::Current), Some(&6));
        assert_eq!(last.pointers.get(&Pointer::Complement), Some(&4));
    }

    #[test]
    fn test_two_pointer_reports_sorted_order_with_original_indices() {
        let model = generate(Algorithm::TwoPointer, &SAMPLE, 10);
        assert_eq!(model.view().values(), &[-4, -1, 1, 3, 5, 6, 8, 11]);
        let result = model.outcome().unwrap();
        assert_eq!(result.values, (-1, 11));
        assert_eq!(result.indices, (6, 4));
    }

    #[test]
    fn test_sorted_view_is_stable_for_duplicates() {
        let view = ArrayView::sorted(&[2, 1, 2, 1]);
        assert_eq!(view.values(), &[1, 1, 2, 2]);
        assert_eq!(view.permutation(), &[1, 3, 0, 2]);
    }

    #[test]
    fn test_degenerate_two_pointer_input() {
        for nums in [&[][..], &[4][..]] {
            let model = generate(Algorithm::TwoPointer, nums, 4);
            assert_eq!(model.frame_count(), 2);
            assert_eq!(model.steps().last().payload().action, Action::NoMatch);
            assert!(model.outcome().is_none());
        }
    }

    #[test]
    fn test_match_frame_is_always_last() {
        let inputs: [(&[i32], i32); 4] = [
            (&SAMPLE[..], 10),
            (&[1, 2, 3, 4][..], 7),
            (&[0, 0][..], 0),
            (&[-3, 3, 5][..], 0),
        ];
        for (nums, target) in inputs {
            for algorithm in Algorithm::ALL {
                let model = generate(algorithm, nums, target);
                let matched: Vec<usize> = model
                    .steps()
                    .iter()
                    .filter(|f| f.payload().matched == Some(true))
                    .map(|f| f.index())
                    .collect();
                assert_eq!(matched, vec![model.last_index()], "{} on {:?}", algorithm, nums);
            }
        }
    }

    #[test]
    fn test_brute_force_visits_pairs_in_order() {
        let model = generate(Algorithm::BruteForce, &[1, 2, 3], 100);
        let compared: Vec<(usize, usize)> = model
            .steps()
            .iter()
            .filter_map(|f| f.payload().compared)
            .collect();
        assert_eq!(compared, vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(model.steps().last().payload().action, Action::NoMatch);
    }

    #[test]
    fn test_brute_force_compares_matching_pair_before_match() {
        let model = generate(Algorithm::BruteForce, &[1, 4], 5);
        let actions: Vec<Action> = model.steps().iter().map(|f| f.payload().action).collect();
        assert_eq!(
            actions,
            vec![Action::Start, Action::FixFirst, Action::Compare, Action::Match]
        );
        let compare = model.frame(2).payload();
        assert_eq!(compare.compared, Some((0, 1)));
        assert_eq!(compare.current_sum, Some(5));
        assert_eq!(compare.matched, Some(false));
        assert_eq!(model.steps().last().payload().matched, Some(true));
    }

    #[test]
    fn test_hash_map_snapshots_seen_values() {
        let model = generate(Algorithm::HashMap, &[4, 9, 4], 100);
        let last = model.steps().last().payload();
        // later duplicate overwrites the stored index
        assert_eq!(last.seen.get(&4), Some(&2));
        assert_eq!(last.seen.get(&9), Some(&1));
        assert_eq!(model.steps().first().payload().seen.len(), 0);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let model = generate(Algorithm::BruteForce, &[i32::MAX, i32::MAX], -2);
        assert!(model.outcome().is_none());
        assert_eq!(
            model.steps().get(2).and_then(|f| f.payload().current_sum),
            Some(2 * i64::from(i32::MAX))
        );
    }
}

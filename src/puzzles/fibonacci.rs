//! Fibonacci step generators
//!
//! Three ways to compute `F(n)` with `F(0) = 0`, `F(1) = 1`:
//!
//! - [`Method::Recursive`]: the naive double recursion. The full call tree is
//!   built first as an arena ([`CallTree`]); frames then record one node
//!   transition each, and the tree at a cursor is rebuilt by folding all
//!   transitions up to it ([`CallTree::fold`]). Left subtrees (`n - 1`) are
//!   evaluated completely before right subtrees (`n - 2`).
//! - [`Method::Iterative`]: two running values `a`, `b`.
//! - [`Method::Memoized`]: the recursive call order, but every call checks a
//!   memo shared by the whole run first.
//!
//! The recursive tree grows as `O(2^n)`, which is why its cap is lower.

use crate::model::{StepModel, StepRecorder, Timeline};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Largest `n` the recursive tree is generated for
pub const MAX_N_RECURSIVE: u32 = 8;

/// Largest `n` for the iterative and memoized methods
pub const MAX_N_OTHERS: u32 = 20;

/// How `F(n)` is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Recursive,
    Iterative,
    Memoized,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Recursive, Method::Iterative, Method::Memoized];

    pub fn next(self) -> Self {
        match self {
            Method::Recursive => Method::Iterative,
            Method::Iterative => Method::Memoized,
            Method::Memoized => Method::Recursive,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Method::Recursive => "Recursive",
            Method::Iterative => "Iterative",
            Method::Memoized => "Memoized",
        }
    }

    /// Largest supported `n` for this method
    pub fn max_n(self) -> u32 {
        match self {
            Method::Recursive => MAX_N_RECURSIVE,
            Method::Iterative | Method::Memoized => MAX_N_OTHERS,
        }
    }

    pub fn listing(self) -> &'static [&'static str] {
        match self {
            Method::Recursive => RECURSIVE_LISTING,
            Method::Iterative => ITERATIVE_LISTING,
            Method::Memoized => MEMOIZED_LISTING,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const RECURSIVE_LISTING: &[&str] = &[
    "function fib(n):",
    "  if n == 0:",
    "    return 0",
    "  if n == 1:",
    "    return 1",
    "  return fib(n - 1) + fib(n - 2)",
];

pub const ITERATIVE_LISTING: &[&str] = &[
    "function fib(n):",
    "  if n == 0: return 0",
    "  if n == 1: return 1",
    "  a = 0",
    "  b = 1",
    "  for i from 2 to n:",
    "    a, b = b, a + b",
    "  return b",
];

pub const MEMOIZED_LISTING: &[&str] = &[
    "memo = {}",
    "function fib(n):",
    "  if n in memo: return memo[n]",
    "  if n <= 1: result = n",
    "  else: result = fib(n - 1) + fib(n - 2)",
    "  memo[n] = result",
    "  return result",
];

/// Reference value, used to cross-check the animated methods
pub fn fib(n: u32) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    a
}

pub type NodeId = usize;

/// One call `fib(argument)` in the recursion tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallNode {
    pub id: NodeId,
    pub argument: u32,
    pub parent: Option<NodeId>,
    /// `[fib(argument - 1), fib(argument - 2)]`, absent for base cases
    pub children: Option<[NodeId; 2]>,
    pub depth: u32,
}

/// Arena holding the complete recursion tree, ids in pre-order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTree {
    nodes: Vec<CallNode>,
}

impl CallTree {
    pub fn build(n: u32) -> Self {
        let mut tree = CallTree { nodes: Vec::new() };
        tree.grow(n, None, 0);
        tree
    }

    fn grow(&mut self, argument: u32, parent: Option<NodeId>, depth: u32) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(CallNode {
            id,
            argument,
            parent,
            children: None,
            depth,
        });
        if argument > 1 {
            let left = self.grow(argument - 1, Some(id), depth + 1);
            let right = self.grow(argument - 2, Some(id), depth + 1);
            self.nodes[id].children = Some([left, right]);
        }
        id
    }

    pub fn root(&self) -> &CallNode {
        &self.nodes[0]
    }

    pub fn get(&self, id: NodeId) -> Option<&CallNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[CallNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node states after applying every transition in `steps[..=cursor]`
    pub fn fold(&self, steps: &StepModel<RecursiveStep>, cursor: usize) -> Vec<NodeView> {
        let mut views = vec![NodeView::default(); self.nodes.len()];
        let end = cursor.min(steps.len().saturating_sub(1));
        for frame in &steps.frames()[..=end] {
            if let Some(t) = frame.payload().transition {
                views[t.node] = NodeView {
                    state: t.state,
                    result: t.result,
                };
            }
        }
        views
    }
}

/// Evaluation progress of one call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeState {
    #[default]
    Pending,
    Computing,
    Done,
}

/// Displayed state of one call at a cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeView {
    pub state: NodeState,
    pub result: Option<u64>,
}

/// A node changing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub node: NodeId,
    pub state: NodeState,
    pub result: Option<u64>,
}

/// Payload of one recursive frame: a delta against the previous frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecursiveStep {
    pub transition: Option<Transition>,
    /// Calls started so far
    pub calls: u32,
}

/// Payload of one iterative frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterativeState {
    pub a: u64,
    pub b: Option<u64>,
    /// Loop variable, once the loop is entered
    pub i: Option<u32>,
    /// Values computed so far, `F(0)..`
    pub sequence: Vec<u64>,
    pub highlight: Option<usize>,
}

/// What a memoized frame shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoAction {
    Start,
    CheckingMemo,
    ReturningMemo,
    BaseCase,
    Computing,
    StoringMemo,
    Finished,
}

/// Payload of one memoized frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoState {
    pub action: MemoAction,
    /// The call this frame belongs to
    pub argument: u32,
    pub value: Option<u64>,
    pub memo: BTreeMap<u32, u64>,
    pub calls: u32,
}

/// Frames for the chosen method
#[derive(Debug, Clone)]
pub enum FibonacciTrace {
    Recursive {
        tree: CallTree,
        steps: StepModel<RecursiveStep>,
    },
    Iterative(StepModel<IterativeState>),
    Memoized(StepModel<MemoState>),
}

/// Generated history for one method and one `n`
#[derive(Debug, Clone)]
pub struct FibonacciModel {
    method: Method,
    n: u32,
    result: u64,
    operations: u32,
    trace: FibonacciTrace,
}

impl FibonacciModel {
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn result(&self) -> u64 {
        self.result
    }

    /// Calls made (recursive, memoized) or loop iterations (iterative)
    pub fn operations(&self) -> u32 {
        self.operations
    }

    pub fn trace(&self) -> &FibonacciTrace {
        &self.trace
    }

    pub fn narration(&self, cursor: usize) -> &str {
        match &self.trace {
            FibonacciTrace::Recursive { steps, .. } => steps.at(cursor).narration(),
            FibonacciTrace::Iterative(steps) => steps.at(cursor).narration(),
            FibonacciTrace::Memoized(steps) => steps.at(cursor).narration(),
        }
    }

    pub fn highlighted_lines(&self, cursor: usize) -> &BTreeSet<usize> {
        match &self.trace {
            FibonacciTrace::Recursive { steps, .. } => steps.at(cursor).highlighted_lines(),
            FibonacciTrace::Iterative(steps) => steps.at(cursor).highlighted_lines(),
            FibonacciTrace::Memoized(steps) => steps.at(cursor).highlighted_lines(),
        }
    }
}

impl Timeline for FibonacciModel {
    fn frame_count(&self) -> usize {
        match &self.trace {
            FibonacciTrace::Recursive { steps, .. } => steps.len(),
            FibonacciTrace::Iterative(steps) => steps.len(),
            FibonacciTrace::Memoized(steps) => steps.len(),
        }
    }
}

/// Compute `F(n)` with `method`, recording every step
pub fn generate(method: Method, n: u32) -> FibonacciModel {
    let model = match method {
        Method::Recursive => recursive(n),
        Method::Iterative => iterative(n),
        Method::Memoized => memoized(n),
    };
    tracing::debug!(
        %method,
        n,
        result = model.result,
        frames = model.frame_count(),
        "generated fibonacci steps"
    );
    model
}

/// Naive recursion over a prebuilt call tree
pub fn recursive(n: u32) -> FibonacciModel {
    let tree = CallTree::build(n);
    let mut rec = StepModel::recorder();
    rec.push(
        format!("Call tree for F({}) has {} calls.", n, tree.len()),
        &[1],
        RecursiveStep {
            transition: None,
            calls: 0,
        },
    );

    let mut calls = 0;
    let result = evaluate(&tree, 0, &mut rec, &mut calls);
    rec.push(
        format!("Result: F({}) = {} after {} calls.", n, result, calls),
        &[],
        RecursiveStep {
            transition: None,
            calls,
        },
    );

    FibonacciModel {
        method: Method::Recursive,
        n,
        result,
        operations: calls,
        trace: FibonacciTrace::Recursive {
            tree,
            steps: rec.finish(),
        },
    }
}

fn evaluate(
    tree: &CallTree,
    id: NodeId,
    rec: &mut StepRecorder<RecursiveStep>,
    calls: &mut u32,
) -> u64 {
    let node = &tree.nodes[id];
    let argument = node.argument;
    *calls += 1;
    rec.push(
        format!("Call F({})...", argument),
        &[1],
        RecursiveStep {
            transition: Some(Transition {
                node: id,
                state: NodeState::Computing,
                result: None,
            }),
            calls: *calls,
        },
    );

    let Some([left, right]) = node.children else {
        let result = u64::from(argument);
        let lines: &[usize] = if argument == 0 { &[2, 3] } else { &[4, 5] };
        rec.push(
            format!("F({}) = {} (base case)", argument, result),
            lines,
            RecursiveStep {
                transition: Some(Transition {
                    node: id,
                    state: NodeState::Done,
                    result: Some(result),
                }),
                calls: *calls,
            },
        );
        return result;
    };

    let r1 = evaluate(tree, left, rec, calls);
    let r2 = evaluate(tree, right, rec, calls);
    let result = r1 + r2;
    rec.push(
        format!(
            "F({}) = F({}) + F({}) = {} + {} = {}",
            argument,
            argument - 1,
            argument - 2,
            r1,
            r2,
            result
        ),
        &[6],
        RecursiveStep {
            transition: Some(Transition {
                node: id,
                state: NodeState::Done,
                result: Some(result),
            }),
            calls: *calls,
        },
    );
    result
}

/// Two running values
pub fn iterative(n: u32) -> FibonacciModel {
    let mut rec = StepModel::recorder();
    let mut sequence = vec![0u64];
    rec.push(
        "Start with a = F(0) = 0.",
        &[4],
        IterativeState {
            a: 0,
            b: None,
            i: None,
            sequence: sequence.clone(),
            highlight: Some(0),
        },
    );

    if n == 0 {
        rec.push(
            "n is 0: return 0.",
            &[2],
            IterativeState {
                a: 0,
                b: None,
                i: None,
                sequence,
                highlight: Some(0),
            },
        );
        return finish_iterative(n, 0, 0, rec);
    }

    sequence.push(1);
    rec.push(
        "Introduce b = F(1) = 1.",
        &[5],
        IterativeState {
            a: 0,
            b: Some(1),
            i: None,
            sequence: sequence.clone(),
            highlight: Some(1),
        },
    );

    if n == 1 {
        rec.push(
            "n is 1: return 1.",
            &[3],
            IterativeState {
                a: 0,
                b: Some(1),
                i: None,
                sequence,
                highlight: Some(1),
            },
        );
        return finish_iterative(n, 1, 0, rec);
    }

    let (mut a, mut b) = (0u64, 1u64);
    let mut iterations = 0;
    for i in 2..=n {
        iterations += 1;
        rec.push(
            format!("Loop i = {}: a = {}, b = {}.", i, a, b),
            &[6],
            IterativeState {
                a,
                b: Some(b),
                i: Some(i),
                sequence: sequence.clone(),
                highlight: Some(sequence.len() - 1),
            },
        );
        (a, b) = (b, a + b);
        sequence.push(b);
        rec.push(
            format!("a, b = b, a + b: now a = {}, b = {} = F({}).", a, b, i),
            &[7],
            IterativeState {
                a,
                b: Some(b),
                i: Some(i),
                sequence: sequence.clone(),
                highlight: Some(sequence.len() - 1),
            },
        );
    }

    rec.push(
        format!("Return b = F({}) = {}.", n, b),
        &[8],
        IterativeState {
            a,
            b: Some(b),
            i: None,
            highlight: Some(sequence.len() - 1),
            sequence,
        },
    );
    finish_iterative(n, b, iterations, rec)
}

fn finish_iterative(
    n: u32,
    result: u64,
    iterations: u32,
    rec: StepRecorder<IterativeState>,
) -> FibonacciModel {
    FibonacciModel {
        method: Method::Iterative,
        n,
        result,
        operations: iterations,
        trace: FibonacciTrace::Iterative(rec.finish()),
    }
}

struct MemoRun {
    rec: StepRecorder<MemoState>,
    memo: BTreeMap<u32, u64>,
    calls: u32,
}

impl MemoRun {
    fn push(
        &mut self,
        narration: String,
        lines: &[usize],
        action: MemoAction,
        argument: u32,
        value: Option<u64>,
    ) {
        let state = MemoState {
            action,
            argument,
            value,
            memo: self.memo.clone(),
            calls: self.calls,
        };
        self.rec.push(narration, lines, state);
    }

    fn call(&mut self, k: u32) -> u64 {
        self.calls += 1;
        self.push(
            format!("Is F({}) in the memo?", k),
            &[3],
            MemoAction::CheckingMemo,
            k,
            None,
        );

        if let Some(&value) = self.memo.get(&k) {
            self.push(
                format!("F({}) found in memo: {}", k, value),
                &[3],
                MemoAction::ReturningMemo,
                k,
                Some(value),
            );
            return value;
        }

        if k <= 1 {
            let value = u64::from(k);
            self.push(
                format!("Base case: F({}) = {}", k, value),
                &[4],
                MemoAction::BaseCase,
                k,
                Some(value),
            );
            self.memo.insert(k, value);
            self.push(
                format!("Store F({}) = {} in memo", k, value),
                &[6],
                MemoAction::StoringMemo,
                k,
                Some(value),
            );
            value
        } else {
            self.push(
                format!("Compute F({}) = F({}) + F({})", k, k - 1, k - 2),
                &[5],
                MemoAction::Computing,
                k,
                None,
            );
            let r1 = self.call(k - 1);
            let r2 = self.call(k - 2);
            let value = r1 + r2;
            self.memo.insert(k, value);
            self.push(
                format!("Store F({}) = {} + {} = {} in memo", k, r1, r2, value),
                &[6, 7],
                MemoAction::StoringMemo,
                k,
                Some(value),
            );
            value
        }
    }
}

/// Recursion with a shared memo
pub fn memoized(n: u32) -> FibonacciModel {
    let mut run = MemoRun {
        rec: StepModel::recorder(),
        memo: BTreeMap::new(),
        calls: 0,
    };
    run.push(
        "Start with an empty memo.".to_string(),
        &[1],
        MemoAction::Start,
        n,
        None,
    );
    let result = run.call(n);
    run.push(
        format!("Result: F({}) = {} after {} calls.", n, result, run.calls),
        &[7],
        MemoAction::Finished,
        n,
        Some(result),
    );

    FibonacciModel {
        method: Method::Memoized,
        n,
        result,
        operations: run.calls,
        trace: FibonacciTrace::Memoized(run.rec.finish()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        assert_eq!(fib(0), 0);
        assert_eq!(fib(1), 1);
        assert_eq!(fib(2), 1);
        assert_eq!(fib(5), 5);
        assert_eq!(fib(10), 55);
        assert_eq!(fib(20), 6765);
    }

    #[test]
    fn test_methods_agree_with_reference() {
        for n in 0..=MAX_N_OTHERS {
            assert_eq!(iterative(n).result(), fib(n), "iterative n={}", n);
            assert_eq!(memoized(n).result(), fib(n), "memoized n={}", n);
        }
        for n in 0..=MAX_N_RECURSIVE {
            assert_eq!(recursive(n).result(), fib(n), "recursive n={}", n);
        }
    }

    #[test]
    fn test_call_tree_shape() {
        let tree = CallTree::build(6);
        for node in tree.nodes() {
            match node.children {
                None => assert!(node.argument <= 1),
                Some([l, r]) => {
                    assert!(node.argument > 1);
                    assert_eq!(tree.nodes()[l].argument, node.argument - 1);
                    assert_eq!(tree.nodes()[r].argument, node.argument - 2);
                    assert_eq!(tree.nodes()[l].parent, Some(node.id));
                    assert_eq!(tree.nodes()[r].parent, Some(node.id));
                }
            }
        }
        // 2 * F(n + 1) - 1 calls
        assert_eq!(tree.len() as u64, 2 * fib(7) - 1);
    }

    #[test]
    fn test_base_trees_are_single_nodes() {
        for n in [0, 1] {
            let tree = CallTree::build(n);
            assert_eq!(tree.len(), 1);
            assert!(tree.root().children.is_none());
        }
    }

    #[test]
    fn test_fold_reaches_all_done() {
        let model = recursive(5);
        let FibonacciTrace::Recursive { tree, steps } = model.trace() else {
            panic!("expected recursive trace");
        };
        let start = tree.fold(steps, 0);
        assert!(start.iter().all(|v| v.state == NodeState::Pending));

        let end = tree.fold(steps, steps.len() - 1);
        for (node, view) in tree.nodes().iter().zip(&end) {
            assert_eq!(view.state, NodeState::Done);
            assert_eq!(view.result, Some(fib(node.argument)));
        }
    }

    #[test]
    fn test_left_subtree_finishes_before_right_starts() {
        let model = recursive(4);
        let FibonacciTrace::Recursive { tree, steps } = model.trace() else {
            panic!("expected recursive trace");
        };
        let [left, right] = tree.root().children.unwrap();
        let position = |node: NodeId, state: NodeState| {
            steps
                .iter()
                .position(|f| {
                    f.payload()
                        .transition
                        .is_some_and(|t| t.node == node && t.state == state)
                })
                .unwrap()
        };
        assert!(position(left, NodeState::Done) < position(right, NodeState::Computing));
        assert!(position(right, NodeState::Done) < position(0, NodeState::Done));
    }

    #[test]
    fn test_iterative_frame_counts() {
        assert_eq!(iterative(0).frame_count(), 2);
        assert_eq!(iterative(1).frame_count(), 3);
        for n in 2..=10 {
            assert_eq!(iterative(n).frame_count(), 2 * n as usize + 1);
            assert_eq!(iterative(n).operations(), n - 1);
        }
    }

    #[test]
    fn test_memoized_call_counts() {
        assert_eq!(memoized(0).operations(), 1);
        for n in 1..=MAX_N_OTHERS {
            assert_eq!(memoized(n).operations(), 2 * n - 1);
        }
    }

    #[test]
    fn test_memoized_reuses_stored_values() {
        let model = memoized(4);
        let FibonacciTrace::Memoized(steps) = model.trace() else {
            panic!("expected memoized trace");
        };
        let hits: Vec<u32> = steps
            .iter()
            .filter(|f| f.payload().action == MemoAction::ReturningMemo)
            .map(|f| f.payload().argument)
            .collect();
        assert_eq!(hits, vec![1, 2]);
        let last = steps.last().payload();
        assert_eq!(last.action, MemoAction::Finished);
        assert_eq!(last.memo.len(), 5);
    }

    #[test]
    fn test_method_caps() {
        assert_eq!(Method::Recursive.max_n(), 8);
        assert_eq!(Method::Iterative.max_n(), 20);
        assert_eq!(Method::Memoized.next(), Method::Recursive);
    }
}

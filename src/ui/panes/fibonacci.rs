//! Fibonacci pane
//!
//! The recursive method shows the call tree, one call per row indented by
//! depth. The iterative method shows `a`, `b` and the sequence so far; the
//! memoized method shows the memo table.

use crate::puzzles::fibonacci::{
    CallTree, FibonacciModel, FibonacciTrace, IterativeState, MemoAction, MemoState, NodeState,
    NodeView,
};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the current Fibonacci frame; `calls` is the folded tree for recursion
pub fn render_fibonacci_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    model: &FibonacciModel,
    cursor: usize,
    calls: Option<&[NodeView]>,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border));

    let mut lines = match (model.trace(), calls) {
        (FibonacciTrace::Recursive { tree, .. }, Some(calls)) => tree_lines(tree, calls),
        (FibonacciTrace::Iterative(steps), _) => iterative_lines(steps.at(cursor).payload()),
        (FibonacciTrace::Memoized(steps), _) => memo_lines(steps.at(cursor).payload()),
        (FibonacciTrace::Recursive { .. }, None) => Vec::new(),
    };

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("F(", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(model.n().to_string(), Style::default().fg(DEFAULT_THEME.number)),
        Span::styled(") = ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            model.result().to_string(),
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   operations: {}", model.operations()),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn tree_lines(tree: &CallTree, calls: &[NodeView]) -> Vec<Line<'static>> {
    tree.nodes()
        .iter()
        .zip(calls)
        .map(|(node, view)| {
            let indent = "  ".repeat(node.depth as usize);
            let (glyph, style) = match view.state {
                NodeState::Pending => ("○", Style::default().fg(DEFAULT_THEME.comment)),
                NodeState::Computing => (
                    "◐",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                ),
                NodeState::Done => ("●", Style::default().fg(DEFAULT_THEME.success)),
            };
            let mut spans = vec![
                Span::raw(indent),
                Span::styled(format!("{} fib({})", glyph, node.argument), style),
            ];
            if let Some(result) = view.result {
                spans.push(Span::styled(
                    format!(" = {}", result),
                    Style::default().fg(DEFAULT_THEME.number),
                ));
            }
            Line::from(spans)
        })
        .collect()
}

fn iterative_lines(state: &IterativeState) -> Vec<Line<'static>> {
    let label = Style::default().fg(DEFAULT_THEME.comment);
    let value = Style::default().fg(DEFAULT_THEME.number);
    let show = |v: Option<u64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());

    let mut lines = vec![Line::from(vec![
        Span::styled("a = ", label),
        Span::styled(state.a.to_string(), value),
        Span::styled("   b = ", label),
        Span::styled(show(state.b), value),
        Span::styled("   i = ", label),
        Span::styled(show(state.i.map(u64::from)), value),
    ])];
    lines.push(Line::default());

    let sequence: Vec<Span> = state
        .sequence
        .iter()
        .enumerate()
        .map(|(k, v)| {
            let style = if state.highlight == Some(k) {
                Style::default()
                    .bg(DEFAULT_THEME.secondary)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            Span::styled(format!(" {} ", v), style)
        })
        .collect();
    lines.push(Line::from(sequence));
    lines
}

fn memo_lines(state: &MemoState) -> Vec<Line<'static>> {
    let label = Style::default().fg(DEFAULT_THEME.comment);
    let action = match state.action {
        MemoAction::Start => "start",
        MemoAction::CheckingMemo => "checking memo",
        MemoAction::ReturningMemo => "memo hit",
        MemoAction::BaseCase => "base case",
        MemoAction::Computing => "computing",
        MemoAction::StoringMemo => "storing",
        MemoAction::Finished => "finished",
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("call ", label),
            Span::styled(
                format!("fib({})", state.argument),
                Style::default().fg(DEFAULT_THEME.function),
            ),
            Span::styled(format!("  {}", action), Style::default().fg(DEFAULT_THEME.secondary)),
            Span::styled(format!("   calls: {}", state.calls), label),
        ]),
        Line::default(),
        Line::from(Span::styled("memo", label)),
    ];

    for (&k, &v) in &state.memo {
        let style = if k == state.argument && state.action != MemoAction::Start {
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        lines.push(Line::from(Span::styled(format!("  [{}] = {}", k, v), style)));
    }
    if state.memo.is_empty() {
        lines.push(Line::from(Span::styled("  (empty)", label)));
    }
    lines
}

//! Two-Sum pane: the array as the algorithm sees it, with pointer markers

use crate::puzzles::two_sum::{Action, Algorithm, TwoSumModel, TwoSumState};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CELL: usize = 6;

fn cell(text: impl std::fmt::Display) -> String {
    format!("{:^width$}", text.to_string(), width = CELL)
}

/// Render the array, pointers, running sum, seen map and result
pub fn render_two_sum_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    model: &TwoSumModel,
    state: &TwoSumState,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border));

    let view = model.view();
    let label = Style::default().fg(DEFAULT_THEME.comment);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("target ", label),
            Span::styled(
                model.target().to_string(),
                Style::default()
                    .fg(DEFAULT_THEME.number)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
    ];

    if view.is_empty() {
        lines.push(Line::from(Span::styled("(empty array)", label)));
    } else {
        let position_row: String = (0..view.len()).map(cell).collect();
        lines.push(Line::from(vec![
            Span::styled(format!("{:<8}", "pos"), label),
            Span::styled(position_row, label),
        ]));

        let values: Vec<Span> = view
            .values()
            .iter()
            .enumerate()
            .map(|(pos, value)| {
                let compared = state
                    .compared
                    .is_some_and(|(a, b)| a == pos || b == pos);
                let style = match (compared, state.matched) {
                    (true, Some(true)) => Style::default()
                        .bg(DEFAULT_THEME.success)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                    (true, _) => Style::default()
                        .bg(DEFAULT_THEME.secondary)
                        .fg(Color::Black),
                    _ if state.pointers.values().any(|&p| p == pos) => {
                        Style::default().fg(DEFAULT_THEME.primary)
                    }
                    _ => Style::default().fg(DEFAULT_THEME.fg),
                };
                Span::styled(cell(value), style)
            })
            .collect();
        let mut value_row = vec![Span::styled(format!("{:<8}", "value"), label)];
        value_row.extend(values);
        lines.push(Line::from(value_row));

        if model.algorithm() == Algorithm::TwoPointer {
            let original: String = view.permutation().iter().map(|i| cell(format!("#{}", i))).collect();
            lines.push(Line::from(vec![
                Span::styled(format!("{:<8}", "index"), label),
                Span::styled(original, label),
            ]));
        }

        let markers: String = (0..view.len())
            .map(|pos| {
                let names: Vec<&str> = state
                    .pointers
                    .iter()
                    .filter(|(_, &p)| p == pos)
                    .map(|(pointer, _)| pointer.label())
                    .collect();
                if names.is_empty() {
                    cell("")
                } else {
                    cell(format!("↑{}", names.join(",")))
                }
            })
            .collect();
        lines.push(Line::from(vec![
            Span::raw(" ".repeat(8)),
            Span::styled(markers, Style::default().fg(DEFAULT_THEME.primary)),
        ]));
    }

    lines.push(Line::default());

    if let (Some((a, b)), Some(sum)) = (state.compared, state.current_sum) {
        let values = view.values();
        let (va, vb) = (values[a], values[b]);
        let (mark, color) = if state.matched == Some(true) {
            ("✓", DEFAULT_THEME.success)
        } else {
            ("✗", DEFAULT_THEME.error)
        };
        lines.push(Line::from(vec![
            Span::styled("sum  ", label),
            Span::styled(
                format!("{} + {} = {} ", va, vb, sum),
                Style::default().fg(DEFAULT_THEME.fg),
            ),
            Span::styled(mark, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ]));
    }

    if model.algorithm() == Algorithm::HashMap {
        let entries: Vec<String> = state
            .seen
            .iter()
            .map(|(value, index)| format!("{} → {}", value, index))
            .collect();
        lines.push(Line::from(vec![
            Span::styled("seen ", label),
            Span::styled(
                format!("{{{}}}", entries.join(", ")),
                Style::default().fg(DEFAULT_THEME.function),
            ),
        ]));
    }

    match (state.action, state.result) {
        (Action::Match, Some(result)) => lines.push(Line::from(Span::styled(
            format!(
                "Result: [{}, {}] at indices ({}, {})",
                result.values.0, result.values.1, result.indices.0, result.indices.1
            ),
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD),
        ))),
        (Action::NoMatch, _) => lines.push(Line::from(Span::styled(
            "Result: no pair",
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD),
        ))),
        _ => {}
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

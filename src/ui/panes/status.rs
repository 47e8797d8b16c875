//! Status bar rendering with keybindings and state indicators

use crate::playback::PlaybackState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;

/// Everything the status bar shows
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub is_error: bool,
    pub cursor: usize,
    pub total: usize,
    pub state: PlaybackState,
    pub speed: Duration,
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData<'_>) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let bar = Style::default().bg(DEFAULT_THEME.current_line_bg);

    // Left side: step info and the last message
    let left_spans = vec![
        Span::styled(
            format!(" Step {}/{} ", data.cursor + 1, data.total),
            Style::default()
                .bg(if data.is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", bar.fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!(" {} ", data.message),
            bar.fg(if data.is_error {
                DEFAULT_THEME.error
            } else {
                DEFAULT_THEME.fg
            }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(bar)
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds, speed, state badge
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar.fg(DEFAULT_THEME.fg);
    let sep_style = bar.fg(DEFAULT_THEME.comment);

    let mut right_spans = Vec::new();
    for (key, desc) in [
        ("⇥", "puzzle"),
        ("←/→", "step"),
        ("⎵", "play"),
        ("↵/⌫", "end/start"),
        ("[/]", "size"),
        ("m", "method"),
        ("e/t", "edit"),
        ("+/-", "speed"),
        ("q", "quit"),
    ] {
        right_spans.push(Span::styled(format!(" {} ", key), key_style));
        right_spans.push(Span::styled(format!(" {} ", desc), desc_style));
        right_spans.push(Span::styled("│", sep_style));
    }
    right_spans.push(Span::styled(
        format!(" {}ms ", data.speed.as_millis()),
        desc_style,
    ));

    let (badge, color) = match data.state {
        PlaybackState::Playing => (" ▶ PLAYING ", DEFAULT_THEME.secondary),
        PlaybackState::Paused => (" ⏸ PAUSED ", DEFAULT_THEME.primary),
        PlaybackState::Complete => (" END ", DEFAULT_THEME.error),
        PlaybackState::Idle => (" START ", DEFAULT_THEME.success),
    };
    right_spans.push(Span::styled(
        badge,
        Style::default()
            .bg(color)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    ));

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(bar)
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}

/// Render the inline editor that replaces the status bar while typing
pub fn render_input_line(frame: &mut Frame, area: Rect, prompt: &str, buffer: &str) {
    let bar = Style::default().bg(DEFAULT_THEME.current_line_bg);
    let spans = vec![
        Span::styled(
            format!(" ⌨ {} ", prompt),
            Style::default()
                .bg(DEFAULT_THEME.secondary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", buffer), bar.fg(DEFAULT_THEME.fg)),
        Span::styled("█", bar.fg(DEFAULT_THEME.secondary)),
        Span::styled("   ↵ apply  esc cancel", bar.fg(DEFAULT_THEME.comment)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar), area);
}

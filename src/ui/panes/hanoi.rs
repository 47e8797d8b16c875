//! Tower of Hanoi pane: three rods drawn bottom-up

use crate::puzzles::hanoi::{HanoiStep, TowerState, ROD_COUNT, ROD_NAMES};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the rods at the current frame
pub fn render_hanoi_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    tower: &TowerState,
    step: &HanoiStep,
    total_moves: usize,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border));

    let disks = tower.disk_count();
    let width = 2 * disks + 3;
    let rod_style = Style::default().fg(DEFAULT_THEME.comment);

    let mut lines = vec![Line::default()];

    // One row per level, plus the rod tip above the tallest possible stack
    for level in (0..=disks).rev() {
        let mut spans = Vec::new();
        for rod in 0..ROD_COUNT {
            match tower.rod(rod).get(level) {
                Some(&size) => {
                    let w = 2 * size as usize + 1;
                    let pad = (width - w) / 2;
                    let mut style = Style::default().fg(DEFAULT_THEME.disk(size));
                    if step.disk == Some(size) {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    spans.push(Span::raw(" ".repeat(pad)));
                    spans.push(Span::styled("█".repeat(w), style));
                    spans.push(Span::raw(" ".repeat(width - w - pad)));
                }
                None => {
                    let pad = width / 2;
                    spans.push(Span::raw(" ".repeat(pad)));
                    spans.push(Span::styled("│", rod_style));
                    spans.push(Span::raw(" ".repeat(width - pad - 1)));
                }
            }
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    let base: Vec<Span> = (0..ROD_COUNT)
        .flat_map(|_| [Span::styled("▀".repeat(width), rod_style), Span::raw(" ")])
        .collect();
    lines.push(Line::from(base));

    let labels: Vec<Span> = ROD_NAMES
        .iter()
        .enumerate()
        .map(|(rod, name)| {
            let style = match step.last_move {
                Some(mv) if mv.to == rod => Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD),
                Some(mv) if mv.from == rod => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            Span::styled(format!("{:^width$} ", name, width = width), style)
        })
        .collect();
    lines.push(Line::from(labels));

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("Moves: ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!("{} / {}", step.moves_made, total_moves),
            Style::default().fg(DEFAULT_THEME.number),
        ),
    ]));
    if let (Some(mv), Some(disk)) = (step.last_move, step.disk) {
        lines.push(Line::from(Span::styled(
            format!(
                "disk {}: {} → {}",
                disk, ROD_NAMES[mv.from], ROD_NAMES[mv.to]
            ),
            Style::default().fg(DEFAULT_THEME.disk(disk)),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

//! Narration pane: every step so far, newest at the bottom

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding},
    Frame,
};

/// Render the narration history up to and including the current frame
pub fn render_narration_pane(frame: &mut Frame, area: Rect, history: &[&str]) {
    let block = Block::default()
        .title(" Narration ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border))
        .padding(Padding::new(1, 0, 0, 0));

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // borders
    let skip = history.len().saturating_sub(visible_height);
    let last = history.len().saturating_sub(1);

    let items: Vec<ListItem> = history
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(idx, line)| {
            let style = if idx == last {
                Style::default()
                    .fg(DEFAULT_THEME.fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            ListItem::new(format!("{:>3}  {}", idx, line)).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

//! Pseudocode pane with the current frame's lines highlighted
//!
//! Line numbers are 1-based and match `Frame::highlighted_lines`. The view
//! recenters only when the first highlighted line scrolls out of it.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::BTreeSet;

const KEYWORDS: &[&str] = &[
    "function", "for", "from", "to", "while", "if", "else", "return", "in", "and", "not",
];

fn word_style(word: &str, next: Option<char>) -> Style {
    if KEYWORDS.contains(&word) {
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD)
    } else if word.chars().all(|c| c.is_ascii_digit()) {
        Style::default().fg(DEFAULT_THEME.number)
    } else if next == Some('(') {
        Style::default().fg(DEFAULT_THEME.function)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    }
}

/// Keyword and number coloring for one pseudocode line
fn highlight_pseudocode(line: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut word = String::new();

    for c in line.chars() {
        if c.is_alphanumeric() || c == '_' {
            word.push(c);
            continue;
        }
        if !word.is_empty() {
            let style = word_style(&word, Some(c));
            spans.push(Span::styled(std::mem::take(&mut word), style));
        }
        let style = match c {
            '(' | ')' | '[' | ']' | '{' | '}' => Style::default().fg(DEFAULT_THEME.primary),
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        spans.push(Span::styled(c.to_string(), style));
    }
    if !word.is_empty() {
        let style = word_style(&word, None);
        spans.push(Span::styled(word, style));
    }

    Line::from(spans)
}

/// Scroll state for the pseudocode pane
#[derive(Debug, Default)]
pub struct CodeScrollState {
    pub offset: usize,
}

/// Render the pseudocode pane
pub fn render_code_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    listing: &[&str],
    highlighted: &BTreeSet<usize>,
    scroll_state: &mut CodeScrollState,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border));

    let total_lines = listing.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // borders

    if let Some(&first) = highlighted.iter().next() {
        let idx = first.saturating_sub(1);
        if idx < scroll_state.offset || idx >= scroll_state.offset + visible_height {
            scroll_state.offset = idx.saturating_sub(visible_height / 2);
        }
    }
    scroll_state.offset = scroll_state
        .offset
        .min(total_lines.saturating_sub(visible_height));

    let visible_lines: Vec<Line> = listing
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = highlighted.contains(&line_num);

            let (marker, num_style) = if is_current {
                (
                    "▶",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            let mut content = highlight_pseudocode(line);
            if is_current {
                let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content.spans {
                    span.style = span.style.patch(bg);
                }
            }

            let mut spans = vec![Span::styled(format!("{}{:3} ", marker, line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_split_out() {
        let line = highlight_pseudocode("  for i from 0 to n:");
        let words: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(words.contains(&"for"));
        assert!(words.contains(&"0"));
        let text: String = words.concat();
        assert_eq!(text, "  for i from 0 to n:");
    }
}

//! River crossing pane: two banks with the boat between them

use crate::puzzles::river::{Bank, FarmerPosition, RiverState};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BANK_WIDTH: usize = 12;
const RIVER_WIDTH: usize = 22;

fn bank_column(state: &RiverState, bank: Bank) -> Vec<String> {
    let mut names = Vec::new();
    if state.farmer == FarmerPosition::OnBank(bank) {
        names.push("farmer".to_string());
    }
    let passengers = match bank {
        Bank::Left => &state.left,
        Bank::Right => &state.right,
    };
    names.extend(passengers.iter().map(|p| p.to_string()));
    names
}

/// Render the banks and the boat
pub fn render_river_pane(frame: &mut Frame, area: Rect, title: &str, state: &RiverState) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border));

    let header = Style::default()
        .fg(DEFAULT_THEME.comment)
        .add_modifier(Modifier::BOLD);
    let person = Style::default().fg(DEFAULT_THEME.fg);
    let water = Style::default().fg(DEFAULT_THEME.water);

    let left = bank_column(state, Bank::Left);
    let right = bank_column(state, Bank::Right);

    let boat = match state.farmer {
        FarmerPosition::Rowing { from } => {
            let load = match state.boat {
                Some(p) => format!("farmer + {}", p),
                None => "farmer".to_string(),
            };
            Some(match from {
                Bank::Left => format!("[{}] →", load),
                Bank::Right => format!("← [{}]", load),
            })
        }
        FarmerPosition::OnBank(_) => None,
    };

    let mut lines = vec![
        Line::default(),
        Line::from(vec![
            Span::styled(format!("{:^w$}", "LEFT", w = BANK_WIDTH), header),
            Span::styled(format!("{:^w$}", "river", w = RIVER_WIDTH), water),
            Span::styled(format!("{:^w$}", "RIGHT", w = BANK_WIDTH), header),
        ]),
    ];

    let rows = left.len().max(right.len()).max(4);
    for row in 0..rows {
        let middle = match (&boat, row) {
            (Some(boat), 1) => Span::styled(
                format!("{:^w$}", boat, w = RIVER_WIDTH),
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD),
            ),
            _ => Span::styled(format!("{:^w$}", "~ ~ ~ ~ ~ ~", w = RIVER_WIDTH), water),
        };
        let cell = |names: &[String]| names.get(row).cloned().unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("{:^w$}", cell(&left), w = BANK_WIDTH), person),
            middle,
            Span::styled(format!("{:^w$}", cell(&right), w = BANK_WIDTH), person),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("crossings: {}", state.crossings),
        Style::default().fg(DEFAULT_THEME.comment),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

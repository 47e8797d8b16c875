//! Main TUI application state and logic

use crate::playback::Fired;
use crate::session::{Puzzle, PuzzleKind, Session};
use crate::ui::panes::{self, CodeScrollState, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// How often the event loop wakes up to check the playback alarm
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Two-Sum field being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Numbers,
    Target,
}

impl InputField {
    fn prompt(self) -> &'static str {
        match self {
            InputField::Numbers => "numbers",
            InputField::Target => "target",
        }
    }
}

/// Inline editor state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub field: InputField,
    pub buffer: String,
}

/// The main application state
pub struct App {
    pub session: Session,

    /// Scroll offset of the pseudocode pane
    pub code_scroll: CodeScrollState,

    /// Open while a Two-Sum field is being typed
    pub input: Option<InputLine>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
    pub status_is_error: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            code_scroll: CodeScrollState::default(),
            input: None,
            should_quit: false,
            status_message: String::from("Ready!"),
            status_is_error: false,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Some(Fired::Completed { .. }) = self.session.tick(Instant::now()) {
                self.info("Playback complete");
            }

            // Poll with a timeout so the playback alarm is checked regularly
            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key, Instant::now());
                    }
                }
            }
        }

        Ok(())
    }

    fn info(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
    }

    fn error(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = true;
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: visualization (top) | narration (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        self.render_puzzle(frame, left_rows[0]);

        let puzzle = self.session.puzzle();
        let cursor = puzzle.controls().cursor();
        let history: Vec<&str> = (0..=cursor).map(|i| puzzle.narration_at(i)).collect();
        panes::render_narration_pane(frame, left_rows[1], &history);

        panes::render_code_pane(
            frame,
            columns[1],
            "Pseudocode",
            puzzle.listing(),
            puzzle.highlighted_lines(),
            &mut self.code_scroll,
        );

        match &self.input {
            Some(input) => panes::render_input_line(
                frame,
                main_chunks[1],
                input.field.prompt(),
                &input.buffer,
            ),
            None => panes::render_status_bar(
                frame,
                main_chunks[1],
                &StatusRenderData {
                    message: &self.status_message,
                    is_error: self.status_is_error,
                    cursor,
                    total: puzzle.controls().frame_count(),
                    state: puzzle.controls().state(),
                    speed: self.session.speed(),
                },
            ),
        }
    }

    fn render_puzzle(&mut self, frame: &mut Frame, area: Rect) {
        let kind = self.session.active();
        let title = format!("{}: {}", kind, self.session.puzzle().summary());
        match kind {
            PuzzleKind::Hanoi => {
                let hanoi = &mut self.session.hanoi;
                let step = *hanoi.frame().payload();
                let total = hanoi.solution().moves().len();
                let tower = hanoi.tower();
                panes::render_hanoi_pane(frame, area, &title, tower, &step, total);
            }
            PuzzleKind::TwoSum => {
                let two_sum = &self.session.two_sum;
                panes::render_two_sum_pane(
                    frame,
                    area,
                    &title,
                    two_sum.model(),
                    two_sum.frame().payload(),
                );
            }
            PuzzleKind::Fibonacci => {
                let fibonacci = &self.session.fibonacci;
                let calls = fibonacci.call_states();
                panes::render_fibonacci_pane(
                    frame,
                    area,
                    &title,
                    fibonacci.model(),
                    fibonacci.controls().cursor(),
                    calls.as_deref(),
                );
            }
            PuzzleKind::River => {
                panes::render_river_pane(frame, area, &title, self.session.river.frame().payload());
            }
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        if self.input.is_some() {
            self.handle_input_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.session.cycle();
                self.code_scroll = CodeScrollState::default();
                self.info(format!("Switched to {}", self.session.active()));
            }
            KeyCode::Left => match self.session.puzzle_mut().controls_mut().step_backward() {
                Ok(_) => self.info("Stepped backward"),
                Err(e) => self.error(format!("Cannot step backward: {}", e)),
            },
            KeyCode::Right => match self.session.puzzle_mut().controls_mut().step_forward() {
                Ok(_) => self.info("Stepped forward"),
                Err(e) => self.error(format!("Cannot step forward: {}", e)),
            },
            KeyCode::Char(' ') => {
                let controls = self.session.puzzle_mut().controls_mut();
                match controls.toggle(now) {
                    Ok(()) => {
                        let state = controls.state();
                        self.info(format!("{}", state));
                    }
                    Err(e) => self.error(e.to_string()),
                }
            }
            KeyCode::Enter => {
                self.session.puzzle_mut().controls_mut().jump_to_end();
                self.info("Jumped to end");
            }
            KeyCode::Backspace => {
                self.session.puzzle_mut().controls_mut().jump_to_start();
                self.info("Jumped to start");
            }
            KeyCode::Char('r') => {
                self.session.puzzle_mut().controls_mut().reset();
                self.info("Reset");
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let speed = self.session.faster();
                self.info(format!("Speed: {}ms per step", speed.as_millis()));
            }
            KeyCode::Char('-') => {
                let speed = self.session.slower();
                self.info(format!("Speed: {}ms per step", speed.as_millis()));
            }
            KeyCode::Char('[') => self.resize(-1),
            KeyCode::Char(']') => self.resize(1),
            KeyCode::Char('m') => {
                self.session.puzzle_mut().cycle_variant();
                self.code_scroll = CodeScrollState::default();
                self.info(self.session.puzzle().summary());
            }
            KeyCode::Char('e') if self.session.active() == PuzzleKind::TwoSum => {
                let numbers: Vec<String> = self
                    .session
                    .two_sum
                    .numbers()
                    .iter()
                    .map(|n| n.to_string())
                    .collect();
                self.input = Some(InputLine {
                    field: InputField::Numbers,
                    buffer: numbers.join(", "),
                });
            }
            KeyCode::Char('t') if self.session.active() == PuzzleKind::TwoSum => {
                self.input = Some(InputLine {
                    field: InputField::Target,
                    buffer: self.session.two_sum.target().to_string(),
                });
            }
            _ => {}
        }
    }

    fn resize(&mut self, delta: i32) {
        match self.session.puzzle_mut().resize(delta) {
            Ok(()) => self.info(self.session.puzzle().summary()),
            Err(e) => self.error(e.to_string()),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let Some(input) = self.input.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => input.buffer.push(c),
            KeyCode::Backspace => {
                input.buffer.pop();
            }
            KeyCode::Esc => {
                self.input = None;
                self.info("Edit cancelled");
            }
            KeyCode::Enter => {
                let Some(input) = self.input.take() else {
                    return;
                };
                let two_sum = &mut self.session.two_sum;
                let result = match input.field {
                    InputField::Numbers => two_sum.set_numbers(&input.buffer),
                    InputField::Target => two_sum.set_target(&input.buffer),
                };
                match result {
                    Ok(()) => self.info(self.session.two_sum.summary()),
                    Err(e) => self.error(e.to_string()),
                }
            }
            _ => {}
        }
    }
}

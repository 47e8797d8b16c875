// algoscope: step-through algorithm puzzles with time-travel playback

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use algoscope::config::Config;
use algoscope::logging::init_tracing;
use algoscope::session::{self, input::validate_speed, PuzzleKind, Session};
use algoscope::ui::App;

#[derive(Debug, Parser)]
#[command(
    name = "algoscope",
    about = "Step through Tower of Hanoi, Two-Sum, Fibonacci and River Crossing",
    version
)]
struct Cli {
    /// Puzzle to open: hanoi, two-sum, fibonacci or river
    #[arg(default_value = "hanoi")]
    puzzle: PuzzleKind,

    /// Configuration file (default: <config dir>/algoscope/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds between automatic steps (200 to 2000)
    #[arg(long)]
    speed: Option<u64>,

    /// Print every frame of the puzzle and exit
    #[arg(long)]
    narrate: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut settings = config.session_settings();
    if let Some(ms) = cli.speed {
        settings.speed = validate_speed(ms).context("Invalid --speed")?;
    }

    let mut session = Session::new(&settings).context("Invalid puzzle settings")?;
    session.select(cli.puzzle);
    tracing::info!(puzzle = %cli.puzzle, narrate = cli.narrate, "starting");

    if cli.narrate {
        let stdout = io::stdout();
        session::write_narration(session.puzzle(), &mut stdout.lock())
            .context("Failed to write narration")?;
        return Ok(());
    }

    run_tui(session)
}

fn run_tui(session: Session) -> Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("Terminal UI failed")
}

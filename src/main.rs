mod ui;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use kadath::character::manager::SaveManager;
use kadath::config::GameConfig;
use kadath::core::game_state::GameStateMachine;
use kadath::registry::Registry;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};

#[derive(Parser)]
#[command(name = "kadath")]
#[command(about = "A turn-based journey through the Dreamlands")]
#[command(version)]
struct Cli {
    /// Seed the dream for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding the save slots
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Configuration file path (defaults to ~/.kadath/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => GameConfig::default_path()?,
    };
    let config = GameConfig::load(&config_path)?;
    init_logging(&config, cli.verbose)?;

    let save_dir = match cli.save_dir.clone().or_else(|| config.save_dir.clone()) {
        Some(dir) => dir,
        None => GameConfig::home()?.join("saves"),
    };
    let store = SaveManager::with_dir(&save_dir)
        .with_context(|| format!("Failed to open save directory {}", save_dir.display()))?;
    log::info!("Saves in {}", store.dir().display());

    let rng = match cli.seed.or(config.seed) {
        Some(seed) => {
            log::info!("Seeded run: {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let registry = Registry::standard();
    let mut machine = GameStateMachine::new(&registry, Box::new(store), rng)
        .with_autosave_on_travel(config.autosave_on_travel);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &mut machine);
    if result.is_err() {
        machine.emergency_save();
    }

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run<R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    machine: &mut GameStateMachine<'_, R>,
) -> Result<()> {
    while !machine.should_quit() {
        terminal
            .draw(|frame| ui::draw(frame, &*machine))
            .context("Failed to draw")?;

        if event::poll(Duration::from_millis(50)).context("Input channel failed")? {
            if let Event::Key(key_event) = event::read().context("Input channel failed")? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                match key_event.code {
                    KeyCode::Char(c) => machine.tick(c),
                    KeyCode::Esc => machine.tick('x'),
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

/// Logs go to `~/.kadath/kadath.log`; the terminal belongs to the game.
fn init_logging(config: &GameConfig, verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => config.level_filter(),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let home = GameConfig::home()?;
    std::fs::create_dir_all(&home)
        .with_context(|| format!("Failed to create {}", home.display()))?;
    let log_path = home.join("kadath.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder
        .format_timestamp_secs()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

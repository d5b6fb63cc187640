use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use connect_four::config::AppConfig;
use connect_four::game::{GameEngine, Outcome};
use connect_four::ui::{replay, App};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Play Connect Four in the terminal, or replay a scripted game.
#[derive(Parser)]
#[command(name = "connect_four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override board height (rows)
    #[arg(long)]
    height: Option<usize>,

    /// Override board width (columns)
    #[arg(long)]
    width: Option<usize>,

    /// Replay comma-separated zero-based columns without the TUI, e.g. "3,3,4"
    #[arg(long)]
    moves: Option<String>,

    /// Print replay results as JSON lines
    #[arg(long, requires = "moves")]
    json: bool,

    /// Print a config file with default values and exit
    #[arg(long)]
    print_default_config: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(Targets::new().with_target("connect_four", cli.log_level))
        .init();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(height) = cli.height {
        config.board.height = height;
    }
    if let Some(width) = cli.width {
        config.board.width = width;
    }
    config.validate().context("invalid board settings")?;

    match cli.moves.as_deref() {
        Some(moves) => run_replay(&config, moves, cli.json),
        None => run_tui(&config),
    }
}

fn parse_moves(moves: &str) -> Result<Vec<usize>> {
    moves
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(|m| {
            m.parse::<usize>()
                .with_context(|| format!("invalid column '{m}' (expected a zero-based index)"))
        })
        .collect()
}

fn run_replay(config: &AppConfig, moves: &str, json: bool) -> Result<()> {
    let moves = parse_moves(moves)?;
    if moves.is_empty() {
        bail!("--moves needs at least one column");
    }

    let mut engine = GameEngine::new(config.board.height, config.board.width)?;
    for step in replay::replay(&mut engine, &moves) {
        if json {
            println!("{}", serde_json::to_string(&step)?);
        } else {
            println!("{}", step.describe());
        }
    }

    if !json {
        println!();
        print!("{}", engine.board());
        match engine.outcome() {
            Outcome::InProgress => println!("{} to move", engine.current_player()),
            Outcome::Win(player) => println!("{player} won!"),
            Outcome::Draw => println!("Tie!"),
        }
    }
    Ok(())
}

fn run_tui(config: &AppConfig) -> Result<()> {
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("terminal UI failed")
}

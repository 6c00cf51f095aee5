use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four::ai::Difficulty;
use connect_four::config::GameConfig;
use connect_four::game::PlacementMode;
use connect_four::ui::App;

/// Play Connect Four in the terminal against a minimax AI.
#[derive(Parser)]
#[command(name = "connect-four", about = "Connect Four with a minimax AI")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml")]
    config: PathBuf,

    /// Override board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override board columns
    #[arg(long)]
    cols: Option<usize>,

    /// AI difficulty: easy, medium, hard or extreme
    #[arg(long)]
    difficulty: Option<String>,

    /// Place pieces into any open cell instead of dropping them
    #[arg(long)]
    free_placement: bool,

    /// Two human players instead of playing against the AI
    #[arg(long)]
    two_player: bool,

    /// Skip the AI's artificial thinking pause
    #[arg(long)]
    no_thinking_delay: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.cols = cols;
    }
    if let Some(difficulty) = &cli.difficulty {
        config.difficulty = difficulty
            .parse::<Difficulty>()
            .map_err(|err| anyhow::anyhow!(err))?;
    }
    if cli.free_placement {
        config.placement = PlacementMode::Free;
    }
    if cli.no_thinking_delay {
        config.thinking_delay = false;
    }
    config.validate().context("invalid configuration")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, !cli.two_player);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("terminal error")?;
    Ok(())
}

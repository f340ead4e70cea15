use anyhow::Context;
use base::tracing_util::setup_tracing;
use clap::Parser;
use memory_match::application::GameConfig;
use memory_match::domain::{play_rounds, SessionEnd};
use memory_match::infrastructure::console::{ConsoleDisplay, StdinInput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Swap pairs of buttons until the colors are back in order.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to a YAML game configuration. Uses built-in defaults if omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for reproducible scrambles.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of rounds to play.
    #[arg(long)]
    rounds: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    setup_tracing();
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(rounds) = cli.rounds {
        config.rounds = rounds;
    }
    config.validate().context("invalid game configuration")?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut display = ConsoleDisplay::new(config.topology(), std::io::stdout());
    let mut input = StdinInput::new(std::io::stdin().lock());
    let report = play_rounds(&config, &mut display, &mut input, &mut rng)?;
    match report.ended_by {
        SessionEnd::AllRoundsPlayed => tracing::info!(
            msg = "Yay, all rounds won!",
            rounds = report.outcomes.len(),
            guess_count = report.total_guess_count()
        ),
        SessionEnd::InputDisconnected => tracing::info!(
            msg = "Stopped early",
            rounds_won = report.outcomes.len(),
            guess_count = report.total_guess_count()
        ),
    }
    Ok(())
}

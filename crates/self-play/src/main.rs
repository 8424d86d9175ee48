//! Self-play driver - runs engine games from the command line.
//!
//! Reads an engine configuration, plays a number of games and logs every
//! move and result through `tracing`. Set `RUST_LOG=debug` to also see the
//! search statistics.

mod runner;

use anyhow::Context;
use chess_engine::{EngineConfig, Setup};
use clap::Parser;
use runner::{Ending, GameRunner};
use std::path::PathBuf;

/// Self-play - plays the engine against itself or a random mover.
#[derive(Parser)]
#[command(name = "self-play")]
#[command(about = "Plays engine games from a TOML configuration")]
struct Args {
    /// Path to the engine configuration file
    #[arg(long, default_value = "engine.toml")]
    config: PathBuf,

    /// Stop a game after this many moves
    #[arg(long, default_value = "300")]
    max_turns: u32,

    /// Number of games to play
    #[arg(long, default_value = "1")]
    games: u32,

    /// Seed for the first game; later games use the following seeds
    #[arg(long)]
    seed: Option<u64>,

    /// Let White play uniformly random moves
    #[arg(long)]
    random_white: bool,

    /// Override the configured search depth
    #[arg(long)]
    depth: Option<u32>,

    /// Start every game from a random pandemonium board
    #[arg(long)]
    pandemonium: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut config = EngineConfig::load_from(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(depth) = args.depth {
        config.search_depth = depth;
        config.validate()?;
    }
    if args.pandemonium {
        config.setup = Setup::Pandemonium;
    }
    let seed = args.seed.or(config.seed);

    tracing::info!("Config: {:?}", config);
    tracing::info!("Games: {}, max turns: {}", args.games, args.max_turns);

    let runner = GameRunner::new(config, args.max_turns, args.random_white);
    let mut tally = [0u32; 3];
    for game_number in 0..args.games {
        let game_seed = seed.map(|s| s.wrapping_add(u64::from(game_number)));
        let summary = runner
            .play(game_seed)
            .with_context(|| format!("game {}", game_number + 1))?;

        let result = match summary.ending {
            Ending::Won(color) => {
                tally[color.index()] += 1;
                format!("{} wins", color)
            }
            Ending::Stuck(color) => {
                tally[2] += 1;
                format!("{} has no moves", color)
            }
            Ending::TurnLimit => {
                tally[2] += 1;
                "turn limit reached".to_string()
            }
        };
        tracing::info!(
            game = game_number + 1,
            turns = summary.turns,
            "Result: {}",
            result
        );
        println!("{}: {} after {} moves", game_number + 1, result, summary.turns);
        println!("  {}", summary.moves.join(" "));
    }

    println!(
        "White {} - Black {} - undecided {}",
        tally[0], tally[1], tally[2]
    );
    Ok(())
}

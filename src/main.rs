//! Tictac-MCTS command line.
//!
//! ## Usage
//!
//! - `tictac-mcts` - One game, MCTS against a random player
//! - `tictac-mcts match --first perfect --second mcts` - One game, board dump
//! - `tictac-mcts series --games 500` - Many games, outcome tally

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use fastrand::Rng;
use tracing::info;

use tictac_mcts::config::MctsConfig;
use tictac_mcts::constants::{DEFAULT_ROLLOUTS, DEFAULT_SIZE, MAX_SIZE};
use tictac_mcts::game::{play_match, play_series};
use tictac_mcts::player::{PlayerKind, build_player};
use tictac_mcts::rules::Rules;

/// Tictac-MCTS: N×N tic-tac-toe with Monte Carlo Tree Search
#[derive(Parser)]
#[command(name = "tictac-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    opts: GameOpts,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game and dump the final board
    Match,
    /// Play a series of games and print the tally
    Series {
        /// Number of games
        #[arg(long, default_value_t = 100)]
        games: u32,
    },
}

#[derive(Args)]
struct GameOpts {
    /// Board size N
    #[arg(long, global = true, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Random seed; a fresh one is drawn and printed when omitted
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Player moving first
    #[arg(long, global = true, value_enum, default_value_t = PlayerKind::Mcts)]
    first: PlayerKind,

    /// Player moving second
    #[arg(long, global = true, value_enum, default_value_t = PlayerKind::Random)]
    second: PlayerKind,

    /// Let the MCTS player open in the center of odd boards
    #[arg(long, global = true)]
    center_first: bool,

    /// Search cycles per MCTS decision
    #[arg(long, global = true, default_value_t = DEFAULT_ROLLOUTS)]
    rollouts: u32,
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level {level:?}"))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let opts = &cli.opts;
    if opts.size > MAX_SIZE {
        bail!("board size {} exceeds the maximum of {MAX_SIZE}", opts.size);
    }
    let rules = Rules::new(opts.size).context("building rules")?;

    let seed = opts.seed.unwrap_or_else(|| fastrand::u64(..));
    println!("seed = {seed}");
    let mut rng = Rng::with_seed(seed);

    let config = MctsConfig {
        center_first: opts.center_first,
        ..MctsConfig::default()
    }
    .with_rollouts(opts.rollouts);

    match cli.command {
        Some(Commands::Series { games }) => {
            let tally = play_series(&rules, opts.first, opts.second, &config, games, &mut rng)
                .context("series aborted")?;
            info!(%tally, "series finished");
            println!("{tally}");
        }
        Some(Commands::Match) | None => {
            let mut p1 = build_player(opts.first, &rules, &config);
            let mut p2 = build_player(opts.second, &rules, &config);
            let outcome =
                play_match(p1.as_mut(), p2.as_mut(), &mut rng).context("match aborted")?;
            info!(winner = outcome.winner(), first = p1.name(), second = p2.name(), "match finished");
            println!("winner = {}", outcome.winner());
            print!("{}", p1.board());
        }
    }

    Ok(())
}

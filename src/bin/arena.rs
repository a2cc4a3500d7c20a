//! SOS arena - play series of games between two agents and report results

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sos::arena::run_series;
use sos::engine::{AgentConfig, AgentKind};
use sos::eval::Heuristic;
use sos::search::{Depth, TieBreak};
use sos::DEFAULT_BOARD_SIZE;

/// Deepest search accepted on the command line, in plies
const MAX_DEPTH: i64 = 64;

#[derive(Parser, Debug)]
#[command(name = "sos-arena")]
#[command(version, about = "Play SOS agents against each other and report statistics", long_about = None)]
struct Args {
    /// Number of games
    #[arg(long, short = 'g', default_value_t = 30)]
    games: usize,

    /// Board size
    #[arg(long, short = 'n', default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Agent playing first (the reported side)
    #[arg(long, short = 'a', value_enum, default_value_t = AgentKind::AlphaBeta)]
    agent: AgentKind,

    /// Opponent agent
    #[arg(long, short = 'o', value_enum, default_value_t = AgentKind::Random)]
    opponent: AgentKind,

    /// Agent search depth in plies
    #[arg(long, short = 'd', default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=MAX_DEPTH))]
    depth: u32,

    /// Agent search depth in half plies (overrides --depth)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=2 * MAX_DEPTH))]
    half_plies: Option<u32>,

    /// Opponent search depth in plies
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=MAX_DEPTH))]
    opponent_depth: u32,

    /// Agent leaf heuristic
    #[arg(long, value_enum, default_value_t = Heuristic::Combined)]
    heuristic: Heuristic,

    /// Opponent leaf heuristic
    #[arg(long, value_enum, default_value_t = Heuristic::Combined)]
    opponent_heuristic: Heuristic,

    /// Disable the safe-random tie-break for both sides
    #[arg(long)]
    no_tie_break: bool,

    /// Alpha-beta: order children by the heuristic
    #[arg(long)]
    ordered: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Print every game's final score
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let tie_break = if args.no_tie_break {
        TieBreak::Off
    } else {
        TieBreak::SafeRandom
    };
    let depth = match args.half_plies {
        Some(steps) => Depth::half_plies(steps),
        None => Depth::plies(args.depth),
    };

    let mut agent = AgentConfig::new(args.agent)
        .with_depth(depth)
        .with_heuristic(args.heuristic)
        .with_tie_break(tie_break)
        .with_ordering(args.ordered);
    let mut opponent = AgentConfig::new(args.opponent)
        .with_depth(Depth::plies(args.opponent_depth))
        .with_heuristic(args.opponent_heuristic)
        .with_tie_break(tie_break);
    if let Some(seed) = args.seed {
        agent = agent.with_seed(seed);
        opponent = opponent.with_seed(seed.wrapping_add(1_000_003));
    }

    println!("=== SOS Arena ===");
    println!("Board: {0}x{0}", args.size);
    println!("Agent: {agent}");
    println!("Opponent: {opponent}");
    println!("Games: {}", args.games);
    if let Some(seed) = args.seed {
        println!("Seed: {seed}");
    }
    info!(games = args.games, size = args.size, "running series");

    let (summary, records) = run_series(args.size, args.games, agent, opponent)?;

    if args.verbose {
        println!();
        for (i, record) in records.iter().enumerate() {
            println!(
                "Game {i}: Agent: {}, Opponent: {} | moves: {} | time: {}ms",
                record.max_score(),
                record.min_score(),
                record.moves.len(),
                record.time_ms
            );
        }
    }

    println!("\n=== Results ===");
    println!("{summary}");
    Ok(())
}

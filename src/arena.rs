//! Match driver and statistics harness
//!
//! [`play_game`] runs one game between two engines: Max moves first, a
//! scoring move keeps the turn, and the game ends when the board is full.
//! [`run_series`] repeats that for a number of games and aggregates the
//! results from Max's point of view.

use std::fmt;
use std::time::Instant;

use tracing::info;

use crate::engine::{AgentConfig, Engine};
use crate::error::Result;
use crate::state::{Action, GameState, Side};

/// One move of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub side: Side,
    pub action: Action,
    /// Triples completed by the move
    pub delta: u32,
    pub time_ms: u64,
}

/// Full record of one game
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub final_state: GameState,
    pub moves: Vec<MoveRecord>,
    pub time_ms: u64,
}

impl GameRecord {
    pub fn max_score(&self) -> u32 {
        self.final_state.score()
    }

    pub fn min_score(&self) -> u32 {
        self.final_state.opponent_score()
    }

    /// `None` on a tie
    pub fn winner(&self) -> Option<Side> {
        match self.max_score().cmp(&self.min_score()) {
            std::cmp::Ordering::Greater => Some(Side::Max),
            std::cmp::Ordering::Less => Some(Side::Min),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Play a game on an empty `size`x`size` board
pub fn play_game(size: usize, max: &mut Engine, min: &mut Engine) -> Result<GameRecord> {
    let start = Instant::now();
    let mut state = GameState::new(size)?;
    let mut side = Side::Max;
    let mut moves = Vec::with_capacity(size * size);

    while !state.is_done() {
        let engine = match side {
            Side::Max => &mut *max,
            Side::Min => &mut *min,
        };
        let result = engine.get_move_with_stats(&state, side)?;
        let transition = state.apply(result.action, side)?;
        moves.push(MoveRecord {
            side,
            action: result.action,
            delta: transition.delta(),
            time_ms: result.time_ms,
        });
        side = transition.next_side;
        state = transition.state;
    }

    let record = GameRecord {
        final_state: state,
        moves,
        time_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        max = max.name(),
        min = min.name(),
        max_score = record.max_score(),
        min_score = record.min_score(),
        time_ms = record.time_ms,
        "game finished"
    );
    Ok(record)
}

/// Aggregate of a series, from Max's point of view
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeriesSummary {
    pub games: usize,
    pub wins: usize,
    pub ties: usize,
    pub losses: usize,
    pub average_score: f64,
    pub average_opponent_score: f64,
    pub average_time_ms: f64,
}

impl SeriesSummary {
    fn from_records(records: &[GameRecord]) -> Self {
        let mut summary = SeriesSummary {
            games: records.len(),
            ..SeriesSummary::default()
        };
        if records.is_empty() {
            return summary;
        }

        let (mut score, mut opponent, mut time) = (0u64, 0u64, 0u64);
        for record in records {
            match record.winner() {
                Some(Side::Max) => summary.wins += 1,
                Some(Side::Min) => summary.losses += 1,
                None => summary.ties += 1,
            }
            score += u64::from(record.max_score());
            opponent += u64::from(record.min_score());
            time += record.time_ms;
        }
        let n = records.len() as f64;
        summary.average_score = score as f64 / n;
        summary.average_opponent_score = opponent as f64 / n;
        summary.average_time_ms = time as f64 / n;
        summary
    }
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games: {}", self.games)?;
        writeln!(f, "Wins: {}  Ties: {}  Losses: {}", self.wins, self.ties, self.losses)?;
        writeln!(f, "Average SOS: {:.2}", self.average_score)?;
        writeln!(f, "Opponent average SOS: {:.2}", self.average_opponent_score)?;
        write!(f, "Average time: {:.1}ms", self.average_time_ms)
    }
}

/// Play `games` games of `max` against `min` on `size`x`size` boards.
///
/// Engines are rebuilt for every game. A seeded config gets seed + game
/// index, so a seeded series is reproducible without replaying one game.
pub fn run_series(
    size: usize,
    games: usize,
    max: AgentConfig,
    min: AgentConfig,
) -> Result<(SeriesSummary, Vec<GameRecord>)> {
    let mut records = Vec::with_capacity(games);
    for game in 0..games {
        let mut max_engine = Engine::with_config(offset_seed(max, game));
        let mut min_engine = Engine::with_config(offset_seed(min, game));
        let record = play_game(size, &mut max_engine, &mut min_engine)?;
        info!(
            game,
            max_score = record.max_score(),
            min_score = record.min_score(),
            "series game"
        );
        records.push(record);
    }
    Ok((SeriesSummary::from_records(&records), records))
}

fn offset_seed(config: AgentConfig, game: usize) -> AgentConfig {
    match config.seed {
        Some(seed) => config.with_seed(seed.wrapping_add(game as u64)),
        None => config,
    }
}

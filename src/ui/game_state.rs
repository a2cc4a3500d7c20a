//! Game session management for the SOS GUI

use crate::engine::{AgentConfig, Engine, MoveResult};
use crate::error::GameError;
use crate::rules::LineMatch;
use crate::search::Depth;
use crate::{Action, GameState, Pos, Side, Symbol, DEFAULT_BOARD_SIZE};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::{Duration, Instant};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE { human_side: Side },
    /// Player vs Player (hotseat)
    PvP { show_suggestions: bool },
    /// Two engines, watched
    AiVsAi,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE {
            human_side: Side::Max,
        }
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<Result<MoveResult, GameError>>,
        start_time: Instant,
    },
}

/// Final outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    /// `None` on a tie
    pub winner: Option<Side>,
    pub score: u32,
    pub opponent_score: u32,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Everything the GUI tracks about the current game
pub struct GameSession {
    pub state: GameState,
    pub mode: GameMode,
    pub current_turn: Side,
    pub selected_symbol: Symbol,
    pub game_over: Option<GameResult>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<(Action, Side)>,
    /// Completed lines with the side that scored them
    pub lines: Vec<(LineMatch, Side)>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Action>,
    pub message: Option<String>,

    pub board_size: usize,
    /// Agent for the Max side when it is not human
    pub max_agent: AgentConfig,
    /// Agent for the Min side when it is not human
    pub min_agent: AgentConfig,
}

impl GameSession {
    pub fn new(mode: GameMode) -> Self {
        Self::with_size(mode, DEFAULT_BOARD_SIZE)
    }

    /// Falls back to [`DEFAULT_BOARD_SIZE`] on a size below the minimum
    pub fn with_size(mode: GameMode, size: usize) -> Self {
        let (state, board_size) = match GameState::new(size) {
            Ok(state) => (state, size),
            Err(_) => (GameState::default(), DEFAULT_BOARD_SIZE),
        };
        Self {
            state,
            mode,
            current_turn: Side::Max,
            selected_symbol: Symbol::S,
            game_over: None,
            last_move: None,
            move_history: Vec::new(),
            lines: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
            board_size,
            max_agent: AgentConfig::default(),
            min_agent: AgentConfig::default(),
        }
    }

    pub fn reset(&mut self) {
        self.state = GameState::new(self.board_size).unwrap_or_default();
        self.current_turn = Side::Max;
        self.game_over = None;
        self.last_move = None;
        self.move_history.clear();
        self.lines.clear();
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.move_timer = MoveTimer::default();
        self.suggested_move = None;
        self.message = None;
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_side } => self.current_turn == human_side,
            GameMode::PvP { .. } => true,
            GameMode::AiVsAi => false,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        !self.is_human_turn()
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    pub fn agent_for(&self, side: Side) -> AgentConfig {
        match side {
            Side::Max => self.max_agent,
            Side::Min => self.min_agent,
        }
    }

    /// Attempt to place the selected symbol at the given position
    pub fn try_place(&mut self, pos: Pos) -> Result<(), String> {
        if self.game_over.is_some() {
            return Err("Game is over".to_string());
        }

        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }

        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        let action = Action {
            symbol: self.selected_symbol,
            pos,
        };
        self.execute_move(action).map_err(|e| e.to_string())
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, action: Action) -> Result<(), GameError> {
        let side = self.current_turn;
        let transition = self.state.apply(action, side)?;

        self.lines
            .extend(transition.matches.iter().map(|&line| (line, side)));
        self.move_history.push((action, side));
        self.last_move = Some(action.pos);
        self.suggested_move = None;
        self.move_timer.stop();

        self.current_turn = transition.next_side;
        self.state = transition.state;

        if self.state.is_done() {
            self.game_over = Some(self.result());
            return Ok(());
        }

        self.move_timer.start();
        self.message = match transition.matches.len() {
            0 => None,
            n => Some(format!("{n} SOS! Play again")),
        };
        Ok(())
    }

    fn result(&self) -> GameResult {
        let (score, opponent_score) = (self.state.score(), self.state.opponent_score());
        let winner = match score.cmp(&opponent_score) {
            std::cmp::Ordering::Greater => Some(Side::Max),
            std::cmp::Ordering::Less => Some(Side::Min),
            std::cmp::Ordering::Equal => None,
        };
        GameResult {
            winner,
            score,
            opponent_score,
        }
    }

    /// Start AI thinking
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.game_over.is_some() {
            return;
        }

        let state = self.state.clone();
        let side = self.current_turn;
        let config = self.agent_for(side);

        let (tx, rx) = channel();

        thread::spawn(move || {
            let mut engine = Engine::with_config(config);
            let result = engine.get_move_with_stats(&state, side);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(std::sync::mpsc::TryRecvError::Empty) => None,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((move_result, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.move_timer.set_ai_time(elapsed);

            match move_result {
                Ok(move_result) => {
                    self.last_ai_result = Some(move_result);
                    if let Err(e) = self.execute_move(move_result.action) {
                        self.message = Some(format!("AI move rejected: {e}"));
                    }
                }
                Err(e) => self.message = Some(format!("AI could not find a move: {e}")),
            }
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Request move suggestion for PvP mode
    pub fn request_suggestion(&mut self) {
        if self.game_over.is_some() || self.is_ai_thinking() {
            return;
        }

        // Quick search at a single ply
        let config = self.agent_for(self.current_turn).with_depth(Depth::plies(1));
        let mut engine = Engine::with_config(config);
        match engine.get_move_with_stats(&self.state, self.current_turn) {
            Ok(result) => {
                self.suggested_move = Some(result.action);
                self.last_ai_result = Some(result);
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    /// Undo last move
    pub fn undo(&mut self) {
        if self.move_history.is_empty() || self.is_ai_thinking() {
            return;
        }

        // In PvE, undo back to the human's last move
        let mut keep = self.move_history.len() - 1;
        if let GameMode::PvE { human_side } = self.mode {
            while keep > 0 && self.move_history[keep].1 != human_side {
                keep -= 1;
            }
        }

        // Simple undo: reset and replay
        let moves: Vec<_> = self.move_history.drain(..keep).collect();
        self.reset();
        for (action, side) in moves {
            self.current_turn = side;
            if let Err(e) = self.execute_move(action) {
                self.message = Some(format!("Undo replay failed: {e}"));
                break;
            }
        }
    }
}

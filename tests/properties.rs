//! Cross-module properties of the game model and the search agents

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sos::arena::play_game;
use sos::engine::{AgentConfig, AgentKind, Engine};
use sos::eval::{combined, raw_score, score_difference, EvalFn, Heuristic};
use sos::rules::all_matches;
use sos::search::{AlphaBetaAgent, Depth, ExpectimaxAgent, MinimaxAgent, SearchAgent};
use sos::{Action, Board, GameState, Side, Symbol};

/// Play `moves` random actions from an empty board, honoring turn extension
fn random_position(size: usize, moves: usize, seed: u64) -> (GameState, Side) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = GameState::new(size).unwrap();
    let mut side = Side::Max;
    for _ in 0..moves {
        let Some(&action) = state.legal_actions().choose(&mut rng) else {
            break;
        };
        let transition = state.apply(action, side).unwrap();
        side = transition.next_side;
        state = transition.state;
    }
    (state, side)
}

#[test]
fn done_iff_board_full() {
    for size in 3..=6 {
        let mut rng = StdRng::seed_from_u64(size as u64);
        let mut state = GameState::new(size).unwrap();
        let mut side = Side::Max;
        loop {
            assert_eq!(state.is_done(), state.board().filled_count() == size * size);
            let Some(&action) = state.legal_actions().choose(&mut rng) else {
                break;
            };
            let transition = state.apply(action, side).unwrap();
            side = transition.next_side;
            state = transition.state;
        }
        assert!(state.is_done());
    }
}

#[test]
fn per_move_count_is_bounded_and_sums_to_final_triples() {
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = GameState::new(5).unwrap();
        let mut side = Side::Max;
        let mut total = 0;
        while let Some(&action) = state.legal_actions().choose(&mut rng) {
            let transition = state.apply(action, side).unwrap();
            assert!(transition.delta() <= 12);
            total += transition.delta();
            side = transition.next_side;
            state = transition.state;
        }
        assert_eq!(total as usize, all_matches(state.board()).len());
        assert_eq!(total, state.score() + state.opponent_score());
    }
}

#[test]
fn replay_gives_identical_scores() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut history: Vec<(Action, Side)> = Vec::new();
    let mut state = GameState::new(4).unwrap();
    let mut side = Side::Max;
    while let Some(&action) = state.legal_actions().choose(&mut rng) {
        history.push((action, side));
        let transition = state.apply(action, side).unwrap();
        side = transition.next_side;
        state = transition.state;
    }

    let mut replay = GameState::new(4).unwrap();
    for (action, side) in history {
        replay = replay.generate_successor(action, side).unwrap();
    }
    assert_eq!(replay, state);
}

#[test]
fn minimax_and_alphabeta_agree() {
    for seed in 0..12 {
        let (state, side) = random_position(4, 8, seed);
        if state.is_done() {
            continue;
        }
        // Agents play Max; hand them the position from the mover's view
        let state = match side {
            Side::Max => state,
            Side::Min => state.mirrored(),
        };
        for eval in [raw_score as EvalFn, score_difference, combined] {
            for depth in [Depth::half_plies(1), Depth::half_plies(2), Depth::half_plies(3)] {
                let mut minimax = MinimaxAgent::new(eval, depth).with_seed(seed);
                let mut alphabeta = AlphaBetaAgent::new(eval, depth).with_seed(seed);
                assert_eq!(
                    minimax.get_action(&state).unwrap(),
                    alphabeta.get_action(&state).unwrap(),
                    "seed {seed}, depth {depth}\n{}",
                    state.board()
                );
            }
        }
    }
}

/// Reference minimax value with turn extension, independent of the agents
fn reference_value(state: &GameState, side: Side, steps: u32, eval: EvalFn) -> f64 {
    if steps == 0 || state.is_done() {
        return eval(state);
    }
    let values = state.legal_actions().into_iter().map(|action| {
        let transition = state.apply(action, side).unwrap();
        reference_value(&transition.state, transition.next_side, steps - 1, eval)
    });
    match side {
        Side::Max => values.fold(f64::NEG_INFINITY, f64::max),
        Side::Min => values.fold(f64::INFINITY, f64::min),
    }
}

#[test]
fn ordered_alphabeta_finds_an_optimal_action() {
    let depth = Depth::half_plies(3);
    for seed in 20..26 {
        let (state, _) = random_position(4, 6, seed);
        let root_value = |action: Action| {
            let transition = state.apply(action, Side::Max).unwrap();
            reference_value(
                &transition.state,
                transition.next_side,
                depth.steps() - 1,
                score_difference,
            )
        };
        let best = state
            .legal_actions()
            .into_iter()
            .map(root_value)
            .fold(f64::NEG_INFINITY, f64::max);

        let mut minimax = MinimaxAgent::new(score_difference, depth).with_seed(seed);
        let mut ordered = AlphaBetaAgent::new(score_difference, depth)
            .with_ordering(score_difference)
            .with_seed(seed);
        let action = ordered.get_action(&state).unwrap();
        minimax.get_action(&state).unwrap();

        // Ordering may change which of several equal actions comes first
        assert_eq!(root_value(action), best, "seed {seed}");
        assert!(ordered.stats().nodes <= minimax.stats().nodes);
    }
}

#[test]
fn every_agent_takes_a_unique_immediate_scorer() {
    let board = Board::from_rows(&["S.S.", "....", "....", "...."]).unwrap();
    let state = GameState::from_board(board, 0, 0);
    let expected = Action::new(Symbol::O, 0, 1);

    let mut agents: Vec<Box<dyn SearchAgent>> = vec![
        Box::new(MinimaxAgent::new(raw_score, Depth::plies(1)).with_seed(1)),
        Box::new(AlphaBetaAgent::new(raw_score, Depth::plies(1)).with_seed(1)),
        Box::new(ExpectimaxAgent::new(raw_score, Depth::plies(1)).with_seed(1)),
    ];
    for agent in &mut agents {
        assert_eq!(agent.get_action(&state).unwrap(), expected, "{}", agent.name());
        assert!(!agent.stats().tie_break_used);
    }
}

#[test]
fn empty_board_minimax_falls_back_to_tie_break() {
    let state = GameState::new(3).unwrap();
    let mut agent = MinimaxAgent::new(raw_score, Depth::plies(1));
    let action = agent.get_action(&state).unwrap();
    assert!(state.legal_actions().contains(&action));
    assert_eq!(state.legal_actions().len(), 18);
    assert!(agent.stats().tie_break_used);
}

fn flat(_: &GameState) -> f64 {
    0.0
}

#[test]
fn flat_root_without_safe_action_keeps_search_choice() {
    let board = Board::from_rows(&["SO.O", "OOOO", "OOOO", "SO.O"]).unwrap();
    let state = GameState::from_board(board, 0, 0);
    let expected = Action::new(Symbol::S, 0, 2);

    let mut agents: Vec<Box<dyn SearchAgent>> = vec![
        Box::new(MinimaxAgent::new(flat, Depth::plies(1)).with_seed(3)),
        Box::new(AlphaBetaAgent::new(flat, Depth::plies(1)).with_seed(3)),
        Box::new(ExpectimaxAgent::new(flat, Depth::plies(1)).with_seed(3)),
    ];
    for agent in &mut agents {
        assert_eq!(agent.get_action(&state).unwrap(), expected, "{}", agent.name());
        assert!(!agent.stats().tie_break_used, "{}", agent.name());
    }
}

#[test]
fn search_beats_random_on_average() {
    let mut total_margin = 0i64;
    for seed in 0..6 {
        let mut agent = Engine::with_config(
            AgentConfig::new(AgentKind::AlphaBeta)
                .with_depth(Depth::plies(1))
                .with_heuristic(Heuristic::ScoreDifference)
                .with_seed(seed),
        );
        let mut random = Engine::with_config(AgentConfig::new(AgentKind::Random).with_seed(seed + 100));
        let record = play_game(4, &mut agent, &mut random).unwrap();
        total_margin += i64::from(record.max_score()) - i64::from(record.min_score());
    }
    assert!(total_margin > 0, "margin {total_margin}");
}

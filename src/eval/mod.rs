//! Evaluation module for SOS positions
//!
//! This module provides the pluggable heuristics used at search leaves:
//! - Score based (raw, difference, inverse opponent score)
//! - Blocking pressure (exposed "almost-SOS" count)
//! - A combination of the two

pub mod heuristic;

pub use heuristic::{
    blocking_pressure, combined, inverse_opponent_score, raw_score, score_difference, EvalFn,
    Heuristic,
};

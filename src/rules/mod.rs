//! Game rules for SOS
//!
//! This module implements the rule set including:
//! - S-O-S detection around a placed cell (scoring)
//! - "Almost-SOS" exposure checks used by heuristics and the tie-break

pub mod exposure;
pub mod scoring;

// Re-exports for convenient access
pub use exposure::{count_exposed, is_almost_sos, is_safe};
pub use scoring::{all_matches, count_matches, find_matches, Direction, LineMatch};

//! GUI module for the SOS game
//!
//! This module provides a native Rust GUI using egui/eframe.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::SosApp;
pub use game_state::{GameMode, GameResult, GameSession};

//! Theme constants for the SOS GUI

use egui::Color32;

use crate::Side;

// Board colors - paper tones
pub const BOARD_BG: Color32 = Color32::from_rgb(245, 238, 220);
pub const GRID_LINE: Color32 = Color32::from_rgb(90, 80, 70);

// Letters
pub const LETTER_S: Color32 = Color32::from_rgb(40, 70, 140);
pub const LETTER_O: Color32 = Color32::from_rgb(150, 50, 40);

// Per-side accents: completed lines and the score panel
pub const MAX_ACCENT: Color32 = Color32::from_rgb(60, 140, 230);
pub const MIN_ACCENT: Color32 = Color32::from_rgb(230, 120, 50);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);
pub const SUGGESTION: Color32 = Color32::from_rgb(80, 180, 90);

// Functions for colors that can't be const
pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 80, 80, 60)
}

pub fn hover_invalid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 80)
}

pub fn side_accent(side: Side) -> Color32 {
    match side {
        Side::Max => MAX_ACCENT,
        Side::Min => MIN_ACCENT,
    }
}

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 24.0;
pub const GRID_LINE_WIDTH: f32 = 1.5;
pub const LETTER_SIZE_RATIO: f32 = 0.6;
pub const LINE_WIDTH: f32 = 4.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;

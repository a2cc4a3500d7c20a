//! Board rendering for the SOS GUI

use crate::rules::LineMatch;
use crate::{Action, Board, Cell, Pos, Side, Symbol};
use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use super::theme::*;

/// What the board view needs to draw one frame
pub struct BoardFrame<'a> {
    pub board: &'a Board,
    pub selected: Symbol,
    pub last_move: Option<Pos>,
    pub suggested_move: Option<Action>,
    pub lines: &'a [(LineMatch, Side)],
    /// Ignore clicks (game over, AI to move)
    pub locked: bool,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Cells per side of the board being drawn
    size: usize,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            size: crate::DEFAULT_BOARD_SIZE,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return click position if any
    pub fn show(&mut self, ui: &mut egui::Ui, frame: &BoardFrame<'_>) -> Option<Pos> {
        let available_size = ui.available_size();

        // Calculate board size to fit available space
        let board_px = available_size.x.min(available_size.y) - 20.0;
        self.size = frame.board.size();
        self.cell_size = (board_px - 2.0 * BOARD_MARGIN) / self.size as f32;

        let (response, painter) = ui.allocate_painter(Vec2::splat(board_px), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_letters(&painter, frame.board);

        for (line, side) in frame.lines {
            self.draw_line(&painter, line, *side);
        }

        if let Some(pos) = frame.last_move {
            self.draw_last_move_marker(&painter, pos);
        }

        if let Some(action) = frame.suggested_move {
            self.draw_letter(&painter, action.pos, action.symbol.as_char(), SUGGESTION);
        }

        // Handle hover preview and click
        let mut clicked_pos = None;

        if !frame.locked {
            if let Some(pointer_pos) = response.hover_pos() {
                if let Some(board_pos) = self.screen_to_board(pointer_pos) {
                    let is_valid = frame.board.is_empty(board_pos);
                    let hover_color = if is_valid { hover_valid() } else { hover_invalid() };
                    painter.rect_filled(self.cell_rect(board_pos), CornerRadius::ZERO, hover_color);
                    if is_valid {
                        self.draw_letter(
                            &painter,
                            board_pos,
                            frame.selected.as_char(),
                            Color32::from_rgba_unmultiplied(60, 60, 60, 120),
                        );
                    }

                    if response.clicked() && is_valid {
                        clicked_pos = Some(board_pos);
                    }
                }
            }
        }

        clicked_pos
    }

    /// Draw the cell grid
    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let span = self.size as f32 * self.cell_size;

        for i in 0..=self.size {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            let end = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN + span);
            painter.line_segment([start, end], stroke);

            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            let end = self.board_rect.min + Vec2::new(BOARD_MARGIN + span, offset);
            painter.line_segment([start, end], stroke);
        }
    }

    fn draw_letters(&self, painter: &Painter, board: &Board) {
        for (cell, color) in [(Cell::S, LETTER_S), (Cell::O, LETTER_O)] {
            for pos in board.positions_of(cell) {
                self.draw_letter(painter, pos, cell.as_char(), color);
            }
        }
    }

    fn draw_letter(&self, painter: &Painter, pos: Pos, letter: char, color: Color32) {
        painter.text(
            self.cell_center(pos),
            egui::Align2::CENTER_CENTER,
            letter,
            egui::FontId::proportional(self.cell_size * LETTER_SIZE_RATIO),
            color,
        );
    }

    /// Stroke through a completed S-O-S, in the scorer's color
    fn draw_line(&self, painter: &Painter, line: &LineMatch, side: Side) {
        let [first, _, last] = line.cells();
        let color = side_accent(side);
        let stroke = Stroke::new(
            LINE_WIDTH,
            Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 160),
        );
        painter.line_segment([self.cell_center(first), self.cell_center(last)], stroke);
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        let rect = self.cell_rect(pos);
        let corner = rect.right_top() + Vec2::new(-8.0, 8.0);
        painter.circle_filled(corner, LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    fn cell_rect(&self, pos: Pos) -> Rect {
        let min = self.board_rect.min
            + Vec2::new(
                BOARD_MARGIN + pos.col as f32 * self.cell_size,
                BOARD_MARGIN + pos.row as f32 * self.cell_size,
            );
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    fn cell_center(&self, pos: Pos) -> Pos2 {
        self.cell_rect(pos).center()
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let col = ((relative.x - BOARD_MARGIN) / self.cell_size).floor() as i64;
        let row = ((relative.y - BOARD_MARGIN) / self.cell_size).floor() as i64;
        let size = self.size as i64;

        if (0..size).contains(&col) && (0..size).contains(&row) {
            Some(Pos::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

//! Main application for the SOS GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel};

use super::board_view::{BoardFrame, BoardView};
use super::game_state::{GameMode, GameResult, GameSession};
use super::theme::*;
use crate::engine::{AgentConfig, AgentKind};
use crate::eval::Heuristic;
use crate::search::Depth;
use crate::{Side, Symbol, DEFAULT_BOARD_SIZE};

/// Largest board offered in the settings
const MAX_GUI_BOARD_SIZE: usize = 12;
/// Deepest search offered in the settings, in single-action steps
const MAX_GUI_STEPS: u32 = 8;

/// Main SOS application
pub struct SosApp {
    session: GameSession,
    board_view: BoardView,
    show_debug: bool,
    /// Settings applied on the next new game
    board_size: usize,
    max_agent: AgentConfig,
    min_agent: AgentConfig,
}

impl Default for SosApp {
    fn default() -> Self {
        let session = GameSession::new(GameMode::default());
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            max_agent: session.max_agent,
            min_agent: session.min_agent,
            session,
            board_view: BoardView::default(),
            show_debug: true,
        }
    }
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Max => "Player 1",
        Side::Min => "Player 2",
    }
}

impl SosApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// Start a fresh game with the current settings
    fn new_game(&mut self, mode: GameMode) {
        let mut session = GameSession::with_size(mode, self.board_size);
        session.max_agent = self.max_agent;
        session.min_agent = self.min_agent;
        self.session = session;
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (You first)").clicked() {
                        self.new_game(GameMode::PvE {
                            human_side: Side::Max,
                        });
                        ui.close_menu();
                    }
                    if ui.button("New Game (AI first)").clicked() {
                        self.new_game(GameMode::PvE {
                            human_side: Side::Min,
                        });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvP)").clicked() {
                        self.new_game(GameMode::PvP {
                            show_suggestions: false,
                        });
                        ui.close_menu();
                    }
                    if ui.button("New Game (AI vs AI)").clicked() {
                        self.new_game(GameMode::AiVsAi);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.session.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Settings", |ui| {
                    ui.label("Board size (next game)");
                    ui.add(egui::Slider::new(
                        &mut self.board_size,
                        crate::board::MIN_BOARD_SIZE..=MAX_GUI_BOARD_SIZE,
                    ));
                    ui.separator();
                    agent_settings(ui, "Player 1 AI", &mut self.max_agent);
                    ui.separator();
                    agent_settings(ui, "Player 2 AI", &mut self.min_agent);
                    self.session.max_agent = self.max_agent;
                    self.session.min_agent = self.min_agent;
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.session.mode {
                        GameMode::PvE { human_side } => {
                            format!("PvE - You: {}", side_name(human_side))
                        }
                        GameMode::PvP { .. } => "PvP - Hotseat".to_string(),
                        GameMode::AiVsAi => "AI vs AI".to_string(),
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(egui::Color32::from_rgb(25, 27, 31)))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.label(RichText::new("S O S").size(22.0).strong().color(TEXT_PRIMARY));
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_score_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(result) = self.session.game_over {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, &result);
                }

                if let Some(msg) = &self.session.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(egui::Color32::from_rgb(35, 38, 43))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    /// Turn indicator and symbol selection
    fn render_turn_card(&mut self, ui: &mut egui::Ui) {
        let turn = self.session.current_turn;
        Self::card_frame().show(ui, |ui| {
            ui.label(
                RichText::new(side_name(turn))
                    .size(18.0)
                    .strong()
                    .color(side_accent(turn)),
            );

            let status = if self.session.is_ai_thinking() {
                ("AI thinking...", TIMER_WARNING)
            } else if self.session.game_over.is_some() {
                ("Game Over", TIMER_NORMAL)
            } else if self.session.is_human_turn() {
                ("Your turn", TIMER_NORMAL)
            } else {
                ("AI to move", TEXT_SECONDARY)
            };
            ui.label(RichText::new(status.0).size(12.0).color(status.1));

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("Letter (S/O):").size(11.0).color(TEXT_MUTED));
                for symbol in Symbol::ALL {
                    ui.selectable_value(
                        &mut self.session.selected_symbol,
                        symbol,
                        RichText::new(symbol.as_char().to_string()).size(16.0).strong(),
                    );
                }
            });
        });
    }

    fn render_score_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("SCORE").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            for side in [Side::Max, Side::Min] {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(side_name(side)).size(14.0).color(side_accent(side)));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(self.session.state.score_of(side).to_string())
                                .size(20.0)
                                .strong()
                                .color(TEXT_PRIMARY),
                        );
                    });
                });
            }
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.session.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < 0.5 {
                    TIMER_NORMAL
                } else if secs < 2.0 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s")).size(28.0).strong().color(color));
            } else {
                let elapsed = self.session.move_timer.elapsed();
                ui.label(
                    RichText::new(format!("{:.1}s", elapsed.as_secs_f32()))
                        .size(24.0)
                        .color(TEXT_PRIMARY),
                );
            }

            if let Some(ai_time) = self.session.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("Undo (U)").clicked() {
                    self.session.undo();
                }
                if ui.button("New (N)").clicked() {
                    self.new_game(self.session.mode);
                }
                if let GameMode::PvP { .. } = self.session.mode {
                    if ui.button("Hint (H)").clicked() {
                        self.session.request_suggestion();
                    }
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.session.move_history.len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            for side in [Side::Max, Side::Min] {
                ui.label(
                    RichText::new(format!("{}: {}", side_name(side), self.session.agent_for(side)))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
            ui.add_space(4.0);

            match &self.session.last_ai_result {
                Some(result) => {
                    ui.label(
                        RichText::new(format!("-> {}", result.action))
                            .size(12.0)
                            .strong()
                            .color(TIMER_NORMAL),
                    );
                    ui.label(
                        RichText::new(format!("{}ms, {}", result.time_ms, result.stats))
                            .size(10.0)
                            .color(TEXT_MUTED),
                    );
                }
                None => {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                }
            }
        });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, result: &GameResult) {
        let headline = match result.winner {
            Some(side) => format!("{} WINS!", side_name(side)),
            None => "TIE".to_string(),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("GAME OVER")
                            .size(12.0)
                            .color(egui::Color32::from_rgb(180, 255, 180)),
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.label(
                        RichText::new(format!("{} - {}", result.score, result.opponent_score))
                            .size(14.0)
                            .color(TEXT_SECONDARY),
                    );
                    ui.add_space(12.0);
                    if ui.button("New Game").clicked() {
                        self.new_game(self.session.mode);
                    }
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let frame = BoardFrame {
                board: self.session.state.board(),
                selected: self.session.selected_symbol,
                last_move: self.session.last_move,
                suggested_move: self.session.suggested_move,
                lines: &self.session.lines,
                locked: self.session.game_over.is_some() || !self.session.is_human_turn(),
            };
            let clicked = self.board_view.show(ui, &frame);

            if let Some(pos) = clicked {
                if let Err(msg) = self.session.try_place(pos) {
                    self.session.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::S) {
                self.session.selected_symbol = Symbol::S;
            }
            if i.key_pressed(egui::Key::O) {
                self.session.selected_symbol = Symbol::O;
            }

            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }

            if i.key_pressed(egui::Key::H) {
                if let GameMode::PvP { .. } = self.session.mode {
                    self.session.request_suggestion();
                }
            }

            if i.key_pressed(egui::Key::U) {
                self.session.undo();
            }

            if i.key_pressed(egui::Key::N) {
                self.new_game(self.session.mode);
            }
        });
    }
}

/// Kind, depth and heuristic pickers for one agent
fn agent_settings(ui: &mut egui::Ui, title: &str, config: &mut AgentConfig) {
    ui.label(RichText::new(title).strong());

    egui::ComboBox::from_id_salt(format!("{title} kind"))
        .selected_text(config.kind.label())
        .show_ui(ui, |ui| {
            for kind in AgentKind::ALL {
                ui.selectable_value(&mut config.kind, kind, kind.label());
            }
        });

    if config.kind.searches() {
        let mut steps = config.depth.steps();
        ui.add(egui::Slider::new(&mut steps, 1..=MAX_GUI_STEPS).text("depth (half plies)"));
        config.depth = Depth::half_plies(steps);

        egui::ComboBox::from_id_salt(format!("{title} heuristic"))
            .selected_text(config.heuristic.label())
            .show_ui(ui, |ui| {
                for heuristic in Heuristic::ALL {
                    ui.selectable_value(&mut config.heuristic, heuristic, heuristic.label());
                }
            });
    }
}

impl eframe::App for SosApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.session.check_ai_result();

        // Start AI thinking if needed
        if self.session.is_ai_turn()
            && !self.session.is_ai_thinking()
            && self.session.game_over.is_none()
        {
            self.session.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.session.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}

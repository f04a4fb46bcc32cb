//! Desktop shell around the review session.
//! Draws the review and edit screens and forwards clock, window focus and
//! button presses to the session controller and the deck store.

use chrono::Local;
use eframe::egui;
use flashdeck::export::json::{default_export_name, export_deck_to_path, import_deck};
use flashdeck::models::{ScenePhase, SessionEvent, SessionState, Ticker};
use flashdeck::{DeckStore, SessionController};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How many cards of the stack are drawn under the front card.
const VISIBLE_STACK: usize = 3;

/// Application screen states
#[derive(Default, PartialEq)]
enum AppScreen {
    #[default]
    Review,
    EditCards,
}

pub struct FlashdeckApp {
    store: DeckStore,
    session: SessionController,
    ticker: Ticker,
    phase: ScenePhase,
    current_screen: AppScreen,

    /// Card whose answer is currently revealed.
    revealed: Option<Uuid>,

    new_prompt: String,
    new_answer: String,
    selected: BTreeSet<usize>,
    status_message: Option<String>,
}

/// Maps window state to the lifecycle phases the session understands.
fn scene_phase(ctx: &egui::Context) -> ScenePhase {
    ctx.input(|i| {
        if i.viewport().minimized.unwrap_or(false) {
            ScenePhase::Background
        } else if i.focused {
            ScenePhase::Active
        } else {
            ScenePhase::Inactive
        }
    })
}

impl eframe::App for FlashdeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let phase = scene_phase(ctx);
        if phase != self.phase {
            log::debug!("Window phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.session.handle(SessionEvent::Lifecycle(phase));
        }

        let now = Instant::now();
        if self.ticker.poll(now) {
            self.session.handle(SessionEvent::Tick);
        }
        ctx.request_repaint_after(self.ticker.until_next(now).max(Duration::from_millis(50)));

        match self.current_screen {
            AppScreen::Review => self.render_review_screen(ctx),
            AppScreen::EditCards => self.render_edit_screen(ctx),
        }

        if let Some(message) = self.status_message.clone() {
            egui::Window::new("Flashdeck")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.status_message = None;
                    }
                });
        }
    }
}

impl FlashdeckApp {
    /// Creates the app and starts a session on the stored deck
    pub fn new(store: DeckStore, session_seconds: u32) -> Self {
        let mut session = SessionController::new(session_seconds);
        session.start(&store);
        Self {
            store,
            session,
            ticker: Ticker::every_second(Instant::now()),
            phase: ScenePhase::Active,
            current_screen: AppScreen::Review,
            revealed: None,
            new_prompt: String::new(),
            new_answer: String::new(),
            selected: BTreeSet::new(),
            status_message: None,
        }
    }

    /// Renders the countdown, the card stack and the judgment buttons
    fn render_review_screen(&mut self, ctx: &egui::Context) {
        let mut action_judge: Option<bool> = None;
        let mut action_reveal = false;
        let mut action_restart = false;
        let mut action_edit = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("Time is {}", self.session.time_remaining()));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Edit Cards").clicked() {
                        action_edit = true;
                    }
                });
            });
            ui.label(format!("{} cards left", self.session.current_cards().len()));
            ui.separator();

            let state = self.session.state();
            let cards = self.session.current_cards();

            if let Some(card) = cards.first() {
                ui.group(|ui| {
                    ui.set_min_height(200.0);
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.heading(&card.prompt);
                        ui.add_space(20.0);
                        if self.revealed == Some(card.id) {
                            ui.label(&card.answer);
                        } else if ui.button("Show Answer").clicked() {
                            action_reveal = true;
                        }
                        ui.add_space(20.0);
                    });
                });

                // Cards further down the queue peek out under the front card.
                for behind in cards.iter().skip(1).take(VISIBLE_STACK) {
                    let position = self.session.position_of(behind.id).unwrap_or(0);
                    ui.horizontal(|ui| {
                        ui.add_space(10.0 * position as f32);
                        ui.weak(format!("card {} of {}", position + 1, cards.len()));
                    });
                }
                if cards.len() > VISIBLE_STACK + 1 {
                    ui.weak("…");
                }

                ui.add_space(20.0);
                ui.horizontal(|ui| {
                    let enabled = state.accepts_judgments();
                    if ui.add_enabled(enabled, egui::Button::new("✗ Wrong")).clicked() {
                        action_judge = Some(false);
                    }
                    if ui.add_enabled(enabled, egui::Button::new("✓ Correct")).clicked() {
                        action_judge = Some(true);
                    }
                });
            }

            match state {
                SessionState::Exhausted => {
                    ui.add_space(20.0);
                    ui.heading("All done!");
                    if ui.button("Start again").clicked() {
                        action_restart = true;
                    }
                }
                SessionState::TimedOut => {
                    ui.add_space(20.0);
                    ui.heading("Time is up");
                    if ui.button("Start again").clicked() {
                        action_restart = true;
                    }
                }
                SessionState::Paused => {
                    ui.weak("Paused");
                }
                SessionState::Running => {}
            }
        });

        // Execute deferred actions
        if action_reveal {
            self.revealed = self.session.front().map(|card| card.id);
        }
        if let Some(is_correct) = action_judge {
            if let Some(id) = self.session.front().map(|card| card.id) {
                if let Err(e) = self.session.judge(id, is_correct) {
                    log::debug!("Judgment not applied: {}", e);
                }
            }
        }
        if action_restart {
            self.restart_session();
        }
        if action_edit {
            self.store.reload();
            self.selected.clear();
            self.current_screen = AppScreen::EditCards;
        }
    }

    /// Renders the deck editor
    fn render_edit_screen(&mut self, ctx: &egui::Context) {
        let mut action_add = false;
        let mut action_delete = false;
        let mut action_import = false;
        let mut action_export = false;
        let mut action_done = false;
        let mut action_toggle: Option<usize> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Edit Cards");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Done").clicked() {
                        action_done = true;
                    }
                });
            });
            ui.separator();

            ui.label("Add new card");
            ui.horizontal(|ui| {
                ui.label("Prompt:");
                ui.text_edit_singleline(&mut self.new_prompt);
            });
            ui.horizontal(|ui| {
                ui.label("Answer:");
                ui.text_edit_singleline(&mut self.new_answer);
            });
            if ui.button("Add Card").clicked() {
                action_add = true;
            }

            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Import Deck").clicked() {
                    action_import = true;
                }
                if ui.button("Export Deck").clicked() {
                    action_export = true;
                }
                let delete = egui::Button::new(format!("Delete selected ({})", self.selected.len()));
                if ui.add_enabled(!self.selected.is_empty(), delete).clicked() {
                    action_delete = true;
                }
            });

            ui.heading(format!("Cards ({})", self.store.cards().len()));

            egui::ScrollArea::vertical()
                .id_salt("cards_list")
                .show(ui, |ui| {
                    for (i, card) in self.store.cards().iter().enumerate() {
                        ui.horizontal(|ui| {
                            let mut checked = self.selected.contains(&i);
                            if ui.checkbox(&mut checked, "").changed() {
                                action_toggle = Some(i);
                            }
                            ui.vertical(|ui| {
                                ui.strong(&card.prompt);
                                ui.weak(&card.answer);
                            });
                        });
                    }
                });
        });

        // Execute deferred actions
        if let Some(i) = action_toggle {
            if !self.selected.remove(&i) {
                self.selected.insert(i);
            }
        }
        if action_add {
            match self.store.add_card(&self.new_prompt, &self.new_answer) {
                Ok(_) => {
                    self.new_prompt.clear();
                    self.new_answer.clear();
                    // Positions shift down by one after an insert at the top.
                    self.selected = self.selected.iter().map(|i| i + 1).collect();
                }
                Err(e) => self.status_message = Some(format!("Card not added: {}", e)),
            }
        }
        if action_delete {
            let removed = self.store.remove_cards(&self.selected);
            log::info!("Deleted {} cards", removed);
            self.selected.clear();
        }
        if action_import {
            self.handle_import();
        }
        if action_export {
            self.handle_export();
        }
        if action_done {
            self.current_screen = AppScreen::Review;
            self.restart_session();
        }
    }

    fn restart_session(&mut self) {
        self.revealed = None;
        self.session.reset(&self.store);
        self.ticker = Ticker::every_second(Instant::now());
        // A reset must not resume the clock while the window is in the background.
        if self.phase != ScenePhase::Active {
            self.session.set_active(false);
        }
    }

    /// Handles deck export to JSON file
    fn handle_export(&mut self) {
        let file_name = default_export_name(Local::now().date_naive());
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(file_name)
            .add_filter("JSON files", &["json"])
            .save_file()
        {
            self.status_message = Some(match export_deck_to_path(self.store.cards(), &path) {
                Ok(()) => format!("Exported {} cards.", self.store.cards().len()),
                Err(e) => format!("Export failed: {}", e),
            });
        }
    }

    /// Handles deck import from JSON file
    fn handle_import(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        {
            self.status_message = Some(match import_deck(&path) {
                Ok(cards) => {
                    let added = self.store.import_cards(cards);
                    self.selected.clear();
                    format!("Imported {} cards.", added)
                }
                Err(e) => format!(
                    "Import failed: {}\n\nThe file should be a JSON array of\n{{ \"id\", \"prompt\", \"answer\" }} objects.",
                    e
                ),
            });
        }
    }
}

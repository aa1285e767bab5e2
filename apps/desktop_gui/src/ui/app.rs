use std::time::Duration;

use client_core::{
    render::NO_RESULTS, Presentation, ResultCard, SearchController, Settlement,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiEvent},
    orchestration::dispatch_search,
};

const SCORE_COLOR: egui::Color32 = egui::Color32::from_rgb(46, 125, 50);

pub struct StorySearchApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: SearchController,
    status: String,
}

impl StorySearchApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        controller: SearchController,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            controller,
            status: "Starting...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), "backend error: {}", err.message());
                    self.status = err.status_text();
                }
                UiEvent::SearchSettled {
                    generation,
                    outcome,
                } => {
                    let failure = outcome.as_ref().err().map(UiError::from_search_error);
                    if self.controller.settle(generation, outcome) == Settlement::Stale {
                        continue;
                    }
                    self.status = match (failure, self.controller.view().results()) {
                        (Some(err), _) => err.status_text(),
                        (None, Some(results)) => format!("{} stories matched", results.len()),
                        (None, None) => String::new(),
                    };
                }
            }
        }
    }

    fn show_search_form(&mut self, ui: &mut egui::Ui) {
        let affordance = self.controller.submit_affordance();
        let mut submit = false;

        ui.horizontal(|ui| {
            let input_width = (ui.available_width() - 120.0).max(200.0);
            let input = ui.add(
                egui::TextEdit::singleline(self.controller.query_mut())
                    .hint_text("Enter your search query...")
                    .desired_width(input_width),
            );
            if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
                input.request_focus();
            }
            if ui
                .add_enabled(affordance.enabled, egui::Button::new(affordance.label))
                .clicked()
            {
                submit = true;
            }
        });

        if submit && affordance.enabled {
            dispatch_search(&self.cmd_tx, &mut self.controller, &mut self.status);
        }
    }

    fn show_results(&self, ui: &mut egui::Ui) {
        match self.controller.presentation() {
            Presentation::Blank => {}
            Presentation::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Searching...");
                });
            }
            Presentation::Error(message) => {
                let color = ui.visuals().error_fg_color;
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.colored_label(color, message);
                });
            }
            Presentation::NoResults => {
                ui.weak(NO_RESULTS);
            }
            Presentation::Results { heading, cards } => {
                ui.heading(heading);
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        for card in &cards {
                            show_card(ui, card);
                            ui.add_space(6.0);
                        }
                    });
            }
        }
    }
}

fn show_card(ui: &mut egui::Ui, card: &ResultCard) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(&card.heading).strong().size(16.0));
        if let Some(score) = &card.score_line {
            ui.colored_label(SCORE_COLOR, score);
        }
        if let Some(role) = &card.role_line {
            ui.label(role);
        }
        if let Some(goal) = &card.goal_line {
            ui.label(goal);
        }
        ui.label(&card.body);
        if let Some(rationale) = &card.rationale_line {
            ui.label(egui::RichText::new(rationale).italics());
        }
    });
}

impl eframe::App for StorySearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("Healthcare User Story Retrieval");
            ui.weak("Hybrid vector + BM25 search");
            ui.add_space(6.0);
        });
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.small(&self.status);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_search_form(ui);
            ui.separator();
            self.show_results(ui);
        });

        // Settlements arrive from the worker thread without waking egui.
        if self.controller.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

// src/app.rs
use eframe::egui;

use crate::state::{AppState, Mode};

pub struct DealDeskApp {
    state: AppState,
}

impl DealDeskApp {
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.heading("Deal Desk");
        ui.add_space(4.0);

        // Mode toggle: two mutually exclusive forms.
        ui.horizontal(|ui| {
            let modes = [
                (Mode::Analysis, "Investment Analysis"),
                (Mode::DealNotes, "Deal Notes"),
            ];
            for (mode, label) in modes {
                if ui.selectable_label(self.state.mode == mode, label).clicked() {
                    self.state.mode = mode;
                }
            }
        });

        ui.label(self.state.mode.subtitle());
        ui.add_space(4.0);
    }
}

impl eframe::App for DealDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.analysis.poll_events();
        self.state.notes.poll_events();
        if self.state.any_run_live() {
            // Keep draining worker events even without user input.
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_header(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source("main_scroll")
                .show(ui, |ui| {
                    match self.state.mode {
                        Mode::Analysis => {
                            crate::ui::analysis::show_analysis_view(ui, &mut self.state);
                        }
                        Mode::DealNotes => {
                            crate::ui::deal_notes::show_deal_notes_view(ui, &mut self.state);
                        }
                    }
                });
        });

        // Show error modal if needed
        let error_msg = self.state.error_message.clone(); // Clone first
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }
    }
}

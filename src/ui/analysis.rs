// src/ui/analysis.rs
use eframe::egui;
use rfd::FileDialog;

use crate::state::{analysis_state, AnalysisCard, AppState};
use crate::ui::cards;
use crate::upload::{self, SelectedFile};

pub fn show_analysis_view(ui: &mut egui::Ui, state: &mut AppState) {
    show_file_rows(ui, state);
    ui.add_space(8.0);

    if ui.button(state.analysis.add_button_label()).clicked() {
        state.analysis.add_row();
    }

    ui.add_space(8.0);
    let label = if state.analysis.running {
        analysis_state::ANALYZING_LABEL
    } else {
        analysis_state::ANALYZE_LABEL
    };
    let enabled = state.analysis.can_submit() && !state.analysis.running;
    if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
        submit(state);
    }

    if state.analysis.results_open {
        show_results(ui, state);
    }
}

fn show_file_rows(ui: &mut egui::Ui, state: &mut AppState) {
    let mut removed = None;
    let mut pick_error = None;

    for (index, row) in state.analysis.rows.iter_mut().enumerate() {
        ui.horizontal(|ui| {
            if ui.button("Choose File...").clicked() {
                let dialog = FileDialog::new()
                    .add_filter("Documents", &["txt", "pdf"])
                    .set_title("Choose Pitch Deck");
                if let Some(path) = dialog.pick_file() {
                    match SelectedFile::from_path(path) {
                        Ok(file) => row.file = Some(file),
                        Err(e) => pick_error = Some(e.to_string()),
                    }
                }
            }

            if ui.button("➖ Remove").clicked() {
                removed = Some(index);
            }

            match &row.file {
                Some(file) => ui.label(format!("📄 {} ({})", file.name, file.size_kb())),
                None => ui.label(egui::RichText::new("No file selected").weak()),
            };
        });
        ui.add_space(4.0);
    }

    if let Some(index) = removed {
        state.analysis.remove_row(index);
    }
    if let Some(message) = pick_error {
        state.error_message = Some(message);
    }
}

fn submit(state: &mut AppState) {
    let files = state.analysis.staged_files();
    // Empty selection: silently no-op, matching the gated button.
    if files.is_empty() {
        return;
    }
    let events = upload::spawn_analysis_run(state.client.clone(), files);
    state.analysis.begin_run(events);
}

fn show_results(ui: &mut egui::Ui, state: &mut AppState) {
    ui.add_space(16.0);
    ui.separator();
    ui.heading("Results");
    ui.add_space(8.0);

    if state.analysis.running {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(analysis_state::ANALYZING_LABEL);
        });
        ui.add_space(8.0);
    }

    for (index, card) in state.analysis.cards.iter().enumerate() {
        match card {
            AnalysisCard::Report { filename, report } => {
                cards::analysis_report_card(ui, index, filename, report);
            }
            AnalysisCard::Error { title, message } => {
                cards::error_card(ui, title, message);
            }
        }
        ui.add_space(8.0);
    }

    if state.analysis.finished() && ui.button("Analyze Another").clicked() {
        state.analysis.reset();
    }
}

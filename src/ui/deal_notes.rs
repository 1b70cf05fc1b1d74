// src/ui/deal_notes.rs
use std::path::PathBuf;

use eframe::egui;
use rfd::FileDialog;

use crate::state::{notes_state, AppState, NotesCard};
use crate::ui::cards;
use crate::upload::{self, SelectedFile};

pub fn show_deal_notes_view(ui: &mut egui::Ui, state: &mut AppState) {
    show_drop_zone(ui, state);
    show_selected_files(ui, state);

    ui.add_space(8.0);
    let label = if state.notes.running {
        notes_state::GENERATING_LABEL
    } else {
        notes_state::GENERATE_LABEL
    };
    let enabled = state.notes.can_submit() && !state.notes.running;
    if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
        submit(state);
    }

    if state.notes.results_open {
        show_results(ui, state);
    }
}

fn show_drop_zone(ui: &mut egui::Ui, state: &mut AppState) {
    let stroke = if state.notes.drag_active {
        egui::Stroke::new(2.0, cards::ACCENT)
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke
    };

    let mut picked_paths: Option<Vec<PathBuf>> = None;
    let response = egui::Frame::group(ui.style())
        .stroke(stroke)
        .inner_margin(egui::Margin::symmetric(16.0, 24.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label("📄 Drag & drop files here");
                ui.label(egui::RichText::new("or").weak());
                if ui.button("Browse Files...").clicked() {
                    picked_paths = FileDialog::new().set_title("Choose Documents").pick_files();
                }
            });
        })
        .response;

    if let Some(paths) = picked_paths {
        apply_paths(state, paths);
    }

    // Highlight while files are dragged over the zone, cleared on leave.
    let zone = response.rect;
    let hover_pos = ui.input(|i| i.pointer.hover_pos());
    let over_zone = hover_pos.map_or(false, |pos| zone.contains(pos));
    let dragging_files = ui.input(|i| !i.raw.hovered_files.is_empty());
    state.notes.drag_active = dragging_files && over_zone;

    // A drop on the zone replaces the selection.
    if over_zone {
        let dropped = ui.input(|i| i.raw.dropped_files.clone());
        if !dropped.is_empty() {
            let paths = dropped.into_iter().filter_map(|f| f.path).collect();
            apply_paths(state, paths);
        }
    }
}

fn apply_paths(state: &mut AppState, paths: Vec<PathBuf>) {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match SelectedFile::from_path(path) {
            Ok(file) => files.push(file),
            Err(e) => {
                state.error_message = Some(e.to_string());
                return;
            }
        }
    }
    state.notes.set_files(files);
}

fn show_selected_files(ui: &mut egui::Ui, state: &AppState) {
    if state.notes.files.is_empty() {
        return;
    }
    ui.add_space(8.0);
    ui.label(egui::RichText::new("Selected Files:").strong());
    for file in &state.notes.files {
        ui.label(format!("📄 {} ({})", file.name, file.size_kb()));
    }
}

fn submit(state: &mut AppState) {
    // Empty selection: silently no-op, matching the gated button.
    if !state.notes.can_submit() {
        return;
    }
    let events = upload::spawn_deal_notes_run(state.client.clone(), state.notes.files.clone());
    state.notes.begin_run(events);
}

fn show_results(ui: &mut egui::Ui, state: &mut AppState) {
    ui.add_space(16.0);
    ui.separator();
    ui.heading("Deal Notes");
    ui.add_space(8.0);

    if state.notes.running {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(notes_state::GENERATING_LABEL);
        });
        ui.add_space(8.0);
    }

    match &state.notes.card {
        Some(NotesCard::Report(notes)) => cards::deal_notes_card(ui, notes),
        Some(NotesCard::Error { title, message }) => cards::error_card(ui, title, message),
        None => {}
    }

    if state.notes.finished() {
        ui.add_space(8.0);
        if ui.button("Generate Another").clicked() {
            state.notes.reset();
        }
    }
}

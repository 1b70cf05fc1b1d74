// src/ui/cards.rs
use std::f64::consts::TAU;

use eframe::egui;

use crate::report::analysis::{RADAR_AXES, RISK_CATEGORIES};
use crate::report::{AnalysisReport, DealNotesReport};

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(102, 126, 234);
const BUBBLE: egui::Color32 = egui::Color32::from_rgb(118, 75, 162);
const ERROR_BADGE: egui::Color32 = egui::Color32::from_rgb(244, 67, 54);

/// Full report card for one analyzed document.
pub fn analysis_report_card(
    ui: &mut egui::Ui,
    index: usize,
    filename: &str,
    report: &AnalysisReport,
) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        card_header(ui, filename, &report.status_text(), ACCENT);
        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("Rationale:").strong());
            ui.label(report.rationale());
        });

        ui.add_space(8.0);
        risk_dashboard(ui, report);
        ui.add_space(8.0);
        radar_chart(ui, index, report);
        ui.add_space(8.0);
        bubble_chart(ui, index, report);
        ui.add_space(8.0);
        raw_data_section(ui, index, report);
    });
}

/// Consolidated notes card for one deal-notes run.
pub fn deal_notes_card(ui: &mut egui::Ui, notes: &DealNotesReport) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        card_header(ui, "Consolidated Deal Notes", "Generated", ACCENT);
        for (heading, body) in notes.sections() {
            ui.add_space(6.0);
            ui.label(egui::RichText::new(heading).strong());
            ui.label(body);
        }
    });
}

pub fn error_card(ui: &mut egui::Ui, title: &str, message: &str) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        card_header(ui, title, "Error", ERROR_BADGE);
        ui.add_space(4.0);
        ui.label("Failed to process.");
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("Error:").strong());
            ui.label(message);
        });
    });
}

fn card_header(ui: &mut egui::Ui, title: &str, status: &str, badge_fill: egui::Color32) {
    ui.horizontal(|ui| {
        ui.heading(title);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            badge(ui, status, badge_fill);
        });
    });
}

fn badge(ui: &mut egui::Ui, text: &str, fill: egui::Color32) {
    egui::Frame::none()
        .fill(fill)
        .rounding(12.0)
        .inner_margin(egui::Margin::symmetric(10.0, 4.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(egui::Color32::WHITE).strong());
        });
}

fn risk_dashboard(ui: &mut egui::Ui, report: &AnalysisReport) {
    ui.label(egui::RichText::new("Risk Flag Dashboard").strong());
    ui.add_space(4.0);
    ui.horizontal_wrapped(|ui| {
        for category in RISK_CATEGORIES {
            let level = report.risk_level(category);
            let fill = risk_color(&level);
            egui::Frame::none()
                .fill(fill)
                .rounding(4.0)
                .inner_margin(egui::Margin::symmetric(8.0, 4.0))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(format!("{}: {}", category, level))
                            .color(egui::Color32::WHITE)
                            .strong(),
                    );
                });
        }
    });
}

fn risk_color(level: &str) -> egui::Color32 {
    match level {
        "HIGH" => egui::Color32::from_rgb(211, 47, 47),
        "MEDIUM" => egui::Color32::from_rgb(245, 124, 0),
        "LOW" => egui::Color32::from_rgb(56, 142, 60),
        _ => egui::Color32::GRAY,
    }
}

// Point on radar axis `index` at distance `r` from the center. Axis 0
// points straight up, the rest follow clockwise.
fn radar_point(index: usize, r: f64) -> [f64; 2] {
    let angle = TAU / 4.0 - index as f64 * TAU / RADAR_AXES.len() as f64;
    [r * angle.cos(), r * angle.sin()]
}

fn radar_chart(ui: &mut egui::Ui, index: usize, report: &AnalysisReport) {
    ui.label(egui::RichText::new("Startup Score (out of 5)").strong());
    let scores = report.radar_scores();
    let grid_color = egui::Color32::from_gray(90);

    let plot = egui_plot::Plot::new(format!("radar_chart_{index}"))
        .height(240.0)
        .data_aspect(1.0)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_background(false)
        .show_axes([false, false])
        .include_x(-7.5)
        .include_x(7.5)
        .include_y(-7.0)
        .include_y(7.0);

    plot.show(ui, |plot_ui| {
        // Concentric reference rings at scores 1..=5.
        for ring in 1..=5 {
            let mut points: Vec<[f64; 2]> = (0..RADAR_AXES.len())
                .map(|i| radar_point(i, ring as f64))
                .collect();
            points.push(points[0]);
            plot_ui.line(egui_plot::Line::new(points).color(grid_color).width(0.5));
        }

        // Axis spokes with labels just outside the outer ring.
        for (i, axis) in RADAR_AXES.iter().enumerate() {
            plot_ui.line(
                egui_plot::Line::new(vec![[0.0, 0.0], radar_point(i, 5.0)])
                    .color(grid_color)
                    .width(0.5),
            );
            let [x, y] = radar_point(i, 6.2);
            plot_ui.text(egui_plot::Text::new(
                egui_plot::PlotPoint::new(x, y),
                egui::RichText::new(*axis).strong(),
            ));
        }

        // The score outline itself, closed back to the first vertex.
        let mut vertices: Vec<[f64; 2]> = scores
            .iter()
            .enumerate()
            .map(|(i, score)| radar_point(i, *score))
            .collect();
        vertices.push(vertices[0]);
        plot_ui.line(egui_plot::Line::new(vertices).color(ACCENT).width(2.0));

        // Score markers at each vertex.
        let markers: Vec<[f64; 2]> = scores
            .iter()
            .enumerate()
            .map(|(i, score)| radar_point(i, *score))
            .collect();
        plot_ui.points(
            egui_plot::Points::new(markers)
                .radius(3.0)
                .shape(egui_plot::MarkerShape::Circle)
                .color(ACCENT),
        );
    });
}

fn bubble_chart(ui: &mut egui::Ui, index: usize, report: &AnalysisReport) {
    ui.label(egui::RichText::new("Benchmark: Market Size vs. LTV/CAC Ratio").strong());
    let point = report.bubble_point();
    // Logarithmic x axis: plot log10(TAM), pinning non-positive values to 0.
    let x = if point.tam > 0.0 { point.tam.log10() } else { 0.0 };
    let y = point.ltv_cac;
    let name = report
        .company_name
        .clone()
        .unwrap_or_else(|| "This Startup".to_string());

    let plot = egui_plot::Plot::new(format!("bubble_chart_{index}"))
        .height(200.0)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .include_x(x - 1.0)
        .include_x(x + 1.0)
        .include_y(0.0)
        .include_y(y.abs() * 1.2 + 1.0);

    plot.show(ui, |plot_ui| {
        plot_ui.points(
            egui_plot::Points::new(vec![[x, y]])
                .radius((point.radius / 5.0).max(2.0) as f32)
                .shape(egui_plot::MarkerShape::Circle)
                .color(egui::Color32::from_rgba_unmultiplied(
                    BUBBLE.r(),
                    BUBBLE.g(),
                    BUBBLE.b(),
                    180,
                ))
                .name(name),
        );
    });
    ui.small("X: Total Addressable Market (TAM), log10 scale. Y: LTV/CAC ratio.");
}

fn raw_data_section(ui: &mut egui::Ui, index: usize, report: &AnalysisReport) {
    egui::CollapsingHeader::new("Show/Hide Raw Data")
        .id_source(format!("raw_data_{index}"))
        .default_open(false)
        .show(ui, |ui| {
            ui.label(egui::RichText::new("Metrics:").strong());
            for (label, value) in report.raw_data_rows() {
                ui.label(format!("• {}: {}", label, value));
            }
            ui.add_space(4.0);
            ui.label(egui::RichText::new("Team:").strong());
            ui.label(report.team_background());
            ui.add_space(4.0);
            ui.label(egui::RichText::new("Public Data:").strong());
            ui.label(report.public_data_summary());
            ui.add_space(4.0);
            ui.label(egui::RichText::new("Benchmark:").strong());
            ui.label(report.benchmark_summary());
        });
}

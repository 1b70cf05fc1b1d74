// src/main.rs
use anyhow::Result;
use eframe::egui;

mod app;
mod report;
mod state;
mod ui;
mod upload;

use app::DealDeskApp;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("Deal Desk"),
        ..Default::default()
    };

    eframe::run_native(
        "Deal Desk",
        options,
        Box::new(|_cc| Box::new(DealDeskApp::new())),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}

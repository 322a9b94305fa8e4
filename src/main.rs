// src/main.rs
use anyhow::Result;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod app;
mod backend;
mod chat;
mod config;
mod error;
mod report;
mod speech;
mod state;
mod ui;

use app::SmeVisionApp;
use config::Settings;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load()?;
    tracing::info!(backend_url = %settings.backend_url, "starting SME Vision dashboard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("SME Vision"),
        ..Default::default()
    };

    eframe::run_native(
        "SME Vision",
        options,
        Box::new(move |_cc| Box::new(SmeVisionApp::new(settings))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}

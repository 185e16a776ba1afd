// src/main.rs
use std::sync::Arc;
use eframe::egui;
use anyhow::{Context, Result};
use log::info;

mod analysis;
mod api;
mod app;
mod config;
mod file;
mod state;
mod ui;
mod utils;

use api::ApiClient;
use app::SherlockApp;
use config::Settings;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load()?;
    info!("Using analysis backend at {}", settings.api_url);

    let client = ApiClient::new(&settings).context("Failed to create HTTP client")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("SherlockLogs"),
        ..Default::default()
    };

    eframe::run_native(
        "SherlockLogs",
        options,
        Box::new(move |cc| {
            Box::new(SherlockApp::new(cc, settings, Arc::new(client)))
        }),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}

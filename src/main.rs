// Application entry point for the RAID Controller Dashboard

// Backend contract and HTTP client
mod api;
// Command line and environment settings
mod config;
// Controller logic: fetchers, renderers, commands, polling
mod dashboard;
// Process level errors
mod error;
// Desktop window
mod gui;
// Wire data models
mod models;
// Headless text rendering
mod snapshot;
// Background request execution
mod worker;

use api::{Backend, HttpBackend};
use clap::Parser;
use config::Config;
use error::AppError;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Entry point for the application.
/// Reads configuration, sets up logging, then either prints a snapshot or opens the window.
fn main() -> Result<(), AppError> {
    let config = Config::parse();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let http = HttpBackend::new(&config.url)?;
    info!(url = http.base_url(), "using controller backend");
    let backend: Arc<dyn Backend> = Arc::new(http);

    if config.snapshot {
        print!("{}", snapshot::capture(backend));
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    let url = config.url.clone();
    eframe::run_native(
        "RAID Controller Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(gui::AppState::new(cc, backend, url)))),
    )?;
    Ok(())
}

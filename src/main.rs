#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use shiftboard::config::Config;
use shiftboard::ui;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shiftboard=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

fn main() -> eframe::Result<()> {
    init_logging();

    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "falling back to default settings");
        Config::default()
    });
    info!(worker_id = %config.worker_id, "starting shift planner");

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1100.0, 760.0])
        .with_min_inner_size([820.0, 600.0])
        .with_title("Shiftboard");

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Shiftboard",
        options,
        Box::new(|cc| Ok(Box::new(ui::PlannerApp::new(cc, config)?))),
    )
}

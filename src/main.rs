mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;
mod view_model;

use anyhow::Context;
use app::AvocadoApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // The dashboard never starts on a partial or empty table.
    let store = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    log::info!(
        "Loaded {} records from {} ({} regions, {} types)",
        store.len(),
        config.data_path.display(),
        store.distinct_regions().len(),
        store.distinct_types().len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.window_title.clone();
    let state = AppState::new(store, config);

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(AvocadoApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

mod app;
mod cli;
mod color;
mod data;
mod error;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use app::LaunchDashApp;
use clap::Parser;
use eframe::egui;

use cli::Args;
use data::aggregate::SiteSelection;
use state::AppState;

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    // An unreadable or schema-mismatched dataset is fatal: no window opens.
    let dataset = data::loader::load_file(&args.data)
        .with_context(|| format!("cannot start without launch data from {}", args.data.display()))?;
    log::info!(
        "Loaded {} launch records from {} ({} sites, payload {}..={} kg)",
        dataset.len(),
        args.data.display(),
        dataset.sites().len(),
        dataset.payload_bounds().min,
        dataset.payload_bounds().max
    );

    let initial_site = SiteSelection::parse(&dataset, &args.site)?;

    let mut state = AppState::new(Arc::new(dataset)).context("computing initial charts")?;
    state.on_site_selected(initial_site);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}

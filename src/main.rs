mod analysis;
mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use analysis::report::DashboardReport;
use app::DashboardApp;
use config::Args;
use data::filter::DateRange;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.summary {
        return print_summary(&args);
    }

    let mut state = AppState::new(args.data.clone(), args.poor_label.clone());
    state.load(&args.data);
    state.set_range(args.start, args.end);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Air Quality Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}

/// Headless mode: compute the report once and write it to stdout as JSON.
fn print_summary(args: &Args) -> Result<()> {
    let dataset = data::cache::load_cached(&args.data)?;
    let full = DateRange::covering(&dataset)
        .with_context(|| format!("{} contains no observations", args.data.display()))?;
    let range = DateRange::new(args.start.unwrap_or(full.start), args.end.unwrap_or(full.end));

    let report = DashboardReport::compute(&dataset, range, &args.poor_label);
    if let Some(peak) = report.hourly.peak {
        log::info!("Peak hour {} with level {:.2}", peak.hour, peak.level);
    }
    let json = serde_json::to_string_pretty(&report).context("serializing report")?;
    println!("{json}");
    Ok(())
}

use eframe::egui::{RichText, ScrollArea, Ui};

use super::{plot, tables};
use crate::analysis::scatter::SCATTER_VIEWS;
use crate::analysis::weather_impact::INTERPRETATION;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – every view, top to bottom
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let (Some(dataset), Some(report)) = (&state.dataset, &state.report) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file to view the dashboard  (File → Open…)");
        });
        return;
    };
    let rows = report.rows(dataset);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Air Quality and Weather Conditions Analysis");
            ui.add_space(8.0);

            ui.heading("Dataset Overview");
            tables::overview_table(ui, &report.overview);
            ui.add_space(12.0);

            ui.heading("Correlation Analysis");
            ui.label("Correlation Matrix");
            tables::correlation_table(ui, &report.correlation);
            ui.add_space(8.0);
            ui.label("Heatmap of Correlation");
            plot::correlation_heatmap(ui, &report.correlation);
            ui.add_space(12.0);

            ui.heading("Scatterplots");
            ui.columns(SCATTER_VIEWS.len(), |cols: &mut [Ui]| {
                for (col, &(x, y)) in cols.iter_mut().zip(&SCATTER_VIEWS) {
                    col.label(format!("{} vs {}", y.label(), x.label()));
                    plot::scatterplot(col, &rows, x, y);
                }
            });
            ui.add_space(12.0);

            ui.heading("Seasonal Trends Analysis");
            plot::seasonal_chart(ui, &report.monthly);
            ui.add_space(12.0);

            ui.heading("Peak Hour Analysis");
            plot::peak_hour_chart(ui, &report.hourly);
            match report.hourly.peak {
                Some(peak) => {
                    ui.label(format!("The peak hour for pollution is: {}", peak.hour));
                    ui.label(format!("The pollution level at this time is: {}", peak.level));
                }
                None => {
                    ui.label("No observations in the selected range.");
                }
            }
            ui.add_space(12.0);

            ui.heading("Weather Conditions and Air Quality Prediction");
            ui.label("Correlation between Weather Features and Air Quality:");
            for c in &report.weather_impact.correlations {
                ui.monospace(format!("{:<6} {:>9.6}", c.feature.label(), c.correlation));
            }
            plot::weather_impact_chart(ui, &report.weather_impact);
            ui.add_space(8.0);

            ui.label(
                RichText::new("Interpretation of Weather Conditions Impact on Air Quality:")
                    .strong()
                    .size(16.0),
            );
            for (title, text) in INTERPRETATION {
                ui.horizontal_wrapped(|ui: &mut Ui| {
                    ui.label(RichText::new(format!("• {title}:")).strong());
                    ui.label(text);
                });
            }
        });
}

use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analysis::correlation::CorrelationMatrix;
use crate::data::model::{Observation, Pollutant, Weather};

const ROW_HEIGHT: f32 = 18.0;

/// First rows of the filtered subset.
pub fn overview_table(ui: &mut Ui, rows: &[Observation]) {
    let show_station = rows.iter().any(|obs| obs.station.is_some());

    let mut headers: Vec<&str> = vec!["date"];
    if show_station {
        headers.push("station");
    }
    headers.extend(Pollutant::ALL.iter().map(|p| p.label()));
    headers.extend(Weather::ALL.iter().map(|w| w.label()));
    headers.push("Air Quality");

    ui.push_id("overview_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(48.0), headers.len())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for h in &headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*h);
                    });
                }
            })
            .body(|mut body| {
                for obs in rows {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(obs.timestamp.format("%Y-%m-%d %H:%M").to_string());
                        });
                        if show_station {
                            row.col(|ui: &mut Ui| {
                                ui.label(obs.station.as_deref().unwrap_or(""));
                            });
                        }
                        for p in Pollutant::ALL {
                            row.col(|ui: &mut Ui| {
                                ui.label(format!("{:.1}", obs.pollutant(p)));
                            });
                        }
                        for w in Weather::ALL {
                            row.col(|ui: &mut Ui| {
                                ui.label(format!("{:.1}", obs.weather(w)));
                            });
                        }
                        row.col(|ui: &mut Ui| {
                            ui.label(&obs.air_quality);
                        });
                    });
                }
            });
    });
}

/// Numeric correlation matrix with variable names on both axes.
pub fn correlation_table(ui: &mut Ui, matrix: &CorrelationMatrix) {
    ui.push_id("correlation_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(56.0), matrix.size() + 1)
            .header(ROW_HEIGHT + 2.0, |mut header| {
                header.col(|_ui: &mut Ui| {});
                for v in &matrix.variables {
                    header.col(|ui: &mut Ui| {
                        ui.strong(v.label());
                    });
                }
            })
            .body(|mut body| {
                for (i, v) in matrix.variables.iter().enumerate() {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.strong(v.label());
                        });
                        for j in 0..matrix.size() {
                            row.col(|ui: &mut Ui| {
                                ui.label(format!("{:.3}", matrix.get(i, j)));
                            });
                        }
                    });
                }
            });
    });
}

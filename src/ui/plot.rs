use eframe::egui::{self, Align2, Color32, FontId, Sense, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::analysis::correlation::CorrelationMatrix;
use crate::analysis::peak_hour::HourlyProfile;
use crate::analysis::scatter::scatter_points;
use crate::analysis::seasonal::{MonthlyAverage, YearMonth};
use crate::analysis::weather_impact::WeatherImpact;
use crate::color::{coolwarm, coolwarm_text, generate_palette};
use crate::data::model::{Observation, Pollutant, Weather};

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Annotated grid of coloured cells, one per matrix entry.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let n = matrix.size();
    if n == 0 {
        return;
    }
    let label_width = 56.0;
    let cell = ((ui.available_width() - label_width) / n as f32).clamp(28.0, 64.0);
    let size = egui::vec2(label_width + cell * n as f32, label_width + cell * n as f32);

    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min + egui::vec2(label_width, label_width);
    let font = FontId::proportional(11.0);
    let text_color = ui.visuals().text_color();

    for (i, var) in matrix.variables.iter().enumerate() {
        let offset = cell * (i as f32 + 0.5);
        painter.text(
            egui::pos2(origin.x - 4.0, origin.y + offset),
            Align2::RIGHT_CENTER,
            var.label(),
            font.clone(),
            text_color,
        );
        painter.text(
            egui::pos2(origin.x + offset, origin.y - 4.0),
            Align2::CENTER_BOTTOM,
            var.label(),
            font.clone(),
            text_color,
        );
    }

    for i in 0..n {
        for j in 0..n {
            let value = matrix.get(i, j);
            let min = origin + egui::vec2(cell * j as f32, cell * i as f32);
            let rect = egui::Rect::from_min_size(min, egui::vec2(cell, cell)).shrink(0.5);
            painter.rect_filled(rect, 0.0, coolwarm(value));
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                format!("{value:.2}"),
                font.clone(),
                coolwarm_text(value),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Scatterplots
// ---------------------------------------------------------------------------

pub fn scatterplot(ui: &mut Ui, rows: &[&Observation], x: Weather, y: Pollutant) {
    let points = scatter_points(rows, x, y);
    Plot::new(format!("scatter_{}_{}", y.label(), x.label()))
        .height(CHART_HEIGHT)
        .x_axis_label(x.label())
        .y_axis_label(y.label())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .radius(1.5)
                    .color(Color32::LIGHT_BLUE)
                    .name(format!("{} vs {}", y.label(), x.label())),
            );
        });
}

// ---------------------------------------------------------------------------
// Seasonal trends
// ---------------------------------------------------------------------------

/// One line per pollutant across the monthly buckets.
pub fn seasonal_chart(ui: &mut Ui, monthly: &[MonthlyAverage]) {
    let colors = generate_palette(Pollutant::ALL.len());

    Plot::new("seasonal_trends")
        .height(CHART_HEIGHT + 40.0)
        .legend(Legend::default().position(egui_plot::Corner::RightTop))
        .x_axis_label("Month")
        .y_axis_label("Average Concentration")
        .x_axis_formatter(|mark: GridMark, _range| month_label(mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (p, color) in Pollutant::ALL.iter().zip(&colors) {
                let points: PlotPoints = monthly
                    .iter()
                    .map(|m| [m.month.ordinal() as f64, m.mean_of(*p)])
                    .filter(|[_, y]| !y.is_nan())
                    .collect();
                plot_ui.line(Line::new(points).name(p.label()).color(*color).width(1.5));
            }
        });
}

fn month_label(value: f64) -> String {
    if value.fract().abs() > f64::EPSILON {
        return String::new();
    }
    YearMonth::from_ordinal(value as i64).to_string()
}

// ---------------------------------------------------------------------------
// Peak hour
// ---------------------------------------------------------------------------

/// Hourly pollution line with the peak hour highlighted.
pub fn peak_hour_chart(ui: &mut Ui, profile: &HourlyProfile) {
    Plot::new("peak_hour")
        .height(CHART_HEIGHT)
        .legend(Legend::default().position(egui_plot::Corner::RightTop))
        .x_axis_label("Hour of Day")
        .y_axis_label("Sum of Pollution Levels")
        .include_x(0.0)
        .include_x(23.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let points: PlotPoints = profile
                .levels
                .iter()
                .map(|l| [l.hour as f64, l.level])
                .collect();
            plot_ui.line(Line::new(points).name("Pollution").color(Color32::LIGHT_BLUE).width(1.5));

            if let Some(peak) = profile.peak {
                plot_ui.points(
                    Points::new(vec![[peak.hour as f64, peak.level]])
                        .radius(5.0)
                        .color(Color32::RED)
                        .name(format!("Peak Hour: {}", peak.hour)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Weather impact
// ---------------------------------------------------------------------------

/// One bar per weather feature, coloured by correlation sign and strength.
pub fn weather_impact_chart(ui: &mut Ui, impact: &WeatherImpact) {
    let bars: Vec<Bar> = impact
        .correlations
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let height = if c.correlation.is_nan() { 0.0 } else { c.correlation };
            Bar::new(i as f64, height)
                .name(c.feature.label())
                .fill(coolwarm(c.correlation))
                .width(0.6)
        })
        .collect();

    let poor = impact.poor_label.clone();
    Plot::new("weather_impact")
        .height(CHART_HEIGHT)
        .x_axis_label("Weather Features")
        .y_axis_label(format!("Correlation with Air Quality ({poor}=1)"))
        .x_axis_formatter(|mark: GridMark, _range| feature_label(mark.value))
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Correlation"));
        });
}

fn feature_label(value: f64) -> String {
    if value.fract().abs() > f64::EPSILON || value < 0.0 {
        return String::new();
    }
    Weather::ALL
        .get(value as usize)
        .map(|w| w.label().to_string())
        .unwrap_or_default()
}

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color::series_colors;
use crate::view_model::{ChartKind, ChartSpec, Orientation, XValue};

const DEFAULT_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Chart card
// ---------------------------------------------------------------------------

/// Render one chart specification as a titled card.
pub fn chart_card(ui: &mut Ui, id: &str, chart: &ChartSpec) {
    let height = chart.style.height.unwrap_or(DEFAULT_HEIGHT);

    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.label(RichText::new(chart.style.title).strong().size(16.0));

        if chart.is_empty() {
            ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.weak("No data for this selection");
                });
            });
            return;
        }

        match chart.kind {
            ChartKind::Line => line_chart(ui, id, chart, height),
            ChartKind::Bar => bar_chart(ui, id, chart, height),
            ChartKind::Scatter => scatter_chart(ui, id, chart, height),
        }
    });
}

/// Fixed-range plot: the dashboard charts are not meant to be panned.
fn base_plot(id: &str, chart: &ChartSpec, height: f32) -> Plot<'static> {
    Plot::new(id.to_string())
        .height(height)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_label(chart.style.x_title.unwrap_or_default())
        .y_axis_label(chart.style.y_title.unwrap_or_default())
}

fn money_formatter(prefix: Option<&'static str>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| match prefix {
        Some(p) => format!("{p}{:.2}", mark.value),
        None => format!("{}", mark.value),
    }
}

// ---------------------------------------------------------------------------
// Line (time series)
// ---------------------------------------------------------------------------

fn date_to_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

fn line_chart(ui: &mut Ui, id: &str, chart: &ChartSpec, height: f32) {
    let points: PlotPoints = chart
        .points
        .iter()
        .filter_map(|p| match p.x {
            XValue::Date(d) => Some([date_to_x(d), p.y]),
            _ => None,
        })
        .collect();
    let color = series_colors(&chart.style.colors, 1)[0];
    let prefix = chart.style.value_prefix;

    base_plot(id, chart, height)
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            x_to_date(mark.value)
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_default()
        })
        .y_axis_formatter(money_formatter(prefix))
        .label_formatter(move |_name: &str, value: &PlotPoint| {
            let date = x_to_date(value.x)
                .map(|d| d.to_string())
                .unwrap_or_default();
            format!("{date}\n{}{:.2}", prefix.unwrap_or(""), value.y)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(color).width(2.0));
        });
}

// ---------------------------------------------------------------------------
// Bar (categories)
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, id: &str, chart: &ChartSpec, height: f32) {
    let n = chart.points.len();
    let colors = series_colors(&chart.style.colors, n);
    let reversed = chart.style.reversed_categories;
    // Position of the i-th category along the category axis.
    let slot = move |i: usize| -> f64 {
        if reversed {
            (n - 1 - i) as f64
        } else {
            i as f64
        }
    };

    let names: Vec<String> = chart
        .points
        .iter()
        .map(|p| match &p.x {
            XValue::Category(c) => c.clone(),
            XValue::Date(d) => d.to_string(),
            XValue::Number(v) => v.to_string(),
        })
        .collect();

    let bars: Vec<Bar> = chart
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Bar::new(slot(i), p.y)
                .name(&names[i])
                .fill(colors[i])
                .width(0.7)
        })
        .collect();

    let horizontal = chart.style.orientation == Orientation::Horizontal;
    let mut bar_chart = BarChart::new(bars);
    if horizontal {
        bar_chart = bar_chart.horizontal();
    }

    let category_names = names;
    let category_axis = move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
            return String::new();
        }
        let i = idx as usize;
        if i >= n {
            return String::new();
        }
        let i = if reversed { n - 1 - i } else { i };
        category_names[i].clone()
    };
    let prefix = chart.style.value_prefix;

    let mut plot = base_plot(id, chart, height);
    plot = if horizontal {
        plot.y_axis_formatter(category_axis)
            .x_axis_formatter(money_formatter(prefix))
            .y_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
    } else {
        plot.x_axis_formatter(category_axis)
            .y_axis_formatter(money_formatter(prefix))
            .x_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
    };

    let labels: Vec<(f64, f64, String)> = chart
        .points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.label.clone().map(|l| (slot(i), p.y, l)))
        .collect();

    plot.show(ui, |plot_ui| {
        plot_ui.bar_chart(bar_chart);
        for (pos, value, label) in labels {
            let at = if horizontal {
                PlotPoint::new(value / 2.0, pos)
            } else {
                PlotPoint::new(pos, value / 2.0)
            };
            plot_ui.text(Text::new(at, RichText::new(label).color(Color32::BLACK)));
        }
    });
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

fn scatter_chart(ui: &mut Ui, id: &str, chart: &ChartSpec, height: f32) {
    let points: PlotPoints = chart
        .points
        .iter()
        .filter_map(|p| match p.x {
            XValue::Number(x) => Some([x, p.y]),
            _ => None,
        })
        .collect();
    let opacity = chart.style.opacity.unwrap_or(1.0);
    let color = series_colors(&chart.style.colors, 1)[0].gamma_multiply(opacity);
    let radius = chart.style.marker_size.unwrap_or(6.0) / 2.0;

    base_plot(id, chart, height).show(ui, |plot_ui| {
        plot_ui.points(Points::new(points).radius(radius).color(color));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_axis_round_trips() {
        let d = NaiveDate::from_ymd_opt(2016, 7, 3).unwrap();
        assert_eq!(x_to_date(date_to_x(d)), Some(d));
        assert_eq!(x_to_date(date_to_x(d) + 0.4), Some(d));
    }
}

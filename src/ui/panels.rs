use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;
use crate::ui::plot::chart_card;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Capitalise the first letter for display (`organic` → `Organic`).
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Region ----
    ui.strong("Region");
    let mut region = state.filters.region.clone();
    egui::ComboBox::from_id_salt("region_filter")
        .selected_text(region.as_str())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ScrollArea::vertical()
                .max_height(320.0)
                .show(ui, |ui: &mut Ui| {
                    for r in state.store.distinct_regions() {
                        ui.selectable_value(&mut region, r.clone(), r.as_str());
                    }
                });
        });
    state.set_region(&region);
    ui.add_space(8.0);

    // ---- Type ----
    ui.strong("Type");
    let mut kind = state.filters.kind.clone();
    egui::ComboBox::from_id_salt("type_filter")
        .selected_text(title_case(&kind))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for t in state.store.distinct_types() {
                ui.selectable_value(&mut kind, t.clone(), title_case(t));
            }
        });
    state.set_type(&kind);
    ui.add_space(8.0);

    // ---- Date range ----
    ui.strong("Date Range");
    let (first, last) = state.store.date_range();
    let mut start = state.filters.start;
    let mut end = state.filters.end;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("From");
        ui.add(DatePickerButton::new(&mut start).id_salt("start_date"));
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("To");
        ui.add(DatePickerButton::new(&mut end).id_salt("end_date"));
    });
    state.set_dates(start, end);
    ui.small(format!("Available: {first} to {last}"));

    ui.add_space(8.0);
    if ui.button("Reset filters").clicked() {
        state.reset_filters();
    }
}

// ---------------------------------------------------------------------------
// Central panel – header and the six charts
// ---------------------------------------------------------------------------

/// Plot ids, in [`Dashboard::charts`](crate::view_model::Dashboard::charts) order.
const CHART_IDS: [&str; 6] = [
    "price_chart",
    "volume_chart",
    "top_region_chart",
    "price_by_type",
    "volume_by_year",
    "bags_vs_price",
];

/// Render the dashboard header and chart grid.
pub fn chart_grid(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("Avocado Analytics").size(28.0).strong());
        ui.label(
            "Analyze the behavior of avocado prices and the number \
             of avocados sold in the US between 2015 and 2018",
        );
    });
    ui.add_space(8.0);

    let dash = &state.dashboard;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.columns(2, |cols| {
                for (i, (id, chart)) in CHART_IDS.iter().zip(dash.charts()).enumerate() {
                    chart_card(&mut cols[i % 2], id, chart);
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export charts as JSON…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records loaded, {} matching",
            state.store.len(),
            state.matching
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open avocado sales data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.reload_from(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export charts")
        .set_file_name("dashboard.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_dashboard(&path) {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::title_case;

    #[test]
    fn title_case_capitalises_first_letter() {
        assert_eq!(title_case("organic"), "Organic");
        assert_eq!(title_case("conventional"), "Conventional");
        assert_eq!(title_case(""), "");
    }
}

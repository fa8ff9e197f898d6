use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::aggregate::SiteSelection;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selector controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
///
/// The controls only ever emit values inside the valid domain: the combo box
/// lists known sites, and the sliders are clamped to the payload bounds.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    // ---- Launch site selector ----
    ui.strong("Launch site");
    let options = SiteSelection::options(&state.dataset);
    let mut picked = state.site_selection.clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(picked.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                let label = option.to_string();
                ui.selectable_value(&mut picked, option, label);
            }
        });
    if picked != state.site_selection {
        state.on_site_selected(picked);
    }
    ui.add_space(12.0);

    // ---- Payload range selector ----
    ui.strong("Payload range (kg)");
    let bounds = state.dataset.payload_bounds();
    let mut low = state.payload_range.low();
    let mut high = state.payload_range.high();

    let low_changed = ui
        .add(Slider::new(&mut low, bounds.min..=bounds.max).text("from"))
        .changed();
    let high_changed = ui
        .add(Slider::new(&mut high, bounds.min..=bounds.max).text("to"))
        .changed();

    // Dragging one handle past the other pushes it along.
    if low_changed && low > high {
        high = low;
    }
    if high_changed && high < low {
        low = high;
    }

    if ui.small_button("Reset").clicked() {
        low = bounds.min;
        high = bounds.max;
    }

    let (low, high) = (low.clamp(bounds.min, bounds.max), high.clamp(bounds.min, bounds.max));
    if low != state.payload_range.low() || high != state.payload_range.high() {
        state.on_payload_range_changed(low, high);
    }

    ui.add_space(12.0);
    ui.separator();

    // ---- Booster colour key ----
    ui.strong("Booster Version Category");
    for (category, color) in state.booster_colors.legend_entries() {
        ui.label(RichText::new(format!("● {category}")).color(color));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the dashboard title and record counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(28.0)
                .strong()
                .color(Color32::from_rgb(0x50, 0x3D, 0x36)),
        );
    });

    ui.horizontal(|ui: &mut Ui| {
        let ds = &state.dataset;
        ui.label(format!(
            "{} launches from {} sites, {} in payload range",
            ds.len(),
            ds.sites().len(),
            state.scatter_chart.points().len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::data::aggregate::SiteSelection;
use crate::state::AppState;

const FAILURE_COLOR: Color32 = Color32::from_rgb(214, 69, 65);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(46, 160, 67);

/// Plot polygons must be convex, so wedges are split at this angle.
const MAX_WEDGE: f64 = FRAC_PI_2;
const ARC_STEP: f64 = TAU / 180.0;

// ---------------------------------------------------------------------------
// Proportion (pie) chart
// ---------------------------------------------------------------------------

/// Render the proportion chart for the current site selection.
pub fn pie_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let chart = &state.pie_chart;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(chart.title());
    });

    if chart.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches to show for this selection.");
        });
        return;
    }

    Plot::new("success_pie_chart")
        .legend(Legend::default())
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            // Start at twelve o'clock and go clockwise.
            let mut start = FRAC_PI_2;
            for (idx, slice) in chart.slices().iter().enumerate() {
                let Some(fraction) = chart.fraction(idx) else {
                    continue;
                };
                let sweep = fraction * TAU;
                let color = slice_color(state, &slice.label);
                let name = match &slice.hover {
                    Some(site) => format!("{} ({:.1}%) – {site}", slice.label, fraction * 100.0),
                    None => format!("{} ({:.1}%)", slice.label, fraction * 100.0),
                };

                for points in wedges(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(points))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                }

                if fraction >= 0.03 {
                    let mid = start - sweep / 2.0;
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                            format!("{:.1}%", fraction * 100.0),
                        )
                        .color(Color32::WHITE),
                    );
                }

                start -= sweep;
            }
        });
}

fn slice_color(state: &AppState, label: &str) -> Color32 {
    match state.site_selection {
        SiteSelection::All => state.site_colors.color_for(label),
        SiteSelection::Site(_) => match label {
            "Failure" => FAILURE_COLOR,
            _ => SUCCESS_COLOR,
        },
    }
}

/// Outline of a clockwise pie wedge of `sweep` radians starting at `start`,
/// split into convex pieces no wider than [`MAX_WEDGE`].
fn wedges(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    let pieces = (sweep / MAX_WEDGE).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f64;

    (0..pieces)
        .map(|p| {
            let a0 = start - p as f64 * piece_sweep;
            let steps = (piece_sweep / ARC_STEP).ceil().max(1.0) as usize;
            let mut outline = Vec::with_capacity(steps + 2);
            outline.push([0.0, 0.0]);
            for s in 0..=steps {
                let a = a0 - piece_sweep * s as f64 / steps as f64;
                outline.push([a.cos(), a.sin()]);
            }
            outline
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Payload / outcome scatter chart
// ---------------------------------------------------------------------------

/// Render the payload vs. outcome scatter for the current payload range.
pub fn scatter_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let chart = &state.scatter_chart;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(chart.title());
    });

    // One series per booster category so the legend doubles as a colour key.
    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in chart.points() {
        series
            .entry(p.booster_version_category.as_str())
            .or_default()
            .push([p.payload_mass_kg, f64::from(p.class)]);
    }

    let bounds = state.dataset.payload_bounds();

    Plot::new("success_payload_scatter_chart")
        .legend(Legend::default())
        .height(height)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(bounds.min)
        .include_x(bounds.max)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            if name.is_empty() {
                return String::new();
            }
            let outcome = if value.y >= 0.5 { "Success" } else { "Failure" };
            format!("Booster: {name}\nPayload: {:.0} kg\n{outcome}", value.x)
        })
        .show(ui, |plot_ui| {
            for (category, points) in series {
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(category)
                        .color(state.booster_colors.color_for(category))
                        .radius(4.0),
                );
            }
        });
}

use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::{SiteSelection, aggregate};
use crate::data::chart::ChartSpec;
use crate::data::filter::{PayloadRange, scatter_chart};
use crate::data::model::LaunchDataset;
use crate::error::DashError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Each input event has one handler that recomputes only the chart it feeds.
/// Charts are derived views; the dataset itself is never touched.
pub struct AppState {
    /// Loaded dataset, shared read-only.
    pub dataset: Arc<LaunchDataset>,

    /// Current site selector value.
    pub site_selection: SiteSelection,

    /// Current payload range selector value.
    pub payload_range: PayloadRange,

    /// Proportion chart for `site_selection`.
    pub pie_chart: ChartSpec,

    /// Scatter chart for `payload_range`.
    pub scatter_chart: ChartSpec,

    /// Colours for launch sites (pie slices in the all-sites view).
    pub site_colors: ColorMap,

    /// Colours for booster version categories (scatter points).
    pub booster_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Start at "all sites" and the full payload range.
    pub fn new(dataset: Arc<LaunchDataset>) -> Result<Self, DashError> {
        let site_selection = SiteSelection::All;
        let payload_range = PayloadRange::full(&dataset);
        let pie_chart = aggregate(&dataset, &site_selection)?;
        let scatter_chart = scatter_chart(&dataset, &payload_range)?;

        let site_colors = ColorMap::new(dataset.sites().iter().map(String::as_str));
        let booster_colors = ColorMap::new(dataset.booster_categories().iter().map(String::as_str));

        Ok(Self {
            dataset,
            site_selection,
            payload_range,
            pie_chart,
            scatter_chart,
            site_colors,
            booster_colors,
            status_message: None,
        })
    }

    /// Site selector changed: recompute the proportion chart.
    pub fn on_site_selected(&mut self, selection: SiteSelection) {
        if selection == self.site_selection {
            return;
        }
        match aggregate(&self.dataset, &selection) {
            Ok(chart) => {
                log::debug!(
                    "Site selection '{selection}' → {} slices",
                    chart.slices().len()
                );
                self.site_selection = selection;
                self.pie_chart = chart;
                self.status_message = None;
            }
            Err(e) => self.report(e),
        }
    }

    /// Range selector changed: recompute the scatter chart.
    pub fn on_payload_range_changed(&mut self, low: f64, high: f64) {
        let result = PayloadRange::new(low, high).and_then(|range| {
            let chart = scatter_chart(&self.dataset, &range)?;
            Ok((range, chart))
        });
        match result {
            Ok((range, chart)) => {
                log::debug!(
                    "Payload range [{low}, {high}] → {} points",
                    chart.points().len()
                );
                self.payload_range = range;
                self.scatter_chart = chart;
                self.status_message = None;
            }
            Err(e) => self.report(e),
        }
    }

    /// Keep the last valid chart and show the error.
    fn report(&mut self, error: DashError) {
        log::warn!("Rejected input: {error}");
        self.status_message = Some(format!("Error: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::sample_dataset;

    fn state() -> AppState {
        AppState::new(Arc::new(sample_dataset())).unwrap()
    }

    #[test]
    fn starts_with_all_sites_and_full_range() {
        let st = state();
        assert_eq!(st.site_selection, SiteSelection::All);
        assert_eq!(st.payload_range.low(), 500.0);
        assert_eq!(st.payload_range.high(), 600.0);
        assert_eq!(st.pie_chart.slices().len(), 2);
        assert_eq!(st.scatter_chart.points().len(), 3);
        assert!(st.status_message.is_none());
    }

    #[test]
    fn site_event_only_touches_pie() {
        let mut st = state();
        let scatter_before = st.scatter_chart.clone();
        st.on_site_selected(SiteSelection::Site("B".into()));
        assert_eq!(st.pie_chart.slices().len(), 1);
        assert_eq!(st.pie_chart.slices()[0].label, "Success");
        assert_eq!(st.scatter_chart, scatter_before);
    }

    #[test]
    fn range_event_only_touches_scatter() {
        let mut st = state();
        let pie_before = st.pie_chart.clone();
        st.on_payload_range_changed(520.0, 600.0);
        assert_eq!(st.scatter_chart.points().len(), 2);
        assert_eq!(st.pie_chart, pie_before);
    }

    #[test]
    fn invalid_input_keeps_last_chart() {
        let mut st = state();
        st.on_payload_range_changed(520.0, 600.0);
        st.on_payload_range_changed(600.0, 520.0);
        assert_eq!(st.scatter_chart.points().len(), 2);
        assert_eq!(st.payload_range.low(), 520.0);
        assert!(st.status_message.as_deref().unwrap().contains("invalid payload range"));

        st.on_site_selected(SiteSelection::Site("Nowhere".into()));
        assert_eq!(st.site_selection, SiteSelection::All);
        assert!(st.status_message.as_deref().unwrap().contains("Nowhere"));

        st.on_site_selected(SiteSelection::Site("A".into()));
        assert!(st.status_message.is_none());
    }

    #[test]
    fn dataset_is_shared_not_copied() {
        let ds = Arc::new(sample_dataset());
        let st = AppState::new(Arc::clone(&ds)).unwrap();
        assert!(Arc::ptr_eq(&ds, &st.dataset));
    }
}

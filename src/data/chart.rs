use serde::Serialize;

// ---------------------------------------------------------------------------
// ChartSpec – what the chart surfaces are handed
// ---------------------------------------------------------------------------

pub const ALL_SITES_TITLE: &str = "Successful launches for all stations";
pub const SITE_TITLE: &str = "Successful vs Failed launch counts";
pub const SCATTER_TITLE: &str = "Launch results based on payload mass";

/// One slice of a proportion (pie) chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: usize,
    /// Extra hover text (the site name in the single-site view).
    pub hover: Option<String>,
}

/// One point of the payload/outcome scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub class: u8,
    pub booster_version_category: String,
    pub outcome_label: &'static str,
}

/// A freshly derived, render-ready view of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Proportion { title: String, slices: Vec<Slice> },
    Scatter { title: String, points: Vec<ScatterPoint> },
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Proportion { title, .. } | ChartSpec::Scatter { title, .. } => title,
        }
    }

    /// Slices of a proportion chart; empty for a scatter chart.
    pub fn slices(&self) -> &[Slice] {
        match self {
            ChartSpec::Proportion { slices, .. } => slices,
            ChartSpec::Scatter { .. } => &[],
        }
    }

    /// Points of a scatter chart; empty for a proportion chart.
    pub fn points(&self) -> &[ScatterPoint] {
        match self {
            ChartSpec::Scatter { points, .. } => points,
            ChartSpec::Proportion { .. } => &[],
        }
    }

    /// Share of slice `index` in the whole pie, in `0.0..=1.0`.
    pub fn fraction(&self, index: usize) -> Option<f64> {
        let slices = self.slices();
        let total: usize = slices.iter().map(|s| s.value).sum();
        let slice = slices.get(index)?;
        if total == 0 {
            return None;
        }
        Some(slice.value as f64 / total as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.slices().is_empty() && self.points().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pie(values: &[usize]) -> ChartSpec {
        ChartSpec::Proportion {
            title: ALL_SITES_TITLE.to_string(),
            slices: values
                .iter()
                .enumerate()
                .map(|(i, &value)| Slice {
                    label: format!("site {i}"),
                    value,
                    hover: None,
                })
                .collect(),
        }
    }

    #[test]
    fn fractions_sum_to_one() {
        let chart = pie(&[1, 3]);
        assert!((chart.fraction(0).unwrap() - 0.25).abs() < 1e-12);
        assert!((chart.fraction(1).unwrap() - 0.75).abs() < 1e-12);
        assert_eq!(chart.fraction(2), None);
    }

    #[test]
    fn empty_pie_has_no_fractions() {
        let chart = pie(&[]);
        assert!(chart.is_empty());
        assert_eq!(chart.fraction(0), None);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let chart = ChartSpec::Scatter {
            title: SCATTER_TITLE.to_string(),
            points: vec![ScatterPoint {
                payload_mass_kg: 600.0,
                class: 0,
                booster_version_category: "v1.1".to_string(),
                outcome_label: "Failure",
            }],
        };
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"], "scatter");
        assert_eq!(json["points"][0]["outcome_label"], "Failure");
        assert_eq!(chart.title(), SCATTER_TITLE);
        assert!(chart.slices().is_empty());
    }
}

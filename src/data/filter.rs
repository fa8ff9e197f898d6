use super::chart::{ChartSpec, SCATTER_TITLE, ScatterPoint};
use super::model::LaunchDataset;
use crate::error::{DashError, Result};

// ---------------------------------------------------------------------------
// PayloadRange – value emitted by the range selector
// ---------------------------------------------------------------------------

/// Inclusive payload-mass interval in kilograms, `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(invalid(low, high, "bounds must be finite"));
        }
        if low > high {
            return Err(invalid(low, high, "low bound exceeds high bound"));
        }
        Ok(PayloadRange { low, high })
    }

    /// The whole observed payload extent of `dataset`.
    pub fn full(dataset: &LaunchDataset) -> Self {
        let bounds = dataset.payload_bounds();
        PayloadRange {
            low: bounds.min,
            high: bounds.max,
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, payload: f64) -> bool {
        self.low <= payload && payload <= self.high
    }
}

fn invalid(low: f64, high: f64, reason: &str) -> DashError {
    DashError::InvalidRange {
        low,
        high,
        reason: reason.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Scatter chart computation
// ---------------------------------------------------------------------------

/// Return the records whose payload lies in `range` (inclusive), labelled
/// with their outcome, in dataset order.
///
/// The range must lie within the dataset's observed payload bounds.
pub fn filter_by_payload(dataset: &LaunchDataset, range: &PayloadRange) -> Result<Vec<ScatterPoint>> {
    let bounds = dataset.payload_bounds();
    if !bounds.contains(range.low) || !bounds.contains(range.high) {
        return Err(invalid(
            range.low,
            range.high,
            &format!("outside observed payload range [{}, {}]", bounds.min, bounds.max),
        ));
    }

    Ok(dataset
        .records()
        .iter()
        .filter(|rec| range.contains(rec.payload_mass_kg))
        .map(|rec| ScatterPoint {
            payload_mass_kg: rec.payload_mass_kg,
            class: rec.outcome.class(),
            booster_version_category: rec.booster_version_category.clone(),
            outcome_label: rec.outcome.label(),
        })
        .collect())
}

/// [`filter_by_payload`] wrapped as a render-ready scatter chart.
pub fn scatter_chart(dataset: &LaunchDataset, range: &PayloadRange) -> Result<ChartSpec> {
    Ok(ChartSpec::Scatter {
        title: SCATTER_TITLE.to_string(),
        points: filter_by_payload(dataset, range)?,
    })
}

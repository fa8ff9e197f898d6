use std::collections::BTreeSet;
use std::fmt;

use anyhow::{Result, bail};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome. Stored in the source data as `class` (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Interpret a raw `class` value. Accepts integral floats such as `1.0`,
    /// as dataframe tools write the column once it has been widened to float.
    pub fn from_class(class: f64) -> Option<Self> {
        if class == 0.0 {
            Some(Outcome::Failure)
        } else if class == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    /// Numeric class, used as the scatter y value.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Only used to colour the scatter chart.
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// PayloadBounds
// ---------------------------------------------------------------------------

/// Observed payload extent of a dataset, fixed at load time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

impl PayloadBounds {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed indices.
///
/// Never mutated after construction; share it as `Arc<LaunchDataset>`.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct site names in order of first appearance.
    sites: Vec<String>,
    booster_categories: BTreeSet<String>,
    payload_bounds: PayloadBounds,
}

impl LaunchDataset {
    /// Validate the records and build the indices.
    ///
    /// Fails on an empty table, an empty site name, or a payload that is
    /// negative or not finite.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self> {
        if records.is_empty() {
            bail!("dataset contains no launch records");
        }

        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories = BTreeSet::new();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for (row, rec) in records.iter().enumerate() {
            if rec.site.trim().is_empty() {
                bail!("Row {row}: empty launch site");
            }
            if !rec.payload_mass_kg.is_finite() || rec.payload_mass_kg < 0.0 {
                bail!(
                    "Row {row}: payload mass {} is not a non-negative number",
                    rec.payload_mass_kg
                );
            }
            if !sites.iter().any(|s| s == &rec.site) {
                sites.push(rec.site.clone());
            }
            booster_categories.insert(rec.booster_version_category.clone());
            min = min.min(rec.payload_mass_kg);
            max = max.max(rec.payload_mass_kg);
        }

        Ok(LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds: PayloadBounds { min, max },
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    pub fn payload_bounds(&self) -> PayloadBounds {
        self.payload_bounds
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty (never true for a loaded dataset).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(site: &str, payload: f64, outcome: Outcome, booster: &str) -> LaunchRecord {
    LaunchRecord {
        site: site.to_string(),
        payload_mass_kg: payload,
        outcome,
        booster_version_category: booster.to_string(),
    }
}

/// The three-row dataset used throughout the unit tests.
#[cfg(test)]
pub(crate) fn sample_dataset() -> LaunchDataset {
    LaunchDataset::from_records(vec![
        record("A", 500.0, Outcome::Success, "v1.0"),
        record("A", 600.0, Outcome::Failure, "v1.1"),
        record("B", 550.0, Outcome::Success, "FT"),
    ])
    .expect("sample dataset is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_from_class_accepts_integral_values_only() {
        assert_eq!(Outcome::from_class(0.0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(1.0), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(0.5), None);
        assert_eq!(Outcome::from_class(2.0), None);
        assert_eq!(Outcome::from_class(f64::NAN), None);
    }

    #[test]
    fn outcome_labels_and_classes() {
        assert_eq!(Outcome::Failure.label(), "Failure");
        assert_eq!(Outcome::Success.to_string(), "Success");
        assert_eq!(Outcome::Failure.class(), 0);
        assert_eq!(Outcome::Success.class(), 1);
    }

    #[test]
    fn indices_are_built_from_records() {
        let ds = LaunchDataset::from_records(vec![
            record("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0"),
            record("VAFB SLC-4E", 9600.0, Outcome::Success, "FT"),
            record("CCAFS LC-40", 2500.0, Outcome::Success, "B4"),
            record("KSC LC-39A", 5300.0, Outcome::Success, "FT"),
        ])
        .unwrap();

        assert_eq!(ds.len(), 4);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        assert!(ds.has_site("KSC LC-39A"));
        assert!(!ds.has_site("Boca Chica"));
        assert_eq!(
            ds.booster_categories().iter().collect::<Vec<_>>(),
            ["B4", "FT", "v1.0"]
        );
        assert_eq!(ds.payload_bounds(), PayloadBounds { min: 0.0, max: 9600.0 });
    }

    #[test]
    fn rejects_empty_and_malformed_tables() {
        assert!(LaunchDataset::from_records(Vec::new()).is_err());
        assert!(LaunchDataset::from_records(vec![record("A", -1.0, Outcome::Success, "FT")]).is_err());
        assert!(
            LaunchDataset::from_records(vec![record("A", f64::NAN, Outcome::Success, "FT")]).is_err()
        );
        assert!(LaunchDataset::from_records(vec![record(" ", 10.0, Outcome::Success, "FT")]).is_err());
    }

    #[test]
    fn bounds_contain_is_inclusive() {
        let b = sample_dataset().payload_bounds();
        assert!(b.contains(500.0));
        assert!(b.contains(600.0));
        assert!(!b.contains(499.9));
        assert!(!b.contains(600.1));
    }
}

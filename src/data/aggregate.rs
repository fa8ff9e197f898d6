use std::collections::BTreeMap;
use std::fmt;

use super::chart::{ALL_SITES_TITLE, ChartSpec, SITE_TITLE, Slice};
use super::model::{LaunchDataset, Outcome};
use crate::error::{DashError, Result};

// ---------------------------------------------------------------------------
// SiteSelection – value emitted by the site selector
// ---------------------------------------------------------------------------

/// Label of the "all sites" entry in the selector.
pub const ALL_SITES_LABEL: &str = "All Sites";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Resolve selector text against the dataset's known sites.
    pub fn parse(dataset: &LaunchDataset, text: &str) -> Result<Self> {
        if text == ALL_SITES_LABEL || text == "All" {
            return Ok(SiteSelection::All);
        }
        if dataset.has_site(text) {
            Ok(SiteSelection::Site(text.to_string()))
        } else {
            Err(DashError::InvalidSelection(text.to_string()))
        }
    }

    /// Every valid selection for `dataset`, sentinel first.
    pub fn options(dataset: &LaunchDataset) -> Vec<SiteSelection> {
        std::iter::once(SiteSelection::All)
            .chain(dataset.sites().iter().cloned().map(SiteSelection::Site))
            .collect()
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => f.write_str(ALL_SITES_LABEL),
            SiteSelection::Site(site) => f.write_str(site),
        }
    }
}

// ---------------------------------------------------------------------------
// Proportion chart computation
// ---------------------------------------------------------------------------

/// Build the proportion chart for a site selection.
///
/// * `All` → one slice per site holding its success count; sites without a
///   single success are left out. Slices are ordered by site name.
/// * `Site(s)` → up to two slices, "Failure" and "Success", for the records of
///   `s`. An outcome that never occurs gets no slice. Larger slice first.
pub fn aggregate(dataset: &LaunchDataset, selection: &SiteSelection) -> Result<ChartSpec> {
    match selection {
        SiteSelection::All => Ok(successes_per_site(dataset)),
        SiteSelection::Site(site) => {
            if !dataset.has_site(site) {
                return Err(DashError::InvalidSelection(site.clone()));
            }
            Ok(outcomes_for_site(dataset, site))
        }
    }
}

fn successes_per_site(dataset: &LaunchDataset) -> ChartSpec {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in dataset.records() {
        if rec.outcome == Outcome::Success {
            *counts.entry(rec.site.as_str()).or_default() += 1;
        }
    }

    let slices = counts
        .into_iter()
        .map(|(site, value)| Slice {
            label: site.to_string(),
            value,
            hover: None,
        })
        .collect();

    ChartSpec::Proportion {
        title: ALL_SITES_TITLE.to_string(),
        slices,
    }
}

fn outcomes_for_site(dataset: &LaunchDataset, site: &str) -> ChartSpec {
    let mut counts: BTreeMap<Outcome, usize> = BTreeMap::new();
    for rec in dataset.records().iter().filter(|r| r.site == site) {
        *counts.entry(rec.outcome).or_default() += 1;
    }

    let mut counts: Vec<(Outcome, usize)> = counts.into_iter().collect();
    // Stable sort keeps Failure ahead of Success on equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let slices = counts
        .into_iter()
        .map(|(outcome, value)| Slice {
            label: outcome.label().to_string(),
            value,
            hover: Some(site.to_string()),
        })
        .collect();

    ChartSpec::Proportion {
        title: SITE_TITLE.to_string(),
        slices,
    }
}

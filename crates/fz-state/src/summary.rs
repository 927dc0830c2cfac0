//! Per-region selection counts, derived from a selection on demand.

use serde::{Deserialize, Serialize};

use fz_catalog::GeographyCatalog;
use fz_core::{RegionName, Selection};

/// How much of one region is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSelectionSummary {
    /// The region.
    pub region: RegionName,
    /// Zones listed under the region.
    pub total: usize,
    /// How many of those are in the selection.
    pub selected: usize,
    /// Whether every zone of a non-empty region is selected.
    pub all_selected: bool,
}

/// Summaries for every region, in region order.
pub fn summarize_regions(catalog: &GeographyCatalog, selection: &Selection) -> Vec<RegionSelectionSummary> {
    catalog
        .regions()
        .iter()
        .map(|(region, zones)| {
            let selected = zones.iter().filter(|z| selection.contains(z)).count();
            RegionSelectionSummary {
                region: region.clone(),
                total: zones.len(),
                selected,
                all_selected: !zones.is_empty() && selected == zones.len(),
            }
        })
        .collect()
}

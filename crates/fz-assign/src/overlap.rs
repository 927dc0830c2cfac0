//! # Overlap Analysis
//!
//! Two selected zones overlap when a shipment to some city could be priced
//! under either. Overlap is a catalog fact, reported as a warning and never
//! as an error.
//!
//! ```text
//! per state both zones cover:
//!   full    × full     overlap on every indexed city of the state
//!   full    × limited  overlap on the limited zone's whitelist there
//!   limited × limited  overlap on the intersection of the whitelists
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use fz_catalog::GeographyCatalog;
use fz_core::{CityId, ZoneCode, ZoneInfo, ZoneType};

/// Shared coverage of one pair of selected zones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneOverlap {
    /// The zone selected first.
    pub first: ZoneCode,
    /// The zone selected second.
    pub second: ZoneCode,
    /// States in which the two zones overlap, in the first zone's order.
    pub shared_states: Vec<String>,
    /// Cities both zones cover. May be empty for a full/full overlap in a
    /// state with no indexed cities.
    pub shared_cities: Vec<CityId>,
}

impl ZoneOverlap {
    /// Warning text describing the potential double coverage.
    pub fn describe(&self) -> String {
        let mut msg = format!(
            "zones {} and {} overlap in {}",
            self.first,
            self.second,
            self.shared_states.join(", ")
        );
        if !self.shared_cities.is_empty() {
            let cities: Vec<&str> = self.shared_cities.iter().map(CityId::city).collect();
            msg.push_str(&format!(
                "; {} may be priced under both",
                cities.join(", ")
            ));
        }
        msg
    }
}

impl fmt::Display for ZoneOverlap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Overlap of two zones, or `None` when their coverage is disjoint.
pub(crate) fn zone_pair_overlap(
    catalog: &GeographyCatalog,
    first: &ZoneInfo,
    second: &ZoneInfo,
) -> Option<ZoneOverlap> {
    let mut shared_states = Vec::new();
    let mut shared_cities = Vec::new();

    for state in first.covered_states().filter(|s| second.covers_state(s)) {
        let cities: Vec<&String> = match (first.zone_type, second.zone_type) {
            (ZoneType::Full, ZoneType::Full) => catalog.cities_in(state).iter().collect(),
            (ZoneType::Full, ZoneType::Limited) => second.whitelist_in(state).iter().collect(),
            (ZoneType::Limited, ZoneType::Full) => first.whitelist_in(state).iter().collect(),
            (ZoneType::Limited, ZoneType::Limited) => {
                let other = second.whitelist_in(state);
                first
                    .whitelist_in(state)
                    .iter()
                    .filter(|c| other.contains(*c))
                    .collect()
            }
        };

        let both_full = first.zone_type == ZoneType::Full && second.zone_type == ZoneType::Full;
        if cities.is_empty() && !both_full {
            continue;
        }
        shared_states.push(state.to_string());
        shared_cities.extend(
            cities
                .into_iter()
                .filter_map(|city| CityId::new(city.as_str(), state).ok()),
        );
    }

    if shared_states.is_empty() {
        return None;
    }
    Some(ZoneOverlap {
        first: first.zone_code.clone(),
        second: second.zone_code.clone(),
        shared_states,
        shared_cities,
    })
}

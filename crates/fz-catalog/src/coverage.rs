//! # Coverage Index
//!
//! Reverse index from a concrete city to every zone that covers it, built
//! once when a catalog is accepted. A full zone covers every indexed city of
//! its states; a limited zone covers exactly its whitelist.
//!
//! Whitelisted cities missing from the city index are still indexed, so a
//! limited zone never loses coverage because the index lags behind it.

use std::collections::{BTreeMap, BTreeSet};

use fz_core::{CityId, ZoneCode, ZoneInfo, ZoneType};

/// City → covering zones, plus the inverse zone → cities table.
#[derive(Debug, Clone, Default)]
pub struct CoverageIndex {
    by_city: BTreeMap<CityId, Vec<ZoneCode>>,
    by_zone: BTreeMap<ZoneCode, BTreeSet<CityId>>,
}

impl CoverageIndex {
    /// Build the index from zone definitions and the full city index.
    pub fn build<'a>(
        zones: impl IntoIterator<Item = &'a ZoneInfo>,
        cities: &BTreeMap<String, Vec<String>>,
    ) -> Self {
        let mut index = Self::default();
        for zone in zones {
            let covered: BTreeSet<CityId> = match zone.zone_type {
                ZoneType::Full => zone
                    .states
                    .iter()
                    .flat_map(|state| {
                        cities
                            .get(state)
                            .into_iter()
                            .flatten()
                            .filter_map(move |city| CityId::new(city.as_str(), state.as_str()).ok())
                    })
                    .collect(),
                ZoneType::Limited => zone
                    .limited_cities
                    .iter()
                    .flat_map(|(state, whitelist)| {
                        whitelist
                            .iter()
                            .filter_map(move |city| CityId::new(city.as_str(), state.as_str()).ok())
                    })
                    .collect(),
            };
            for city in &covered {
                index
                    .by_city
                    .entry(city.clone())
                    .or_default()
                    .push(zone.zone_code.clone());
            }
            index.by_zone.insert(zone.zone_code.clone(), covered);
        }
        index
    }

    /// Zones covering `city`, in zone-code order.
    pub fn zones_covering(&self, city: &CityId) -> &[ZoneCode] {
        self.by_city.get(city).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Cities covered by `zone`, sorted by state then city.
    pub fn cities_of(&self, zone: &ZoneCode) -> impl Iterator<Item = &CityId> + '_ {
        self.by_zone.get(zone).into_iter().flatten()
    }

    /// Number of cities `zone` covers.
    pub fn city_count(&self, zone: &ZoneCode) -> usize {
        self.by_zone.get(zone).map_or(0, BTreeSet::len)
    }

    /// Cities covered by both zones.
    pub fn shared_cities(&self, a: &ZoneCode, b: &ZoneCode) -> Vec<CityId> {
        match (self.by_zone.get(a), self.by_zone.get(b)) {
            (Some(left), Some(right)) => left.intersection(right).cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Cities covered by more than one zone, with their covering zones.
    pub fn contested_cities(&self) -> impl Iterator<Item = (&CityId, &[ZoneCode])> + '_ {
        self.by_city
            .iter()
            .filter(|(_, zones)| zones.len() > 1)
            .map(|(city, zones)| (city, zones.as_slice()))
    }

    /// Number of distinct covered cities.
    pub fn covered_city_count(&self) -> usize {
        self.by_city.len()
    }
}

//! # Geography Catalog
//!
//! The in-memory, read-only geography catalog. A [`GeographyCatalog`] can
//! only be obtained from a document that passed every consistency check,
//! so holders may rely on:
//!
//! - every zone code listed under a region has a definition,
//! - a zone belongs to at most one region,
//! - limited zones have a non-empty whitelist within their states,
//! - full zones list at least one state.
//!
//! Catalogs are immutable once built and are shared as `Arc<GeographyCatalog>`.

use std::collections::BTreeMap;

use fz_core::{CatalogLoadError, CityId, RegionName, ZoneCode, ZoneInfo};

use crate::coverage::CoverageIndex;
use crate::document::CatalogDocument;
use crate::validation::check_document;

/// Validated geography catalog: regions, zones, city index, and coverage.
#[derive(Debug, Clone)]
pub struct GeographyCatalog {
    regions: BTreeMap<RegionName, Vec<ZoneCode>>,
    zones: BTreeMap<ZoneCode, ZoneInfo>,
    zone_region: BTreeMap<ZoneCode, RegionName>,
    cities: BTreeMap<String, Vec<String>>,
    coverage: CoverageIndex,
    lints: Vec<String>,
}

impl GeographyCatalog {
    /// Build a catalog from a parsed document.
    ///
    /// # Errors
    ///
    /// Returns the first consistency violation as a [`CatalogLoadError`].
    pub fn from_document(doc: &CatalogDocument) -> Result<Self, CatalogLoadError> {
        let checked = check_document(doc)?;
        for lint in &checked.lints {
            tracing::warn!(lint = %lint, "catalog lint");
        }
        let coverage = CoverageIndex::build(checked.zones.values(), &checked.cities);
        tracing::debug!(
            regions = checked.regions.len(),
            zones = checked.zones.len(),
            states = checked.cities.len(),
            covered_cities = coverage.covered_city_count(),
            "geography catalog built"
        );
        Ok(Self {
            regions: checked.regions,
            zones: checked.zones,
            zone_region: checked.zone_region,
            cities: checked.cities,
            coverage,
            lints: checked.lints,
        })
    }

    /// Parse and check a YAML (or JSON) catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogLoadError::Malformed`] for unparseable text and the
    /// first consistency violation otherwise.
    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogLoadError> {
        Self::from_document(&CatalogDocument::from_yaml_str(text)?)
    }

    /// Region → ordered zone codes, regions in name order.
    pub fn regions(&self) -> &BTreeMap<RegionName, Vec<ZoneCode>> {
        &self.regions
    }

    /// Zone definitions by code.
    pub fn zones(&self) -> &BTreeMap<ZoneCode, ZoneInfo> {
        &self.zones
    }

    /// Look up a zone definition.
    pub fn zone(&self, code: &ZoneCode) -> Option<&ZoneInfo> {
        self.zones.get(code)
    }

    /// Look up a zone by raw code. Invalid codes are simply unknown.
    pub fn zone_by_str(&self, code: &str) -> Option<&ZoneInfo> {
        ZoneCode::new(code).ok().and_then(|c| self.zones.get(&c))
    }

    /// Whether `code` is defined.
    pub fn contains_zone(&self, code: &ZoneCode) -> bool {
        self.zones.contains_key(code)
    }

    /// The region a zone is listed under, if any.
    pub fn region_of(&self, code: &ZoneCode) -> Option<&RegionName> {
        self.zone_region.get(code)
    }

    /// Zones of one region, in catalog order.
    pub fn region_zones(&self, region: &RegionName) -> Option<&[ZoneCode]> {
        self.regions.get(region).map(Vec::as_slice)
    }

    /// Every indexed city of `state`, in catalog order.
    pub fn cities_in(&self, state: &str) -> &[String] {
        self.cities.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The full city index: state → cities.
    pub fn city_index(&self) -> &BTreeMap<String, Vec<String>> {
        &self.cities
    }

    /// City → covering zones.
    pub fn coverage(&self) -> &CoverageIndex {
        &self.coverage
    }

    /// Zones covering a concrete city.
    pub fn zones_covering(&self, city: &CityId) -> &[ZoneCode] {
        self.coverage.zones_covering(city)
    }

    /// Tolerated anomalies found while checking the document.
    pub fn lints(&self) -> &[String] {
        &self.lints
    }

    /// Number of defined zones.
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Number of regions.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Number of states in the city index.
    pub fn state_count(&self) -> usize {
        self.cities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
regions:
  East: [E1]
  Northeast: [NE1]
zones:
  E1: { type: full, states: [West Bengal, Odisha] }
  NE1:
    type: limited
    states: [West Bengal]
    limited_cities: { West Bengal: [Siliguri] }
cities:
  West Bengal: [Kolkata, Siliguri]
  Odisha: [Cuttack, Puri]
"#;

    #[test]
    fn test_exposes_regions_in_name_order() {
        let catalog = GeographyCatalog::from_yaml_str(SMALL).unwrap();
        let names: Vec<&str> = catalog.regions().keys().map(RegionName::as_str).collect();
        assert_eq!(names, vec!["East", "Northeast"]);
        assert_eq!(catalog.region_count(), 2);
        assert_eq!(catalog.zone_count(), 2);
        assert_eq!(catalog.state_count(), 2);
        assert!(catalog.lints().is_empty());
    }

    #[test]
    fn test_zone_lookup_by_code_and_string() {
        let catalog = GeographyCatalog::from_yaml_str(SMALL).unwrap();
        let ne1 = ZoneCode::new("NE1").unwrap();
        assert!(catalog.zone(&ne1).unwrap().is_limited());
        assert!(catalog.zone_by_str(" NE1 ").is_some());
        assert!(catalog.zone_by_str("NE 1").is_none());
        assert!(catalog.zone_by_str("ZZ").is_none());
        assert_eq!(catalog.region_of(&ne1).unwrap().as_str(), "Northeast");
    }

    #[test]
    fn test_city_index_and_coverage() {
        let catalog = GeographyCatalog::from_yaml_str(SMALL).unwrap();
        assert_eq!(catalog.cities_in("Odisha"), &["Cuttack", "Puri"]);
        assert!(catalog.cities_in("Goa").is_empty());
        let siliguri = CityId::new("Siliguri", "West Bengal").unwrap();
        assert_eq!(catalog.zones_covering(&siliguri).len(), 2);
    }

    #[test]
    fn test_inconsistent_document_is_rejected() {
        let err = GeographyCatalog::from_yaml_str(
            "regions:\n  East: [E9]\nzones:\n  E1: { type: full, states: [Odisha] }\n",
        )
        .unwrap_err();
        assert!(matches!(err, CatalogLoadError::DanglingZoneReference { .. }));
    }
}

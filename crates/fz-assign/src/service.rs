//! # Zone Assignment Service
//!
//! Pure logic over a loaded [`GeographyCatalog`]: region and zone lookup,
//! validation of a zone selection, overlap analysis, and expansion into
//! [`ZoneConfig`]s.
//!
//! ## Failure Semantics
//!
//! The only I/O happens in [`ZoneAssignmentService::initialize`]. After
//! that, every operation is synchronous and infallible except for
//! [`NotInitializedError`] when called before a catalog is attached.
//! Unknown zone codes are reported inside a [`ValidationResult`] or skipped
//! by expansion; they never raise.

use std::collections::BTreeMap;
use std::sync::Arc;

use fz_catalog::{CatalogSource, GeographyCatalog};
use fz_core::{
    CatalogLoadError, CityId, NotInitializedError, RegionName, ValidationResult, ZoneCode,
    ZoneConfig, ZoneInfo,
};

use crate::expansion::expand_zone;
use crate::overlap::{zone_pair_overlap, ZoneOverlap};

/// Stateless query surface over one geography catalog.
#[derive(Debug, Clone, Default)]
pub struct ZoneAssignmentService {
    catalog: Option<Arc<GeographyCatalog>>,
}

impl ZoneAssignmentService {
    /// An uninitialized service.
    pub fn new() -> Self {
        Self::default()
    }

    /// A service over an already-loaded catalog.
    pub fn with_catalog(catalog: Arc<GeographyCatalog>) -> Self {
        Self {
            catalog: Some(catalog),
        }
    }

    /// Load the catalog from `source`. A service that already holds a
    /// catalog keeps it and does not touch the source again.
    ///
    /// # Errors
    ///
    /// Propagates the source's [`CatalogLoadError`]; the service stays
    /// uninitialized.
    pub fn initialize(&mut self, source: &dyn CatalogSource) -> Result<(), CatalogLoadError> {
        if self.catalog.is_some() {
            tracing::debug!(source = %source.describe(), "assignment service already initialized");
            return Ok(());
        }
        let catalog = source.load()?;
        self.catalog = Some(Arc::new(catalog));
        Ok(())
    }

    /// Whether a catalog is attached.
    pub fn is_initialized(&self) -> bool {
        self.catalog.is_some()
    }

    /// The attached catalog.
    pub fn catalog(&self) -> Result<&Arc<GeographyCatalog>, NotInitializedError> {
        self.catalog
            .as_ref()
            .ok_or_else(|| NotInitializedError::new("catalog"))
    }

    fn require(&self, operation: &'static str) -> Result<&GeographyCatalog, NotInitializedError> {
        self.catalog
            .as_deref()
            .ok_or_else(|| NotInitializedError::new(operation))
    }

    // ── Lookup ──────────────────────────────────────────────────────────

    /// Region → ordered zone codes.
    pub fn get_regions(&self) -> Result<&BTreeMap<RegionName, Vec<ZoneCode>>, NotInitializedError> {
        Ok(self.require("get_regions")?.regions())
    }

    /// The definition of `code`, or `None` when the catalog has no such zone.
    pub fn get_zone_info(&self, code: &str) -> Result<Option<&ZoneInfo>, NotInitializedError> {
        Ok(self.require("get_zone_info")?.zone_by_str(code))
    }

    /// The region `code` is listed under, if any.
    pub fn region_of(&self, code: &str) -> Result<Option<&RegionName>, NotInitializedError> {
        let catalog = self.require("region_of")?;
        Ok(ZoneCode::new(code)
            .ok()
            .and_then(|code| catalog.region_of(&code)))
    }

    /// Zones covering the city `city` in `state`. Names that cannot form a
    /// city identifier match nothing.
    pub fn zones_for_city(&self, city: &str, state: &str) -> Result<Vec<ZoneCode>, NotInitializedError> {
        let catalog = self.require("zones_for_city")?;
        Ok(CityId::new(city, state)
            .map(|id| catalog.zones_covering(&id).to_vec())
            .unwrap_or_default())
    }

    // ── Validation ──────────────────────────────────────────────────────

    /// Validate a selection of zone codes.
    ///
    /// Every code absent from the catalog yields the error
    /// `"unknown zone <code>"`. Every pair of known zones whose coverage
    /// intersects yields one overlap warning. Repeated codes count once.
    /// The result is a pure function of the catalog and the input.
    pub fn validate_zone_selection<I, S>(&self, codes: I) -> Result<ValidationResult, NotInitializedError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let catalog = self.require("validate_zone_selection")?;
        let mut result = ValidationResult::ok();
        let (known, unknown) = partition_codes(catalog, codes);

        for code in &unknown {
            result.add_error(format!("unknown zone {code}"));
        }
        for overlap in overlaps_of(catalog, &known) {
            result.add_warning(overlap.describe());
        }

        tracing::debug!(
            known = known.len(),
            unknown = unknown.len(),
            warnings = result.warnings.len(),
            "zone selection validated"
        );
        Ok(result)
    }

    /// Structured overlap report for every intersecting pair of known zones
    /// in the selection, in selection order.
    pub fn overlap_report<I, S>(&self, codes: I) -> Result<Vec<ZoneOverlap>, NotInitializedError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let catalog = self.require("overlap_report")?;
        let (known, _) = partition_codes(catalog, codes);
        Ok(overlaps_of(catalog, &known))
    }

    // ── Expansion ───────────────────────────────────────────────────────

    /// Expand each known code, in caller order, into its states and cities.
    /// Unknown and repeated codes are skipped.
    pub fn build_zone_config<I, S>(&self, codes: I) -> Result<Vec<ZoneConfig>, NotInitializedError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let catalog = self.require("build_zone_config")?;
        let (known, unknown) = partition_codes(catalog, codes);
        if !unknown.is_empty() {
            tracing::debug!(skipped = ?unknown, "unknown zones skipped during expansion");
        }
        Ok(known.into_iter().map(|zone| expand_zone(catalog, zone)).collect())
    }
}

/// Split raw codes into known zone definitions and unknown codes, each
/// duplicate-free and in first-seen order.
fn partition_codes<I, S>(catalog: &GeographyCatalog, codes: I) -> (Vec<&ZoneInfo>, Vec<String>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut known: Vec<&ZoneInfo> = Vec::new();
    let mut unknown: Vec<String> = Vec::new();
    for raw in codes {
        let raw = raw.as_ref().trim();
        match catalog.zone_by_str(raw) {
            Some(zone) => {
                if !known.iter().any(|z| z.zone_code == zone.zone_code) {
                    known.push(zone);
                }
            }
            None => {
                if !unknown.iter().any(|u| u == raw) {
                    unknown.push(raw.to_string());
                }
            }
        }
    }
    (known, unknown)
}

fn overlaps_of(catalog: &GeographyCatalog, zones: &[&ZoneInfo]) -> Vec<ZoneOverlap> {
    let mut overlaps = Vec::new();
    for (i, first) in zones.iter().enumerate() {
        for second in &zones[i + 1..] {
            if let Some(overlap) = zone_pair_overlap(catalog, first, second) {
                overlaps.push(overlap);
            }
        }
    }
    overlaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use fz_catalog::BuiltinCatalogSource;

    fn service() -> ZoneAssignmentService {
        let mut svc = ZoneAssignmentService::new();
        svc.initialize(&BuiltinCatalogSource).unwrap();
        svc
    }

    #[test]
    fn test_operations_before_initialize_fail() {
        let svc = ZoneAssignmentService::new();
        assert!(!svc.is_initialized());
        assert_eq!(svc.get_regions().unwrap_err().operation, "get_regions");
        assert!(svc.get_zone_info("E1").is_err());
        assert!(svc.validate_zone_selection(["E1"]).is_err());
        assert!(svc.build_zone_config(["E1"]).is_err());
        assert!(svc.catalog().is_err());
    }

    #[test]
    fn test_failed_initialize_leaves_service_uninitialized() {
        let mut svc = ZoneAssignmentService::new();
        let broken = fz_catalog::InlineCatalogSource::new("broken", "zones: 3");
        assert!(svc.initialize(&broken).is_err());
        assert!(!svc.is_initialized());
    }

    #[test]
    fn test_second_initialize_keeps_the_first_catalog() {
        let mut svc = service();
        let other = fz_catalog::InlineCatalogSource::new(
            "tiny",
            "zones:\n  Q1: { type: full, states: [Goa] }\n",
        );
        svc.initialize(&other).unwrap();
        assert!(svc.get_zone_info("Q1").unwrap().is_none());
        assert!(svc.get_zone_info("NE1").unwrap().is_some());
    }

    #[test]
    fn test_limited_zone_info_agrees_with_expansion() {
        let mut svc = ZoneAssignmentService::new();
        let source = fz_catalog::InlineCatalogSource::new(
            "northeast",
            "zones:\n  NE1: { type: limited, states: [Assam, Sikkim], limited_cities: { Assam: [Guwahati] } }\n",
        );
        svc.initialize(&source).unwrap();

        let info = svc.get_zone_info("NE1").unwrap().unwrap();
        assert_eq!(info.states, vec!["Assam"]);
        let configs = svc.build_zone_config(["NE1"]).unwrap();
        assert_eq!(configs[0].selected_states, info.states);
    }

    #[test]
    fn test_zone_info_is_absent_for_unknown_codes() {
        let svc = service();
        assert!(svc.get_zone_info("ZZ9").unwrap().is_none());
        assert!(svc.get_zone_info("").unwrap().is_none());
        assert_eq!(svc.get_zone_info("E1").unwrap().unwrap().states.len(), 2);
    }

    #[test]
    fn test_empty_selection_is_valid_and_silent() {
        let svc = service();
        let result = svc.validate_zone_selection(Vec::<String>::new()).unwrap();
        assert_eq!(result, ValidationResult::ok());
    }

    #[test]
    fn test_unknown_codes_are_errors() {
        let svc = service();
        let result = svc.validate_zone_selection(["NE1", "ZZ9", "ZZ9"]).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["unknown zone ZZ9".to_string()]);
    }

    #[test]
    fn test_overlap_is_a_warning_not_an_error() {
        let svc = service();
        let result = svc.validate_zone_selection(["NE1", "E1"]).unwrap();
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("overlap"));
        assert!(result.warnings[0].contains("West Bengal"));
    }

    #[test]
    fn test_disjoint_limited_zones_do_not_warn() {
        let svc = service();
        let result = svc.validate_zone_selection(["NE1", "X1"]).unwrap();
        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_overlap_report_names_both_zones() {
        let svc = service();
        let report = svc.overlap_report(["E1", "X1", "NE1"]).unwrap();
        let pairs: Vec<(&str, &str)> = report
            .iter()
            .map(|o| (o.first.as_str(), o.second.as_str()))
            .collect();
        assert_eq!(pairs, vec![("E1", "X1"), ("E1", "NE1")]);
        assert_eq!(report[0].shared_cities[0].to_string(), "Kolkata||West Bengal");
    }

    #[test]
    fn test_expansion_skips_unknown_and_repeated_codes() {
        let svc = service();
        let configs = svc.build_zone_config(["NE1", "ZZ9", "NE1"]).unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].zone_code.as_str(), "NE1");
        assert_eq!(configs[0].selected_cities.len(), 4);
    }

    #[test]
    fn test_lookup_helpers() {
        let svc = service();
        assert_eq!(svc.region_of("X1").unwrap().unwrap().as_str(), "Metro");
        assert!(svc.region_of("ZZ9").unwrap().is_none());
        let zones = svc.zones_for_city("Kolkata", "West Bengal").unwrap();
        let codes: Vec<&str> = zones.iter().map(ZoneCode::as_str).collect();
        assert_eq!(codes, vec!["E1", "X1"]);
        assert!(svc.zones_for_city("", "West Bengal").unwrap().is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use fz_catalog::BuiltinCatalogSource;
    use proptest::prelude::*;

    const CODES: &[&str] = &[
        "N1", "N2", "W1", "W2", "S1", "S2", "E1", "E2", "C1", "NE1", "NE2", "X1", "ZZ9", "Q7",
    ];

    fn service() -> ZoneAssignmentService {
        let mut svc = ZoneAssignmentService::new();
        svc.initialize(&BuiltinCatalogSource).unwrap();
        svc
    }

    fn arb_codes() -> impl Strategy<Value = Vec<&'static str>> {
        proptest::collection::vec(proptest::sample::select(CODES), 0..8)
    }

    proptest! {
        #[test]
        fn validation_is_idempotent(codes in arb_codes()) {
            let svc = service();
            let first = svc.validate_zone_selection(&codes).unwrap();
            let second = svc.validate_zone_selection(&codes).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn validity_tracks_unknown_codes(codes in arb_codes()) {
            let svc = service();
            let result = svc.validate_zone_selection(&codes).unwrap();
            let has_unknown = codes.iter().any(|c| *c == "ZZ9" || *c == "Q7");
            prop_assert_eq!(result.is_valid, !has_unknown);
            prop_assert_eq!(result.is_valid, result.errors.is_empty());
        }

        #[test]
        fn expansion_preserves_first_seen_order(codes in arb_codes()) {
            let svc = service();
            let configs = svc.build_zone_config(&codes).unwrap();
            let mut expected: Vec<&str> = Vec::new();
            for code in &codes {
                if *code != "ZZ9" && *code != "Q7" && !expected.contains(code) {
                    expected.push(*code);
                }
            }
            let actual: Vec<&str> = configs.iter().map(|c| c.zone_code.as_str()).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}

//! # Catalog Consistency Rules
//!
//! Turns a [`CatalogDocument`] into normalized catalog parts, failing fast
//! on internal inconsistencies and collecting tolerated anomalies as lints.
//!
//! ## Validation Layers
//!
//! 1. **Identifiers**: zone codes, region names, state and city names are
//!    valid identifiers.
//! 2. **Zone shape**: full zones list states and carry no whitelist; limited
//!    zones carry a non-empty whitelist confined to their states, and keep
//!    only the states that hold a whitelisted city.
//! 3. **Region references**: every zone a region lists exists, and no zone
//!    sits in two regions.
//! 4. **Lints** (non-fatal): full-zone states with no city index entry,
//!    whitelisted cities absent from the index, zones outside every region,
//!    limited-zone states with no whitelisted city.

use std::collections::BTreeMap;

use fz_core::{place_name, CatalogLoadError, RegionName, ZoneCode, ZoneInfo, ZoneType};

use crate::document::{CatalogDocument, ZoneDocument};

/// Normalized, consistency-checked catalog contents.
#[derive(Debug, Clone)]
pub struct CheckedCatalog {
    /// Zone definitions by code.
    pub zones: BTreeMap<ZoneCode, ZoneInfo>,
    /// Region → ordered zone codes.
    pub regions: BTreeMap<RegionName, Vec<ZoneCode>>,
    /// Zone → owning region.
    pub zone_region: BTreeMap<ZoneCode, RegionName>,
    /// State → ordered, duplicate-free city names.
    pub cities: BTreeMap<String, Vec<String>>,
    /// Tolerated anomalies.
    pub lints: Vec<String>,
}

/// Check a catalog document and normalize its contents.
///
/// # Errors
///
/// Returns the first [`CatalogLoadError`] found. Zones are checked before
/// regions, each in key order, so the reported error is deterministic.
pub fn check_document(doc: &CatalogDocument) -> Result<CheckedCatalog, CatalogLoadError> {
    let cities = normalize_city_index(&doc.cities)?;

    let mut lints = Vec::new();
    let mut zones = BTreeMap::new();
    for (raw_code, zone_doc) in &doc.zones {
        let zone = normalize_zone(raw_code, zone_doc, &mut lints)?;
        if zones.contains_key(&zone.zone_code) {
            return Err(CatalogLoadError::Malformed(format!(
                "zone code {} is defined more than once",
                zone.zone_code
            )));
        }
        zones.insert(zone.zone_code.clone(), zone);
    }

    let (regions, zone_region) = normalize_regions(&doc.regions, &zones)?;
    lint(&zones, &zone_region, &cities, &mut lints);

    Ok(CheckedCatalog {
        zones,
        regions,
        zone_region,
        cities,
        lints,
    })
}

fn normalize_zone(
    raw_code: &str,
    doc: &ZoneDocument,
    lints: &mut Vec<String>,
) -> Result<ZoneInfo, CatalogLoadError> {
    let zone_code = ZoneCode::new(raw_code)?;

    let mut states = Vec::new();
    for raw in &doc.states {
        push_unique(&mut states, place_name("state name", raw)?);
    }

    let mut limited_cities: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (raw_state, raw_cities) in &doc.limited_cities {
        let state = place_name("state name", raw_state)?;
        let entry = limited_cities.entry(state).or_default();
        for raw in raw_cities {
            push_unique(entry, place_name("city name", raw)?);
        }
    }
    limited_cities.retain(|_, cities| !cities.is_empty());

    match doc.zone_type {
        ZoneType::Full => {
            if !limited_cities.is_empty() {
                return Err(CatalogLoadError::WhitelistOnFullZone {
                    zone: zone_code.to_string(),
                });
            }
            if states.is_empty() {
                return Err(CatalogLoadError::EmptyStates {
                    zone: zone_code.to_string(),
                });
            }
        }
        ZoneType::Limited => {
            if limited_cities.is_empty() {
                return Err(CatalogLoadError::EmptyWhitelist {
                    zone: zone_code.to_string(),
                });
            }
            if states.is_empty() {
                states = limited_cities.keys().cloned().collect();
            } else {
                if let Some(state) = limited_cities.keys().find(|s| !states.contains(*s)) {
                    return Err(CatalogLoadError::WhitelistStateNotListed {
                        zone: zone_code.to_string(),
                        state: state.clone(),
                    });
                }
                // States without a whitelisted city are not covered.
                for state in states.iter().filter(|s| !limited_cities.contains_key(*s)) {
                    lints.push(format!(
                        "limited zone {zone_code} lists {state} but whitelists no city there"
                    ));
                }
                states.retain(|s| limited_cities.contains_key(s));
            }
        }
    }

    Ok(ZoneInfo {
        zone_code,
        zone_type: doc.zone_type,
        states,
        limited_cities,
    })
}

type RegionTables = (
    BTreeMap<RegionName, Vec<ZoneCode>>,
    BTreeMap<ZoneCode, RegionName>,
);

fn normalize_regions(
    raw: &BTreeMap<String, Vec<String>>,
    zones: &BTreeMap<ZoneCode, ZoneInfo>,
) -> Result<RegionTables, CatalogLoadError> {
    let mut regions = BTreeMap::new();
    let mut zone_region: BTreeMap<ZoneCode, RegionName> = BTreeMap::new();

    for (raw_region, raw_codes) in raw {
        let region = RegionName::new(raw_region.as_str())?;
        let mut codes = Vec::new();
        for raw_code in raw_codes {
            let code = ZoneCode::new(raw_code.as_str())?;
            if !zones.contains_key(&code) {
                return Err(CatalogLoadError::DanglingZoneReference {
                    region: region.to_string(),
                    zone: code.to_string(),
                });
            }
            match zone_region.get(&code) {
                Some(owner) if *owner == region => continue,
                Some(owner) => {
                    return Err(CatalogLoadError::DuplicateRegionMembership {
                        zone: code.to_string(),
                        first: owner.to_string(),
                        second: region.to_string(),
                    });
                }
                None => {}
            }
            zone_region.insert(code.clone(), region.clone());
            codes.push(code);
        }
        if regions.insert(region.clone(), codes).is_some() {
            return Err(CatalogLoadError::Malformed(format!(
                "region {region} is defined more than once"
            )));
        }
    }

    Ok((regions, zone_region))
}

fn normalize_city_index(
    raw: &BTreeMap<String, Vec<String>>,
) -> Result<BTreeMap<String, Vec<String>>, CatalogLoadError> {
    let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (raw_state, raw_cities) in raw {
        let entry = index.entry(place_name("state name", raw_state)?).or_default();
        for raw in raw_cities {
            push_unique(entry, place_name("city name", raw)?);
        }
    }
    Ok(index)
}

fn lint(
    zones: &BTreeMap<ZoneCode, ZoneInfo>,
    zone_region: &BTreeMap<ZoneCode, RegionName>,
    cities: &BTreeMap<String, Vec<String>>,
    lints: &mut Vec<String>,
) {
    for (code, zone) in zones {
        if !zone_region.contains_key(code) {
            lints.push(format!("zone {code} is not listed in any region"));
        }
        match zone.zone_type {
            ZoneType::Full => {
                for state in &zone.states {
                    if cities.get(state).map_or(true, Vec::is_empty) {
                        lints.push(format!(
                            "full zone {code} covers {state}, which has no cities in the city index"
                        ));
                    }
                }
            }
            ZoneType::Limited => {
                for (state, whitelist) in &zone.limited_cities {
                    let known = cities.get(state).map(Vec::as_slice).unwrap_or(&[]);
                    for city in whitelist.iter().filter(|c| !known.contains(*c)) {
                        lints.push(format!(
                            "limited zone {code} whitelists {city} ({state}), which is not in the city index"
                        ));
                    }
                }
            }
        }
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(yaml: &str) -> Result<CheckedCatalog, CatalogLoadError> {
        check_document(&CatalogDocument::from_yaml_str(yaml).unwrap())
    }

    #[test]
    fn test_dangling_region_reference_fails_fast() {
        let err = check(
            r#"
regions:
  Northeast: [NE1, NE9]
zones:
  NE1: { type: limited, limited_cities: { Assam: [Guwahati] } }
"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CatalogLoadError::DanglingZoneReference {
                region: "Northeast".into(),
                zone: "NE9".into()
            }
        );
    }

    #[test]
    fn test_zone_in_two_regions_is_rejected() {
        let err = check(
            r#"
regions:
  East: [E1]
  Northeast: [E1]
zones:
  E1: { type: full, states: [Odisha] }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogLoadError::DuplicateRegionMembership { .. }));
    }

    #[test]
    fn test_repeated_listing_in_same_region_is_collapsed() {
        let checked = check(
            r#"
regions:
  East: [E1, E1]
zones:
  E1: { type: full, states: [Odisha] }
cities:
  Odisha: [Cuttack]
"#,
        )
        .unwrap();
        let east = RegionName::new("East").unwrap();
        assert_eq!(checked.regions[&east].len(), 1);
    }

    #[test]
    fn test_limited_zone_without_whitelist_is_rejected() {
        let err = check("zones:\n  NE1: { type: limited, states: [Assam], limited_cities: { Assam: [] } }\n")
            .unwrap_err();
        assert_eq!(err, CatalogLoadError::EmptyWhitelist { zone: "NE1".into() });
    }

    #[test]
    fn test_full_zone_without_states_is_rejected() {
        let err = check("zones:\n  E1: { type: full }\n").unwrap_err();
        assert_eq!(err, CatalogLoadError::EmptyStates { zone: "E1".into() });
    }

    #[test]
    fn test_full_zone_with_whitelist_is_rejected() {
        let err = check(
            "zones:\n  E1: { type: full, states: [Odisha], limited_cities: { Odisha: [Cuttack] } }\n",
        )
        .unwrap_err();
        assert_eq!(err, CatalogLoadError::WhitelistOnFullZone { zone: "E1".into() });
    }

    #[test]
    fn test_whitelist_outside_listed_states_is_rejected() {
        let err = check(
            "zones:\n  NE1: { type: limited, states: [Assam], limited_cities: { Sikkim: [Gangtok] } }\n",
        )
        .unwrap_err();
        assert_eq!(
            err,
            CatalogLoadError::WhitelistStateNotListed {
                zone: "NE1".into(),
                state: "Sikkim".into()
            }
        );
    }

    #[test]
    fn test_limited_states_derive_from_whitelist_when_omitted() {
        let checked = check(
            "zones:\n  NE1: { type: limited, limited_cities: { West Bengal: [Siliguri], Assam: [Guwahati] } }\n",
        )
        .unwrap();
        let zone = &checked.zones[&ZoneCode::new("NE1").unwrap()];
        assert_eq!(zone.states, vec!["Assam", "West Bengal"]);
    }

    #[test]
    fn test_limited_states_without_whitelist_are_dropped() {
        let checked = check(
            "zones:\n  NE1: { type: limited, states: [Sikkim, Assam], limited_cities: { Assam: [Guwahati] } }\n",
        )
        .unwrap();
        let zone = &checked.zones[&ZoneCode::new("NE1").unwrap()];
        assert_eq!(zone.states, vec!["Assam"]);
        assert!(checked
            .lints
            .iter()
            .any(|l| l.contains("lists Sikkim but whitelists no city")));
    }

    #[test]
    fn test_names_are_trimmed_and_deduplicated() {
        let checked = check(
            r#"
zones:
  E1: { type: full, states: [" Odisha", "Odisha", Bihar] }
cities:
  Odisha: [Cuttack, " Cuttack ", Puri]
  Bihar: [Patna]
"#,
        )
        .unwrap();
        let zone = &checked.zones[&ZoneCode::new("E1").unwrap()];
        assert_eq!(zone.states, vec!["Odisha", "Bihar"]);
        assert_eq!(checked.cities["Odisha"], vec!["Cuttack", "Puri"]);
    }

    #[test]
    fn test_invalid_zone_code_is_rejected() {
        let err = check("zones:\n  \"E 1\": { type: full, states: [Odisha] }\n").unwrap_err();
        assert!(matches!(err, CatalogLoadError::InvalidIdentifier(_)));
    }

    #[test]
    fn test_tolerated_anomalies_become_lints() {
        let checked = check(
            r#"
zones:
  E1: { type: full, states: [Odisha] }
  NE1:
    type: limited
    states: [Assam, Sikkim]
    limited_cities: { Assam: [Guwahati, Tezpur] }
cities:
  Assam: [Guwahati]
"#,
        )
        .unwrap();
        let lints = checked.lints.join("\n");
        assert!(lints.contains("zone E1 is not listed in any region"));
        assert!(lints.contains("full zone E1 covers Odisha"));
        assert!(lints.contains("lists Sikkim but whitelists no city"));
        assert!(lints.contains("Tezpur"));
        assert!(!lints.contains("Guwahati"));
    }
}

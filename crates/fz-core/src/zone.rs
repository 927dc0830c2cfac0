//! # Zone Model
//!
//! [`ZoneInfo`] is the catalog definition of one pricing zone and
//! [`ZoneConfig`] is the expansion of a selected zone into concrete states
//! and cities.
//!
//! ## Coverage
//!
//! ```text
//! full     every city of every listed state
//! limited  only the whitelisted cities, grouped by state
//! ```
//!
//! A zone *covers* a state when it is full and lists the state, or when it
//! is limited and whitelists at least one city there.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::identity::{CityId, ZoneCode};

/// Coverage semantics of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    /// Every city in every listed state.
    Full,
    /// Only an explicit city whitelist.
    Limited,
}

impl std::fmt::Display for ZoneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Full => "full",
            Self::Limited => "limited",
        })
    }
}

/// Catalog definition of one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInfo {
    /// The zone's unique code.
    pub zone_code: ZoneCode,
    /// Full or limited coverage.
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    /// Ordered, duplicate-free state names. A limited zone lists only the
    /// states holding at least one whitelisted city.
    pub states: Vec<String>,
    /// State → ordered whitelisted city names. Empty for full zones.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub limited_cities: BTreeMap<String, Vec<String>>,
}

impl ZoneInfo {
    /// Whether this is a limited zone.
    pub fn is_limited(&self) -> bool {
        self.zone_type == ZoneType::Limited
    }

    /// Whitelisted cities of a limited zone in `state` (empty for full zones).
    pub fn whitelist_in(&self, state: &str) -> &[String] {
        self.limited_cities
            .get(state)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the zone covers any part of `state`.
    pub fn covers_state(&self, state: &str) -> bool {
        match self.zone_type {
            ZoneType::Full => self.states.iter().any(|s| s == state),
            ZoneType::Limited => !self.whitelist_in(state).is_empty(),
        }
    }

    /// Covered states in catalog order.
    pub fn covered_states(&self) -> impl Iterator<Item = &str> + '_ {
        self.states
            .iter()
            .map(String::as_str)
            .filter(move |s| self.covers_state(s))
    }

    /// Total whitelist size of a limited zone.
    pub fn whitelist_len(&self) -> usize {
        self.limited_cities.values().map(Vec::len).sum()
    }
}

/// Expanded membership of one selected zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneConfig {
    /// The zone this configuration was built for.
    pub zone_code: ZoneCode,
    /// Ordered, duplicate-free states.
    pub selected_states: Vec<String>,
    /// Ordered, duplicate-free cities, serialized as `"city||state"`.
    pub selected_cities: Vec<CityId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limited() -> ZoneInfo {
        ZoneInfo {
            zone_code: ZoneCode::new("NE1").unwrap(),
            zone_type: ZoneType::Limited,
            states: vec!["Assam".into(), "West Bengal".into(), "Sikkim".into()],
            limited_cities: BTreeMap::from([
                ("Assam".to_string(), vec!["Guwahati".to_string()]),
                (
                    "West Bengal".to_string(),
                    vec!["Siliguri".to_string(), "Jalpaiguri".to_string()],
                ),
            ]),
        }
    }

    #[test]
    fn test_limited_zone_covers_only_whitelisted_states() {
        let zone = limited();
        assert!(zone.covers_state("Assam"));
        assert!(zone.covers_state("West Bengal"));
        assert!(!zone.covers_state("Sikkim"));
        let covered: Vec<&str> = zone.covered_states().collect();
        assert_eq!(covered, vec!["Assam", "West Bengal"]);
        assert_eq!(zone.whitelist_len(), 3);
    }

    #[test]
    fn test_full_zone_covers_listed_states() {
        let zone = ZoneInfo {
            zone_code: ZoneCode::new("E1").unwrap(),
            zone_type: ZoneType::Full,
            states: vec!["West Bengal".into(), "Odisha".into()],
            limited_cities: BTreeMap::new(),
        };
        assert!(zone.covers_state("Odisha"));
        assert!(!zone.covers_state("Assam"));
        assert!(zone.whitelist_in("Odisha").is_empty());
    }

    #[test]
    fn test_zone_info_uses_camel_case_and_type_key() {
        let json = serde_json::to_value(limited()).unwrap();
        assert_eq!(json["zoneCode"], "NE1");
        assert_eq!(json["type"], "limited");
        assert!(json["limitedCities"]["Assam"].is_array());
    }

    #[test]
    fn test_zone_config_serializes_composite_cities() {
        let config = ZoneConfig {
            zone_code: ZoneCode::new("NE1").unwrap(),
            selected_states: vec!["West Bengal".into()],
            selected_cities: vec![CityId::new("Siliguri", "West Bengal").unwrap()],
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["selectedCities"][0], "Siliguri||West Bengal");
        assert_eq!(json["selectedStates"][0], "West Bengal");
    }
}

//! # Zone Expansion
//!
//! Expands one zone definition into the concrete states and cities it
//! prices. Full zones take every indexed city of their states; limited zones
//! take exactly their whitelist, restricted to states where it is non-empty.

use fz_catalog::GeographyCatalog;
use fz_core::{CityId, ZoneConfig, ZoneInfo, ZoneType};

/// Expand `zone` against the catalog's city index.
pub fn expand_zone(catalog: &GeographyCatalog, zone: &ZoneInfo) -> ZoneConfig {
    let (selected_states, selected_cities) = match zone.zone_type {
        ZoneType::Full => {
            let cities: Vec<CityId> = zone
                .states
                .iter()
                .flat_map(|state| {
                    catalog
                        .cities_in(state)
                        .iter()
                        .filter_map(move |city| CityId::new(city.as_str(), state.as_str()).ok())
                })
                .collect();
            (zone.states.clone(), cities)
        }
        ZoneType::Limited => {
            let states: Vec<String> = zone.covered_states().map(str::to_string).collect();
            let cities: Vec<CityId> = states
                .iter()
                .flat_map(|state| {
                    zone.whitelist_in(state)
                        .iter()
                        .filter_map(move |city| CityId::new(city.as_str(), state.as_str()).ok())
                })
                .collect();
            (states, cities)
        }
    };

    ZoneConfig {
        zone_code: zone.zone_code.clone(),
        selected_states,
        selected_cities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
zones:
  E1: { type: full, states: [West Bengal, Odisha] }
  NE1:
    type: limited
    states: [West Bengal, Assam, Sikkim]
    limited_cities: { Assam: [Guwahati], West Bengal: [Siliguri, Jalpaiguri] }
cities:
  West Bengal: [Kolkata, Siliguri, Jalpaiguri]
  Odisha: [Cuttack]
  Assam: [Guwahati, Silchar]
"#;

    #[test]
    fn test_full_zone_expands_to_the_city_index() {
        let catalog = GeographyCatalog::from_yaml_str(DOC).unwrap();
        let config = expand_zone(&catalog, catalog.zone_by_str("E1").unwrap());
        assert_eq!(config.selected_states, vec!["West Bengal", "Odisha"]);
        let cities: Vec<String> = config.selected_cities.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            cities,
            vec![
                "Kolkata||West Bengal",
                "Siliguri||West Bengal",
                "Jalpaiguri||West Bengal",
                "Cuttack||Odisha"
            ]
        );
    }

    #[test]
    fn test_limited_zone_expands_to_its_whitelist_in_state_order() {
        let catalog = GeographyCatalog::from_yaml_str(DOC).unwrap();
        let config = expand_zone(&catalog, catalog.zone_by_str("NE1").unwrap());
        assert_eq!(config.selected_states, vec!["West Bengal", "Assam"]);
        let cities: Vec<String> = config.selected_cities.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            cities,
            vec!["Siliguri||West Bengal", "Jalpaiguri||West Bengal", "Guwahati||Assam"]
        );
    }
}

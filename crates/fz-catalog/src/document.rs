//! # Catalog Document Schema
//!
//! The on-disk shape of a geography catalog. Documents are YAML; JSON
//! documents parse through the same path since JSON is a YAML subset.
//!
//! ```text
//! regions:  region name → [zone code]
//! zones:    zone code   → { type, states, limited_cities }
//! cities:   state name  → [city name]          (full city index)
//! ```
//!
//! Identifiers are kept as raw strings at this layer so that consistency
//! errors can name exactly what the document said.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fz_core::{CatalogLoadError, ZoneType};

/// A geography catalog as written in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    /// Region name → ordered zone codes.
    #[serde(default)]
    pub regions: BTreeMap<String, Vec<String>>,
    /// Zone code → zone definition.
    pub zones: BTreeMap<String, ZoneDocument>,
    /// State name → every known city in that state.
    #[serde(default)]
    pub cities: BTreeMap<String, Vec<String>>,
}

/// One zone as written in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneDocument {
    /// `full` or `limited`.
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    /// States the zone touches. May be omitted for limited zones, in which
    /// case it is derived from the whitelist.
    #[serde(default)]
    pub states: Vec<String>,
    /// State → whitelisted cities, limited zones only.
    #[serde(default, alias = "limitedCities")]
    pub limited_cities: BTreeMap<String, Vec<String>>,
}

impl CatalogDocument {
    /// Parse a YAML (or JSON) catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogLoadError::Malformed`] if the text does not match
    /// the schema.
    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogLoadError> {
        serde_yaml::from_str(text)
            .map_err(|e| CatalogLoadError::Malformed(format!("failed to parse catalog: {e}")))
    }
}

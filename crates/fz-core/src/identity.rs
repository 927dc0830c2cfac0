//! # Identity Newtypes
//!
//! Newtype wrappers for the identifiers of the zone engine. A `ZoneCode`
//! cannot be passed where a `RegionName` is expected, and a city is never a
//! bare name: it is always the pair `(city, state)`.
//!
//! ## Composite City Identity
//!
//! The same city name can exist in two states (Aurangabad, Maharashtra and
//! Aurangabad, Bihar). [`CityId`] carries both parts and renders as
//! `"city||state"`, the encoding consumed by the pricing-matrix editor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IdentifierError;

/// Separator between the city and state parts of an encoded [`CityId`].
pub const CITY_ID_SEPARATOR: &str = "||";

const ZONE_CODE_MAX: usize = 32;
const NAME_MAX: usize = 128;

/// Unique identifier of a pricing zone (e.g. `E1`, `NE1`, `X1`).
///
/// Codes are case-sensitive and limited to ASCII alphanumerics plus
/// `-`, `_` and `.`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneCode(String);

impl ZoneCode {
    /// Validate and construct a zone code. Surrounding whitespace is trimmed.
    pub fn new(code: impl Into<String>) -> Result<Self, IdentifierError> {
        let raw = code.into();
        let code = raw.trim();
        if code.is_empty() {
            return Err(IdentifierError::Empty { kind: "zone code" });
        }
        if code.len() > ZONE_CODE_MAX {
            return Err(IdentifierError::TooLong {
                kind: "zone code",
                value: code.to_string(),
                max: ZONE_CODE_MAX,
            });
        }
        if let Some(found) = code
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(IdentifierError::InvalidCharacter {
                kind: "zone code",
                value: code.to_string(),
                found,
            });
        }
        Ok(Self(code.to_string()))
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ZoneCode {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ZoneCode {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ZoneCode> for String {
    fn from(code: ZoneCode) -> Self {
        code.0
    }
}

impl AsRef<str> for ZoneCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Presentation-level grouping name (e.g. `Northeast`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionName(String);

impl RegionName {
    /// Validate and construct a region name. Surrounding whitespace is trimmed.
    pub fn new(name: impl Into<String>) -> Result<Self, IdentifierError> {
        let name = place_name("region name", &name.into())?;
        Ok(Self(name))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RegionName {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RegionName> for String {
    fn from(name: RegionName) -> Self {
        name.0
    }
}

/// A city qualified by its state.
///
/// Ordering is by state, then city, so sorted collections group a state's
/// cities together.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CityId {
    state: String,
    city: String,
}

impl CityId {
    /// Construct from separate city and state names.
    ///
    /// Neither part may be empty or contain the `||` separator.
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Result<Self, IdentifierError> {
        let city = place_name("city name", &city.into())?;
        let state = place_name("state name", &state.into())?;
        Ok(Self { state, city })
    }

    /// Parse the `"city||state"` encoding.
    pub fn parse(encoded: &str) -> Result<Self, IdentifierError> {
        let (city, state) = encoded
            .split_once(CITY_ID_SEPARATOR)
            .ok_or_else(|| IdentifierError::MalformedCityId(encoded.to_string()))?;
        if state.contains(CITY_ID_SEPARATOR) {
            return Err(IdentifierError::MalformedCityId(encoded.to_string()));
        }
        Self::new(city, state)
    }

    /// The city part.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// The state part.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Render as `"city||state"`.
    pub fn encoded(&self) -> String {
        format!("{}{}{}", self.city, CITY_ID_SEPARATOR, self.state)
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.city, CITY_ID_SEPARATOR, self.state)
    }
}

impl FromStr for CityId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CityId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CityId> for String {
    fn from(id: CityId) -> Self {
        id.encoded()
    }
}

/// Identifier of one zone selection wizard instance, used to correlate logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WizardSessionId(pub Uuid);

impl WizardSessionId {
    /// Generate a new random session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for WizardSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WizardSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wizard:{}", self.0)
    }
}

/// Trim and validate a state, city, or region name.
///
/// Rejects empty names, names over 128 characters, control characters, and
/// the `||` separator reserved by [`CityId`].
pub fn place_name(kind: &'static str, raw: &str) -> Result<String, IdentifierError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(IdentifierError::Empty { kind });
    }
    if name.chars().count() > NAME_MAX {
        return Err(IdentifierError::TooLong {
            kind,
            value: name.to_string(),
            max: NAME_MAX,
        });
    }
    if let Some(found) = name.chars().find(|c| c.is_control()) {
        return Err(IdentifierError::InvalidCharacter {
            kind,
            value: name.to_string(),
            found,
        });
    }
    if name.contains(CITY_ID_SEPARATOR) {
        return Err(IdentifierError::MalformedCityId(name.to_string()));
    }
    Ok(name.to_string())
}

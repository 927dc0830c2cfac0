//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the zone engine. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Catalog load errors name the offending region, zone, or state.
//! - Unknown zone codes are NOT errors here: lookups return `None` and
//!   validation reports them inside a [`crate::ValidationResult`].
//! - Using the assignment service before it has a catalog is a
//!   [`NotInitializedError`], a programmer error.

use thiserror::Error;

/// Top-level error for callers that drive the assignment service from a
/// catalog source.
#[derive(Error, Debug)]
pub enum FzError {
    /// The geography catalog could not be loaded.
    #[error("catalog load error: {0}")]
    Catalog(#[from] CatalogLoadError),

    /// A service operation ran before the catalog was loaded.
    #[error(transparent)]
    NotInitialized(#[from] NotInitializedError),
}

/// Failure to load or accept a geography catalog.
///
/// Unrecoverable for the wizard instance that attempted the load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogLoadError {
    /// The backing data source could not be read.
    #[error("catalog source {origin} is unreachable: {reason}")]
    Unreachable {
        /// Human-readable label of the source (path, URL, "builtin").
        origin: String,
        /// Underlying failure.
        reason: String,
    },

    /// The document could not be parsed into the catalog schema.
    #[error("catalog document is malformed: {0}")]
    Malformed(String),

    /// A region lists a zone code with no zone definition.
    #[error("region {region} references zone {zone}, which has no definition")]
    DanglingZoneReference {
        /// The referencing region.
        region: String,
        /// The missing zone code.
        zone: String,
    },

    /// A zone is listed under more than one region.
    #[error("zone {zone} is listed in both region {first} and region {second}")]
    DuplicateRegionMembership {
        /// The zone code.
        zone: String,
        /// The first region that listed it.
        first: String,
        /// The second region that listed it.
        second: String,
    },

    /// A limited zone carries no whitelisted cities.
    #[error("limited zone {zone} has an empty city whitelist")]
    EmptyWhitelist {
        /// The zone code.
        zone: String,
    },

    /// A full zone lists no states.
    #[error("full zone {zone} lists no states")]
    EmptyStates {
        /// The zone code.
        zone: String,
    },

    /// A limited zone whitelists cities in a state missing from its state list.
    #[error("limited zone {zone} whitelists cities in {state}, which is not among its states")]
    WhitelistStateNotListed {
        /// The zone code.
        zone: String,
        /// The state named by the whitelist.
        state: String,
    },

    /// A full zone carries a city whitelist.
    #[error("full zone {zone} must not carry a city whitelist")]
    WhitelistOnFullZone {
        /// The zone code.
        zone: String,
    },

    /// A zone code or region name in the document is not a valid identifier.
    #[error("invalid identifier in catalog: {0}")]
    InvalidIdentifier(#[from] IdentifierError),
}

/// An assignment service operation was called before `initialize()`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("zone assignment service is not initialized (called {operation})")]
pub struct NotInitializedError {
    /// The operation that was attempted.
    pub operation: &'static str,
}

impl NotInitializedError {
    /// Construct for the named operation.
    pub fn new(operation: &'static str) -> Self {
        Self { operation }
    }
}

/// An identifier failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Empty or whitespace-only input.
    #[error("{kind} must not be empty")]
    Empty {
        /// Identifier kind (e.g. "zone code").
        kind: &'static str,
    },

    /// Input longer than the allowed maximum.
    #[error("{kind} {value:?} exceeds {max} characters")]
    TooLong {
        /// Identifier kind.
        kind: &'static str,
        /// The rejected value.
        value: String,
        /// Maximum permitted length.
        max: usize,
    },

    /// Input contains a character outside the permitted set.
    #[error("{kind} {value:?} contains invalid character {found:?}")]
    InvalidCharacter {
        /// Identifier kind.
        kind: &'static str,
        /// The rejected value.
        value: String,
        /// The first offending character.
        found: char,
    },

    /// A composite city identifier is not of the form `city||state`.
    #[error("city identifier {0:?} is not of the form \"city||state\"")]
    MalformedCityId(String),
}

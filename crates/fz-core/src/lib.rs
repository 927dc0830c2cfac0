//! # fz-core — Foundational Types for the Freight Zone Engine
//!
//! This crate is the leaf of the zone engine. It defines the identifiers,
//! the zone model, and the error hierarchy shared by the catalog, the
//! assignment service, and the selection wizard. It depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `ZoneCode`, `RegionName`,
//!    `CityId`, `WizardSessionId`. Validated constructors; no bare strings
//!    crossing crate boundaries for identifiers.
//!
//! 2. **Composite city identity.** A city is identified by `(city, state)`
//!    and rendered as `"city||state"`, so same-named cities in different
//!    states never collide.
//!
//! 3. **Warnings are not errors.** [`ValidationResult`] keeps the two apart;
//!    only errors affect validity.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fz-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod selection;
pub mod validation;
pub mod zone;

// Re-export primary types for ergonomic imports.
pub use error::{CatalogLoadError, FzError, IdentifierError, NotInitializedError};
pub use identity::{place_name, CityId, RegionName, WizardSessionId, ZoneCode, CITY_ID_SEPARATOR};
pub use selection::Selection;
pub use validation::ValidationResult;
pub use zone::{ZoneConfig, ZoneInfo, ZoneType};

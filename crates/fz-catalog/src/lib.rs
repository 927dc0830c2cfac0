//! # fz-catalog — Geography Catalog
//!
//! Loads and checks the reference geography behind freight pricing zones:
//! regions, zone definitions (full or limited), and the full city index.
//!
//! ## Pipeline
//!
//! ```text
//! CatalogSource ──load──▶ CatalogDocument ──check──▶ GeographyCatalog
//!  (file/inline/builtin)    (serde_yaml)    (fail-fast)   + CoverageIndex
//! ```
//!
//! A document with dangling region references, a zone in two regions, or a
//! malformed zone is rejected as a whole. Anomalies that do not break any
//! engine invariant are reported as lints and logged at `warn`.
//!
//! ## Crate Policy
//!
//! - Depends only on `fz-core` internally.
//! - Catalogs are immutable after construction.
//! - No `unsafe` code.

pub mod catalog;
pub mod coverage;
pub mod document;
pub mod source;
pub mod validation;

pub use catalog::GeographyCatalog;
pub use coverage::CoverageIndex;
pub use document::{CatalogDocument, ZoneDocument};
pub use source::{BuiltinCatalogSource, CatalogSource, FileCatalogSource, InlineCatalogSource};
pub use validation::{check_document, CheckedCatalog};

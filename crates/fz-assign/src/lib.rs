//! # fz-assign — Zone Assignment Service
//!
//! Answers questions about a zone selection against a loaded geography
//! catalog:
//!
//! - which regions and zones exist, and what a zone covers;
//! - whether a selection is valid, and where selected zones overlap;
//! - what concrete states and cities a selection expands to.
//!
//! Unknown zone codes are never fatal. Validation reports them as errors in
//! the returned [`fz_core::ValidationResult`]; expansion skips them.
//!
//! ## Crate Policy
//!
//! - Pure and synchronous after initialization.
//! - Holds no wizard or UI state.
//! - No `unsafe` code.

pub mod expansion;
pub mod overlap;
pub mod service;

pub use expansion::expand_zone;
pub use overlap::ZoneOverlap;
pub use service::ZoneAssignmentService;

//! # fz-state — Zone Selection Wizard
//!
//! The orchestration layer of the zone engine. A [`ZoneSelectionWizard`]
//! owns the working selection for one session, consults the assignment
//! service on every change, and on confirmation emits a [`ZoneSetup`]: the
//! expanded zones plus a blank, square [`PriceMatrix`].
//!
//! Data flows one way: catalog → assignment service → wizard → completion
//! callback. The wizard is single-threaded; each action runs to completion.
//!
//! ## Crate Policy
//!
//! - Invalid transitions are errors, never silent no-ops.
//! - Terminal states (`CONFIRMED`, `ERROR`) reject every further action.
//! - Derived views (validation, summaries) are recomputed, never patched.

pub mod matrix;
pub mod summary;
pub mod wizard;

pub use matrix::{PriceMatrix, ZoneSetup};
pub use summary::{summarize_regions, RegionSelectionSummary};
pub use wizard::{
    CompletionCallback, LoadTicket, WizardConfig, WizardError, WizardState,
    WizardTransitionRecord, ZoneSelectionWizard,
};

//! # Zone Selection Wizard
//!
//! Orchestrates one zone selection session: loads the geography catalog
//! once, lets the caller edit a [`Selection`], previews the expansion, and
//! hands the confirmed [`ZoneSetup`] to a completion callback.
//!
//! ## States
//!
//! ```text
//! Loading ──▶ Selecting ──▶ Previewing ──▶ Confirmed (terminal)
//!    │            ▲              │
//!    │            └──────────────┘ (back)
//!    └──▶ Error (terminal)
//! ```
//!
//! ## Load Once
//!
//! The catalog load is the only suspension point. [`ZoneSelectionWizard::begin_load`]
//! claims a flag on the instance and hands out a [`LoadTicket`]; every later
//! call gets `None`. A host with an async runtime fetches the catalog between
//! `begin_load` and [`ZoneSelectionWizard::complete_load`].
//! [`ZoneSelectionWizard::mount`] does both synchronously. A failed load is
//! final for the instance.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fz_assign::ZoneAssignmentService;
use fz_catalog::{CatalogSource, GeographyCatalog};
use fz_core::{
    CatalogLoadError, NotInitializedError, RegionName, Selection, ValidationResult,
    WizardSessionId, ZoneCode, ZoneConfig,
};

use crate::matrix::ZoneSetup;
use crate::summary::{summarize_regions, RegionSelectionSummary};

// ─── Wizard State ────────────────────────────────────────────────────

/// The lifecycle state of a zone selection wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardState {
    /// Waiting for the geography catalog.
    Loading,
    /// Editing the selection.
    Selecting,
    /// Reviewing the expanded selection.
    Previewing,
    /// Setup delivered (terminal).
    Confirmed,
    /// Catalog load failed (terminal).
    Error,
}

impl WizardState {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Error)
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Loading => "LOADING",
            Self::Selecting => "SELECTING",
            Self::Previewing => "PREVIEWING",
            Self::Confirmed => "CONFIRMED",
            Self::Error => "ERROR",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised by wizard actions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// The transition is not valid from the current state.
    #[error("invalid wizard transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state.
        from: String,
        /// Attempted target state.
        to: String,
    },

    /// The wizard is in a terminal state.
    #[error("wizard is in terminal state {state}")]
    TerminalState {
        /// The terminal state.
        state: String,
    },

    /// An editing action was attempted outside `SELECTING`.
    #[error("{action} is only allowed while SELECTING (wizard is {state})")]
    ActionNotAllowed {
        /// The attempted action.
        action: &'static str,
        /// Current state.
        state: String,
    },

    /// Preview or confirmation of an empty selection.
    #[error("no zones selected")]
    EmptySelection,

    /// Preview of a selection with validation errors.
    #[error("selection is invalid: {}", errors.join("; "))]
    InvalidSelection {
        /// The validation errors.
        errors: Vec<String>,
    },

    /// Region-level action on a region the catalog does not define.
    #[error("unknown region {region}")]
    UnknownRegion {
        /// The requested region.
        region: String,
    },

    /// The catalog could not be loaded; the instance is unusable.
    #[error("catalog load failed: {0}")]
    CatalogLoad(#[from] CatalogLoadError),

    /// The assignment service has no catalog.
    #[error(transparent)]
    NotInitialized(#[from] NotInitializedError),
}

// ─── Configuration & Records ─────────────────────────────────────────

/// Caller-supplied wizard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardConfig<V = String> {
    /// Zones to preselect once the catalog is loaded, in order. Codes the
    /// catalog does not know are ignored.
    #[serde(default)]
    pub initial_selected_zones: Vec<String>,
    /// Value of every cell of the generated price matrix.
    pub blank_cell_value: V,
}

/// Record of a wizard state transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardTransitionRecord {
    /// State before the transition.
    pub from_state: WizardState,
    /// State after the transition.
    pub to_state: WizardState,
    /// When the transition occurred.
    pub timestamp: DateTime<Utc>,
    /// Reason for the transition.
    pub reason: String,
}

/// Proof that the caller claimed the single catalog load of a wizard.
#[derive(Debug)]
#[must_use = "a claimed load must be completed with complete_load"]
pub struct LoadTicket {
    session_id: WizardSessionId,
}

impl LoadTicket {
    /// The wizard session the ticket belongs to.
    pub fn session_id(&self) -> WizardSessionId {
        self.session_id
    }
}

/// Callback receiving the confirmed setup.
pub type CompletionCallback<V> = Box<dyn FnOnce(ZoneSetup<V>)>;

// ─── Wizard ──────────────────────────────────────────────────────────

/// One zone selection session.
pub struct ZoneSelectionWizard<V = String> {
    session_id: WizardSessionId,
    state: WizardState,
    config: WizardConfig<V>,
    service: ZoneAssignmentService,
    selection: Selection,
    validation: ValidationResult,
    preview: Vec<ZoneConfig>,
    load_started: bool,
    load_error: Option<CatalogLoadError>,
    transitions: Vec<WizardTransitionRecord>,
    on_complete: Option<CompletionCallback<V>>,
}

impl<V: Clone> ZoneSelectionWizard<V> {
    /// A wizard in `LOADING` that delivers its setup to `on_complete`.
    pub fn new(config: WizardConfig<V>, on_complete: impl FnOnce(ZoneSetup<V>) + 'static) -> Self {
        let mut wizard = Self::without_callback(config);
        wizard.on_complete = Some(Box::new(on_complete));
        wizard
    }

    /// A wizard in `LOADING` with no completion callback. The confirmed
    /// setup is only returned from [`Self::confirm`].
    pub fn without_callback(config: WizardConfig<V>) -> Self {
        Self {
            session_id: WizardSessionId::new(),
            state: WizardState::Loading,
            config,
            service: ZoneAssignmentService::new(),
            selection: Selection::new(),
            validation: ValidationResult::ok(),
            preview: Vec::new(),
            load_started: false,
            load_error: None,
            transitions: Vec::new(),
            on_complete: None,
        }
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Claim the catalog load. Returns `None` if a load was already
    /// claimed for this instance.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.load_started {
            tracing::debug!(session = %self.session_id, "catalog load already claimed");
            return None;
        }
        self.load_started = true;
        Some(LoadTicket {
            session_id: self.session_id,
        })
    }

    /// Finish a claimed load (LOADING → SELECTING or LOADING → ERROR).
    ///
    /// On success the initial selection is seeded and validated. On failure
    /// the wizard moves to `ERROR` and the load error is returned.
    ///
    /// # Errors
    ///
    /// [`WizardError::InvalidTransition`] for a ticket from another wizard,
    /// [`WizardError::TerminalState`] or [`WizardError::InvalidTransition`]
    /// outside `LOADING`, and [`WizardError::CatalogLoad`] for a failed load.
    pub fn complete_load<C>(
        &mut self,
        ticket: LoadTicket,
        result: Result<C, CatalogLoadError>,
    ) -> Result<(), WizardError>
    where
        C: Into<Arc<GeographyCatalog>>,
    {
        if ticket.session_id != self.session_id {
            return Err(WizardError::InvalidTransition {
                from: self.state.to_string(),
                to: WizardState::Selecting.to_string(),
            });
        }
        self.require_state(WizardState::Loading, WizardState::Selecting)?;

        match result {
            Ok(catalog) => {
                self.service = ZoneAssignmentService::with_catalog(catalog.into());
                self.seed_initial_selection()?;
                self.revalidate()?;
                let reason = format!("catalog loaded, {} zones preselected", self.selection.len());
                self.do_transition(WizardState::Selecting, &reason);
                Ok(())
            }
            Err(err) => {
                self.load_error = Some(err.clone());
                self.do_transition(WizardState::Error, &err.to_string());
                Err(WizardError::CatalogLoad(err))
            }
        }
    }

    /// Load the catalog from `source` synchronously, at most once per
    /// instance. Repeated calls are no-ops.
    ///
    /// # Errors
    ///
    /// [`WizardError::CatalogLoad`] when the source fails.
    pub fn mount(&mut self, source: &dyn CatalogSource) -> Result<(), WizardError> {
        match self.begin_load() {
            Some(ticket) => self.complete_load(ticket, source.load()),
            None => Ok(()),
        }
    }

    fn seed_initial_selection(&mut self) -> Result<(), WizardError> {
        let catalog = self.service.catalog()?;
        for raw in &self.config.initial_selected_zones {
            match ZoneCode::new(raw.as_str()) {
                Ok(code) if catalog.contains_zone(&code) => {
                    self.selection.insert(code);
                }
                _ => tracing::debug!(
                    session = %self.session_id,
                    zone = %raw,
                    "ignoring unknown initial zone"
                ),
            }
        }
        Ok(())
    }

    // ── Selecting ───────────────────────────────────────────────────

    /// Add `code` if absent, remove it if present. Returns whether the zone
    /// is selected afterwards.
    ///
    /// # Errors
    ///
    /// [`WizardError::ActionNotAllowed`] outside `SELECTING`.
    pub fn toggle_zone(&mut self, code: ZoneCode) -> Result<bool, WizardError> {
        self.require_selecting("toggle_zone")?;
        let selected = self.selection.toggle(code);
        self.revalidate()?;
        Ok(selected)
    }

    /// Select every zone of `region` in one update. Returns how many zones
    /// were newly added.
    ///
    /// # Errors
    ///
    /// [`WizardError::UnknownRegion`] if the catalog has no such region,
    /// [`WizardError::ActionNotAllowed`] outside `SELECTING`.
    pub fn select_region(&mut self, region: &str) -> Result<usize, WizardError> {
        self.require_selecting("select_region")?;
        let zones = self.region_zones(region)?;
        let added = self.selection.insert_all(zones);
        self.revalidate()?;
        Ok(added)
    }

    /// Deselect every zone of `region` in one update. Returns how many
    /// zones were removed.
    ///
    /// # Errors
    ///
    /// [`WizardError::UnknownRegion`] if the catalog has no such region,
    /// [`WizardError::ActionNotAllowed`] outside `SELECTING`.
    pub fn clear_region(&mut self, region: &str) -> Result<usize, WizardError> {
        self.require_selecting("clear_region")?;
        let zones = self.region_zones(region)?;
        let removed = self.selection.remove_all(zones.iter());
        self.revalidate()?;
        Ok(removed)
    }

    fn region_zones(&self, region: &str) -> Result<Vec<ZoneCode>, WizardError> {
        let unknown = || WizardError::UnknownRegion {
            region: region.to_string(),
        };
        let name = RegionName::new(region).map_err(|_| unknown())?;
        self.service
            .catalog()?
            .region_zones(&name)
            .map(<[ZoneCode]>::to_vec)
            .ok_or_else(unknown)
    }

    fn revalidate(&mut self) -> Result<(), WizardError> {
        self.validation = self.service.validate_zone_selection(&self.selection)?;
        Ok(())
    }

    // ── Preview & Confirm ───────────────────────────────────────────

    /// Expand the selection and review it (SELECTING → PREVIEWING).
    ///
    /// # Errors
    ///
    /// [`WizardError::EmptySelection`] or [`WizardError::InvalidSelection`]
    /// when the selection cannot be previewed.
    pub fn preview(&mut self) -> Result<&[ZoneConfig], WizardError> {
        self.require_state(WizardState::Selecting, WizardState::Previewing)?;
        if self.selection.is_empty() {
            return Err(WizardError::EmptySelection);
        }
        if !self.validation.is_valid {
            return Err(WizardError::InvalidSelection {
                errors: self.validation.errors.clone(),
            });
        }
        self.preview = self.service.build_zone_config(&self.selection)?;
        let reason = format!("previewing {} zones", self.preview.len());
        self.do_transition(WizardState::Previewing, &reason);
        Ok(&self.preview)
    }

    /// Return to editing (PREVIEWING → SELECTING). The selection is kept.
    pub fn back_to_selecting(&mut self) -> Result<(), WizardError> {
        self.require_state(WizardState::Previewing, WizardState::Selecting)?;
        self.preview.clear();
        self.do_transition(WizardState::Selecting, "back to selection");
        Ok(())
    }

    /// Confirm the previewed zones (PREVIEWING → CONFIRMED).
    ///
    /// Builds the setup with a blank price matrix, hands a copy to the
    /// completion callback, and returns it.
    ///
    /// # Errors
    ///
    /// [`WizardError::InvalidTransition`] outside `PREVIEWING` and
    /// [`WizardError::EmptySelection`] if nothing was previewed. The
    /// callback is not called on error.
    pub fn confirm(&mut self) -> Result<ZoneSetup<V>, WizardError> {
        self.require_state(WizardState::Previewing, WizardState::Confirmed)?;
        if self.preview.is_empty() {
            return Err(WizardError::EmptySelection);
        }
        let setup = ZoneSetup::new(self.preview.clone(), &self.config.blank_cell_value);
        let reason = format!("confirmed {} zones", setup.zones.len());
        self.do_transition(WizardState::Confirmed, &reason);
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(setup.clone());
        }
        Ok(setup)
    }

    // ── Views ───────────────────────────────────────────────────────

    /// Session identifier used in logs.
    pub fn session_id(&self) -> WizardSessionId {
        self.session_id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WizardState {
        self.state
    }

    /// Whether the wizard is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// The working selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Validation of the current selection.
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    /// Expansion stored by the last preview. Empty outside `PREVIEWING`
    /// and `CONFIRMED`.
    pub fn previewed_zones(&self) -> &[ZoneConfig] {
        &self.preview
    }

    /// The loaded catalog, if any.
    pub fn catalog(&self) -> Option<&Arc<GeographyCatalog>> {
        self.service.catalog().ok()
    }

    /// The assignment service backing this wizard.
    pub fn service(&self) -> &ZoneAssignmentService {
        &self.service
    }

    /// The error that ended the load, if it failed.
    pub fn load_error(&self) -> Option<&CatalogLoadError> {
        self.load_error.as_ref()
    }

    /// Ordered log of state transitions.
    pub fn transitions(&self) -> &[WizardTransitionRecord] {
        &self.transitions
    }

    /// Per-region selection counts. Empty before the catalog is loaded.
    pub fn region_summaries(&self) -> Vec<RegionSelectionSummary> {
        match self.service.catalog() {
            Ok(catalog) => summarize_regions(catalog, &self.selection),
            Err(_) => Vec::new(),
        }
    }

    // ── Internals ───────────────────────────────────────────────────

    fn require_state(&self, expected: WizardState, target: WizardState) -> Result<(), WizardError> {
        if self.state.is_terminal() {
            return Err(WizardError::TerminalState {
                state: self.state.to_string(),
            });
        }
        if self.state != expected {
            return Err(WizardError::InvalidTransition {
                from: self.state.to_string(),
                to: target.to_string(),
            });
        }
        Ok(())
    }

    fn require_selecting(&self, action: &'static str) -> Result<(), WizardError> {
        if self.state.is_terminal() {
            return Err(WizardError::TerminalState {
                state: self.state.to_string(),
            });
        }
        if self.state != WizardState::Selecting {
            return Err(WizardError::ActionNotAllowed {
                action,
                state: self.state.to_string(),
            });
        }
        Ok(())
    }

    fn do_transition(&mut self, to: WizardState, reason: &str) {
        tracing::info!(
            session = %self.session_id,
            from = %self.state,
            to = %to,
            reason,
            "wizard transition"
        );
        self.transitions.push(WizardTransitionRecord {
            from_state: self.state,
            to_state: to,
            timestamp: Utc::now(),
            reason: reason.to_string(),
        });
        self.state = to;
    }
}

impl<V: fmt::Debug> fmt::Debug for ZoneSelectionWizard<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoneSelectionWizard")
            .field("session_id", &self.session_id)
            .field("state", &self.state)
            .field("config", &self.config)
            .field("selection", &self.selection)
            .field("validation", &self.validation)
            .field("preview", &self.preview.len())
            .field("load_started", &self.load_started)
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────


#[cfg(test)]
mod proptests {
    use super::*;
    use fz_catalog::BuiltinCatalogSource;
    use proptest::prelude::*;

    const CODES: &[&str] = &["N1", "W1", "E1", "E2", "NE1", "NE2", "X1", "C1"];

    proptest! {
        #[test]
        fn confirmed_matrix_is_square(picks in proptest::collection::vec(proptest::sample::select(CODES), 1..8)) {
            let mut wizard: ZoneSelectionWizard = ZoneSelectionWizard::without_callback(WizardConfig {
                initial_selected_zones: picks.iter().map(|s| s.to_string()).collect(),
                blank_cell_value: String::new(),
            });
            wizard.mount(&BuiltinCatalogSource).unwrap();
            wizard.preview().unwrap();
            let setup = wizard.confirm().unwrap();

            let n = wizard.selection().len();
            prop_assert_eq!(setup.zones.len(), n);
            prop_assert_eq!(setup.price_matrix.cell_count(), n * n);
            for from in wizard.selection() {
                for to in wizard.selection() {
                    prop_assert_eq!(setup.price_matrix.get(from, to), Some(&String::new()));
                }
            }
        }
    }
}

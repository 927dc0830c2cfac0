//! # Validation Results
//!
//! Outcome of validating a zone selection. Errors block progression,
//! warnings are informational.

use serde::{Deserialize, Serialize};

/// Result of validating a zone selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// `true` iff `errors` is empty.
    pub is_valid: bool,
    /// Non-fatal findings (e.g. zone overlap).
    pub warnings: Vec<String>,
    /// Blocking findings (e.g. unknown zone code).
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A valid result with no findings.
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Add an error. Marks the result invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Add a warning (does not affect validity).
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

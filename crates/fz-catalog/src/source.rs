//! # Catalog Sources
//!
//! Where a geography catalog comes from. The engine does not care whether
//! the catalog is a file on disk, text handed over by a caller, or the
//! reference geography compiled into this crate: each is a
//! [`CatalogSource`], and loading either yields a checked
//! [`GeographyCatalog`] or a [`CatalogLoadError`].

use std::fmt;
use std::path::{Path, PathBuf};

use fz_core::CatalogLoadError;

use crate::catalog::GeographyCatalog;

const BUILTIN_CATALOG: &str = include_str!("../data/india_zones.yaml");

/// A provider of geography catalogs.
///
/// Implementations must be `Send + Sync` so a source can be handed to a
/// loader thread. The trait is object-safe to support runtime selection.
pub trait CatalogSource: Send + Sync {
    /// Human-readable label of the source, used in logs and errors.
    fn describe(&self) -> String;

    /// Fetch, parse, and check the catalog.
    fn load(&self) -> Result<GeographyCatalog, CatalogLoadError>;
}

/// A catalog document on the local filesystem (YAML or JSON).
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    /// Source reading the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The document path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalogSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<GeographyCatalog, CatalogLoadError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| CatalogLoadError::Unreachable {
            origin: self.describe(),
            reason: e.to_string(),
        })?;
        let catalog = GeographyCatalog::from_yaml_str(&text)?;
        log_loaded(&self.describe(), &catalog);
        Ok(catalog)
    }
}

/// Catalog text supplied by the caller.
#[derive(Clone)]
pub struct InlineCatalogSource {
    label: String,
    text: String,
}

impl InlineCatalogSource {
    /// Source over `text`, reported as `label`.
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

impl fmt::Debug for InlineCatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineCatalogSource")
            .field("label", &self.label)
            .field("len", &self.text.len())
            .finish()
    }
}

impl CatalogSource for InlineCatalogSource {
    fn describe(&self) -> String {
        format!("inline:{}", self.label)
    }

    fn load(&self) -> Result<GeographyCatalog, CatalogLoadError> {
        let catalog = GeographyCatalog::from_yaml_str(&self.text)?;
        log_loaded(&self.describe(), &catalog);
        Ok(catalog)
    }
}

/// The reference geography compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalogSource;

impl BuiltinCatalogSource {
    /// The raw YAML of the built-in catalog.
    pub fn document_text() -> &'static str {
        BUILTIN_CATALOG
    }
}

impl CatalogSource for BuiltinCatalogSource {
    fn describe(&self) -> String {
        "builtin".to_string()
    }

    fn load(&self) -> Result<GeographyCatalog, CatalogLoadError> {
        let catalog = GeographyCatalog::from_yaml_str(BUILTIN_CATALOG)?;
        log_loaded(&self.describe(), &catalog);
        Ok(catalog)
    }
}

fn log_loaded(origin: &str, catalog: &GeographyCatalog) {
    tracing::info!(
        origin,
        regions = catalog.region_count(),
        zones = catalog.zone_count(),
        lints = catalog.lints().len(),
        "geography catalog loaded"
    );
}

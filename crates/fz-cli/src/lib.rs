//! # fz-cli — CLI Tool for the Freight Zone Engine
//!
//! Provides the `fz` command-line interface over the catalog, the
//! assignment service, and the selection wizard.
//!
//! ## Subcommands
//!
//! - `fz regions`: List regions and their zones.
//! - `fz zone <CODE>`: Show one zone definition.
//! - `fz validate <CODE>...`: Validate a selection (exit 1 when invalid).
//! - `fz expand <CODE>...`: Expand a selection into states and cities.
//! - `fz setup <CODE>...`: Run a wizard session and print the zone setup.
//! - `fz lookup <CITY> <STATE>`: Which zones cover a city.
//! - `fz check-catalog`: Load the catalog and report lints and overlaps.
//!
//! ## Catalog Resolution
//!
//! ```bash
//! fz --catalog zones.yaml regions          # explicit file
//! FZ_CATALOG_PATH=zones.yaml fz regions    # environment
//! fz regions                               # built-in catalog
//! ```

pub mod inspect;
pub mod selection;
pub mod setup;

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use fz_assign::ZoneAssignmentService;
use fz_catalog::{BuiltinCatalogSource, CatalogSource, FileCatalogSource, GeographyCatalog};
use fz_core::FzError;

/// Environment variable naming the catalog document when `--catalog` is absent.
pub const CATALOG_PATH_ENV: &str = "FZ_CATALOG_PATH";

/// Output rendering for subcommands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Catalog document given on the command line.
    pub catalog: Option<PathBuf>,
    /// Output rendering.
    pub format: OutputFormat,
}

impl GlobalOptions {
    /// The catalog source these options select, consulting the environment.
    pub fn catalog_source(&self) -> Box<dyn CatalogSource> {
        select_catalog_source(self.catalog.as_deref(), std::env::var_os(CATALOG_PATH_ENV))
    }

    /// Load the selected catalog.
    pub fn load_catalog(&self) -> Result<GeographyCatalog> {
        let source = self.catalog_source();
        source
            .load()
            .with_context(|| format!("failed to load catalog from {}", source.describe()))
    }

    /// An assignment service initialized from the selected catalog.
    pub fn assignment_service(&self) -> Result<ZoneAssignmentService, FzError> {
        let source = self.catalog_source();
        let mut service = ZoneAssignmentService::new();
        service.initialize(&*source)?;
        Ok(service)
    }
}

/// Pick the catalog source: explicit path, then the environment, then the
/// built-in catalog. An empty environment value counts as unset.
pub fn select_catalog_source(explicit: Option<&Path>, env: Option<OsString>) -> Box<dyn CatalogSource> {
    if let Some(path) = explicit {
        tracing::debug!(path = %path.display(), "using catalog from --catalog");
        return Box::new(FileCatalogSource::new(path));
    }
    match env.filter(|v| !v.is_empty()) {
        Some(path) => {
            let path = PathBuf::from(path);
            tracing::debug!(path = %path.display(), "using catalog from {CATALOG_PATH_ENV}");
            Box::new(FileCatalogSource::new(path))
        }
        None => Box::new(BuiltinCatalogSource),
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    writeln!(out, "{json}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins_over_environment() {
        let source = select_catalog_source(
            Some(Path::new("/etc/fz/zones.yaml")),
            Some(OsString::from("/tmp/other.yaml")),
        );
        assert_eq!(source.describe(), "/etc/fz/zones.yaml");
    }

    #[test]
    fn test_environment_used_when_no_flag() {
        let source = select_catalog_source(None, Some(OsString::from("/tmp/other.yaml")));
        assert_eq!(source.describe(), "/tmp/other.yaml");
    }

    #[test]
    fn test_builtin_is_the_fallback() {
        assert_eq!(select_catalog_source(None, None).describe(), "builtin");
        assert_eq!(
            select_catalog_source(None, Some(OsString::new())).describe(),
            "builtin"
        );
    }

    #[test]
    fn test_load_failure_names_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let options = GlobalOptions {
            catalog: Some(dir.path().join("missing.yaml")),
            format: OutputFormat::Text,
        };
        let err = options.load_catalog().unwrap_err();
        assert!(format!("{err:#}").contains("missing.yaml"));
    }

    #[test]
    fn test_assignment_service_reports_catalog_failure() {
        let dir = tempfile::tempdir().unwrap();
        let options = GlobalOptions {
            catalog: Some(dir.path().join("missing.yaml")),
            format: OutputFormat::Text,
        };
        let err = options.assignment_service().unwrap_err();
        assert!(matches!(
            err,
            FzError::Catalog(fz_core::CatalogLoadError::Unreachable { .. })
        ));
        assert!(GlobalOptions::default()
            .assignment_service()
            .unwrap()
            .is_initialized());
    }

    #[test]
    fn test_write_json_is_pretty() {
        let mut out = Vec::new();
        write_json(&mut out, &serde_json::json!({"a": 1})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"a\": 1\n}\n");
    }
}

//! # Setup Subcommand
//!
//! Runs a full zone selection session non-interactively: mount the wizard,
//! preselect the given zones, preview, confirm, and print the zone setup
//! document the pricing editor consumes.
//!
//! ```bash
//! fz setup E1 NE1 X1
//! fz setup --region Northeast --blank 0 W1
//! ```

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use fz_core::ZoneCode;
use fz_state::{WizardConfig, ZoneSelectionWizard};

use crate::{write_json, GlobalOptions, OutputFormat};

/// Arguments for `fz setup`.
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Zone codes to select, in order.
    pub codes: Vec<String>,

    /// Select every zone of a region. May be repeated.
    #[arg(long = "region")]
    pub regions: Vec<String>,

    /// Value placed in every price matrix cell.
    #[arg(long, default_value = "")]
    pub blank: String,
}

/// Execute `fz setup`. Exits 1 when the selection cannot be previewed.
pub fn run_setup(args: &SetupArgs, opts: &GlobalOptions, out: &mut dyn Write) -> Result<u8> {
    let mut wizard = ZoneSelectionWizard::without_callback(WizardConfig {
        initial_selected_zones: Vec::new(),
        blank_cell_value: args.blank.clone(),
    });
    let source = opts.catalog_source();
    wizard
        .mount(&*source)
        .with_context(|| format!("failed to load catalog from {}", source.describe()))?;

    for raw in &args.codes {
        let code = ZoneCode::new(raw.as_str()).with_context(|| format!("invalid zone code {raw:?}"))?;
        if !wizard.selection().contains(&code) {
            wizard.toggle_zone(code)?;
        }
    }
    for region in &args.regions {
        wizard.select_region(region)?;
    }

    for warning in &wizard.validation().warnings {
        tracing::warn!("{warning}");
    }
    if let Err(err) = wizard.preview() {
        writeln!(out, "setup: {err}")?;
        return Ok(1);
    }
    let setup = wizard.confirm()?;

    match opts.format {
        OutputFormat::Json => write_json(out, &setup)?,
        OutputFormat::Text => {
            let codes: Vec<&str> = setup.zones.iter().map(|z| z.zone_code.as_str()).collect();
            writeln!(out, "setup: CONFIRMED ({})", wizard.session_id())?;
            writeln!(out, "  zones:        {}", codes.join(", "))?;
            writeln!(out, "  matrix cells: {}", setup.price_matrix.cell_count())?;
            for zone in &setup.zones {
                writeln!(
                    out,
                    "  {}: {} states, {} cities",
                    zone.zone_code,
                    zone.selected_states.len(),
                    zone.selected_cities.len()
                )?;
            }
        }
    }
    Ok(0)
}

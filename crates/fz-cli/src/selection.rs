//! # Selection Subcommands
//!
//! `fz validate` and `fz expand` run a zone selection given on the command
//! line through the assignment service.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use fz_assign::{ZoneAssignmentService, ZoneOverlap};
use fz_core::{FzError, ValidationResult};

use crate::{write_json, GlobalOptions, OutputFormat};

/// Arguments for `fz validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Zone codes to validate.
    #[arg(num_args = 0..)]
    pub codes: Vec<String>,
}

/// Arguments for `fz expand`.
#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Zone codes to expand, in output order.
    #[arg(required = true)]
    pub codes: Vec<String>,
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    #[serde(flatten)]
    result: &'a ValidationResult,
    overlaps: &'a [ZoneOverlap],
}

fn service(opts: &GlobalOptions) -> Result<ZoneAssignmentService> {
    opts.assignment_service().context("failed to initialize zone assignment service")
}

fn analyze(
    service: &ZoneAssignmentService,
    codes: &[String],
) -> Result<(ValidationResult, Vec<ZoneOverlap>), FzError> {
    Ok((
        service.validate_zone_selection(codes)?,
        service.overlap_report(codes)?,
    ))
}

/// Execute `fz validate`. Exits 1 when the selection has errors.
pub fn run_validate(args: &ValidateArgs, opts: &GlobalOptions, out: &mut dyn Write) -> Result<u8> {
    let service = service(opts)?;
    let (result, overlaps) = analyze(&service, &args.codes)?;

    match opts.format {
        OutputFormat::Json => write_json(
            out,
            &ValidationReport {
                result: &result,
                overlaps: &overlaps,
            },
        )?,
        OutputFormat::Text => {
            writeln!(out, "selection: {}", if result.is_valid { "VALID" } else { "INVALID" })?;
            for error in &result.errors {
                writeln!(out, "  error:   {error}")?;
            }
            for warning in &result.warnings {
                writeln!(out, "  warning: {warning}")?;
            }
        }
    }

    Ok(if result.is_valid { 0 } else { 1 })
}

/// Execute `fz expand`. Unknown codes are skipped with a warning on stderr.
pub fn run_expand(args: &ExpandArgs, opts: &GlobalOptions, out: &mut dyn Write) -> Result<u8> {
    let service = service(opts)?;
    let configs = service.build_zone_config(&args.codes)?;
    if configs.len() < args.codes.len() {
        tracing::warn!(
            requested = args.codes.len(),
            expanded = configs.len(),
            "some zone codes were unknown or repeated and were skipped"
        );
    }

    match opts.format {
        OutputFormat::Json => write_json(out, &configs)?,
        OutputFormat::Text => {
            for config in &configs {
                writeln!(out, "{}", config.zone_code)?;
                writeln!(out, "  states: {}", config.selected_states.join(", "))?;
                writeln!(out, "  cities: {}", config.selected_cities.len())?;
                for city in &config.selected_cities {
                    writeln!(out, "    {city}")?;
                }
            }
        }
    }
    Ok(0)
}

//! # Catalog Inspection Subcommands
//!
//! Read-only views over the geography catalog.
//!
//! ```bash
//! fz regions
//! fz zone NE1
//! fz lookup Siliguri "West Bengal"
//! fz check-catalog --format json
//! ```

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use fz_core::{CityId, ZoneCode};

use crate::{write_json, GlobalOptions, OutputFormat};

/// Arguments for `fz regions`.
#[derive(Args, Debug)]
pub struct RegionsArgs {}

/// Arguments for `fz zone`.
#[derive(Args, Debug)]
pub struct ZoneArgs {
    /// Zone code (e.g. NE1).
    pub code: String,
}

/// Arguments for `fz lookup`.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// City name.
    pub city: String,
    /// State the city is in.
    pub state: String,
}

/// Arguments for `fz check-catalog`.
#[derive(Args, Debug)]
pub struct CheckCatalogArgs {
    /// Exit with status 1 when the catalog has lints.
    #[arg(long)]
    pub strict: bool,
}

/// Execute `fz regions`.
pub fn run_regions(_args: &RegionsArgs, opts: &GlobalOptions, out: &mut dyn Write) -> Result<u8> {
    let catalog = opts.load_catalog()?;
    match opts.format {
        OutputFormat::Json => write_json(out, catalog.regions())?,
        OutputFormat::Text => {
            for (region, zones) in catalog.regions() {
                let codes: Vec<&str> = zones.iter().map(ZoneCode::as_str).collect();
                writeln!(out, "{region}: {}", codes.join(", "))?;
            }
        }
    }
    Ok(0)
}

/// Execute `fz zone`. Exits 1 when the catalog has no such zone.
pub fn run_zone(args: &ZoneArgs, opts: &GlobalOptions, out: &mut dyn Write) -> Result<u8> {
    let catalog = opts.load_catalog()?;
    let Some(zone) = catalog.zone_by_str(&args.code) else {
        writeln!(out, "unknown zone {}", args.code.trim())?;
        return Ok(1);
    };

    match opts.format {
        OutputFormat::Json => write_json(out, zone)?,
        OutputFormat::Text => {
            writeln!(out, "Zone: {}", zone.zone_code)?;
            writeln!(out, "  Type:   {}", zone.zone_type)?;
            if let Some(region) = catalog.region_of(&zone.zone_code) {
                writeln!(out, "  Region: {region}")?;
            }
            writeln!(out, "  States: {}", zone.states.join(", "))?;
            if zone.is_limited() {
                writeln!(out, "  Cities:")?;
                for (state, cities) in &zone.limited_cities {
                    writeln!(out, "    {state}: {}", cities.join(", "))?;
                }
            }
        }
    }
    Ok(0)
}

/// Execute `fz lookup`.
pub fn run_lookup(args: &LookupArgs, opts: &GlobalOptions, out: &mut dyn Write) -> Result<u8> {
    let service = opts
        .assignment_service()
        .context("failed to initialize zone assignment service")?;
    let zones = service.zones_for_city(&args.city, &args.state)?;

    match opts.format {
        OutputFormat::Json => write_json(out, &zones)?,
        OutputFormat::Text => {
            let city = format!("{}, {}", args.city.trim(), args.state.trim());
            if zones.is_empty() {
                writeln!(out, "{city}: not covered by any zone")?;
            } else {
                let codes: Vec<&str> = zones.iter().map(ZoneCode::as_str).collect();
                writeln!(out, "{city}: {}", codes.join(", "))?;
            }
        }
    }
    Ok(0)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogReport<'a> {
    regions: usize,
    zones: usize,
    states: usize,
    covered_cities: usize,
    lints: &'a [String],
    contested_cities: Vec<ContestedCity<'a>>,
}

#[derive(Serialize)]
struct ContestedCity<'a> {
    city: &'a CityId,
    zones: &'a [ZoneCode],
}

/// Execute `fz check-catalog`.
pub fn run_check_catalog(args: &CheckCatalogArgs, opts: &GlobalOptions, out: &mut dyn Write) -> Result<u8> {
    let catalog = opts.load_catalog()?;
    let report = CatalogReport {
        regions: catalog.region_count(),
        zones: catalog.zone_count(),
        states: catalog.state_count(),
        covered_cities: catalog.coverage().covered_city_count(),
        lints: catalog.lints(),
        contested_cities: catalog
            .coverage()
            .contested_cities()
            .map(|(city, zones)| ContestedCity { city, zones })
            .collect(),
    };

    match opts.format {
        OutputFormat::Json => write_json(out, &report)?,
        OutputFormat::Text => {
            writeln!(out, "catalog: OK")?;
            writeln!(out, "  regions:        {}", report.regions)?;
            writeln!(out, "  zones:          {}", report.zones)?;
            writeln!(out, "  states:         {}", report.states)?;
            writeln!(out, "  covered cities: {}", report.covered_cities)?;
            writeln!(out, "  lints:          {}", report.lints.len())?;
            for lint in report.lints {
                writeln!(out, "    - {lint}")?;
            }
            writeln!(out, "  contested cities: {}", report.contested_cities.len())?;
            for contested in &report.contested_cities {
                let codes: Vec<&str> = contested.zones.iter().map(ZoneCode::as_str).collect();
                writeln!(out, "    - {}: {}", contested.city, codes.join(", "))?;
            }
        }
    }

    Ok(if args.strict && !report.lints.is_empty() { 1 } else { 0 })
}

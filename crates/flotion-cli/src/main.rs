// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FlotION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

mod args;
mod export;
mod loaders;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use flotion_core::{SCENARIO_PRESETS, Scenario, run_scenarios};

use crate::args::Cli;
use crate::export::{CsvSheetWriter, ReportSink, TableFormatter};
use crate::loaders::{CsvFleetLoader, FleetDataSource};

fn main() -> Result<()> {
    // Initialize tracing with env filter support
    // Respects RUST_LOG environment variable
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    info!("Starting FlotION fleet scenario report");
    info!("   Input:  {}", cli.input_dir.display());
    info!("   Output: {}", cli.output_dir.display());

    let data = CsvFleetLoader::new(cli.input_dir).load()?;

    let scenarios: Vec<Scenario> = SCENARIO_PRESETS.iter().map(|p| p.scenario).collect();
    let sheets = run_scenarios(&scenarios, &data.vehicles, &data.totals, &data.costs)?;

    let mut sink = CsvSheetWriter::new(cli.output_dir)?;
    for sheet in &sheets {
        sink.write_sheet(sheet)?;
    }

    println!("{}", TableFormatter::format_summary(&sheets));
    info!("Report complete: {} sheets", sheets.len());
    Ok(())
}

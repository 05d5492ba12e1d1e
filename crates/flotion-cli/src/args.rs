// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FlotION.

//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "flotion")]
#[command(author, version, about = "FlotION - fleet CO2 & replacement-cost scenario reporter")]
#[command(
    long_about = "One-shot batch reporter: loads the fleet master data and the emission/cost\n\
    reference tables from CSV, evaluates every what-if scenario, and writes one\n\
    sheet per scenario to the output directory.\n\
    \nExpected inputs in --input-dir:\n  \
    total_service_{big,medium,small}.csv, total_work.csv   (fuel, co2)\n  \
    kostnader/{brand,fuel}_{small,medium,big,work}.csv     (key, cost)\n  \
    cars.csv         vehicle master (Latin-1, semicolon separated)\n  \
    fordonspark.csv  per-vehicle CO2 override, by row order\n\
    \nLogging is controlled via RUST_LOG (default: info)."
)]
pub struct Cli {
    /// Directory containing the fleet CSV inputs
    #[arg(long, default_value = ".")]
    pub input_dir: PathBuf,

    /// Directory the per-scenario report sheets are written to
    #[arg(long, default_value = "report")]
    pub output_dir: PathBuf,
}

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

//! Scenario evaluation engine for fleet CO2 and replacement-cost reports.
//!
//! The pipeline per scenario: apply the scenario's filters to independent
//! copies of the reference tables and the fleet, pick the minimum-CO2 fuel
//! per category, keep only vehicles that would improve, run the bounded
//! big-to-medium reassignment, join replacement costs, and merge the result
//! back over the full fleet for the report sheet.

pub mod costing;
pub mod optimizer;
pub mod report;
pub mod scenario;
pub mod selector;
pub mod sheet;

pub use costing::{assign_costs, refine_cost_scenario};
pub use optimizer::{REPLACEMENT_REGIONS, optimize_big};
pub use report::{ReportSheet, run_scenarios};
pub use scenario::{SCENARIO_PRESETS, Scenario, ScenarioPreset};
pub use selector::{OptimalChoices, filter_better_co2, find_optimal};
pub use sheet::SheetRow;

// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FlotION.

//! Runs every scenario and builds one report sheet per scenario.

use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::{debug, info};

use flotion_types::{Category, CostBook, EmissionTotals, Vehicle};

use crate::costing::{assign_costs, refine_cost_scenario};
use crate::optimizer::optimize_big;
use crate::scenario::Scenario;
use crate::selector::{filter_better_co2, find_optimal};
use crate::sheet::SheetRow;

/// One finished sheet: the full fleet with scenario-derived columns.
#[derive(Debug, Clone)]
pub struct ReportSheet {
    pub scenario: Scenario,
    pub rows: Vec<SheetRow>,
    /// Vehicles the scenario selected for replacement.
    pub candidates: usize,
    /// Big vans the optimizer reassigned to medium.
    pub reassigned: usize,
}

/// Evaluate the scenarios over independent copies of the inputs.
///
/// A failure in any scenario aborts the run with context naming it;
/// partial reports are worse than no report here.
pub fn run_scenarios(
    scenarios: &[Scenario],
    vehicles: &[Vehicle],
    totals: &EmissionTotals,
    costs: &CostBook,
) -> Result<Vec<ReportSheet>> {
    scenarios
        .iter()
        .map(|&scenario| {
            build_sheet(scenario, vehicles, totals, costs)
                .with_context(|| format!("scenario {} failed", scenario.id()))
        })
        .collect()
}

fn build_sheet(
    scenario: Scenario,
    vehicles: &[Vehicle],
    totals: &EmissionTotals,
    costs: &CostBook,
) -> Result<ReportSheet> {
    info!(scenario = scenario.id(), "evaluating scenario");

    let (filtered_totals, filtered_vehicles) = scenario.apply(totals, vehicles);
    let choices = find_optimal(&filtered_totals)?;

    let candidates = filter_better_co2(&filtered_vehicles, &choices);
    let (optimized, replaced) = optimize_big(
        &candidates,
        choices.co2_for(Category::Big),
        choices.co2_for(Category::Medium),
    );
    debug!(
        scenario = scenario.id(),
        candidates = optimized.len(),
        reassigned = replaced.len(),
        "improvement candidates selected"
    );

    let mut rows: Vec<SheetRow> = optimized
        .iter()
        .map(|v| {
            let mut row = SheetRow::from_vehicle(v);
            row.new_co2 = choices.co2_for(v.category);
            row.new_fuel = row
                .new_co2
                .and_then(|co2| choices.fuel_for_co2(co2))
                .map(str::to_owned);
            row
        })
        .collect();

    assign_costs(&mut rows, costs, scenario.is_cost_scenario());

    // The reassignment is simulation-internal; the sheet shows the vans
    // under their real category again.
    for row in &mut rows {
        if replaced.contains(&row.license_nbr) {
            row.category = Category::Big;
        }
    }

    if scenario.is_cost_scenario() {
        refine_cost_scenario(scenario, &mut rows, costs, totals)?;
    }

    let candidate_count = rows.len();
    let mut merged = merge_into_fleet(vehicles, &rows);
    assign_costs(&mut merged, costs, scenario.is_cost_scenario());

    Ok(ReportSheet {
        scenario,
        rows: merged,
        candidates: candidate_count,
        reassigned: replaced.len(),
    })
}

/// Merge scenario rows back over the full fleet, keyed by license number.
///
/// Original vehicle columns always win; scenario-derived columns attach
/// only where the scenario produced a row. Fleet order is preserved.
fn merge_into_fleet(vehicles: &[Vehicle], rows: &[SheetRow]) -> Vec<SheetRow> {
    let by_id: HashMap<&str, &SheetRow> =
        rows.iter().map(|r| (r.license_nbr.as_str(), r)).collect();

    vehicles
        .iter()
        .map(|v| {
            let mut row = SheetRow::from_vehicle(v);
            if let Some(update) = by_id.get(v.license_nbr.as_str()) {
                row.new_co2 = update.new_co2;
                row.new_fuel = update.new_fuel.clone();
                row.brand_cost = update.brand_cost;
                row.new_fuel_cost = update.new_fuel_cost;
                row.new_cost_fuel = update.new_cost_fuel.clone();
                row.new_cost_fuel_co2 = update.new_cost_fuel_co2;
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(license: &str, co2: f64) -> Vehicle {
        Vehicle {
            license_nbr: license.to_owned(),
            brand: "VW CADDY".to_owned(),
            year: 2012,
            driver: "A Driver".to_owned(),
            region: "SYD".to_owned(),
            consumption: 5.0,
            co2,
            fuel: "Konventionell diesel".to_owned(),
            category: Category::Small,
        }
    }

    #[test]
    fn merge_keeps_fleet_order_and_original_columns() {
        let fleet = vec![vehicle("V1", 120.0), vehicle("V2", 90.0)];
        let mut scenario_row = SheetRow::from_vehicle(&fleet[1]);
        scenario_row.co2 = 0.0; // scenario-side mutation must not leak
        scenario_row.new_co2 = Some(50.0);
        scenario_row.new_fuel = Some("B".to_owned());

        let merged = merge_into_fleet(&fleet, &[scenario_row]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].license_nbr, "V1");
        assert_eq!(merged[0].new_co2, None);
        assert_eq!(merged[1].co2, 90.0, "original CO2 wins over scenario copy");
        assert_eq!(merged[1].new_co2, Some(50.0));
        assert_eq!(merged[1].new_fuel.as_deref(), Some("B"));
    }
}
